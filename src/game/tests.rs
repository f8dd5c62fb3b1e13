use super::*;
use crate::game::setup::{full_deck, DECK_SIZE};

fn c(code: &str) -> Card {
    let mut chars = code.chars();
    let rank = rank_from_label(chars.next().expect("rank char")).expect("rank");
    let suit = Suit::from_short(chars.next().expect("suit char")).expect("suit");
    Card { suit, rank }
}

fn pile(codes: &str) -> Vec<Card> {
    codes.split_whitespace().map(c).collect()
}

fn board_from(
    deck: Vec<Card>,
    cells: Vec<Option<Card>>,
    foundations: [Option<Card>; 4],
    cascades: Vec<Vec<Card>>,
) -> Board {
    Board::from_parts_unchecked(BoardConfig::default(), deck, cells, foundations, cascades)
}

fn empty_board() -> Board {
    board_from(Vec::new(), vec![None; 4], [None; 4], vec![Vec::new(); 8])
}

fn dealt(seed: u32) -> Board {
    Board::new()
        .shuffle(seed)
        .expect("fresh board holds a full deck")
        .deal_all()
}

#[test]
fn new_board_has_ordered_deck_and_empty_zones() {
    let board = Board::new();

    assert_eq!(board.deck().len(), DECK_SIZE);
    assert_eq!(board.deck()[0], c("AC"));
    assert_eq!(board.deck()[1], c("AD"));
    assert_eq!(board.deck()[51], c("KS"));
    assert!(board.cells().iter().all(Option::is_none));
    assert!(board.foundations().iter().all(Option::is_none));
    assert!(board.cascades().iter().all(Vec::is_empty));
    assert_eq!(board.cursor(), Location::Cell(0));
    assert_eq!(board.previous_action().kind, ActionKind::Init);
    assert!(board.history().is_empty());
    assert!(!board.is_won());
}

#[test]
fn full_deck_holds_every_card_once() {
    let deck = full_deck();
    let mut seen = std::collections::HashSet::new();
    for card in &deck {
        assert!((1..=13).contains(&card.rank));
        assert!(seen.insert((card.suit, card.rank)));
    }
    assert_eq!(seen.len(), DECK_SIZE);
}

#[test]
fn seed_one_deal_matches_published_layout() {
    let board = dealt(1);

    assert_eq!(board.cascades()[0], pile("JD KD 2S 4C 3S 6D 6S"));
    assert_eq!(board.cascades()[1], pile("2D KC KS 5C TD 8S 9C"));
    assert_eq!(board.cascades()[2], pile("9H 9S 9D TS 4S 8D 2H"));
    assert_eq!(board.cascades()[3], pile("JC 5S QD QH TH QS 6H"));
    assert_eq!(board.cascades()[4], pile("5D AD JS 4H 8H 6C"));
    assert_eq!(board.cascades()[5], pile("7H QC AS AC 2C 3D"));
    assert_eq!(board.cascades()[6], pile("7C KH AH 4D JH 8C"));
    assert_eq!(board.cascades()[7], pile("5H 3H 3C 7S 7D TC"));
}

#[test]
fn shuffle_is_deterministic_and_seed_sensitive() {
    let a = Board::new().shuffle(617).expect("full deck");
    let b = Board::new().shuffle(617).expect("full deck");
    let d = Board::new().shuffle(618).expect("full deck");

    assert_eq!(a.deck(), b.deck());
    assert_ne!(a.deck(), d.deck());
}

#[test]
fn shuffle_records_seed_in_action_and_history() {
    let board = Board::new().shuffle(11982).expect("full deck");

    assert_eq!(board.previous_action().text, "shuffle deck (11982)");
    assert_eq!(board.previous_action().kind, ActionKind::Shuffle);
    assert_eq!(board.history(), ["shuffle deck (11982)"]);
}

#[test]
fn shuffle_rejects_partial_deck() {
    let dealt = dealt(1);
    assert!(matches!(
        dealt.shuffle(1),
        Err(EngineError::InvalidState(_))
    ));
    assert!(matches!(
        empty_board().shuffle(1),
        Err(EngineError::InvalidState(_))
    ));
}

#[test]
fn shuffle_rejects_duplicate_cards() {
    let mut deck = full_deck();
    deck[0] = deck[1];
    let board = board_from(deck, vec![None; 4], [None; 4], vec![Vec::new(); 8]);

    assert!(matches!(board.shuffle(7), Err(EngineError::InvalidState(_))));
}

#[test]
fn deal_round_robins_the_full_deck() {
    let board = dealt(1);

    let lengths: Vec<usize> = board.cascades().iter().map(Vec::len).collect();
    assert_eq!(lengths, [7, 7, 7, 7, 6, 6, 6, 6]);
    assert!(board.deck().is_empty());
    assert_eq!(board.previous_action().text, "deal all cards");
    assert_eq!(
        board.history(),
        ["shuffle deck (1)", "deal all cards"]
    );
}

#[test]
fn deal_round_robins_partial_decks() {
    let board = board_from(
        pile("2H 9S QD"),
        vec![None; 4],
        [None; 4],
        vec![Vec::new(); 8],
    )
    .deal_all();

    // The deck top is the vector end, so QD lands first.
    assert_eq!(board.cascades()[0], pile("QD"));
    assert_eq!(board.cascades()[1], pile("9S"));
    assert_eq!(board.cascades()[2], pile("2H"));
    assert!(board.cascades()[3..].iter().all(Vec::is_empty));
    assert!(board.deck().is_empty());
}

#[test]
fn deal_on_an_empty_deck_is_a_noop() {
    let board = empty_board();
    assert_eq!(board.deal_all(), board);
}

#[test]
fn dealt_board_conserves_every_card() {
    let board = dealt(617);

    let mut seen = std::collections::HashSet::new();
    for pile in board.cascades() {
        for card in pile {
            assert!(seen.insert((card.suit, card.rank)));
        }
    }
    assert_eq!(seen.len(), DECK_SIZE);
}

#[test]
fn cell_moves_require_single_card_and_empty_cell() {
    let board = board_from(
        Vec::new(),
        vec![Some(c("KD")), None, None, None],
        [None; 4],
        {
            let mut cascades = vec![Vec::new(); 8];
            cascades[0] = pile("9H 8S 7D");
            cascades
        },
    );

    let run = board
        .sequence_at(Location::Cascade { col: 0, row: 0 })
        .expect("run");
    let single = board
        .sequence_at(Location::Cascade { col: 0, row: 2 })
        .expect("single");

    assert!(!board.can_move_to(&run, Location::Cell(1)));
    assert!(board.can_move_to(&single, Location::Cell(1)));
    assert!(!board.can_move_to(&single, Location::Cell(0)));
}

#[test]
fn foundation_moves_require_ascending_same_suit() {
    let board = board_from(Vec::new(), vec![None; 4], [None, None, Some(c("AH")), None], {
        let mut cascades = vec![Vec::new(); 8];
        cascades[0] = pile("2H");
        cascades[1] = pile("2S");
        cascades[2] = pile("3H");
        cascades
    });

    assert!(board.can_place_on_foundation(c("2H")));
    assert!(!board.can_place_on_foundation(c("3H")));
    assert!(!board.can_place_on_foundation(c("2S")));
    assert!(board.can_place_on_foundation(c("AD")));
}

#[test]
fn cascade_moves_require_descending_alternating_color() {
    let board = board_from(Vec::new(), vec![None; 4], [None; 4], {
        let mut cascades = vec![Vec::new(); 8];
        cascades[0] = pile("7D");
        cascades[1] = pile("8H");
        cascades[2] = pile("8S");
        cascades
    });

    let seven = board
        .sequence_at(Location::Cascade { col: 0, row: 0 })
        .expect("seven");

    // Red seven on a red eight is rejected; on a black eight it stacks.
    assert!(!board.can_move_to(&seven, Location::Cascade { col: 1, row: 0 }));
    assert!(board.can_move_to(&seven, Location::Cascade { col: 2, row: 0 }));
    assert!(board.can_move_to(&seven, Location::Cascade { col: 3, row: 0 }));
}

#[test]
fn sequence_at_flags_broken_runs_as_unmovable() {
    let board = board_from(Vec::new(), vec![None; 4], [None; 4], {
        let mut cascades = vec![Vec::new(); 8];
        cascades[0] = pile("9H 8S 7D");
        cascades[1] = pile("2H 9S");
        cascades
    });

    let run = board
        .sequence_at(Location::Cascade { col: 0, row: 0 })
        .expect("run");
    assert!(run.can_move);
    assert_eq!(run.cards, pile("9H 8S 7D"));

    let broken = board
        .sequence_at(Location::Cascade { col: 1, row: 0 })
        .expect("broken");
    assert!(!broken.can_move);

    let top = board
        .sequence_at(Location::Cascade { col: 1, row: 1 })
        .expect("top");
    assert!(top.can_move);
    assert!(board.sequence_at(Location::Cascade { col: 2, row: 0 }).is_none());
}

#[test]
fn supermove_capacity_counts_cells_and_empty_cascades() {
    let board = empty_board();
    assert_eq!(board.supermove_capacity(None), 5 * 256);
    // The empty destination cannot also provide capacity.
    assert_eq!(board.supermove_capacity(Some(0)), 5 * 128);

    let tighter = board_from(
        Vec::new(),
        vec![Some(c("JC")), Some(c("JD")), None, None],
        [None; 4],
        {
            let mut cascades = vec![Vec::new(); 8];
            cascades[0] = pile("KC");
            cascades[1] = pile("KD");
            cascades[2] = pile("KH");
            cascades[3] = pile("KS");
            cascades
        },
    );
    assert_eq!(tighter.supermove_capacity(None), 3 * 16);
    assert_eq!(tighter.supermove_capacity(Some(4)), 3 * 8);
    assert_eq!(tighter.supermove_capacity(Some(0)), 3 * 16);
}

#[test]
fn supermove_capacity_bounds_run_length() {
    let full_cells = vec![Some(c("JC")), Some(c("JD")), Some(c("JH")), Some(c("JS"))];
    let cascades = {
        let mut cascades = vec![Vec::new(); 8];
        cascades[0] = pile("5H 4S 3D 2C");
        cascades[1] = pile("6S");
        cascades[2] = pile("KC");
        cascades[3] = pile("KD");
        cascades[4] = pile("KH");
        cascades[5] = pile("KS");
        cascades[6] = pile("QC");
        cascades[7] = pile("QD");
        cascades
    };

    let cramped = board_from(Vec::new(), full_cells, [None; 4], cascades.clone());
    let run = cramped
        .sequence_at(Location::Cascade { col: 0, row: 0 })
        .expect("run");
    assert!(run.can_move);
    assert!(!cramped.can_move_to(&run, Location::Cascade { col: 1, row: 0 }));

    let three_free = vec![Some(c("JC")), None, None, None];
    let roomy = board_from(Vec::new(), three_free, [None; 4], cascades);
    let run = roomy
        .sequence_at(Location::Cascade { col: 0, row: 0 })
        .expect("run");
    assert_eq!(roomy.supermove_capacity(Some(1)), 4);
    assert!(roomy.can_move_to(&run, Location::Cascade { col: 1, row: 0 }));
}

#[test]
fn available_moves_lists_every_legal_destination() {
    let board = board_from(Vec::new(), vec![None; 4], [None; 4], {
        let mut cascades = vec![Vec::new(); 8];
        cascades[0] = pile("AS");
        cascades
    });

    let ace = board
        .sequence_at(Location::Cascade { col: 0, row: 0 })
        .expect("ace");
    let moves = board.available_moves(&ace);

    // Four cells, the spades foundation, and the seven other columns.
    assert_eq!(moves.len(), 12);
    assert!(moves.contains(&Location::Foundation(3)));
    assert!(moves.contains(&Location::Cell(0)));
    assert!(!moves.contains(&Location::Cascade { col: 0, row: 0 }));
}

#[test]
fn win_requires_a_king_on_every_foundation() {
    let almost = board_from(
        Vec::new(),
        vec![None; 4],
        [Some(c("KC")), Some(c("KD")), Some(c("KH")), Some(c("QS"))],
        vec![Vec::new(); 8],
    );
    assert!(!almost.is_won());

    let won = board_from(
        Vec::new(),
        vec![None; 4],
        [Some(c("KC")), Some(c("KD")), Some(c("KH")), Some(c("KS"))],
        vec![Vec::new(); 8],
    );
    assert!(won.is_won());
    assert!(!won.win_is_flourish());
}

#[test]
fn rank_labels_round_trip() {
    assert_eq!(rank_label(1), "A");
    assert_eq!(rank_label(10), "T");
    assert_eq!(rank_label(13), "K");
    assert_eq!(rank_label(99), "?");
    for rank in 1..=13 {
        let label = rank_label(rank).chars().next().expect("label");
        assert_eq!(rank_from_label(label), Some(rank));
    }
    assert_eq!(rank_from_label('X'), None);
}

#[test]
fn config_limits_follow_the_code_space() {
    assert!(BoardConfig::default().validate().is_ok());
    assert!(BoardConfig { cells: 6, cascades: 10 }.validate().is_ok());
    assert!(BoardConfig { cells: 0, cascades: 8 }.validate().is_err());
    assert!(BoardConfig { cells: 7, cascades: 8 }.validate().is_err());
    assert!(BoardConfig { cells: 4, cascades: 11 }.validate().is_err());
}
