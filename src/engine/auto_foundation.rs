//! Automatic promotion to the foundations.
//!
//! A pass repeatedly promotes qualifying cards until none remain and records
//! the whole run as one compound history entry. The limit decides how far a
//! pass may run past the rank that was lagging when it started; each limit
//! promotes a superset of the stricter ones.

use crate::game::{ActionKind, Board, Card, Location, Suit};

use super::notation::{location_code, msg_auto_foundation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoundationLimit {
    /// Promote anything immediately legal.
    None,
    /// Two past the lagging rank once both opposite-color cards of the
    /// rank between are up; a same-color pair dependency can never strand.
    RankPlusOneAndHalf,
    /// Two past the lagging rank, but only after every card of the rank
    /// between is up.
    RankPlusOne,
    /// Never more than one past the lagging rank.
    CurrentRank,
}

impl FoundationLimit {
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::RankPlusOneAndHalf => "current rank + 1.5",
            Self::RankPlusOne => "current rank + 1",
            Self::CurrentRank => "current rank",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "none" => Some(Self::None),
            "current rank + 1.5" => Some(Self::RankPlusOneAndHalf),
            "current rank + 1" => Some(Self::RankPlusOne),
            "current rank" => Some(Self::CurrentRank),
            _ => None,
        }
    }
}

/// Scan order only; both methods reach the same fixpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMethod {
    CellCascade,
    Foundation,
}

impl ScanMethod {
    pub fn id(self) -> &'static str {
        match self {
            Self::CellCascade => "cell,cascade",
            Self::Foundation => "foundation",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "cell,cascade" => Some(Self::CellCascade),
            "foundation" => Some(Self::Foundation),
            _ => None,
        }
    }
}

/// The lowest rank showing across the foundations, 0 for an empty slot.
pub fn min_foundation_rank(board: &Board) -> u8 {
    Suit::ALL
        .iter()
        .map(|suit| board.foundation_top_rank(*suit))
        .min()
        .unwrap_or(0)
}

fn opposite_color_min(board: &Board, card: Card) -> u8 {
    Suit::ALL
        .iter()
        .filter(|suit| suit.is_red() != card.suit.is_red())
        .map(|suit| board.foundation_top_rank(*suit))
        .min()
        .unwrap_or(0)
}

fn all_foundations_at_least(board: &Board, rank: u8) -> bool {
    Suit::ALL
        .iter()
        .all(|suit| board.foundation_top_rank(*suit) >= rank)
}

/// Whether `card` is both legal and inside the limit window. `pass_rank` is
/// the lagging foundation rank frozen when the pass started; "current rank"
/// means current at invocation, not after each promotion.
pub fn qualifies(board: &Board, card: Card, limit: FoundationLimit, pass_rank: u8) -> bool {
    if !board.can_place_on_foundation(card) {
        return false;
    }
    let rank = card.rank;
    if rank <= pass_rank + 1 {
        return true;
    }
    match limit {
        FoundationLimit::None => true,
        FoundationLimit::CurrentRank => false,
        FoundationLimit::RankPlusOne => {
            rank <= pass_rank + 2 && all_foundations_at_least(board, rank - 1)
        }
        FoundationLimit::RankPlusOneAndHalf => {
            rank <= pass_rank + 2 && opposite_color_min(board, card) >= rank - 1
        }
    }
}

fn find_cell_cascade(board: &Board, limit: FoundationLimit, pass_rank: u8) -> Option<Location> {
    for (index, slot) in board.cells().iter().enumerate() {
        if slot.is_some_and(|card| qualifies(board, card, limit, pass_rank)) {
            return Some(Location::Cell(index));
        }
    }
    for col in 0..board.cascades().len() {
        if board
            .cascade_top(col)
            .is_some_and(|card| qualifies(board, card, limit, pass_rank))
        {
            let row = board.cascades()[col].len() - 1;
            return Some(Location::Cascade { col, row });
        }
    }
    None
}

fn find_for_foundation(board: &Board, limit: FoundationLimit, pass_rank: u8) -> Option<Location> {
    for suit in Suit::ALL {
        let wanted = Card {
            suit,
            rank: board.foundation_top_rank(suit) + 1,
        };
        if wanted.rank > 13 || !qualifies(board, wanted, limit, pass_rank) {
            continue;
        }
        for (index, slot) in board.cells().iter().enumerate() {
            if *slot == Some(wanted) {
                return Some(Location::Cell(index));
            }
        }
        for col in 0..board.cascades().len() {
            if board.cascade_top(col) == Some(wanted) {
                let row = board.cascades()[col].len() - 1;
                return Some(Location::Cascade { col, row });
            }
        }
    }
    None
}

/// Promotes until nothing qualifies, as one compound action. A pass that
/// promotes nothing returns the board unchanged.
pub fn auto_foundation_all(board: &Board, limit: FoundationLimit, method: ScanMethod) -> Board {
    let pass_rank = min_foundation_rank(board);
    let mut next = board.clone();
    let mut sources = String::new();
    let mut promoted: Vec<Card> = Vec::new();

    loop {
        let found = match method {
            ScanMethod::CellCascade => find_cell_cascade(&next, limit, pass_rank),
            ScanMethod::Foundation => find_for_foundation(&next, limit, pass_rank),
        };
        let Some(location) = found else {
            break;
        };
        let Some(sequence) = next.sequence_at(location) else {
            break;
        };
        let card = sequence.first();
        sources.push(location_code(location).unwrap_or('?'));
        next.apply_move(
            &sequence,
            Location::Foundation(card.suit.foundation_index()),
        );
        promoted.push(card);
    }

    if promoted.is_empty() {
        return board.clone();
    }
    if next.is_won() {
        next.win_is_flourish = true;
    }
    next.record(ActionKind::Move, msg_auto_foundation(&sources, &promoted));
    next
}
