use rand::Rng;

use super::board::Board;
use super::types::{ActionKind, BoardConfig, Card, EngineError, Location, PreviousAction, Suit};

pub const DECK_SIZE: usize = 52;

/// The range classic numbered deals are drawn from.
pub const SEED_RANGE: std::ops::RangeInclusive<u32> = 1..=32000;

/// A fresh deck in dealing order: rank-major, suit-minor
/// (AC AD AH AS 2C 2D ... KS). Index 51 is the first card dealt.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for index in 0..DECK_SIZE {
        deck.push(Card {
            suit: Suit::ALL[index % 4],
            rank: (index / 4) as u8 + 1,
        });
    }
    deck
}

/// The published deal-numbering permutation. Must match bit for bit: the
/// same seed has identified the same deal since the original 1..32000 set.
fn ms_shuffle(deck: &mut [Card], seed: u32) {
    let mut state = seed;
    let mut i = deck.len();
    while i > 0 {
        state = state.wrapping_mul(214_013).wrapping_add(2_531_011) & 0x7fff_ffff;
        let idx = (state >> 16) as usize % i;
        deck.swap(idx, i - 1);
        i -= 1;
    }
}

impl Board {
    pub fn new() -> Self {
        Self::from_config_unchecked(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::from_config_unchecked(config))
    }

    fn from_config_unchecked(config: BoardConfig) -> Self {
        Board {
            config,
            deck: full_deck(),
            cells: vec![None; config.cells],
            foundations: [None; 4],
            cascades: vec![Vec::new(); config.cascades],
            cursor: Location::Cell(0),
            selection: None,
            previous_action: PreviousAction::new(ActionKind::Init, "init"),
            history: Vec::new(),
            win: false,
            win_is_flourish: false,
        }
    }

    /// Permutes the undealt deck. Shuffling anything but one complete
    /// 52-card deck is a programmer error, not gameplay.
    pub fn shuffle(&self, seed: u32) -> Result<Self, EngineError> {
        self.require_full_deck()?;
        let mut next = self.clone();
        ms_shuffle(&mut next.deck, seed);
        next.selection = None;
        next.record(ActionKind::Shuffle, format!("shuffle deck ({seed})"));
        Ok(next)
    }

    pub fn shuffle_random(&self) -> Result<Self, EngineError> {
        let seed = rand::thread_rng().gen_range(SEED_RANGE);
        self.shuffle(seed)
    }

    fn require_full_deck(&self) -> Result<(), EngineError> {
        if self.deck.len() != DECK_SIZE {
            return Err(EngineError::InvalidState(format!(
                "shuffle requires a full {DECK_SIZE}-card deck, found {}",
                self.deck.len()
            )));
        }
        let mut seen = [false; DECK_SIZE];
        for card in &self.deck {
            let slot = card.suit.foundation_index() * 13 + usize::from(card.rank - 1);
            if seen[slot] {
                return Err(EngineError::InvalidState(format!(
                    "shuffle requires distinct cards, found duplicate {}",
                    card.label()
                )));
            }
            seen[slot] = true;
        }
        Ok(())
    }

    /// Deals the whole deck onto the cascades round-robin. Partial decks
    /// (hand-authored boards) deal the same way; an empty deck is a no-op.
    pub fn deal_all(&self) -> Self {
        if self.deck.is_empty() {
            return self.clone();
        }
        let mut next = self.clone();
        let mut column = 0;
        while let Some(card) = next.deck.pop() {
            next.cascades[column].push(card);
            column = (column + 1) % next.config.cascades;
        }
        next.selection = None;
        next.record(ActionKind::Deal, "deal all cards");
        next
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
