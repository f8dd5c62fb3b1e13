use super::rank_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn short(self) -> &'static str {
        match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        }
    }

    pub fn from_short(label: char) -> Option<Self> {
        match label {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn foundation_index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
}

impl Card {
    pub fn label(&self) -> String {
        format!("{}{}", rank_label(self.rank), self.suit.short())
    }

    pub fn color_red(&self) -> bool {
        self.suit.is_red()
    }
}

/// Which zone of the board a location points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixture {
    Deck,
    Cell,
    Foundation,
    Cascade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Deck(usize),
    Cell(usize),
    Foundation(usize),
    Cascade { col: usize, row: usize },
}

impl Location {
    pub fn fixture(self) -> Fixture {
        match self {
            Location::Deck(_) => Fixture::Deck,
            Location::Cell(_) => Fixture::Cell,
            Location::Foundation(_) => Fixture::Foundation,
            Location::Cascade { .. } => Fixture::Cascade,
        }
    }
}

/// A contiguous movable unit: a single card, or a cascade run descending by
/// one rank with alternating color. `can_move` is false for peek selections
/// (foundation inspection after a win).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSequence {
    pub location: Location,
    pub cards: Vec<Card>,
    pub can_move: bool,
}

impl CardSequence {
    pub fn first(&self) -> Card {
        self.cards[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Init,
    Shuffle,
    Deal,
    Cursor,
    Select,
    Deselect,
    Move,
    Invalid,
}

impl ActionKind {
    pub fn id(self) -> &'static str {
        match self {
            ActionKind::Init => "init",
            ActionKind::Shuffle => "shuffle",
            ActionKind::Deal => "deal",
            ActionKind::Cursor => "cursor",
            ActionKind::Select => "select",
            ActionKind::Deselect => "deselect",
            ActionKind::Move => "move",
            ActionKind::Invalid => "invalid",
        }
    }

    /// Kinds that survive in `Board::history` and can be replayed.
    pub fn is_replayable(self) -> bool {
        matches!(
            self,
            ActionKind::Shuffle | ActionKind::Deal | ActionKind::Move
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousAction {
    pub text: String,
    pub kind: ActionKind,
}

impl PreviousAction {
    pub fn new(kind: ActionKind, text: impl Into<String>) -> Self {
        PreviousAction {
            kind,
            text: text.into(),
        }
    }
}

/// Zone sizes. The defaults are classic FreeCell; the limits come from the
/// shorthand code space (cells `a`..`f`, cascades `1`..`9` then `0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub cells: usize,
    pub cascades: usize,
}

pub const MAX_CELLS: usize = 6;
pub const MAX_CASCADES: usize = 10;

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            cells: 4,
            cascades: 8,
        }
    }
}

impl BoardConfig {
    pub fn validate(self) -> Result<(), EngineError> {
        if self.cells == 0 || self.cells > MAX_CELLS {
            return Err(EngineError::InvalidState(format!(
                "cell count {} outside 1..={MAX_CELLS}",
                self.cells
            )));
        }
        if self.cascades == 0 || self.cascades > MAX_CASCADES {
            return Err(EngineError::InvalidState(format!(
                "cascade count {} outside 1..={MAX_CASCADES}",
                self.cascades
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("no catalog entry for seed {0}")]
    UnknownCatalogSeed(u32),
}
