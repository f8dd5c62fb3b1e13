use super::types::{
    ActionKind, BoardConfig, Card, CardSequence, Location, PreviousAction, Suit,
};

/// One immutable snapshot of a game. Every public operation returns a fresh
/// snapshot; mutation happens only inside crate-private helpers on a working
/// copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) config: BoardConfig,
    pub(crate) deck: Vec<Card>,
    pub(crate) cells: Vec<Option<Card>>,
    /// Top card per suit foundation, index = `Suit::foundation_index`.
    pub(crate) foundations: [Option<Card>; 4],
    pub(crate) cascades: Vec<Vec<Card>>,
    pub(crate) cursor: Location,
    pub(crate) selection: Option<CardSequence>,
    pub(crate) previous_action: PreviousAction,
    /// Replayable action lines, oldest first. The authority for undo.
    pub(crate) history: Vec<String>,
    pub(crate) win: bool,
    pub(crate) win_is_flourish: bool,
}

impl Board {
    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn cells(&self) -> &[Option<Card>] {
        &self.cells
    }

    pub fn foundations(&self) -> &[Option<Card>; 4] {
        &self.foundations
    }

    pub fn cascades(&self) -> &[Vec<Card>] {
        &self.cascades
    }

    pub fn cursor(&self) -> Location {
        self.cursor
    }

    pub fn selection(&self) -> Option<&CardSequence> {
        self.selection.as_ref()
    }

    pub fn previous_action(&self) -> &PreviousAction {
        &self.previous_action
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn is_won(&self) -> bool {
        self.win
    }

    pub fn win_is_flourish(&self) -> bool {
        self.win_is_flourish
    }

    pub fn foundation_top_rank(&self, suit: Suit) -> u8 {
        self.foundations[suit.foundation_index()]
            .map(|card| card.rank)
            .unwrap_or(0)
    }

    pub fn cascade_top(&self, col: usize) -> Option<Card> {
        self.cascades.get(col).and_then(|pile| pile.last().copied())
    }

    pub fn card_at(&self, location: Location) -> Option<Card> {
        match location {
            Location::Deck(index) => self.deck.get(index).copied(),
            Location::Cell(index) => self.cells.get(index).copied().flatten(),
            Location::Foundation(index) => self.foundations.get(index).copied().flatten(),
            Location::Cascade { col, row } => {
                self.cascades.get(col).and_then(|pile| pile.get(row)).copied()
            }
        }
    }

    /// Where a card currently sits. Cards buried inside a foundation have no
    /// location; only the foundation top is addressable.
    pub fn location_of(&self, card: Card) -> Option<Location> {
        for (index, deck_card) in self.deck.iter().enumerate() {
            if *deck_card == card {
                return Some(Location::Deck(index));
            }
        }
        for (index, slot) in self.cells.iter().enumerate() {
            if *slot == Some(card) {
                return Some(Location::Cell(index));
            }
        }
        for (index, slot) in self.foundations.iter().enumerate() {
            if *slot == Some(card) {
                return Some(Location::Foundation(index));
            }
        }
        for (col, pile) in self.cascades.iter().enumerate() {
            for (row, pile_card) in pile.iter().enumerate() {
                if *pile_card == card {
                    return Some(Location::Cascade { col, row });
                }
            }
        }
        None
    }

    /// The sequence a touch at `location` would pick up, if any. `can_move`
    /// reflects run validity; foundations and the deck are peek-only.
    pub fn sequence_at(&self, location: Location) -> Option<CardSequence> {
        match location {
            Location::Cell(index) => {
                let card = self.cells.get(index).copied().flatten()?;
                Some(CardSequence {
                    location,
                    cards: vec![card],
                    can_move: !self.win,
                })
            }
            Location::Foundation(index) => {
                let card = self.foundations.get(index).copied().flatten()?;
                Some(CardSequence {
                    location,
                    cards: vec![card],
                    can_move: false,
                })
            }
            Location::Cascade { col, row } => {
                let pile = self.cascades.get(col)?;
                if row >= pile.len() {
                    return None;
                }
                let cards = pile[row..].to_vec();
                let can_move = !self.win && is_descending_alternating_run(&cards);
                Some(CardSequence {
                    location,
                    cards,
                    can_move,
                })
            }
            Location::Deck(index) => {
                let card = self.deck.get(index).copied()?;
                Some(CardSequence {
                    location,
                    cards: vec![card],
                    can_move: false,
                })
            }
        }
    }

    pub fn free_cell_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn empty_cascade_count(&self) -> usize {
        self.cascades.iter().filter(|pile| pile.is_empty()).count()
    }

    /// How many cards may move as one unit. An empty destination cascade
    /// cannot both provide capacity and be the target, so it is excluded.
    pub fn supermove_capacity(&self, dst: Option<usize>) -> usize {
        let free = self.free_cell_count();
        let mut empty = self.empty_cascade_count();
        if let Some(dst) = dst {
            if self.cascades.get(dst).is_some_and(|pile| pile.is_empty()) {
                empty = empty.saturating_sub(1);
            }
        }
        (free + 1) * (1_usize << empty)
    }

    pub fn can_place_on_foundation(&self, card: Card) -> bool {
        match self.foundations[card.suit.foundation_index()] {
            None => card.rank == 1,
            Some(top) => top.rank + 1 == card.rank,
        }
    }

    pub fn can_place_on_cascade(&self, card: Card, dst: usize) -> bool {
        match self.cascade_top(dst) {
            None => self.cascades.get(dst).is_some(),
            Some(top) => top.rank == card.rank + 1 && top.color_red() != card.color_red(),
        }
    }

    /// Full legality of moving `sequence` to `target`, including supermove
    /// capacity. Foundation targets are resolved to the card's own suit.
    pub fn can_move_to(&self, sequence: &CardSequence, target: Location) -> bool {
        if !sequence.can_move || self.win {
            return false;
        }
        match target {
            Location::Deck(_) => false,
            Location::Cell(index) => {
                sequence.cards.len() == 1
                    && self.cells.get(index).is_some_and(|slot| slot.is_none())
            }
            Location::Foundation(_) => {
                sequence.cards.len() == 1 && self.can_place_on_foundation(sequence.first())
            }
            Location::Cascade { col, .. } => {
                if let Location::Cascade { col: src, .. } = sequence.location {
                    if src == col {
                        return false;
                    }
                }
                self.can_place_on_cascade(sequence.first(), col)
                    && sequence.cards.len() <= self.supermove_capacity(Some(col))
            }
        }
    }

    /// Every legal destination for a sequence. No tie-breaking; callers
    /// decide among multiple hits.
    pub fn available_moves(&self, sequence: &CardSequence) -> Vec<Location> {
        let mut moves = Vec::new();
        for index in 0..self.cells.len() {
            let target = Location::Cell(index);
            if self.can_move_to(sequence, target) {
                moves.push(target);
            }
        }
        let foundation = Location::Foundation(sequence.first().suit.foundation_index());
        if self.can_move_to(sequence, foundation) {
            moves.push(foundation);
        }
        for col in 0..self.cascades.len() {
            let target = Location::Cascade { col, row: 0 };
            if self.can_move_to(sequence, target) {
                moves.push(target);
            }
        }
        moves
    }

    /// Zone surgery for an already-validated move. Returns where the first
    /// moved card landed. Clears the selection and refreshes win flags.
    pub(crate) fn apply_move(&mut self, sequence: &CardSequence, target: Location) -> Location {
        match sequence.location {
            Location::Cell(index) => self.cells[index] = None,
            Location::Cascade { col, row } => self.cascades[col].truncate(row),
            Location::Foundation(_) | Location::Deck(_) => {}
        }
        self.selection = None;
        let landed = match target {
            Location::Cell(index) => {
                self.cells[index] = Some(sequence.first());
                Location::Cell(index)
            }
            Location::Foundation(_) => {
                let index = sequence.first().suit.foundation_index();
                self.foundations[index] = Some(sequence.first());
                Location::Foundation(index)
            }
            Location::Cascade { col, .. } => {
                let row = self.cascades[col].len();
                self.cascades[col].extend(sequence.cards.iter().copied());
                Location::Cascade { col, row }
            }
            Location::Deck(index) => Location::Deck(index),
        };
        self.refresh_win();
        landed
    }

    pub(crate) fn refresh_win(&mut self) {
        self.win = self
            .foundations
            .iter()
            .all(|slot| slot.is_some_and(|card| card.rank == 13));
    }

    pub(crate) fn record(&mut self, kind: ActionKind, text: impl Into<String>) {
        let text = text.into();
        if kind.is_replayable() {
            self.history.push(text.clone());
        }
        self.previous_action = PreviousAction::new(kind, text);
    }

    #[cfg(test)]
    pub(crate) fn from_parts_unchecked(
        config: BoardConfig,
        deck: Vec<Card>,
        cells: Vec<Option<Card>>,
        foundations: [Option<Card>; 4],
        cascades: Vec<Vec<Card>>,
    ) -> Self {
        let mut board = Board {
            config,
            deck,
            cells,
            foundations,
            cascades,
            cursor: Location::Cell(0),
            selection: None,
            previous_action: PreviousAction::new(ActionKind::Init, "init"),
            history: Vec::new(),
            win: false,
            win_is_flourish: false,
        };
        board.refresh_win();
        board
    }
}

pub fn is_descending_alternating_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| {
        let a = pair[0];
        let b = pair[1];
        a.rank == b.rank + 1 && a.color_red() != b.color_red()
    })
}
