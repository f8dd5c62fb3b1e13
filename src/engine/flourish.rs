//! Flourish search: how far a fresh deal resolves on auto-play alone.
//!
//! The only moves considered are eager legal promotions and stashing a
//! cascade top into a free cell, which is the branching choice. A position
//! is fully described by the foundation ranks plus the remaining column
//! lengths (the stashed cards are whatever was removed but not promoted),
//! so visited states memoize on that pair and the search stays well under
//! the naive branching tree.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::game::{Board, Card};

/// The longest promotion line reachable from a fresh deal, empty when no
/// promotion is reachable. Boards that already show a foundation card (or
/// still hold undealt cards) short-circuit to empty: a flourish is only
/// meaningful from the initial deal.
pub fn can_flourish(board: &Board) -> Vec<Card> {
    let Some(mut search) = FlourishSearch::from_board(board) else {
        return Vec::new();
    };
    search.run();
    search.best
}

/// The full 52-card line when the whole deal resolves on auto-play alone,
/// otherwise empty.
pub fn can_flourish52(board: &Board) -> Vec<Card> {
    let Some(mut search) = FlourishSearch::from_board(board) else {
        return Vec::new();
    };
    if search.total != 52 {
        return Vec::new();
    }
    search.run();
    if search.best.len() == search.total {
        search.best
    } else {
        Vec::new()
    }
}

struct FlourishSearch {
    columns: Vec<Vec<Card>>,
    cell_slots: usize,
    total: usize,
    seen: HashSet<u64>,
    best: Vec<Card>,
}

impl FlourishSearch {
    fn from_board(board: &Board) -> Option<Self> {
        if board.foundations().iter().any(|slot| slot.is_some()) {
            return None;
        }
        if !board.deck().is_empty() {
            return None;
        }
        let columns: Vec<Vec<Card>> = board.cascades().to_vec();
        let total = columns.iter().map(Vec::len).sum();
        Some(FlourishSearch {
            columns,
            cell_slots: board.config().cells,
            total,
            seen: HashSet::new(),
            best: Vec::new(),
        })
    }

    fn run(&mut self) {
        let lengths: Vec<usize> = self.columns.iter().map(Vec::len).collect();
        let held: Vec<Card> = Vec::new();
        self.visit([0; 4], lengths, held, Vec::new());
    }

    fn done(&self) -> bool {
        self.best.len() == self.total
    }

    fn visit(
        &mut self,
        mut foundations: [u8; 4],
        mut lengths: Vec<usize>,
        mut held: Vec<Card>,
        mut line: Vec<Card>,
    ) {
        self.promote_eagerly(&mut foundations, &mut lengths, &mut held, &mut line);

        if line.len() > self.best.len() {
            self.best = line.clone();
        }
        if self.done() {
            return;
        }
        if !self.seen.insert(state_key(&foundations, &lengths)) {
            return;
        }
        if held.len() >= self.cell_slots {
            return;
        }

        for col in 0..lengths.len() {
            if lengths[col] == 0 {
                continue;
            }
            let mut next_lengths = lengths.clone();
            next_lengths[col] -= 1;
            let mut next_held = held.clone();
            next_held.push(self.columns[col][lengths[col] - 1]);
            self.visit(foundations, next_lengths, next_held, line.clone());
            if self.done() {
                return;
            }
        }
    }

    /// Promotions are confluent: taking one never blocks another, so every
    /// legal one is applied before branching.
    fn promote_eagerly(
        &self,
        foundations: &mut [u8; 4],
        lengths: &mut [usize],
        held: &mut Vec<Card>,
        line: &mut Vec<Card>,
    ) {
        loop {
            let mut advanced = false;
            if let Some(index) = held
                .iter()
                .position(|card| promotable(foundations, *card))
            {
                let card = held.remove(index);
                foundations[card.suit.foundation_index()] = card.rank;
                line.push(card);
                advanced = true;
            }
            for col in 0..lengths.len() {
                if lengths[col] == 0 {
                    continue;
                }
                let card = self.columns[col][lengths[col] - 1];
                if promotable(foundations, card) {
                    lengths[col] -= 1;
                    foundations[card.suit.foundation_index()] = card.rank;
                    line.push(card);
                    advanced = true;
                }
            }
            if !advanced {
                break;
            }
        }
    }
}

fn promotable(foundations: &[u8; 4], card: Card) -> bool {
    foundations[card.suit.foundation_index()] + 1 == card.rank
}

fn state_key(foundations: &[u8; 4], lengths: &[usize]) -> u64 {
    let mut hasher = DefaultHasher::new();
    foundations.hash(&mut hasher);
    lengths.hash(&mut hasher);
    hasher.finish()
}
