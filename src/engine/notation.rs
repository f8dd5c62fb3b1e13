//! Shorthand codes and action text. Action strings do double duty: they
//! are the status line shown to the player and the structured record the
//! session codec stores and replays.

use crate::game::{rank_from_label, ActionKind, Board, BoardConfig, Card, Location, Suit};

pub const FOUNDATION_CODE: char = 'h';

pub fn parse_card_code(token: &str) -> Option<Card> {
    let mut chars = token.chars();
    let rank = rank_from_label(chars.next()?)?;
    let suit = Suit::from_short(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some(Card { suit, rank })
}

pub fn cards_code(cards: &[Card], separator: char) -> String {
    cards
        .iter()
        .map(|card| card.label())
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}

pub fn parse_cards_code(token: &str, separator: char) -> Option<Vec<Card>> {
    token.split(separator).map(parse_card_code).collect()
}

pub fn cell_code(index: usize) -> Option<char> {
    if index < 6 {
        Some((b'a' + index as u8) as char)
    } else {
        None
    }
}

pub fn cascade_code(col: usize) -> Option<char> {
    match col {
        0..=8 => Some((b'1' + col as u8) as char),
        9 => Some('0'),
        _ => None,
    }
}

pub fn location_code(location: Location) -> Option<char> {
    match location {
        Location::Cell(index) => cell_code(index),
        Location::Foundation(_) => Some(FOUNDATION_CODE),
        Location::Cascade { col, .. } => cascade_code(col),
        Location::Deck(_) => None,
    }
}

/// A parsed position code, before it is resolved against a concrete board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionTarget {
    Cell(usize),
    Foundation,
    Cascade(usize),
}

pub fn parse_position_code(code: char, config: BoardConfig) -> Option<PositionTarget> {
    match code {
        'a'..='f' => {
            let index = (code as u8 - b'a') as usize;
            (index < config.cells).then_some(PositionTarget::Cell(index))
        }
        FOUNDATION_CODE => Some(PositionTarget::Foundation),
        '1'..='9' => {
            let col = (code as u8 - b'1') as usize;
            (col < config.cascades).then_some(PositionTarget::Cascade(col))
        }
        '0' => (config.cascades == 10).then_some(PositionTarget::Cascade(9)),
        _ => None,
    }
}

pub fn msg_cursor(location: Location) -> String {
    match location {
        Location::Cascade { col, row } => {
            let code = cascade_code(col).unwrap_or('?');
            format!("cursor {code}:{}", row + 1)
        }
        other => format!("cursor {}", location_code(other).unwrap_or('?')),
    }
}

pub fn msg_select(location: Location, cards: &[Card]) -> String {
    let code = location_code(location).unwrap_or('?');
    format!("select {code} {}", cards_code(cards, '-'))
}

pub fn msg_deselect() -> String {
    "deselect".to_string()
}

pub fn msg_move(from: char, to: char, cards: &[Card], dest: &str) -> String {
    format!("move {from}{to} {}\u{2192}{dest}", cards_code(cards, '-'))
}

pub fn msg_auto_foundation(sources: &str, cards: &[Card]) -> String {
    format!("auto-foundation {sources} {}", cards_code(cards, ','))
}

pub fn msg_invalid(attempt: &str) -> String {
    format!("invalid {attempt}")
}

pub fn parse_action_kind(text: &str) -> Option<ActionKind> {
    if text == "init" {
        return Some(ActionKind::Init);
    }
    if text.starts_with("invalid") {
        return Some(ActionKind::Invalid);
    }
    if text.starts_with("shuffle deck (") {
        return Some(ActionKind::Shuffle);
    }
    if text == "deal all cards" {
        return Some(ActionKind::Deal);
    }
    if text.starts_with("cursor ") {
        return Some(ActionKind::Cursor);
    }
    if text.starts_with("select ") {
        return Some(ActionKind::Select);
    }
    if text == "deselect" {
        return Some(ActionKind::Deselect);
    }
    if text.starts_with("move ") || text.starts_with("auto-foundation ") {
        return Some(ActionKind::Move);
    }
    None
}

pub fn parse_shuffle_seed(text: &str) -> Option<u32> {
    let open = text.find('(')?;
    let close = text.rfind(')')?;
    text.get(open + 1..close)?.parse().ok()
}

/// Pieces of a `move <from><to> <cards>→<dest>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: char,
    pub to: char,
    pub cards: Vec<Card>,
}

pub fn parse_move_record(text: &str) -> Option<MoveRecord> {
    let rest = text.strip_prefix("move ")?;
    let (codes, tail) = rest.split_once(' ')?;
    let mut code_chars = codes.chars();
    let from = code_chars.next()?;
    let to = code_chars.next()?;
    if code_chars.next().is_some() {
        return None;
    }
    let cards_part = tail.split('\u{2192}').next()?;
    let cards = parse_cards_code(cards_part, '-')?;
    Some(MoveRecord { from, to, cards })
}

/// Pieces of an `auto-foundation <sources> <cards>` line. Source codes map
/// one-to-one onto the comma-joined cards.
pub fn parse_auto_foundation_record(text: &str) -> Option<Vec<(char, Card)>> {
    let rest = text.strip_prefix("auto-foundation ")?;
    let (sources, cards_part) = rest.split_once(' ')?;
    let cards = parse_cards_code(cards_part, ',')?;
    if sources.chars().count() != cards.len() {
        return None;
    }
    Some(sources.chars().zip(cards).collect())
}

/// Where the cursor lands after an action line: the destination of a move,
/// the anchor of a selection, or the coded spot of a cursor step. `None`
/// leaves the cursor wherever it already is.
pub fn cursor_after_action(board: &Board, text: &str) -> Option<Location> {
    match parse_action_kind(text)? {
        ActionKind::Move => {
            let record = parse_move_record(text)?;
            match parse_position_code(record.to, board.config())? {
                PositionTarget::Cell(index) => Some(Location::Cell(index)),
                PositionTarget::Foundation => {
                    let card = *record.cards.last()?;
                    Some(Location::Foundation(card.suit.foundation_index()))
                }
                PositionTarget::Cascade(col) => {
                    let len = board.cascades().get(col)?.len();
                    let row = len.checked_sub(record.cards.len())?;
                    Some(Location::Cascade { col, row })
                }
            }
        }
        ActionKind::Select => {
            let rest = text.strip_prefix("select ")?;
            let (code, cards_part) = rest.split_once(' ')?;
            let cards = parse_cards_code(cards_part, '-')?;
            match parse_position_code(code.chars().next()?, board.config())? {
                PositionTarget::Cell(index) => Some(Location::Cell(index)),
                PositionTarget::Foundation => {
                    let card = *cards.first()?;
                    Some(Location::Foundation(card.suit.foundation_index()))
                }
                PositionTarget::Cascade(col) => {
                    let len = board.cascades().get(col)?.len();
                    let row = len.checked_sub(cards.len())?;
                    Some(Location::Cascade { col, row })
                }
            }
        }
        ActionKind::Cursor => {
            let rest = text.strip_prefix("cursor ")?;
            let mut parts = rest.splitn(2, ':');
            let code = parts.next()?.chars().next()?;
            match parse_position_code(code, board.config())? {
                PositionTarget::Cell(index) => Some(Location::Cell(index)),
                PositionTarget::Foundation => Some(Location::Foundation(0)),
                PositionTarget::Cascade(col) => {
                    let row = parts
                        .next()
                        .and_then(|raw| raw.parse::<usize>().ok())
                        .and_then(|row| row.checked_sub(1))
                        .unwrap_or(0);
                    Some(Location::Cascade { col, row })
                }
            }
        }
        _ => None,
    }
}
