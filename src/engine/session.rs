//! The canonical text form of a board.
//!
//! `print` and `parse` are the contract surface for undo, persistence and
//! test fixtures: `parse(print(b))` must reproduce `b` exactly. Each grid
//! line is a row of 3-character slots (marker + card code) joined by single
//! spaces; `>` marks the cursor, `|…|` brackets the selected run's start.
//! After the grid come an optional `:d` deck line and the action lines,
//! ending with the previous action.

use crate::game::{
    ActionKind, Board, BoardConfig, Card, EngineError, Location, PreviousAction,
};

use super::notation::{cards_code, cursor_after_action, parse_action_kind, parse_card_code};

pub fn print(board: &Board) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(render_home_row(board));

    let mut height = board.cascades().iter().map(Vec::len).max().unwrap_or(0);
    if let Location::Cascade { row, .. } = board.cursor() {
        height = height.max(row + 1);
    }
    for row in 0..height {
        lines.push(render_tableau_row(board, row));
    }

    if !board.deck().is_empty() {
        lines.push(format!(":d {}", cards_code(board.deck(), ' ')));
    }

    for entry in board.history() {
        lines.push(entry.clone());
    }
    if board.history().last() != Some(&board.previous_action().text) {
        lines.push(board.previous_action().text.clone());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub fn parse(text: &str) -> Result<Board, EngineError> {
    parse_with_config(text, BoardConfig::default())
}

pub fn parse_with_config(text: &str, config: BoardConfig) -> Result<Board, EngineError> {
    config.validate()?;
    let all: Vec<&str> = text.lines().collect();
    let Some((home, rest)) = all.split_first() else {
        return Err(EngineError::InvalidState("empty board text".to_string()));
    };

    let mut index = 0;
    let mut tableau_lines: Vec<&str> = Vec::new();
    while index < rest.len() && is_grid_line(rest[index]) {
        tableau_lines.push(rest[index]);
        index += 1;
    }
    let mut deck_line = None;
    if index < rest.len() && rest[index].starts_with(":d") {
        deck_line = Some(rest[index]);
        index += 1;
    }
    let action_lines = &rest[index..];

    let mut markers = MarkerTracker::default();
    let home_slots = parse_slots(home, config.cells + 4)?;

    let mut board = Board::with_config(config)?;
    board.deck = Vec::new();
    for (slot, (marker, card)) in home_slots.into_iter().enumerate() {
        if slot < config.cells {
            markers.note(marker, Location::Cell(slot))?;
            board.cells[slot] = card;
        } else {
            let foundation = slot - config.cells;
            markers.note(marker, Location::Foundation(foundation))?;
            if let Some(card) = card {
                if card.suit.foundation_index() != foundation {
                    return Err(EngineError::InvalidState(format!(
                        "{} cannot sit on foundation {foundation}",
                        card.label()
                    )));
                }
            }
            board.foundations[foundation] = card;
        }
    }

    for (row, line) in tableau_lines.iter().enumerate() {
        for (col, (marker, card)) in parse_slots(line, config.cascades)?.into_iter().enumerate() {
            markers.note(marker, Location::Cascade { col, row })?;
            if let Some(card) = card {
                if board.cascades[col].len() != row {
                    return Err(EngineError::InvalidState(format!(
                        "{} floats above a gap in cascade {}",
                        card.label(),
                        col + 1
                    )));
                }
                board.cascades[col].push(card);
            }
        }
    }

    if let Some(line) = deck_line {
        let raw = line.trim_start_matches(":d").trim();
        for token in raw.split_whitespace() {
            let card = parse_card_code(token).ok_or_else(|| {
                EngineError::InvalidState(format!("bad deck card code: {token}"))
            })?;
            board.deck.push(card);
        }
    }

    check_distinct(&board)?;

    let mut history: Vec<String> = Vec::new();
    let mut previous = PreviousAction::new(ActionKind::Init, "init");
    for line in action_lines {
        let kind = parse_action_kind(line).ok_or_else(|| {
            EngineError::InvalidState(format!("unrecognized action line: {line}"))
        })?;
        if kind.is_replayable() {
            history.push((*line).to_string());
        }
        previous = PreviousAction::new(kind, *line);
    }
    board.history = history;
    board.previous_action = previous;

    board.refresh_win();
    board.win_is_flourish = board.win
        && board
            .history
            .last()
            .is_some_and(|line| line.starts_with("auto-foundation "));

    // Marker-free text (hand fixtures) falls back to the landing spot the
    // final action line describes, the same recovery a load performs.
    let from_action = cursor_after_action(&board, &board.previous_action.text);
    board.cursor = markers
        .cursor
        .or(markers.selection)
        .or(from_action)
        .unwrap_or(Location::Cell(0));
    if let Some(location) = markers.selection {
        let sequence = board.sequence_at(location).ok_or_else(|| {
            EngineError::InvalidState("selection marker on an empty slot".to_string())
        })?;
        board.selection = Some(sequence);
    }

    Ok(board)
}

fn render_home_row(board: &Board) -> String {
    let cells = board.config().cells;
    let mut slots = Vec::with_capacity(cells + 4);
    for index in 0..cells {
        slots.push((Location::Cell(index), board.cells()[index]));
    }
    for index in 0..4 {
        slots.push((Location::Foundation(index), board.foundations()[index]));
    }
    render_line(board, &slots)
}

fn render_tableau_row(board: &Board, row: usize) -> String {
    let slots: Vec<(Location, Option<Card>)> = (0..board.config().cascades)
        .map(|col| {
            (
                Location::Cascade { col, row },
                board.cascades()[col].get(row).copied(),
            )
        })
        .collect();
    render_line(board, &slots)
}

fn render_line(board: &Board, slots: &[(Location, Option<Card>)]) -> String {
    let selection_start = board.selection().map(|selection| selection.location);
    let mut line = String::new();
    let mut previous_selected = false;
    for (index, (location, card)) in slots.iter().enumerate() {
        if index > 0 {
            line.push(if previous_selected { '|' } else { ' ' });
        }
        let selected = selection_start == Some(*location);
        let marker = if selected {
            '|'
        } else if board.cursor() == *location {
            '>'
        } else {
            ' '
        };
        line.push(marker);
        match card {
            Some(card) => line.push_str(&card.label()),
            None => line.push_str("  "),
        }
        previous_selected = selected;
    }
    if previous_selected {
        line.push('|');
    }
    line.trim_end_matches(' ').to_string()
}

fn is_grid_line(line: &str) -> bool {
    matches!(line.chars().next(), Some(' ' | '>' | '|'))
}

type Slot = (char, Option<Card>);

fn parse_slots(line: &str, count: usize) -> Result<Vec<Slot>, EngineError> {
    let chars: Vec<char> = line.chars().collect();
    if chars.len() > count * 4 {
        return Err(EngineError::InvalidState(format!(
            "grid line is wider than the board: {line}"
        )));
    }
    let at = |index: usize| chars.get(index).copied().unwrap_or(' ');

    let mut slots = Vec::with_capacity(count);
    for slot in 0..count {
        let base = slot * 4;
        let marker = at(base);
        if !matches!(marker, ' ' | '>' | '|') {
            return Err(EngineError::InvalidState(format!(
                "bad slot marker {marker:?} in grid line: {line}"
            )));
        }
        let first = at(base + 1);
        let second = at(base + 2);
        let card = if first == ' ' && second == ' ' {
            None
        } else {
            let code: String = [first, second].iter().collect();
            Some(parse_card_code(&code).ok_or_else(|| {
                EngineError::InvalidState(format!("bad card code {code:?} in grid line: {line}"))
            })?)
        };
        if !matches!(at(base + 3), ' ' | '|') {
            return Err(EngineError::InvalidState(format!(
                "bad slot separator in grid line: {line}"
            )));
        }
        slots.push((marker, card));
    }
    Ok(slots)
}

#[derive(Default)]
struct MarkerTracker {
    cursor: Option<Location>,
    selection: Option<Location>,
}

impl MarkerTracker {
    fn note(&mut self, marker: char, location: Location) -> Result<(), EngineError> {
        match marker {
            '>' => {
                if self.cursor.replace(location).is_some() {
                    return Err(EngineError::InvalidState(
                        "more than one cursor marker".to_string(),
                    ));
                }
            }
            '|' => {
                if self.selection.replace(location).is_some() {
                    return Err(EngineError::InvalidState(
                        "more than one selection marker".to_string(),
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

/// Every card, including those buried under a foundation top, must appear
/// exactly once.
fn check_distinct(board: &Board) -> Result<(), EngineError> {
    let mut seen = [false; 52];
    let mut mark = |card: Card| -> Result<(), EngineError> {
        let slot = card.suit.foundation_index() * 13 + usize::from(card.rank - 1);
        if seen[slot] {
            return Err(EngineError::InvalidState(format!(
                "duplicate card {}",
                card.label()
            )));
        }
        seen[slot] = true;
        Ok(())
    };

    for card in board.deck() {
        mark(*card)?;
    }
    for slot in board.cells().iter().flatten() {
        mark(*slot)?;
    }
    for pile in board.cascades() {
        for card in pile {
            mark(*card)?;
        }
    }
    for top in board.foundations().iter().flatten() {
        for rank in 1..=top.rank {
            mark(Card {
                suit: top.suit,
                rank,
            })?;
        }
    }
    Ok(())
}
