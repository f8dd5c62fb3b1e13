//! The touch state machine: selecting, moving, deselecting, undo.
//!
//! Gameplay mistakes never raise; they come back as an unchanged board with
//! an `invalid` action. Hard errors are reserved for malformed history.

use crate::game::{
    ActionKind, Board, BoardConfig, Card, CardSequence, EngineError, Fixture, Location,
};

use super::cursor;
use super::notation::{
    location_code, msg_deselect, msg_invalid, msg_move, msg_select, parse_action_kind,
    parse_auto_foundation_record, parse_move_record, parse_position_code, parse_shuffle_seed,
    PositionTarget,
};

/// Touch whatever the cursor rests on: select when idle, move (or grow,
/// shrink, deselect) when a selection is held.
pub fn touch(board: &Board) -> Board {
    let target = cursor::normalize(board, board.cursor());
    touch_at(board, target)
}

/// `setCursor(pos)` followed by `touch()`, for hotkey and pointer callers.
pub fn touch_by_position(board: &Board, code: char) -> Board {
    let Some(position) = parse_position_code(code, board.config()) else {
        let mut next = board.clone();
        next.record(
            ActionKind::Invalid,
            msg_invalid(&format!("position {code}")),
        );
        return next;
    };
    let location = resolve_position(board, position);
    let mut moved = board.clone();
    moved.cursor = location;
    touch_at(&moved, location)
}

/// Direct selection by card identity, the pointer-driven path. Re-touching
/// the held anchor deselects; a card elsewhere in the same cascade run
/// grows or shrinks the selection.
pub fn select_card(board: &Board, card: Card) -> Board {
    let Some(location) = board.location_of(card) else {
        let mut next = board.clone();
        next.record(
            ActionKind::Invalid,
            msg_invalid(&format!("select {}", card.label())),
        );
        return next;
    };
    if board.is_won() {
        return peek(board, location);
    }
    if board
        .selection()
        .is_some_and(|selection| selection.location == location)
    {
        return deselect(board);
    }
    try_select(board, location)
}

pub fn clear_selection(board: &Board) -> Board {
    if board.selection().is_none() {
        return board.clone();
    }
    deselect(board)
}

fn touch_at(board: &Board, target: Location) -> Board {
    if board.is_won() {
        return peek(board, target);
    }
    match board.selection().cloned() {
        None => try_select(board, target),
        Some(selection) => {
            if selection.location == target {
                return deselect(board);
            }
            let same_column = matches!(
                (selection.location, target),
                (Location::Cascade { col: held, .. }, Location::Cascade { col: touched, .. })
                    if held == touched
            );
            if same_column {
                // Re-anchor within the held column: grow or shrink the run.
                return try_select(board, target);
            }
            try_move(board, &selection, target)
        }
    }
}

fn try_select(board: &Board, location: Location) -> Board {
    let code = location_code(location).unwrap_or('?');
    let Some(sequence) = board.sequence_at(location) else {
        let mut next = board.clone();
        next.record(ActionKind::Invalid, msg_invalid(&format!("select {code}")));
        return next;
    };
    if !sequence.can_move {
        let mut next = board.clone();
        next.record(ActionKind::Invalid, msg_invalid(&format!("select {code}")));
        return next;
    }
    let mut next = board.clone();
    next.cursor = location;
    next.record(ActionKind::Select, msg_select(location, &sequence.cards));
    next.selection = Some(sequence);
    next
}

fn deselect(board: &Board) -> Board {
    let mut next = board.clone();
    next.selection = None;
    next.record(ActionKind::Deselect, msg_deselect());
    next
}

/// After a win only foundation cards may be inspected; nothing relocates.
fn peek(board: &Board, target: Location) -> Board {
    if target.fixture() == Fixture::Foundation {
        if board
            .selection()
            .is_some_and(|selection| selection.location == target)
        {
            return deselect(board);
        }
        if let Some(sequence) = board.sequence_at(target) {
            let mut next = board.clone();
            next.cursor = target;
            next.record(ActionKind::Select, msg_select(target, &sequence.cards));
            next.selection = Some(sequence);
            return next;
        }
    }
    let code = location_code(target).unwrap_or('?');
    let mut next = board.clone();
    next.record(ActionKind::Invalid, msg_invalid(&format!("select {code}")));
    next
}

fn try_move(board: &Board, selection: &CardSequence, target: Location) -> Board {
    let resolved = match target {
        Location::Foundation(_) => {
            Location::Foundation(selection.first().suit.foundation_index())
        }
        other => other,
    };
    let from = location_code(selection.location).unwrap_or('?');
    let to = location_code(resolved).unwrap_or('?');
    let text = msg_move(from, to, &selection.cards, &dest_label(board, resolved));

    if !board.can_move_to(selection, resolved) {
        let mut next = board.clone();
        next.record(ActionKind::Invalid, msg_invalid(&text));
        return next;
    }

    let mut next = board.clone();
    let landed = next.apply_move(selection, resolved);
    next.cursor = landed;
    next.record(ActionKind::Move, text);
    next
}

fn dest_label(board: &Board, target: Location) -> String {
    match target {
        Location::Cell(_) => "cell".to_string(),
        Location::Foundation(_) => "foundation".to_string(),
        Location::Cascade { col, .. } => board
            .cascade_top(col)
            .map(|card| card.label())
            .unwrap_or_else(|| "empty".to_string()),
        Location::Deck(_) => "deck".to_string(),
    }
}

fn resolve_position(board: &Board, position: PositionTarget) -> Location {
    match position {
        PositionTarget::Cell(index) => Location::Cell(index),
        PositionTarget::Foundation => {
            if let Some(selection) = board.selection() {
                Location::Foundation(selection.first().suit.foundation_index())
            } else {
                let occupied = board
                    .foundations()
                    .iter()
                    .position(|slot| slot.is_some())
                    .unwrap_or(0);
                Location::Foundation(occupied)
            }
        }
        PositionTarget::Cascade(col) => {
            let row = board.cascades()[col].len().saturating_sub(1);
            Location::Cascade { col, row }
        }
    }
}

/// Undo re-derives the previous snapshot by replaying the trimmed history
/// from scratch. Boards whose history does not begin with a shuffle (hand
/// authored fixtures) have nothing to replay into.
pub fn undo(board: &Board) -> Board {
    let replayable = board
        .history()
        .first()
        .is_some_and(|line| line.starts_with("shuffle deck ("));
    if !replayable {
        let mut next = board.clone();
        next.record(ActionKind::Invalid, msg_invalid("undo"));
        return next;
    }
    let trimmed = &board.history()[..board.history().len() - 1];
    match replay(board.config(), trimmed) {
        Ok(next) => next,
        Err(_) => {
            let mut next = board.clone();
            next.record(ActionKind::Invalid, msg_invalid("undo"));
            next
        }
    }
}

/// Rebuilds a board by applying recorded action lines to a fresh one.
pub fn replay(config: BoardConfig, lines: &[String]) -> Result<Board, EngineError> {
    let mut board = Board::with_config(config)?;
    for line in lines {
        board = replay_line(&board, line)?;
    }
    Ok(board)
}

fn replay_line(board: &Board, line: &str) -> Result<Board, EngineError> {
    let kind = parse_action_kind(line)
        .ok_or_else(|| EngineError::InvalidState(format!("unrecognized history line: {line}")))?;
    match kind {
        ActionKind::Shuffle => {
            let seed = parse_shuffle_seed(line).ok_or_else(|| {
                EngineError::InvalidState(format!("missing shuffle seed in: {line}"))
            })?;
            board.shuffle(seed)
        }
        ActionKind::Deal => Ok(board.deal_all()),
        ActionKind::Move if line.starts_with("auto-foundation ") => replay_auto(board, line),
        ActionKind::Move => replay_move(board, line),
        _ => Err(EngineError::InvalidState(format!(
            "history line is not replayable: {line}"
        ))),
    }
}

fn replay_move(board: &Board, line: &str) -> Result<Board, EngineError> {
    let malformed = || EngineError::InvalidState(format!("malformed move line: {line}"));
    let record = parse_move_record(line).ok_or_else(malformed)?;

    let source = match parse_position_code(record.from, board.config()).ok_or_else(malformed)? {
        PositionTarget::Cell(index) => Location::Cell(index),
        PositionTarget::Cascade(col) => {
            let len = board.cascades()[col].len();
            let row = len.checked_sub(record.cards.len()).ok_or_else(malformed)?;
            Location::Cascade { col, row }
        }
        PositionTarget::Foundation => return Err(malformed()),
    };
    let sequence = board.sequence_at(source).ok_or_else(malformed)?;
    if sequence.cards != record.cards {
        return Err(EngineError::InvalidState(format!(
            "history line does not match the board: {line}"
        )));
    }

    let target = match parse_position_code(record.to, board.config()).ok_or_else(malformed)? {
        PositionTarget::Cell(index) => Location::Cell(index),
        PositionTarget::Foundation => {
            Location::Foundation(sequence.first().suit.foundation_index())
        }
        PositionTarget::Cascade(col) => Location::Cascade { col, row: 0 },
    };
    if !board.can_move_to(&sequence, target) {
        return Err(EngineError::InvalidState(format!(
            "history line replays an illegal move: {line}"
        )));
    }

    let mut next = board.clone();
    let landed = next.apply_move(&sequence, target);
    next.cursor = landed;
    next.record(ActionKind::Move, line.to_string());
    Ok(next)
}

fn replay_auto(board: &Board, line: &str) -> Result<Board, EngineError> {
    let malformed = || EngineError::InvalidState(format!("malformed auto-foundation line: {line}"));
    let promotions = parse_auto_foundation_record(line).ok_or_else(malformed)?;

    let mut next = board.clone();
    for (code, card) in promotions {
        let location = next.location_of(card).ok_or_else(malformed)?;
        if location_code(location) != Some(code) || !next.can_place_on_foundation(card) {
            return Err(EngineError::InvalidState(format!(
                "history line replays an illegal promotion: {line}"
            )));
        }
        let sequence = next.sequence_at(location).ok_or_else(malformed)?;
        if sequence.cards != [card] {
            return Err(malformed());
        }
        let target = Location::Foundation(card.suit.foundation_index());
        next.apply_move(&sequence, target);
    }
    if next.is_won() {
        next.win_is_flourish = true;
    }
    next.record(ActionKind::Move, line.to_string());
    Ok(next)
}
