use crate::game::{ActionKind, Board, Location};

use super::notation::msg_cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Steps the cursor one spot across the grid: the home row (cells then
/// foundations) sits above the tableau columns. Edges clamp; the selection
/// is never touched.
pub fn move_cursor(board: &Board, direction: Direction) -> Board {
    let landed = step(board, normalize(board, board.cursor()), direction);
    let mut next = board.clone();
    next.cursor = landed;
    next.record(ActionKind::Cursor, msg_cursor(landed));
    next
}

fn home_width(board: &Board) -> usize {
    board.config().cells + 4
}

fn home_location(board: &Board, column: usize) -> Location {
    let cells = board.config().cells;
    let column = column.min(home_width(board) - 1);
    if column < cells {
        Location::Cell(column)
    } else {
        Location::Foundation(column - cells)
    }
}

fn home_column(board: &Board, location: Location) -> Option<usize> {
    match location {
        Location::Cell(index) => Some(index),
        Location::Foundation(index) => Some(board.config().cells + index),
        _ => None,
    }
}

/// Clamps a location onto the current geometry; a cascade row is pulled back
/// onto the column (row 0 on an empty column).
pub fn normalize(board: &Board, location: Location) -> Location {
    match location {
        Location::Cell(index) => Location::Cell(index.min(board.config().cells - 1)),
        Location::Foundation(index) => Location::Foundation(index.min(3)),
        Location::Cascade { col, row } => {
            let col = col.min(board.config().cascades - 1);
            let len = board.cascades()[col].len();
            Location::Cascade {
                col,
                row: row.min(len.saturating_sub(1)),
            }
        }
        Location::Deck(_) => Location::Cell(0),
    }
}

fn step(board: &Board, location: Location, direction: Direction) -> Location {
    match location {
        Location::Cell(_) | Location::Foundation(_) => {
            let Some(column) = home_column(board, location) else {
                return location;
            };
            match direction {
                Direction::Left => home_location(board, column.saturating_sub(1)),
                Direction::Right => home_location(board, column + 1),
                Direction::Up => location,
                Direction::Down => {
                    let col = column.min(board.config().cascades - 1);
                    Location::Cascade { col, row: 0 }
                }
            }
        }
        Location::Cascade { col, row } => match direction {
            Direction::Up => {
                if row > 0 {
                    Location::Cascade { col, row: row - 1 }
                } else {
                    home_location(board, col)
                }
            }
            Direction::Down => {
                let len = board.cascades()[col].len();
                Location::Cascade {
                    col,
                    row: (row + 1).min(len.saturating_sub(1)),
                }
            }
            Direction::Left => cascade_sideways(board, col, row, -1),
            Direction::Right => cascade_sideways(board, col, row, 1),
        },
        Location::Deck(_) => Location::Cell(0),
    }
}

/// Sideways steps keep the row when the neighbor column is deep enough and
/// clamp onto its last card otherwise.
fn cascade_sideways(board: &Board, col: usize, row: usize, delta: i32) -> Location {
    let last = board.config().cascades as i32 - 1;
    let col = (col as i32 + delta).clamp(0, last) as usize;
    let len = board.cascades()[col].len();
    Location::Cascade {
        col,
        row: row.min(len.saturating_sub(1)),
    }
}
