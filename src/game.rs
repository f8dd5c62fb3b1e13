pub mod board;
pub mod setup;
pub mod types;

#[cfg(test)]
mod tests;

pub use self::board::Board;
pub use self::types::{
    ActionKind, BoardConfig, Card, CardSequence, EngineError, Fixture, Location, PreviousAction,
    Suit,
};

pub fn rank_label(rank: u8) -> &'static str {
    match rank {
        1 => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "T",
        11 => "J",
        12 => "Q",
        13 => "K",
        _ => "?",
    }
}

pub fn rank_from_label(label: char) -> Option<u8> {
    match label {
        'A' => Some(1),
        '2' => Some(2),
        '3' => Some(3),
        '4' => Some(4),
        '5' => Some(5),
        '6' => Some(6),
        '7' => Some(7),
        '8' => Some(8),
        '9' => Some(9),
        'T' => Some(10),
        'J' => Some(11),
        'Q' => Some(12),
        'K' => Some(13),
        _ => None,
    }
}
