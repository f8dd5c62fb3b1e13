//! Canned flourish classifications for numbered deals, used as the
//! acceptance oracle for the sweep.

use crate::game::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlourishClass {
    Impossible,
    CanFlourish,
    CanFlourish52,
}

impl FlourishClass {
    pub fn id(self) -> &'static str {
        match self {
            Self::Impossible => "impossible",
            Self::CanFlourish => "canFlourish",
            Self::CanFlourish52 => "canFlourish52",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub seed: u32,
    pub class: FlourishClass,
}

/// Deal 1 frees AC 2C AS AH 2H behind four stashes (3D, then 8C JH 4D).
pub const CATALOG: &[CatalogEntry] = &[CatalogEntry {
    seed: 1,
    class: FlourishClass::CanFlourish,
}];

pub fn classification(seed: u32) -> Result<FlourishClass, EngineError> {
    CATALOG
        .iter()
        .find(|entry| entry.seed == seed)
        .map(|entry| entry.class)
        .ok_or(EngineError::UnknownCatalogSeed(seed))
}

/// Maps a computed flourish line onto the catalog vocabulary.
pub fn classify(total_cards: usize, promoted: usize) -> FlourishClass {
    if promoted == 0 {
        FlourishClass::Impossible
    } else if promoted == total_cards && total_cards == 52 {
        FlourishClass::CanFlourish52
    } else {
        FlourishClass::CanFlourish
    }
}
