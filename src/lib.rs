//! A FreeCell engine built around immutable board snapshots.
//!
//! Every operation takes a snapshot and returns a new one; the canonical
//! text form produced by [`engine::session::print`] doubles as the undo,
//! persistence and fixture format. [`sweep`] runs the offline flourish
//! survey across numbered deals.

pub mod engine;
pub mod game;
pub mod sweep;
