pub mod auto_foundation;
pub mod catalog;
pub mod cursor;
pub mod flourish;
pub mod interaction;
pub mod notation;
pub mod session;
