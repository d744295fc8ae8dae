//! The economy loop around the minigame: rods, gold and the catch inventory.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
