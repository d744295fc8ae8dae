//! Fishing rewards: rarity tables, reward rolls, quality grading and prices.

pub mod generation;
pub mod pricing;
pub mod quality;
pub mod tables;
pub mod types;

pub use generation::*;
pub use pricing::*;
pub use quality::*;
pub use tables::*;
pub use types::*;
