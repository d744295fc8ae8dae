//! Balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of sessions with a scripted angler to check:
//! - Observed rarity odds against the luck-adjusted table
//! - Quality tier spread for a given skill level
//! - Gold earned per catch for each rod and mode
//!
//! Sessions run through `FishingSession`, the same orchestrator the game uses.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::Autopilot;
pub use config::SimConfig;
pub use report::{QualityRow, RarityRow, SimReport};
pub use runner::{run_simulation, simulate_single_run, RunStats};
