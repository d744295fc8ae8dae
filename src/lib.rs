//! Castline - five-stage fishing minigame core
//!
//! This module exposes the stage engine, reward pipeline, session
//! orchestrator and economy loop for frontends, tests and the simulator.

pub mod core;
pub mod economy;
pub mod error;
pub mod fishing;
pub mod input;
pub mod session;
pub mod simulator;
pub mod stages;

pub use error::{ConfigError, ShopError};
pub use session::{Economy, FishingSession, GameRules};
