//! Fishing session: rules and the stage-by-stage orchestrator.

pub mod orchestrator;
pub mod rules;

pub use orchestrator::{Economy, FishingSession, SessionPhase, TickResult};
pub use rules::GameRules;
