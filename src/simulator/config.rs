//! Simulation configuration.

use crate::economy::Rod;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of fishing sessions to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Autopilot skill, 0.0 (sloppy) to 1.0 (near perfect)
    pub skill: f64,

    /// Rod equipped for every session
    pub rod: Rod,

    pub enhanced_mode: bool,
    pub price_bonus: bool,

    /// Ticks per session before it is counted as stalled
    pub max_ticks_per_run: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            skill: 0.75,
            rod: Rod::Basic,
            enhanced_mode: false,
            price_bonus: false,
            max_ticks_per_run: 60 * 120,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking one rod's odds
    pub fn rod_check(rod: Rod) -> Self {
        Self {
            num_runs: 200,
            rod,
            ..Default::default()
        }
    }

    /// Quick config for the drop table, played by a perfect angler
    pub fn drop_table_check(num_runs: u32) -> Self {
        Self {
            num_runs,
            skill: 1.0,
            ..Default::default()
        }
    }

    /// Applies a preset on top of already-parsed options: the preset sets
    /// run count and skill, while seed, rod, modes and verbosity carry over.
    pub fn keeping_options_of(self, parsed: &SimConfig) -> Self {
        Self {
            seed: parsed.seed,
            rod: parsed.rod,
            enhanced_mode: parsed.enhanced_mode,
            price_bonus: parsed.price_bonus,
            verbosity: parsed.verbosity,
            ..self
        }
    }
}
