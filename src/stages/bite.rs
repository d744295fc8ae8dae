//! Stage 3: bite reaction.
//!
//! After a random delay the float dips. Striking early scores nothing; striking
//! inside the reaction window loses score steeply with latency, and striking
//! after it loses from a much lower ceiling.
//!
//! Time is measured only through `advance`, so the stage is fully
//! deterministic under a scripted tick sequence.

use super::result::StageResult;
use crate::core::constants::{
    BITE_DELAY_RANGE, BITE_LATE_BASE_SCORE, BITE_LATE_PENALTY_PER_SEC, BITE_REACTION_WINDOW,
    BITE_WINDOW_PENALTY_PER_SEC,
};
use crate::input::{InputEvent, KeyCode};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiteConfig {
    pub min_delay: f64,
    pub max_delay: f64,
    pub reaction_window: f64,
    pub window_penalty_per_sec: f64,
    pub late_base_score: f64,
    pub late_penalty_per_sec: f64,
}

impl Default for BiteConfig {
    fn default() -> Self {
        Self {
            min_delay: BITE_DELAY_RANGE.0,
            max_delay: BITE_DELAY_RANGE.1,
            reaction_window: BITE_REACTION_WINDOW,
            window_penalty_per_sec: BITE_WINDOW_PENALTY_PER_SEC,
            late_base_score: BITE_LATE_BASE_SCORE,
            late_penalty_per_sec: BITE_LATE_PENALTY_PER_SEC,
        }
    }
}

/// What ended the stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strike {
    /// Pressed before the bite.
    Early,
    /// Pressed this many seconds after the bite.
    Reaction(f64),
}

#[derive(Debug, Clone)]
pub struct BiteReaction {
    /// Seconds after stage start at which the bite fires.
    pub bite_delay: f64,
    /// Simulated seconds since the stage started.
    pub elapsed: f64,
    /// Simulated time at which the bite was observed, once it has fired.
    pub bite_seen_at: Option<f64>,
    pub strike: Option<Strike>,
    config: BiteConfig,
    result: Option<StageResult>,
}

impl BiteReaction {
    /// Rolls the bite delay uniformly in `[min_delay, max_delay)`.
    pub fn new<R: Rng>(config: &BiteConfig, rng: &mut R) -> Self {
        let lo = config.min_delay.max(0.0);
        let hi = config.max_delay.max(lo);
        let delay = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        Self::with_delay(config, delay)
    }

    /// Builds the stage with a fixed bite delay.
    pub fn with_delay(config: &BiteConfig, bite_delay: f64) -> Self {
        Self {
            bite_delay: bite_delay.max(0.0),
            elapsed: 0.0,
            bite_seen_at: None,
            strike: None,
            config: config.clone(),
            result: None,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if self.result.is_some() {
            return;
        }
        self.elapsed += dt;
        if self.bite_seen_at.is_none() && self.elapsed >= self.bite_delay {
            self.bite_seen_at = Some(self.elapsed);
        }
    }

    pub fn handle_input(&mut self, events: &[InputEvent]) -> bool {
        if self.result.is_some() {
            return false;
        }
        if !events.iter().any(|e| e.is_press_of(KeyCode::Confirm)) {
            return false;
        }
        let strike = match self.bite_seen_at {
            Some(seen_at) => Strike::Reaction((self.elapsed - seen_at).max(0.0)),
            None => Strike::Early,
        };
        self.strike = Some(strike);
        self.result = Some(StageResult::new(self.score_for(strike)));
        true
    }

    pub fn score_for(&self, strike: Strike) -> f64 {
        match strike {
            Strike::Early => 0.0,
            Strike::Reaction(latency) if latency <= self.config.reaction_window => {
                (100.0 - latency * self.config.window_penalty_per_sec).max(0.0)
            }
            Strike::Reaction(latency) => (self.config.late_base_score
                - (latency - self.config.reaction_window) * self.config.late_penalty_per_sec)
                .max(0.0),
        }
    }

    pub fn bite_active(&self) -> bool {
        self.bite_seen_at.is_some()
    }

    /// Seconds since the bite was observed, if it has fired.
    pub fn time_since_bite(&self) -> Option<f64> {
        self.bite_seen_at.map(|t| (self.elapsed - t).max(0.0))
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn score(&self) -> f64 {
        self.result.map_or(0.0, |r| r.score())
    }
}
