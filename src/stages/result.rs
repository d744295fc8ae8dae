//! The scored outcome of a finished stage.

use serde::{Deserialize, Serialize};

/// A stage score, always within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    score: f64,
}

impl StageResult {
    /// Clamps `score` into `[0, 100]`; NaN becomes 0.
    pub fn new(score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 100.0)
        };
        Self { score }
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}
