//! Stage 1: cast timing.
//!
//! A marker sweeps across a horizontal bar. Pressing Confirm locks the cast;
//! the score is the marker's position along the bar as a percentage.

use super::oscillator::Oscillator;
use super::result::StageResult;
use crate::core::constants::{CAST_MARKER_SPEED, CAST_TARGET_ZONE_FRACTION, CAST_TRACK_LENGTH};
use crate::input::{InputEvent, KeyCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastConfig {
    pub track_length: f64,
    pub marker_speed: f64,
    /// Width of the highlighted zone as a fraction of the bar. Visual only.
    pub target_zone_fraction: f64,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            track_length: CAST_TRACK_LENGTH,
            marker_speed: CAST_MARKER_SPEED,
            target_zone_fraction: CAST_TARGET_ZONE_FRACTION,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CastTiming {
    pub marker: Oscillator,
    pub target_zone_fraction: f64,
    /// Seconds spent in this stage.
    pub stage_time: f64,
    result: Option<StageResult>,
}

impl CastTiming {
    pub fn new(config: &CastConfig) -> Self {
        Self {
            marker: Oscillator::new(0.0, config.marker_speed, 0.0, config.track_length),
            target_zone_fraction: config.target_zone_fraction,
            stage_time: 0.0,
            result: None,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if self.result.is_some() {
            return;
        }
        self.marker.step(dt);
        self.stage_time += dt;
    }

    /// Returns true if this batch completed the stage.
    pub fn handle_input(&mut self, events: &[InputEvent]) -> bool {
        if self.result.is_some() {
            return false;
        }
        if events.iter().any(|e| e.is_press_of(KeyCode::Confirm)) {
            self.result = Some(StageResult::new(self.score_at(self.marker.offset())));
            return true;
        }
        false
    }

    /// Score a cast locked at `position` along the bar.
    pub fn score_at(&self, position: f64) -> f64 {
        let length = self.marker.span();
        if length <= 0.0 {
            return 0.0;
        }
        ((position / length) * 100.0).round().clamp(0.0, 100.0)
    }

    /// The highlighted zone `(start, end)` centered on the bar, for renderers.
    pub fn target_zone(&self) -> (f64, f64) {
        let length = self.marker.span();
        let width = length * self.target_zone_fraction.clamp(0.0, 1.0);
        let start = (length - width) / 2.0;
        (start, start + width)
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn score(&self) -> f64 {
        self.result.map_or(0.0, |r| r.score())
    }
}
