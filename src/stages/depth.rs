//! Stage 2: depth control.
//!
//! A marker sweeps up and down a vertical gauge. The score falls off linearly
//! with the distance from the ideal zone's midpoint, reaching zero half a
//! track away.

use super::oscillator::Oscillator;
use super::result::StageResult;
use crate::core::constants::{DEPTH_IDEAL_ZONE, DEPTH_MARKER_SPEED, DEPTH_TRACK_LENGTH};
use crate::input::{InputEvent, KeyCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthConfig {
    pub track_length: f64,
    pub marker_speed: f64,
    pub ideal_zone_start: f64,
    pub ideal_zone_end: f64,
}

impl Default for DepthConfig {
    fn default() -> Self {
        Self {
            track_length: DEPTH_TRACK_LENGTH,
            marker_speed: DEPTH_MARKER_SPEED,
            ideal_zone_start: DEPTH_IDEAL_ZONE.0,
            ideal_zone_end: DEPTH_IDEAL_ZONE.1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DepthControl {
    pub marker: Oscillator,
    pub ideal_zone: (f64, f64),
    result: Option<StageResult>,
}

impl DepthControl {
    pub fn new(config: &DepthConfig) -> Self {
        let start = config.ideal_zone_start.min(config.ideal_zone_end);
        let end = config.ideal_zone_start.max(config.ideal_zone_end);
        Self {
            marker: Oscillator::new(0.0, config.marker_speed, 0.0, config.track_length),
            ideal_zone: (start, end),
            result: None,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if self.result.is_none() {
            self.marker.step(dt);
        }
    }

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

    pub fn zone_center(&self) -> f64 {
        (self.ideal_zone.0 + self.ideal_zone.1) / 2.0
    }

    pub fn in_ideal_zone(&self) -> bool {
        let pos = self.marker.offset();
        pos >= self.ideal_zone.0 && pos <= self.ideal_zone.1
    }

    pub fn score_at(&self, position: f64) -> f64 {
        let max_distance = self.marker.span() / 2.0;
        if max_distance <= 0.0 {
            return 0.0;
        }
        let distance = (position - self.zone_center()).abs();
        (100.0 - (distance / max_distance) * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn score(&self) -> f64 {
        self.result.map_or(0.0, |r| r.score())
    }
}
