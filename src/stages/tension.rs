//! Stage 5: line tension.
//!
//! The bobber falls under gravity and rises while Confirm is held. A target
//! square drifts up and down the same column; the stage scores the share of
//! the time budget the bobber spent inside it.
//!
//! Coordinates grow downward, so lift is a negative acceleration.

use super::oscillator::Oscillator;
use super::result::StageResult;
use crate::core::constants::{
    TENSION_BOBBER_START, TENSION_DURATION, TENSION_GRAVITY, TENSION_LIFT, TENSION_MAX_SPEED,
    TENSION_TARGET_SIZE, TENSION_TARGET_SPEED, TENSION_TARGET_START, TENSION_TARGET_TOP_RANGE,
    TENSION_TRACK,
};
use crate::input::{InputEvent, KeyCode, KeyKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TensionConfig {
    pub duration: f64,
    pub track_top: f64,
    pub track_bottom: f64,
    pub bobber_start: f64,
    pub gravity: f64,
    pub lift: f64,
    pub max_speed: f64,
    pub target_size: f64,
    pub target_speed: f64,
    /// Bounds for the target square's top edge.
    pub target_top_min: f64,
    pub target_top_max: f64,
    pub target_start: f64,
}

impl Default for TensionConfig {
    fn default() -> Self {
        Self {
            duration: TENSION_DURATION,
            track_top: TENSION_TRACK.0,
            track_bottom: TENSION_TRACK.1,
            bobber_start: TENSION_BOBBER_START,
            gravity: TENSION_GRAVITY,
            lift: TENSION_LIFT,
            max_speed: TENSION_MAX_SPEED,
            target_size: TENSION_TARGET_SIZE,
            target_speed: TENSION_TARGET_SPEED,
            target_top_min: TENSION_TARGET_TOP_RANGE.0,
            target_top_max: TENSION_TARGET_TOP_RANGE.1,
            target_start: TENSION_TARGET_START,
        }
    }
}

/// Seconds the bobber spent inside and outside the target square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetTimes {
    pub in_target: f64,
    pub out_target: f64,
}

impl TargetTimes {
    /// In-target share of the tracked time, as a percentage. Zero when nothing was tracked.
    pub fn ratio_percent(&self) -> f64 {
        let total = self.in_target + self.out_target;
        if total > 0.0 {
            (self.in_target / total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineTension {
    pub bobber_y: f64,
    pub bobber_velocity: f64,
    pub lift_held: bool,
    pub target: Oscillator,
    pub target_size: f64,
    pub elapsed: f64,
    pub times: TargetTimes,
    config: TensionConfig,
    result: Option<StageResult>,
}

impl LineTension {
    /// A swapped track is put back in order.
    pub fn new(config: &TensionConfig) -> Self {
        let mut config = config.clone();
        if config.track_top > config.track_bottom {
            std::mem::swap(&mut config.track_top, &mut config.track_bottom);
        }
        Self {
            bobber_y: config.bobber_start.clamp(config.track_top, config.track_bottom),
            bobber_velocity: 0.0,
            lift_held: false,
            target: Oscillator::new(
                config.target_start,
                config.target_speed,
                config.target_top_min,
                config.target_top_max,
            ),
            target_size: config.target_size.max(0.0),
            elapsed: 0.0,
            times: TargetTimes::default(),
            config,
            result: None,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        if self.result.is_some() {
            return;
        }
        let dt = dt.min((self.config.duration - self.elapsed).max(0.0));

        let accel = if self.lift_held {
            -self.config.lift
        } else {
            self.config.gravity
        };
        let max_speed = self.config.max_speed.abs();
        self.bobber_velocity = (self.bobber_velocity + accel * dt).clamp(-max_speed, max_speed);
        self.bobber_y = (self.bobber_y + self.bobber_velocity * dt)
            .clamp(self.config.track_top, self.config.track_bottom);

        self.target.step(dt);

        if self.in_target() {
            self.times.in_target += dt;
        } else {
            self.times.out_target += dt;
        }

        self.elapsed += dt;
        if self.elapsed >= self.config.duration {
            let score = if self.config.duration > 0.0 {
                self.times.in_target / self.config.duration * 100.0
            } else {
                0.0
            };
            self.result = Some(StageResult::new(score));
        }
    }

    /// Tracks whether lift is held. Completion is time-driven, so this never
    /// reports a completion.
    pub fn handle_input(&mut self, events: &[InputEvent]) -> bool {
        if self.result.is_some() {
            return false;
        }
        for event in events.iter().filter(|e| e.code == KeyCode::Confirm) {
            self.lift_held = event.kind == KeyKind::Down;
        }
        false
    }

    /// Top and bottom edges of the target square.
    pub fn target_bounds(&self) -> (f64, f64) {
        (self.target.position, self.target.position + self.target_size)
    }

    pub fn in_target(&self) -> bool {
        let (top, bottom) = self.target_bounds();
        self.bobber_y >= top && self.bobber_y <= bottom
    }

    pub fn times(&self) -> TargetTimes {
        self.times
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn score(&self) -> f64 {
        self.result.map_or(0.0, |r| r.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn run_for(stage: &mut LineTension, seconds: f64) {
        let mut t = 0.0;
        while t < seconds && !stage.is_completed() {
            stage.advance(DT);
            t += DT;
        }
    }

    /// Target square covers the whole track and never moves.
    fn covering_config() -> TensionConfig {
        TensionConfig {
            target_size: 1000.0,
            target_speed: 0.0,
            target_top_min: 0.0,
            target_top_max: 0.0,
            target_start: 0.0,
            ..TensionConfig::default()
        }
    }

    /// Target square parked far below the track.
    fn unreachable_config() -> TensionConfig {
        TensionConfig {
            target_speed: 0.0,
            target_top_min: 900.0,
            target_top_max: 900.0,
            target_start: 900.0,
            ..TensionConfig::default()
        }
    }

    #[test]
    fn test_always_in_target_scores_100() {
        let mut stage = LineTension::new(&covering_config());
        run_for(&mut stage, 10.0);
        assert!(stage.is_completed());
        assert!((stage.score() - 100.0).abs() < 1e-9);
        assert!((stage.times().in_target - TENSION_DURATION).abs() < 1e-9);
        assert_eq!(stage.times().out_target, 0.0);
    }

    #[test]
    fn test_never_in_target_scores_0() {
        let mut stage = LineTension::new(&unreachable_config());
        run_for(&mut stage, 10.0);
        assert!(stage.is_completed());
        assert_eq!(stage.score(), 0.0);
        assert!((stage.times().out_target - TENSION_DURATION).abs() < 1e-9);
    }

    #[test]
    fn test_time_budget_is_exact() {
        let mut stage = LineTension::new(&TensionConfig::default());
        // 0.7s steps overshoot 5.0 on the last tick
        for _ in 0..8 {
            stage.advance(0.7);
        }
        let times = stage.times();
        assert!(stage.is_completed());
        assert!((times.in_target + times.out_target - TENSION_DURATION).abs() < 1e-9);
    }

    #[test]
    fn test_gravity_pulls_bobber_down() {
        let mut stage = LineTension::new(&TensionConfig::default());
        let start = stage.bobber_y;
        stage.advance(0.1);
        assert!(stage.bobber_y > start);
        assert!(stage.bobber_velocity > 0.0);
    }

    #[test]
    fn test_holding_confirm_lifts_bobber() {
        let mut stage = LineTension::new(&TensionConfig::default());
        stage.handle_input(&[InputEvent::press(KeyCode::Confirm)]);
        assert!(stage.lift_held);
        let start = stage.bobber_y;
        stage.advance(0.1);
        assert!(stage.bobber_y < start);

        stage.handle_input(&[InputEvent::release(KeyCode::Confirm)]);
        assert!(!stage.lift_held);
    }

    #[test]
    fn test_last_event_in_batch_wins() {
        let mut stage = LineTension::new(&TensionConfig::default());
        let events = [
            InputEvent::press(KeyCode::Confirm),
            InputEvent::release(KeyCode::Confirm),
            InputEvent::press(KeyCode::Up),
        ];
        assert!(!stage.handle_input(&events));
        assert!(!stage.lift_held);
    }

    #[test]
    fn test_velocity_and_position_are_clamped() {
        let mut stage = LineTension::new(&TensionConfig::default());
        run_for(&mut stage, 4.0);
        assert!(stage.bobber_velocity <= TENSION_MAX_SPEED);
        assert!(stage.bobber_y <= TENSION_TRACK.1);

        let mut lifting = LineTension::new(&TensionConfig::default());
        lifting.handle_input(&[InputEvent::press(KeyCode::Confirm)]);
        run_for(&mut lifting, 4.0);
        assert!(lifting.bobber_velocity >= -TENSION_MAX_SPEED);
        assert_eq!(lifting.bobber_y, TENSION_TRACK.0);
    }

    #[test]
    fn test_target_square_stays_in_bounds() {
        let mut stage = LineTension::new(&TensionConfig::default());
        for _ in 0..200 {
            stage.advance(DT);
            let (top, _) = stage.target_bounds();
            assert!((TENSION_TARGET_TOP_RANGE.0..=TENSION_TARGET_TOP_RANGE.1).contains(&top));
        }
    }

    #[test]
    fn test_score_matches_in_target_share() {
        let mut stage = LineTension::new(&TensionConfig::default());
        run_for(&mut stage, 10.0);
        let times = stage.times();
        assert!((stage.score() - times.in_target / TENSION_DURATION * 100.0).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&stage.score()));
    }

    #[test]
    fn test_frozen_after_completion() {
        let mut stage = LineTension::new(&covering_config());
        run_for(&mut stage, 10.0);
        let before = (stage.score(), stage.bobber_y, stage.times());
        stage.advance(1.0);
        stage.handle_input(&[InputEvent::press(KeyCode::Confirm)]);
        assert_eq!((stage.score(), stage.bobber_y, stage.times()), before);
        assert!(!stage.lift_held);
    }

    #[test]
    fn test_swapped_track_is_reordered() {
        let config = TensionConfig {
            track_top: TENSION_TRACK.1,
            track_bottom: TENSION_TRACK.0,
            ..TensionConfig::default()
        };
        let mut stage = LineTension::new(&config);
        assert_eq!(stage.bobber_y, TENSION_BOBBER_START);
        run_for(&mut stage, 10.0);
        assert!(stage.is_completed());
        assert!((TENSION_TRACK.0..=TENSION_TRACK.1).contains(&stage.bobber_y));
    }

    #[test]
    fn test_ratio_percent() {
        let times = TargetTimes {
            in_target: 3.5,
            out_target: 1.5,
        };
        assert!((times.ratio_percent() - 70.0).abs() < 1e-9);
        assert_eq!(TargetTimes::default().ratio_percent(), 0.0);
    }
}
