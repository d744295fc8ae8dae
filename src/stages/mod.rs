//! The five fishing stages and their shared lifecycle.
//!
//! Every stage follows the same contract: `advance(dt)` every tick,
//! `handle_input(events)` with that tick's batch, and a score that is fixed
//! once `is_completed()` turns true.

pub mod bite;
pub mod cast;
pub mod depth;
pub mod oscillator;
pub mod reeling;
pub mod result;
pub mod tension;

pub use bite::{BiteConfig, BiteReaction, Strike};
pub use cast::{CastConfig, CastTiming};
pub use depth::{DepthConfig, DepthControl};
pub use oscillator::Oscillator;
pub use reeling::{ReelingConfig, ReelingRhythm};
pub use result::StageResult;
pub use tension::{LineTension, TargetTimes, TensionConfig};

use crate::error::ConfigError;
use crate::input::InputEvent;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Stage identity, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageKind {
    CastTiming,
    DepthControl,
    BiteReaction,
    ReelingRhythm,
    LineTension,
}

impl StageKind {
    pub const ALL: [StageKind; 5] = [
        StageKind::CastTiming,
        StageKind::DepthControl,
        StageKind::BiteReaction,
        StageKind::ReelingRhythm,
        StageKind::LineTension,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CastTiming => "Cast Timing",
            Self::DepthControl => "Depth Control",
            Self::BiteReaction => "Bite Reaction",
            Self::ReelingRhythm => "Reeling Rhythm",
            Self::LineTension => "Line Tension",
        }
    }

    /// One-line instruction shown while the stage is active.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::CastTiming => "Press CONFIRM to cast as far as you can",
            Self::DepthControl => "Press CONFIRM when the marker is in the ideal zone",
            Self::BiteReaction => "Wait for the bite, then press CONFIRM",
            Self::ReelingRhythm => "Press the arrows in the order shown",
            Self::LineTension => "Hold CONFIRM to lift, keep the bobber in the square",
        }
    }
}

/// Tunables for all five stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub cast: CastConfig,
    pub depth: DepthConfig,
    pub bite: BiteConfig,
    pub reeling: ReelingConfig,
    pub tension: TensionConfig,
}

impl StageConfig {
    /// Rejects tunings that would make a stage unplayable or unscorable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |value: f64, what: &str| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::InvalidStage(format!(
                    "{what} must be positive, got {value}"
                )))
            }
        };
        let finite = |value: f64, what: &str| {
            if value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::InvalidStage(format!(
                    "{what} must be finite, got {value}"
                )))
            }
        };
        for (value, what) in [
            (self.cast.marker_speed, "cast marker speed"),
            (self.cast.target_zone_fraction, "cast target zone"),
            (self.depth.marker_speed, "depth marker speed"),
            (self.depth.ideal_zone_start, "depth zone start"),
            (self.depth.ideal_zone_end, "depth zone end"),
            (self.bite.min_delay, "bite min delay"),
            (self.bite.max_delay, "bite max delay"),
            (self.bite.reaction_window, "bite reaction window"),
            (self.bite.window_penalty_per_sec, "bite window penalty"),
            (self.bite.late_base_score, "bite late base score"),
            (self.bite.late_penalty_per_sec, "bite late penalty"),
            (self.tension.track_top, "tension track top"),
            (self.tension.track_bottom, "tension track bottom"),
            (self.tension.bobber_start, "tension bobber start"),
            (self.tension.gravity, "tension gravity"),
            (self.tension.lift, "tension lift"),
            (self.tension.max_speed, "tension max speed"),
            (self.tension.target_size, "tension target size"),
            (self.tension.target_speed, "tension target speed"),
            (self.tension.target_top_min, "tension target top min"),
            (self.tension.target_top_max, "tension target top max"),
            (self.tension.target_start, "tension target start"),
        ] {
            finite(value, what)?;
        }
        positive(self.cast.track_length, "cast track length")?;
        positive(self.depth.track_length, "depth track length")?;
        positive(self.tension.duration, "tension duration")?;
        if self.tension.track_bottom < self.tension.track_top {
            return Err(ConfigError::InvalidStage(
                "tension track bottom is above its top".to_string(),
            ));
        }
        if self.tension.target_top_max < self.tension.target_top_min {
            return Err(ConfigError::InvalidStage(
                "tension target range is inverted".to_string(),
            ));
        }
        if self.bite.max_delay < self.bite.min_delay {
            return Err(ConfigError::InvalidStage(
                "bite delay range is inverted".to_string(),
            ));
        }
        if self.reeling.sequence_length == 0 {
            return Err(ConfigError::InvalidStage(
                "reeling sequence must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// One live stage. The set is closed: a session always plays these five in order.
#[derive(Debug, Clone)]
pub enum Stage {
    Cast(CastTiming),
    Depth(DepthControl),
    Bite(BiteReaction),
    Reeling(ReelingRhythm),
    Tension(LineTension),
}

impl Stage {
    /// Builds a fresh stage of `kind`, rolling any randomized setup from `rng`.
    pub fn new<R: Rng>(kind: StageKind, config: &StageConfig, rng: &mut R) -> Self {
        match kind {
            StageKind::CastTiming => Stage::Cast(CastTiming::new(&config.cast)),
            StageKind::DepthControl => Stage::Depth(DepthControl::new(&config.depth)),
            StageKind::BiteReaction => Stage::Bite(BiteReaction::new(&config.bite, rng)),
            StageKind::ReelingRhythm => Stage::Reeling(ReelingRhythm::new(&config.reeling, rng)),
            StageKind::LineTension => Stage::Tension(LineTension::new(&config.tension)),
        }
    }

    /// All five stages in play order.
    pub fn lineup<R: Rng>(config: &StageConfig, rng: &mut R) -> Vec<Stage> {
        StageKind::ALL
            .iter()
            .map(|kind| Stage::new(*kind, config, rng))
            .collect()
    }

    pub fn kind(&self) -> StageKind {
        match self {
            Stage::Cast(_) => StageKind::CastTiming,
            Stage::Depth(_) => StageKind::DepthControl,
            Stage::Bite(_) => StageKind::BiteReaction,
            Stage::Reeling(_) => StageKind::ReelingRhythm,
            Stage::Tension(_) => StageKind::LineTension,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        match self {
            Stage::Cast(s) => s.advance(dt),
            Stage::Depth(s) => s.advance(dt),
            Stage::Bite(s) => s.advance(dt),
            Stage::Reeling(s) => s.advance(dt),
            Stage::Tension(s) => s.advance(dt),
        }
    }

    /// Returns true if this batch completed the stage.
    pub fn handle_input(&mut self, events: &[InputEvent]) -> bool {
        match self {
            Stage::Cast(s) => s.handle_input(events),
            Stage::Depth(s) => s.handle_input(events),
            Stage::Bite(s) => s.handle_input(events),
            Stage::Reeling(s) => s.handle_input(events),
            Stage::Tension(s) => s.handle_input(events),
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            Stage::Cast(s) => s.is_completed(),
            Stage::Depth(s) => s.is_completed(),
            Stage::Bite(s) => s.is_completed(),
            Stage::Reeling(s) => s.is_completed(),
            Stage::Tension(s) => s.is_completed(),
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Stage::Cast(s) => s.score(),
            Stage::Depth(s) => s.score(),
            Stage::Bite(s) => s.score(),
            Stage::Reeling(s) => s.score(),
            Stage::Tension(s) => s.score(),
        }
    }

    /// Completed score as a [`StageResult`], `None` while in progress.
    pub fn result(&self) -> Option<StageResult> {
        self.is_completed().then(|| StageResult::new(self.score()))
    }

    /// Target-square times, only meaningful for the tension stage.
    pub fn target_times(&self) -> Option<TargetTimes> {
        match self {
            Stage::Tension(s) => Some(s.times()),
            _ => None,
        }
    }
}
