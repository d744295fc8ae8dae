//! A scripted angler that plays whatever stage is active.
//!
//! Skill widens or narrows the aiming tolerance, slows reactions and adds
//! wrong arrows, so the simulator can compare sloppy and careful play.

use crate::input::{InputEvent, KeyCode};
use crate::stages::{BiteReaction, CastTiming, DepthControl, LineTension, ReelingRhythm, Stage};
use rand::seq::SliceRandom;
use rand::Rng;

/// Fastest reaction the autopilot manages, in seconds.
const BEST_REACTION: f64 = 0.12;
/// Extra reaction time at zero skill.
const REACTION_SPREAD: f64 = 0.8;
/// Chance of a wrong lift decision per tick at zero skill.
const TENSION_SLIP: f64 = 0.4;
/// Seconds of velocity the tension controller looks ahead.
const TENSION_LOOKAHEAD: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct Autopilot {
    skill: f64,
}

impl Autopilot {
    pub fn new(skill: f64) -> Self {
        let skill = if skill.is_finite() {
            skill.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { skill }
    }

    pub fn skill(&self) -> f64 {
        self.skill
    }

    /// Input for the next tick of `stage`, which will advance by `dt` first.
    pub fn events(&self, stage: &Stage, dt: f64, rng: &mut impl Rng) -> Vec<InputEvent> {
        match stage {
            Stage::Cast(cast) => self.cast(cast, dt),
            Stage::Depth(depth) => self.depth(depth, dt),
            Stage::Bite(bite) => self.bite(bite),
            Stage::Reeling(reeling) => self.reel(reeling, rng),
            Stage::Tension(tension) => self.tension(tension, rng),
        }
    }

    /// Widest miss the autopilot accepts on a track, never below one tick of travel.
    fn tolerance(&self, span: f64, travel: f64) -> f64 {
        ((1.0 - self.skill) * span * 0.5).max(travel)
    }

    fn cast(&self, cast: &CastTiming, dt: f64) -> Vec<InputEvent> {
        let marker = &cast.marker;
        let tol = self.tolerance(marker.span(), marker.speed * dt);
        if marker.offset() >= marker.span() - tol {
            vec![InputEvent::press(KeyCode::Confirm)]
        } else {
            Vec::new()
        }
    }

    fn depth(&self, depth: &DepthControl, dt: f64) -> Vec<InputEvent> {
        let marker = &depth.marker;
        let tol = self.tolerance(marker.span(), marker.speed * dt);
        if (marker.position - depth.zone_center()).abs() <= tol {
            vec![InputEvent::press(KeyCode::Confirm)]
        } else {
            Vec::new()
        }
    }

    fn bite(&self, bite: &BiteReaction) -> Vec<InputEvent> {
        let reaction = BEST_REACTION + (1.0 - self.skill) * REACTION_SPREAD;
        match bite.time_since_bite() {
            Some(waited) if waited >= reaction => vec![InputEvent::press(KeyCode::Confirm)],
            _ => Vec::new(),
        }
    }

    fn reel(&self, reeling: &ReelingRhythm, rng: &mut impl Rng) -> Vec<InputEvent> {
        let Some(expected) = reeling.expected() else {
            return Vec::new();
        };
        let key = if rng.gen::<f64>() < self.skill {
            expected
        } else {
            let wrong: Vec<KeyCode> = KeyCode::DIRECTIONS
                .iter()
                .copied()
                .filter(|k| *k != expected)
                .collect();
            wrong.choose(rng).copied().unwrap_or(expected)
        };
        vec![InputEvent::press(key)]
    }

    fn tension(&self, tension: &LineTension, rng: &mut impl Rng) -> Vec<InputEvent> {
        let (top, bottom) = tension.target_bounds();
        let center = (top + bottom) / 2.0;
        // y grows downward: heading below the center means lift
        let predicted = tension.bobber_y + tension.bobber_velocity * TENSION_LOOKAHEAD;
        let mut want_lift = predicted > center;
        if rng.gen::<f64>() < (1.0 - self.skill) * TENSION_SLIP {
            want_lift = !want_lift;
        }
        match (want_lift, tension.lift_held) {
            (true, false) => vec![InputEvent::press(KeyCode::Confirm)],
            (false, true) => vec![InputEvent::release(KeyCode::Confirm)],
            _ => Vec::new(),
        }
    }
}
