//! Stage 4: reeling rhythm.
//!
//! A random arrow sequence is shown; every arrow press consumes one slot,
//! right or wrong.

use super::result::StageResult;
use crate::core::constants::REELING_SEQUENCE_LENGTH;
use crate::input::{InputEvent, KeyCode, KeyKind};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelingConfig {
    pub sequence_length: usize,
}

impl Default for ReelingConfig {
    fn default() -> Self {
        Self {
            sequence_length: REELING_SEQUENCE_LENGTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReelingRhythm {
    pub sequence: Vec<KeyCode>,
    /// Index of the next arrow to be matched.
    pub cursor: usize,
    pub correct: usize,
    /// Per-slot outcome for the arrows already consumed.
    pub hits: Vec<bool>,
    result: Option<StageResult>,
}

impl ReelingRhythm {
    pub fn new<R: Rng>(config: &ReelingConfig, rng: &mut R) -> Self {
        let sequence = (0..config.sequence_length)
            .filter_map(|_| KeyCode::DIRECTIONS.choose(rng).copied())
            .collect();
        Self::with_sequence(sequence)
    }

    /// Builds the stage around a known sequence. Non-directional codes are dropped;
    /// a sequence with no arrows left is over at once with a score of 0.
    pub fn with_sequence(sequence: Vec<KeyCode>) -> Self {
        let sequence: Vec<KeyCode> = sequence.into_iter().filter(|c| c.is_direction()).collect();
        let hits = Vec::with_capacity(sequence.len());
        let mut stage = Self {
            sequence,
            cursor: 0,
            correct: 0,
            hits,
            result: None,
        };
        if stage.sequence.is_empty() {
            stage.finish();
        }
        stage
    }

    /// Rhythm has no timed component.
    pub fn advance(&mut self, _dt: f64) {}

    pub fn handle_input(&mut self, events: &[InputEvent]) -> bool {
        if self.result.is_some() {
            return false;
        }
        for event in events {
            if event.kind != KeyKind::Down || !event.code.is_direction() {
                continue;
            }
            let Some(expected) = self.sequence.get(self.cursor) else {
                break;
            };
            let hit = *expected == event.code;
            if hit {
                self.correct += 1;
            }
            self.hits.push(hit);
            self.cursor += 1;
            if self.cursor >= self.sequence.len() {
                self.finish();
                return true;
            }
        }
        false
    }

    fn finish(&mut self) {
        let len = self.sequence.len();
        let score = if len == 0 {
            0.0
        } else {
            (self.correct as f64 / len as f64) * 100.0
        };
        self.result = Some(StageResult::new(score));
    }

    /// The arrow the player should press next.
    pub fn expected(&self) -> Option<KeyCode> {
        self.sequence.get(self.cursor).copied()
    }

    pub fn is_completed(&self) -> bool {
        self.result.is_some()
    }

    pub fn score(&self) -> f64 {
        self.result.map_or(0.0, |r| r.score())
    }
}
