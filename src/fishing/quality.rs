//! Combining the five stage scores into one quality score.

use super::types::QualityTier;
use crate::core::constants::{WEIGHTED_STAGE_SHARE, WEIGHTED_TARGET_SHARE};
use crate::stages::TargetTimes;
use serde::{Deserialize, Serialize};

/// How stage scores are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityPolicy {
    /// Plain mean of the stage scores.
    Simple,
    /// 70% stage mean, 30% share of tension time spent on target.
    #[default]
    Weighted,
}

impl QualityPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            QualityPolicy::Simple => "simple",
            QualityPolicy::Weighted => "weighted",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "simple" => Some(QualityPolicy::Simple),
            "weighted" => Some(QualityPolicy::Weighted),
            _ => None,
        }
    }
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Quality score in `[0, 100]` for a finished session.
pub fn aggregate_quality(policy: QualityPolicy, scores: &[f64], times: TargetTimes) -> f64 {
    let stage_mean = mean(scores);
    let quality = match policy {
        QualityPolicy::Simple => stage_mean,
        QualityPolicy::Weighted => {
            stage_mean * WEIGHTED_STAGE_SHARE + times.ratio_percent() * WEIGHTED_TARGET_SHARE
        }
    };
    if quality.is_nan() {
        0.0
    } else {
        quality.clamp(0.0, 100.0)
    }
}

/// Score and tier in one step.
pub fn grade(policy: QualityPolicy, scores: &[f64], times: TargetTimes) -> (f64, QualityTier) {
    let quality = aggregate_quality(policy, scores, times);
    (quality, QualityTier::from_score(quality))
}
