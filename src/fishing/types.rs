//! Fishing data structures.

use serde::{Deserialize, Serialize};

/// Catch rarity, most common first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }
}

/// Grade of a finished session, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    Perfect,
    Great,
    Good,
    Fair,
    Poor,
}

impl QualityTier {
    pub const ALL: [QualityTier; 5] = [
        QualityTier::Perfect,
        QualityTier::Great,
        QualityTier::Good,
        QualityTier::Fair,
        QualityTier::Poor,
    ];

    /// Lowest quality score that earns this tier.
    pub fn threshold(&self) -> f64 {
        match self {
            QualityTier::Perfect => 95.0,
            QualityTier::Great => 80.0,
            QualityTier::Good => 60.0,
            QualityTier::Fair => 40.0,
            QualityTier::Poor => f64::NEG_INFINITY,
        }
    }

    /// Maps a quality score to its tier, checking the highest threshold first.
    pub fn from_score(score: f64) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|tier| score >= tier.threshold())
            .unwrap_or(QualityTier::Poor)
    }

    pub fn name(&self) -> &'static str {
        match self {
            QualityTier::Perfect => "Perfect",
            QualityTier::Great => "Great",
            QualityTier::Good => "Good",
            QualityTier::Fair => "Fair",
            QualityTier::Poor => "Poor",
        }
    }
}

/// A drawn item before quality and price are attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub name: String,
    pub rarity: Rarity,
}

/// The outcome of one completed fishing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchResult {
    pub item_name: String,
    pub rarity: Rarity,
    pub quality_tier: QualityTier,
    /// In `[0, 100]`.
    pub quality_score: f64,
    pub price: u64,
}
