//! Reward tables: tiers, prices, item pools and the two probability tables.
//!
//! Tables are plain data so they can be swapped from a rules file. Call
//! [`RewardTables::validate`] once after loading; draws assume a valid table
//! but still fall back gracefully if handed one that is not.

use super::types::Rarity;
use crate::core::constants::{LUCK_DIVISOR, PROBABILITY_TOLERANCE};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Luck value used, alongside zero, to prove a table keeps positive mass.
const VALIDATION_LUCK_CEILING: f64 = 10_000.0;

/// Which probability table a draw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableMode {
    Normal,
    Enhanced,
}

impl TableMode {
    pub fn from_enhanced(enhanced: bool) -> Self {
        if enhanced {
            TableMode::Enhanced
        } else {
            TableMode::Normal
        }
    }
}

/// How a tier's base probability responds to luck. `bonus` is `luck / 1000`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule")]
pub enum LuckRule {
    /// `min(ceiling, base + bonus)`
    Boost { ceiling: f64 },
    /// `max(floor, base + bonus * scale)`
    ScaledBoost { scale: f64, floor: f64 },
    /// `max(floor, base - bonus * scale)`
    Penalty { scale: f64, floor: f64 },
    /// Luck has no effect.
    Fixed,
}

impl LuckRule {
    /// Adjusted (not yet normalized) probability, always within `[0, 1]`.
    pub fn apply(&self, base: f64, bonus: f64) -> f64 {
        let adjusted = match *self {
            LuckRule::Boost { ceiling } => (base + bonus).min(ceiling),
            LuckRule::ScaledBoost { scale, floor } => (base + bonus * scale).max(floor),
            LuckRule::Penalty { scale, floor } => (base - bonus * scale).max(floor),
            LuckRule::Fixed => base,
        };
        if adjusted.is_nan() {
            0.0
        } else {
            adjusted.clamp(0.0, 1.0)
        }
    }
}

/// Converts a luck stat into the additive probability bonus. Negative or
/// non-finite luck counts as none.
pub fn luck_bonus(luck: f64) -> f64 {
    if luck.is_finite() && luck > 0.0 {
        luck / LUCK_DIVISOR
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDef {
    pub rarity: Rarity,
    pub base_price: u64,
    pub pool: Vec<String>,
    pub luck_rule: LuckRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierChance {
    pub rarity: Rarity,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTables {
    /// Most common first. The first tier is the fallback for unknown lookups.
    pub tiers: Vec<TierDef>,
    /// Declared order is the draw order.
    pub normal: Vec<TierChance>,
    pub enhanced: Vec<TierChance>,
}

impl RewardTables {
    /// Builds and validates a table set.
    pub fn new(
        tiers: Vec<TierDef>,
        normal: Vec<TierChance>,
        enhanced: Vec<TierChance>,
    ) -> Result<Self, ConfigError> {
        let tables = Self {
            tiers,
            normal,
            enhanced,
        };
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tiers.is_empty() {
            return Err(ConfigError::EmptyTierList);
        }
        let mut seen = HashSet::new();
        for tier in &self.tiers {
            if !seen.insert(tier.rarity) {
                return Err(ConfigError::DuplicateTier(tier.rarity));
            }
        }
        for mode in [TableMode::Normal, TableMode::Enhanced] {
            self.validate_table(mode, &seen)?;
        }
        Ok(())
    }

    fn validate_table(&self, mode: TableMode, declared: &HashSet<Rarity>) -> Result<(), ConfigError> {
        let table = self.probabilities(mode);
        if table.is_empty() {
            return Err(ConfigError::EmptyProbabilityTable(mode));
        }
        let mut seen = HashSet::new();
        let mut total = 0.0;
        for chance in table {
            if !declared.contains(&chance.rarity) {
                return Err(ConfigError::UnknownTier {
                    mode,
                    rarity: chance.rarity,
                });
            }
            if !seen.insert(chance.rarity) {
                return Err(ConfigError::DuplicateTier(chance.rarity));
            }
            if !chance.probability.is_finite() || chance.probability < 0.0 {
                return Err(ConfigError::InvalidProbability {
                    mode,
                    rarity: chance.rarity,
                    value: chance.probability,
                });
            }
            total += chance.probability;
        }
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ConfigError::NotNormalized { mode, total });
        }
        for luck in [0.0, VALIDATION_LUCK_CEILING] {
            let bonus = luck_bonus(luck);
            let adjusted: f64 = table
                .iter()
                .map(|c| self.luck_rule(c.rarity).apply(c.probability, bonus))
                .sum();
            if adjusted <= 0.0 {
                return Err(ConfigError::NonPositiveAdjustedTotal { mode });
            }
        }
        Ok(())
    }

    pub fn probabilities(&self, mode: TableMode) -> &[TierChance] {
        match mode {
            TableMode::Normal => &self.normal,
            TableMode::Enhanced => &self.enhanced,
        }
    }

    pub fn tier(&self, rarity: Rarity) -> Option<&TierDef> {
        self.tiers.iter().find(|t| t.rarity == rarity)
    }

    /// The most common declared tier.
    pub fn lowest_rarity(&self) -> Rarity {
        self.tiers.first().map_or(Rarity::Common, |t| t.rarity)
    }

    /// Looks up `rarity`, substituting the lowest tier when it is not declared.
    pub fn tier_or_lowest(&self, rarity: Rarity) -> Option<&TierDef> {
        self.tier(rarity).or_else(|| {
            log::warn!(
                "tier {:?} is not declared, using {:?}",
                rarity,
                self.lowest_rarity()
            );
            self.tiers.first()
        })
    }

    pub fn base_price(&self, rarity: Rarity) -> u64 {
        self.tier_or_lowest(rarity).map_or(0, |t| t.base_price)
    }

    pub fn pool(&self, rarity: Rarity) -> &[String] {
        self.tier_or_lowest(rarity).map_or(&[], |t| t.pool.as_slice())
    }

    pub fn luck_rule(&self, rarity: Rarity) -> LuckRule {
        self.tier(rarity).map_or(LuckRule::Fixed, |t| t.luck_rule)
    }

    /// Every (name, rarity) pair across all pools, in tier order.
    pub fn all_items(&self) -> Vec<(String, Rarity)> {
        self.tiers
            .iter()
            .flat_map(|t| t.pool.iter().map(move |name| (name.clone(), t.rarity)))
            .collect()
    }
}

fn pool(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn chance(rarity: Rarity, probability: f64) -> TierChance {
    TierChance {
        rarity,
        probability,
    }
}

impl Default for RewardTables {
    fn default() -> Self {
        let boost = LuckRule::Boost { ceiling: 0.8 };
        let penalty = LuckRule::Penalty {
            scale: 0.5,
            floor: 0.01,
        };
        let tiers = vec![
            TierDef {
                rarity: Rarity::Common,
                base_price: 100,
                pool: pool(&[
                    "Cod", "Carp", "Minnow", "Perch", "Sunfish", "Tilapia", "Catfish", "Goldfish",
                    "Bluegill", "Troutlet",
                ]),
                luck_rule: penalty,
            },
            TierDef {
                rarity: Rarity::Uncommon,
                base_price: 500,
                pool: pool(&[
                    "Rainbow Trout",
                    "Bass",
                    "Pike",
                    "Mackerel",
                    "Flounder",
                    "Walleye",
                    "Rockfish",
                    "Perch King",
                    "Small Snapper",
                    "Eel",
                ]),
                luck_rule: penalty,
            },
            TierDef {
                rarity: Rarity::Rare,
                base_price: 2_000,
                pool: pool(&[
                    "Salmon",
                    "Swordfish",
                    "Barracuda",
                    "Marlin",
                    "Bluefin Tuna",
                    "Sturgeon",
                    "Grouper",
                    "Lionfish",
                    "Golden Trout",
                    "Red Snapper",
                ]),
                luck_rule: boost,
            },
            TierDef {
                rarity: Rarity::Epic,
                base_price: 10_000,
                pool: pool(&[
                    "Anglerfish",
                    "Giant Catfish",
                    "Ocean Sunfish",
                    "Tarpon",
                    "King Mackerel",
                    "Giant Salmon",
                    "Peacock Bass",
                    "Rainbow Marlin",
                    "Electric Eel",
                    "Swordfin",
                ]),
                luck_rule: boost,
            },
            TierDef {
                rarity: Rarity::Legendary,
                base_price: 50_000,
                pool: pool(&[
                    "Kraken Carp",
                    "Mythical Koi",
                    "Leviathan Cod",
                    "Golden Barracuda",
                    "Celestial Tuna",
                    "Phantom Marlin",
                    "Titan Sturgeon",
                    "Dragonfish",
                    "Aurora Salmon",
                    "Poseidon's Pike",
                ]),
                luck_rule: boost,
            },
            TierDef {
                rarity: Rarity::Mythic,
                base_price: 500_000,
                pool: pool(&["Abyssal Leviathan", "Celestial Megalodon", "Void Kraken"]),
                luck_rule: LuckRule::ScaledBoost {
                    scale: 0.5,
                    floor: 0.002,
                },
            },
        ];
        let normal = vec![
            chance(Rarity::Common, 0.60),
            chance(Rarity::Uncommon, 0.20),
            chance(Rarity::Rare, 0.12),
            chance(Rarity::Epic, 0.05),
            chance(Rarity::Legendary, 0.025),
            chance(Rarity::Mythic, 0.005),
        ];
        let enhanced = vec![
            chance(Rarity::Legendary, 0.50),
            chance(Rarity::Epic, 0.25),
            chance(Rarity::Uncommon, 0.15),
            chance(Rarity::Common, 0.05),
            chance(Rarity::Rare, 0.04),
            chance(Rarity::Mythic, 0.01),
        ];
        Self {
            tiers,
            normal,
            enhanced,
        }
    }
}
