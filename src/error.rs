//! Error types for configuration loading and the rod shop.

use crate::fishing::{Rarity, TableMode};

/// A configuration defect detected when rules are loaded.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rules: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reward tables declare no tiers")]
    EmptyTierList,
    #[error("tier {0:?} is declared more than once")]
    DuplicateTier(Rarity),
    #[error("{0:?} probability table is empty")]
    EmptyProbabilityTable(TableMode),
    #[error("{mode:?} probability table references undeclared tier {rarity:?}")]
    UnknownTier { mode: TableMode, rarity: Rarity },
    #[error("{mode:?} probability for {rarity:?} is invalid: {value}")]
    InvalidProbability {
        mode: TableMode,
        rarity: Rarity,
        value: f64,
    },
    #[error("{mode:?} probabilities sum to {total}, expected 1.0")]
    NotNormalized { mode: TableMode, total: f64 },
    #[error("{mode:?} probabilities have no positive mass after luck adjustment")]
    NonPositiveAdjustedTotal { mode: TableMode },
    #[error("invalid stage configuration: {0}")]
    InvalidStage(String),
}

/// Why a rod purchase was refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShopError {
    #[error("no rod named {0:?} is for sale")]
    UnknownRod(String),
    #[error("that rod is already equipped")]
    AlreadyEquipped,
    #[error("rod costs {price} gold but only {gold} is available")]
    InsufficientGold { price: u64, gold: u64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
