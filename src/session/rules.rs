//! The validated configuration bundle a session plays by.

use crate::error::ConfigResult;
use crate::fishing::{QualityPolicy, RewardTables};
use crate::stages::StageConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Stage tunings, the quality policy and the reward tables.
///
/// Missing fields in a rules file fall back to the shipped defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub stages: StageConfig,
    pub quality_policy: QualityPolicy,
    pub tables: RewardTables,
}

impl GameRules {
    pub fn new(
        stages: StageConfig,
        quality_policy: QualityPolicy,
        tables: RewardTables,
    ) -> ConfigResult<Self> {
        let rules = Self {
            stages,
            quality_policy,
            tables,
        };
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.stages.validate()?;
        self.tables.validate()
    }

    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let rules = Self::from_json_str(&json)?;
        log::debug!("loaded rules from {}", path.display());
        Ok(rules)
    }

    pub fn to_json_pretty(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
