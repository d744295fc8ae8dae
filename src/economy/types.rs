//! Rods and the player's wallet, inventory and mode flags.

use crate::core::constants::{INVENTORY_CAPACITY, STARTING_GOLD};
use crate::fishing::CatchResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rod {
    Basic,
    Novice,
    Master,
}

impl Rod {
    pub const ALL: [Rod; 3] = [Rod::Basic, Rod::Novice, Rod::Master];

    pub fn name(&self) -> &'static str {
        match self {
            Rod::Basic => "Basic Rod",
            Rod::Novice => "Novice Rod",
            Rod::Master => "Master Rod",
        }
    }

    /// Accepts the full name ("Novice Rod") or the short one ("novice").
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|rod| {
            let full = rod.name().to_ascii_lowercase();
            wanted == full || full.strip_suffix(" rod") == Some(wanted.as_str())
        })
    }

    pub fn price(&self) -> u64 {
        match self {
            Rod::Basic => 0,
            Rod::Novice => 5_000,
            Rod::Master => 50_000,
        }
    }

    pub fn luck(&self) -> f64 {
        match self {
            Rod::Basic => 0.0,
            Rod::Novice => 20.0,
            Rod::Master => 45.0,
        }
    }
}

/// Everything the economy loop tracks for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    pub gold: u64,
    pub rod: Rod,
    pub inventory: Vec<CatchResult>,
    pub inventory_capacity: usize,
    /// A catch that arrived while the inventory was full. It can only be sold.
    pub pending_sale: Option<CatchResult>,
    pub enhanced_mode: bool,
    pub price_bonus: bool,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerData {
    pub fn new() -> Self {
        Self {
            gold: STARTING_GOLD,
            rod: Rod::Basic,
            inventory: Vec::new(),
            inventory_capacity: INVENTORY_CAPACITY,
            pending_sale: None,
            enhanced_mode: false,
            price_bonus: false,
        }
    }

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= self.inventory_capacity
    }

    pub fn inventory_value(&self) -> u64 {
        self.inventory.iter().map(|c| c.price).sum()
    }
}
