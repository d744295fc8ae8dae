//! Shop, selling and catch intake.

use super::types::{PlayerData, Rod};
use crate::error::ShopError;
use crate::fishing::{CatchResult, Rarity, RewardTables};
use crate::session::Economy;
use std::collections::HashSet;

impl PlayerData {
    /// Buys and equips the named rod.
    pub fn buy_rod(&mut self, name: &str) -> Result<Rod, ShopError> {
        let rod = Rod::from_name(name).ok_or_else(|| ShopError::UnknownRod(name.to_string()))?;
        if rod == self.rod {
            return Err(ShopError::AlreadyEquipped);
        }
        let price = rod.price();
        if self.gold < price {
            return Err(ShopError::InsufficientGold {
                price,
                gold: self.gold,
            });
        }
        self.gold -= price;
        self.rod = rod;
        log::info!("bought {} for {} gold", rod.name(), price);
        Ok(rod)
    }

    /// Sells the catch at `index`, returning the gold earned.
    pub fn sell(&mut self, index: usize) -> Option<u64> {
        if index >= self.inventory.len() {
            return None;
        }
        let catch = self.inventory.remove(index);
        self.gold = self.gold.saturating_add(catch.price);
        Some(catch.price)
    }

    /// Sells the whole inventory, returning the gold earned.
    pub fn sell_all(&mut self) -> u64 {
        let earned = self.inventory_value();
        self.inventory.clear();
        self.gold = self.gold.saturating_add(earned);
        earned
    }

    /// Sells the catch that did not fit in the inventory.
    pub fn confirm_pending_sale(&mut self) -> Option<u64> {
        let catch = self.pending_sale.take()?;
        self.gold = self.gold.saturating_add(catch.price);
        Some(catch.price)
    }

    pub fn toggle_enhanced_mode(&mut self) -> bool {
        self.enhanced_mode = !self.enhanced_mode;
        log::debug!("enhanced mode {}", on_off(self.enhanced_mode));
        self.enhanced_mode
    }

    pub fn toggle_price_bonus(&mut self) -> bool {
        self.price_bonus = !self.price_bonus;
        log::debug!("price bonus {}", on_off(self.price_bonus));
        self.price_bonus
    }

    /// How many of each tier's pool entries are not in the inventory.
    pub fn missing_counts(&self, tables: &RewardTables) -> Vec<(Rarity, usize)> {
        missing_counts(tables, &self.inventory)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

impl Economy for PlayerData {
    fn current_luck(&self) -> f64 {
        self.rod.luck()
    }

    fn enhanced_mode_active(&self) -> bool {
        self.enhanced_mode
    }

    fn price_bonus_active(&self) -> bool {
        self.price_bonus
    }

    fn receive_catch(&mut self, catch: CatchResult) {
        if self.inventory_full() {
            log::debug!("inventory full, {} goes to the pending sale", catch.item_name);
            if let Some(previous) = self.pending_sale.replace(catch) {
                // An unsold pending catch is cashed in rather than lost
                self.gold = self.gold.saturating_add(previous.price);
            }
        } else {
            self.inventory.push(catch);
        }
    }
}

/// Per tier, how many distinct pool entries are absent from `caught`.
pub fn missing_counts(tables: &RewardTables, caught: &[CatchResult]) -> Vec<(Rarity, usize)> {
    tables
        .tiers
        .iter()
        .map(|tier| {
            let seen: HashSet<&str> = caught
                .iter()
                .filter(|c| c.rarity == tier.rarity)
                .map(|c| c.item_name.as_str())
                .filter(|name| tier.pool.iter().any(|p| p == name))
                .collect();
            (tier.rarity, tier.pool.len().saturating_sub(seen.len()))
        })
        .collect()
}
