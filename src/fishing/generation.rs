//! Reward generation: luck-adjusted rarity rolling and item selection.

use super::tables::{luck_bonus, RewardTables, TableMode};
use super::types::{Rarity, Reward};
use crate::core::constants::SENTINEL_ITEM_NAME;
use rand::Rng;

/// A probability table after luck adjustment and renormalization.
///
/// Entries keep the table's declared order, which is also the draw order.
#[derive(Debug, Clone, PartialEq)]
pub struct RarityDistribution {
    entries: Vec<(Rarity, f64)>,
    fallback: Rarity,
}

impl RarityDistribution {
    /// Adjusts `mode`'s base table for `luck` and renormalizes it to sum to 1.
    pub fn adjusted(tables: &RewardTables, luck: f64, mode: TableMode) -> Self {
        let bonus = luck_bonus(luck);
        let mut entries: Vec<(Rarity, f64)> = tables
            .probabilities(mode)
            .iter()
            .map(|c| (c.rarity, tables.luck_rule(c.rarity).apply(c.probability, bonus)))
            .collect();

        let total: f64 = entries.iter().map(|(_, p)| p).sum();
        if total > 0.0 {
            for (_, p) in entries.iter_mut() {
                *p /= total;
            }
        } else {
            // Only reachable with an unvalidated table
            log::warn!("{mode:?} table has no mass after luck adjustment");
            entries.clear();
        }

        Self {
            entries,
            fallback: tables.lowest_rarity(),
        }
    }

    pub fn entries(&self) -> &[(Rarity, f64)] {
        &self.entries
    }

    /// Normalized probability of `rarity`, zero if the table does not list it.
    pub fn probability(&self, rarity: Rarity) -> f64 {
        self.entries
            .iter()
            .filter(|(r, _)| *r == rarity)
            .map(|(_, p)| *p)
            .sum()
    }

    /// Running totals in draw order. The last threshold is 1 up to rounding.
    pub fn cumulative(&self) -> Vec<(Rarity, f64)> {
        let mut running = 0.0;
        self.entries
            .iter()
            .map(|(rarity, p)| {
                running += p;
                (*rarity, running)
            })
            .collect()
    }

    /// Picks the first tier whose cumulative mass reaches `roll`.
    ///
    /// A roll beyond the last threshold (rounding) lands on the lowest tier.
    pub fn pick(&self, roll: f64) -> Rarity {
        self.cumulative()
            .into_iter()
            .find(|(_, threshold)| roll <= *threshold)
            .map_or(self.fallback, |(rarity, _)| rarity)
    }

    pub fn roll(&self, rng: &mut impl Rng) -> Rarity {
        let roll: f64 = rng.gen::<f64>();
        self.pick(roll)
    }
}

/// Rolls a rarity for the given luck and table mode.
pub fn roll_rarity(tables: &RewardTables, luck: f64, mode: TableMode, rng: &mut impl Rng) -> Rarity {
    RarityDistribution::adjusted(tables, luck, mode).roll(rng)
}

/// Draws a uniformly random item name from `rarity`'s pool.
///
/// An empty pool yields the sentinel name.
pub fn pick_item_name(tables: &RewardTables, rarity: Rarity, rng: &mut impl Rng) -> String {
    let pool = tables.pool(rarity);
    if pool.is_empty() {
        log::warn!("{rarity:?} pool is empty, using {SENTINEL_ITEM_NAME:?}");
        return SENTINEL_ITEM_NAME.to_string();
    }
    pool[rng.gen_range(0..pool.len())].clone()
}

/// Rolls a rarity and an item from its pool.
pub fn generate_reward(
    tables: &RewardTables,
    luck: f64,
    mode: TableMode,
    rng: &mut impl Rng,
) -> Reward {
    let rarity = roll_rarity(tables, luck, mode, rng);
    let name = pick_item_name(tables, rarity, rng);
    Reward { name, rarity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_zero_luck_keeps_base_table() {
        let tables = RewardTables::default();
        let dist = RarityDistribution::adjusted(&tables, 0.0, TableMode::Normal);
        assert!((dist.probability(Rarity::Common) - 0.60).abs() < 1e-12);
        assert!((dist.probability(Rarity::Mythic) - 0.005).abs() < 1e-12);
    }

    #[test]
    fn test_master_rod_luck_shifts_odds_up() {
        let tables = RewardTables::default();
        let base = RarityDistribution::adjusted(&tables, 0.0, TableMode::Normal);
        let lucky = RarityDistribution::adjusted(&tables, 45.0, TableMode::Normal);

        assert!(lucky.probability(Rarity::Common) < base.probability(Rarity::Common));
        assert!(lucky.probability(Rarity::Uncommon) < base.probability(Rarity::Uncommon));
        for rarity in [Rarity::Rare, Rarity::Epic, Rarity::Legendary, Rarity::Mythic] {
            assert!(lucky.probability(rarity) > base.probability(rarity));
        }

        // Raw: .5775 .1775 .165 .095 .07 .0275, total 1.1125
        assert!((lucky.probability(Rarity::Rare) - 0.165 / 1.1125).abs() < 1e-12);
    }

    #[test]
    fn test_cumulative_follows_declared_order() {
        let tables = RewardTables::default();
        let dist = RarityDistribution::adjusted(&tables, 0.0, TableMode::Enhanced);
        let cumulative = dist.cumulative();
        assert_eq!(cumulative[0].0, Rarity::Legendary);
        assert!((cumulative[0].1 - 0.50).abs() < 1e-12);
        assert!((cumulative[1].1 - 0.75).abs() < 1e-12);
        assert!((cumulative.last().map_or(0.0, |c| c.1) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pick_boundaries() {
        let tables = RewardTables::default();
        let dist = RarityDistribution::adjusted(&tables, 0.0, TableMode::Normal);
        assert_eq!(dist.pick(0.0), Rarity::Common);
        assert_eq!(dist.pick(0.59), Rarity::Common);
        assert_eq!(dist.pick(0.61), Rarity::Uncommon);
        assert_eq!(dist.pick(0.999), Rarity::Mythic);
        assert_eq!(dist.pick(1.5), Rarity::Common);
    }

    #[test]
    fn test_unvalidated_empty_table_falls_back() {
        let mut tables = RewardTables::default();
        tables.normal.clear();
        let mut rng = create_test_rng();
        assert_eq!(roll_rarity(&tables, 0.0, TableMode::Normal, &mut rng), Rarity::Common);
    }

    #[test]
    fn test_generate_reward_uses_rarity_pool() {
        let tables = RewardTables::default();
        let mut rng = create_test_rng();
        for _ in 0..200 {
            let reward = generate_reward(&tables, 20.0, TableMode::Normal, &mut rng);
            assert!(tables.pool(reward.rarity).contains(&reward.name));
        }
    }

    #[test]
    fn test_empty_pool_uses_sentinel() {
        let mut tables = RewardTables::default();
        for tier in tables.tiers.iter_mut() {
            tier.pool.clear();
        }
        let mut rng = create_test_rng();
        let reward = generate_reward(&tables, 0.0, TableMode::Normal, &mut rng);
        assert_eq!(reward.name, SENTINEL_ITEM_NAME);
    }

    #[test]
    fn test_same_seed_same_reward() {
        let tables = RewardTables::default();
        let a = generate_reward(&tables, 45.0, TableMode::Enhanced, &mut create_test_rng());
        let b = generate_reward(&tables, 45.0, TableMode::Enhanced, &mut create_test_rng());
        assert_eq!(a, b);
    }
}
