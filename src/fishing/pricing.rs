//! Sale prices.

use super::tables::RewardTables;
use super::types::Rarity;
use crate::core::constants::{PRICE_BONUS_MULTIPLIER, PRICE_QUALITY_EXPONENT};

/// `floor(base * (quality / 100) ^ 1.5)`, with the base multiplied by ten
/// while the price bonus is active. Quality is clamped to `[0, 100]`.
pub fn selling_price(tables: &RewardTables, rarity: Rarity, quality: f64, bonus: bool) -> u64 {
    let mut base = tables.base_price(rarity);
    if bonus {
        base = base.saturating_mul(PRICE_BONUS_MULTIPLIER);
    }
    let quality = if quality.is_nan() {
        0.0
    } else {
        quality.clamp(0.0, 100.0)
    };
    let factor = (quality / 100.0).powf(PRICE_QUALITY_EXPONENT);
    (base as f64 * factor).floor() as u64
}
