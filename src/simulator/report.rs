//! Simulation report generation.

use super::config::SimConfig;
use super::runner::RunStats;
use crate::core::constants::{FRAME_DT, STAGE_COUNT};
use crate::economy::missing_counts;
use crate::fishing::{QualityTier, RarityDistribution, TableMode};
use crate::session::GameRules;
use crate::stages::StageKind;
use serde::Serialize;

/// Observed against expected share of one rarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RarityRow {
    pub rarity: String,
    pub count: u32,
    pub observed_pct: f64,
    pub expected_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityRow {
    pub tier: String,
    pub count: u32,
    pub pct: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_completed: u32,
    pub runs_stalled: u32,

    pub skill: f64,
    pub rod: String,
    pub luck: f64,
    pub enhanced_mode: bool,
    pub price_bonus: bool,
    pub quality_policy: String,

    pub avg_quality: f64,
    pub avg_price: f64,
    pub total_gold: u64,
    pub avg_seconds_per_run: f64,
    pub avg_stage_scores: Vec<f64>,

    /// Distinct pool entries caught across all runs, out of the full index.
    pub fish_index_seen: usize,
    pub fish_index_total: usize,

    pub rarity_distribution: Vec<RarityRow>,
    pub quality_distribution: Vec<QualityRow>,

    // Individual runs stay out of the JSON report
    #[serde(skip)]
    pub runs: Vec<RunStats>,
}

fn pct(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig, rules: &GameRules) -> Self {
        let num_runs = runs.len() as u32;
        let catches: Vec<_> = runs.iter().filter_map(|r| r.catch.as_ref()).collect();
        let runs_completed = catches.len() as u32;
        let completed_div = runs_completed.max(1) as f64;

        let avg_quality = catches.iter().map(|c| c.quality_score).sum::<f64>() / completed_div;
        let total_gold: u64 = catches.iter().map(|c| c.price).sum();
        let avg_price = total_gold as f64 / completed_div;
        let avg_seconds_per_run = runs
            .iter()
            .filter(|r| r.completed())
            .map(|r| r.ticks as f64 * FRAME_DT)
            .sum::<f64>()
            / completed_div;

        let mut avg_stage_scores = vec![0.0; STAGE_COUNT];
        for run in runs.iter().filter(|r| r.completed()) {
            for (slot, score) in avg_stage_scores.iter_mut().zip(&run.stage_scores) {
                *slot += score / completed_div;
            }
        }

        let caught: Vec<_> = catches.iter().map(|c| (*c).clone()).collect();
        let fish_index_total = rules.tables.all_items().len();
        let fish_index_missing: usize = missing_counts(&rules.tables, &caught)
            .iter()
            .map(|(_, missing)| missing)
            .sum();

        let luck = config.rod.luck();
        let mode = TableMode::from_enhanced(config.enhanced_mode);
        let expected = RarityDistribution::adjusted(&rules.tables, luck, mode);
        let rarity_distribution = rules
            .tables
            .tiers
            .iter()
            .map(|tier| {
                let count = catches.iter().filter(|c| c.rarity == tier.rarity).count() as u32;
                RarityRow {
                    rarity: tier.rarity.name().to_string(),
                    count,
                    observed_pct: pct(count, runs_completed),
                    expected_pct: expected.probability(tier.rarity) * 100.0,
                }
            })
            .collect();

        let quality_distribution = QualityTier::ALL
            .iter()
            .map(|tier| {
                let count = catches.iter().filter(|c| c.quality_tier == *tier).count() as u32;
                QualityRow {
                    tier: tier.name().to_string(),
                    count,
                    pct: pct(count, runs_completed),
                }
            })
            .collect();

        Self {
            num_runs,
            runs_completed,
            runs_stalled: num_runs - runs_completed,
            skill: config.skill,
            rod: config.rod.name().to_string(),
            luck,
            enhanced_mode: config.enhanced_mode,
            price_bonus: config.price_bonus,
            quality_policy: rules.quality_policy.name().to_string(),
            avg_quality,
            avg_price,
            total_gold,
            avg_seconds_per_run,
            avg_stage_scores,
            fish_index_seen: fish_index_total.saturating_sub(fish_index_missing),
            fish_index_total,
            rarity_distribution,
            quality_distribution,
            runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} caught, {} stalled\n",
            self.num_runs, self.runs_completed, self.runs_stalled
        ));
        report.push_str(&format!(
            "Rod: {} (luck {}), skill {:.2}, policy {}{}{}\n\n",
            self.rod,
            self.luck,
            self.skill,
            self.quality_policy,
            if self.enhanced_mode { ", enhanced" } else { "" },
            if self.price_bonus { ", price bonus" } else { "" }
        ));

        report.push_str("── STAGES ───────────────────────────────────────────────────────\n");
        for (kind, score) in StageKind::ALL.iter().zip(&self.avg_stage_scores) {
            report.push_str(&format!("  {:<16} {:>6.1}\n", kind.name(), score));
        }
        report.push('\n');

        report.push_str("── QUALITY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Quality:   {:.1}\n", self.avg_quality));
        for row in &self.quality_distribution {
            let bar: String = "█".repeat((row.pct / 5.0) as usize);
            report.push_str(&format!("  {:<8} {:>5.1}% {}\n", row.tier, row.pct, bar));
        }
        report.push('\n');

        report.push_str("── RARITY ───────────────────────────────────────────────────────\n");
        report.push_str("  Tier        Count   Observed   Expected\n");
        report.push_str("  ────        ─────   ────────   ────────\n");
        for row in &self.rarity_distribution {
            report.push_str(&format!(
                "  {:<10} {:>6}   {:>7.2}%   {:>7.2}%\n",
                row.rarity, row.count, row.observed_pct, row.expected_pct
            ));
        }
        report.push('\n');

        report.push_str("── ECONOMY ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Price:     {:.0}\n", self.avg_price));
        report.push_str(&format!("  Total Gold:    {}\n", self.total_gold));
        report.push_str(&format!(
            "  Fish Index:    {}/{}\n",
            self.fish_index_seen, self.fish_index_total
        ));
        report.push_str(&format!(
            "  Avg Session:   {:.1}s\n",
            self.avg_seconds_per_run
        ));

        if self.runs_stalled > 0 {
            report.push_str(&format!(
                "  ⚠️  {} sessions never finished - autopilot stuck?\n",
                self.runs_stalled
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
