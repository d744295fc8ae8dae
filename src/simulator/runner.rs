//! Main simulation runner.
//!
//! Every run is a real `FishingSession` driven by the autopilot at the fixed
//! frame step, so results match what a player would see.

use super::autopilot::Autopilot;
use super::config::SimConfig;
use super::report::SimReport;
use crate::core::constants::FRAME_DT;
use crate::economy::PlayerData;
use crate::fishing::CatchResult;
use crate::session::{FishingSession, GameRules};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Outcome of one simulated session.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub stage_scores: Vec<f64>,
    pub catch: Option<CatchResult>,
    pub ticks: u64,
}

impl RunStats {
    pub fn completed(&self) -> bool {
        self.catch.is_some()
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, rules: &GameRules) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);
    let pilot = Autopilot::new(config.skill);

    for run_idx in 0..config.num_runs {
        // Create RNG for this run
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, rules, &pilot, &mut rng);

        if config.verbosity >= 2 {
            match &run.catch {
                Some(catch) => println!(
                    "Run {}/{} - {} ({}) {} {:.1}, {} gold",
                    run_idx + 1,
                    config.num_runs,
                    catch.item_name,
                    catch.rarity.name(),
                    catch.quality_tier.name(),
                    catch.quality_score,
                    catch.price
                ),
                None => println!(
                    "Run {}/{} - stalled after {} ticks",
                    run_idx + 1,
                    config.num_runs,
                    run.ticks
                ),
            }
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs, config, rules)
}

/// Plays one session from the first cast to the catch.
pub fn simulate_single_run(
    config: &SimConfig,
    rules: &GameRules,
    pilot: &Autopilot,
    rng: &mut ChaCha8Rng,
) -> RunStats {
    let mut player = PlayerData::new();
    player.rod = config.rod;
    player.enhanced_mode = config.enhanced_mode;
    player.price_bonus = config.price_bonus;

    let mut session = FishingSession::new(rules);
    session.begin(rng);

    let mut ticks = 0;
    let mut catch = None;
    while ticks < config.max_ticks_per_run {
        let events = match session.current_stage() {
            Some(stage) => pilot.events(stage, FRAME_DT, rng),
            None => break,
        };
        let result = session.tick(FRAME_DT, &events, &mut player, rng);
        ticks += 1;
        if result.catch.is_some() {
            catch = result.catch;
            break;
        }
    }

    RunStats {
        stage_scores: session.stage_scores().to_vec(),
        catch,
        ticks,
    }
}
