//! Session integration tests
//!
//! End-to-end tests for a fishing session covering:
//! - A fully scripted five-stage run with known scores
//! - Quality policies and the catch pipeline
//! - Economy hand-off (inventory, pending sale, flags)
//! - Abort and post-completion behavior

use castline::economy::{PlayerData, Rod};
use castline::fishing::{
    aggregate_quality, grade, selling_price, QualityPolicy, QualityTier, Rarity, RewardTables,
};
use castline::input::{InputEvent, KeyCode};
use castline::session::{Economy, FishingSession, GameRules, SessionPhase};
use castline::stages::{Stage, StageConfig, StageKind, TargetTimes};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

/// Tunings that make every stage score land on round numbers:
/// the depth marker reaches the zone center after exactly one second,
/// the bite always comes at 1.0s and the tension square covers the track.
fn scripted_rules(policy: QualityPolicy) -> GameRules {
    let mut stages = StageConfig::default();
    stages.depth.marker_speed = 200.0;
    stages.bite.min_delay = 1.0;
    stages.bite.max_delay = 1.0;
    stages.tension.target_size = 1000.0;
    stages.tension.target_speed = 0.0;
    stages.tension.target_top_min = 0.0;
    stages.tension.target_top_max = 0.0;
    stages.tension.target_start = 0.0;
    GameRules::new(stages, policy, RewardTables::default()).expect("scripted rules are valid")
}

fn confirm() -> Vec<InputEvent> {
    vec![InputEvent::press(KeyCode::Confirm)]
}

fn other_direction(code: KeyCode) -> KeyCode {
    if code == KeyCode::Left {
        KeyCode::Right
    } else {
        KeyCode::Left
    }
}

/// Plays the scripted run: 50, 100, 75, 75, 100.
fn play_scripted(
    session: &mut FishingSession,
    player: &mut PlayerData,
    rng: &mut ChaCha8Rng,
) -> Vec<StageKind> {
    let mut cleared = Vec::new();
    let mut record = |kind: Option<StageKind>| {
        if let Some(kind) = kind {
            cleared.push(kind);
        }
    };

    // Cast: marker at 300 of 600
    record(session.tick(1.0, &confirm(), player, rng).cleared);
    // Depth: marker at the zone center
    record(session.tick(1.0, &confirm(), player, rng).cleared);
    // Bite: fires at 1.0s, struck 0.25s later
    record(session.tick(1.0, &[], player, rng).cleared);
    record(session.tick(0.25, &confirm(), player, rng).cleared);

    // Reeling: six of eight right
    let sequence = match session.current_stage() {
        Some(Stage::Reeling(reeling)) => reeling.sequence.clone(),
        other => panic!("expected reeling stage, got {other:?}"),
    };
    let presses: Vec<InputEvent> = sequence
        .iter()
        .enumerate()
        .map(|(i, code)| {
            if i < 2 {
                InputEvent::press(other_direction(*code))
            } else {
                InputEvent::press(*code)
            }
        })
        .collect();
    record(session.tick(1.0 / 60.0, &presses, player, rng).cleared);

    // Tension: five one-second ticks, always on target
    for _ in 0..5 {
        record(session.tick(1.0, &[], player, rng).cleared);
    }
    cleared
}

// ============================================================================
// Scripted Session Tests
// ============================================================================

#[test]
fn test_scripted_session_reaches_done_with_known_scores() {
    let rules = scripted_rules(QualityPolicy::Weighted);
    let mut session = FishingSession::new(&rules);
    let mut player = PlayerData::new();
    let mut rng = create_test_rng();

    let cleared = play_scripted(&mut session, &mut player, &mut rng);

    assert_eq!(cleared, StageKind::ALL.to_vec());
    assert_eq!(session.phase(), SessionPhase::Done);
    assert!(session.is_done());
    assert_eq!(session.stage_scores(), &[50.0, 100.0, 75.0, 75.0, 100.0]);

    let catch = session.catch().expect("session produced a catch").clone();
    // 80 * 0.7 + 100 * 0.3
    assert!((catch.quality_score - 86.0).abs() < 1e-9);
    assert_eq!(catch.quality_tier, QualityTier::Great);
    assert_eq!(
        catch.price,
        selling_price(&rules.tables, catch.rarity, catch.quality_score, false)
    );
    assert!(rules.tables.pool(catch.rarity).contains(&catch.item_name));
    assert_eq!(player.inventory, vec![catch]);
}

#[test]
fn test_simple_policy_uses_plain_mean() {
    let rules = scripted_rules(QualityPolicy::Simple);
    let mut session = FishingSession::new(&rules);
    let mut player = PlayerData::new();
    let mut rng = create_test_rng();

    play_scripted(&mut session, &mut player, &mut rng);

    let catch = session.catch().expect("session produced a catch");
    assert_eq!(catch.quality_score, 80.0);
    assert_eq!(catch.quality_tier, QualityTier::Great);
}

#[test]
fn test_catch_is_reported_on_final_tick_only() {
    let rules = scripted_rules(QualityPolicy::Weighted);
    let mut session = FishingSession::new(&rules);
    let mut player = PlayerData::new();
    let mut rng = create_test_rng();

    let mut catches = 0;
    for _ in 0..2 {
        if session.tick(1.0, &confirm(), &mut player, &mut rng).catch.is_some() {
            catches += 1;
        }
    }
    assert_eq!(catches, 0);
    assert_eq!(session.current_kind(), Some(StageKind::BiteReaction));
    assert!(player.inventory.is_empty());
}

#[test]
fn test_ticks_after_done_change_nothing() {
    let rules = scripted_rules(QualityPolicy::Weighted);
    let mut session = FishingSession::new(&rules);
    let mut player = PlayerData::new();
    let mut rng = create_test_rng();
    play_scripted(&mut session, &mut player, &mut rng);

    let scores = session.stage_scores().to_vec();
    let catch = session.catch().cloned();
    for _ in 0..10 {
        let result = session.tick(1.0, &confirm(), &mut player, &mut rng);
        assert!(result.catch.is_none());
        assert!(result.cleared.is_none());
    }
    assert_eq!(session.stage_scores(), scores.as_slice());
    assert_eq!(session.catch().cloned(), catch);
    assert_eq!(player.inventory.len(), 1);

    // Completed stages ignore further input
    let mut stages = session.stages().to_vec();
    for stage in stages.iter_mut() {
        let before = stage.score();
        assert!(!stage.handle_input(&confirm()));
        assert_eq!(stage.score(), before);
    }
}

#[test]
fn test_abort_mid_session_produces_nothing() {
    let rules = scripted_rules(QualityPolicy::Weighted);
    let mut session = FishingSession::new(&rules);
    let mut player = PlayerData::new();
    let mut rng = create_test_rng();

    session.tick(1.0, &confirm(), &mut player, &mut rng);
    session.tick(1.0, &confirm(), &mut player, &mut rng);
    session.abort();

    for _ in 0..20 {
        session.tick(1.0, &confirm(), &mut player, &mut rng);
    }
    assert_eq!(session.phase(), SessionPhase::Aborted);
    assert!(session.catch().is_none());
    assert!(player.inventory.is_empty());
    assert_eq!(player.gold, 5_000);
}

#[test]
fn test_restart_allows_a_second_catch() {
    let rules = scripted_rules(QualityPolicy::Weighted);
    let mut session = FishingSession::new(&rules);
    let mut player = PlayerData::new();
    let mut rng = create_test_rng();

    play_scripted(&mut session, &mut player, &mut rng);
    session.restart();
    play_scripted(&mut session, &mut player, &mut rng);

    assert!(session.is_done());
    assert_eq!(player.inventory.len(), 2);
}

// ============================================================================
// Economy Hand-off Tests
// ============================================================================

#[test]
fn test_price_bonus_and_full_inventory() {
    let rules = scripted_rules(QualityPolicy::Weighted);
    let mut player = PlayerData::new();
    player.inventory_capacity = 0;
    player.toggle_price_bonus();
    let mut rng = create_test_rng();

    let mut session = FishingSession::new(&rules);
    play_scripted(&mut session, &mut player, &mut rng);

    let catch = session.catch().expect("session produced a catch").clone();
    assert_eq!(
        catch.price,
        selling_price(&rules.tables, catch.rarity, catch.quality_score, true)
    );
    assert!(player.inventory.is_empty());
    assert_eq!(player.pending_sale.as_ref(), Some(&catch));

    assert_eq!(player.confirm_pending_sale(), Some(catch.price));
    assert_eq!(player.gold, 5_000 + catch.price);
}

#[test]
fn test_enhanced_mode_rolls_rare_tiers_more_often() {
    let rules = scripted_rules(QualityPolicy::Weighted);
    let mut rng = create_test_rng();

    let mut count_high = |enhanced: bool| {
        let mut high = 0;
        for _ in 0..300 {
            let mut player = PlayerData::new();
            player.enhanced_mode = enhanced;
            let mut session = FishingSession::new(&rules);
            play_scripted(&mut session, &mut player, &mut rng);
            if let Some(catch) = session.catch() {
                if catch.rarity >= Rarity::Epic {
                    high += 1;
                }
            }
        }
        high
    };

    let normal = count_high(false);
    let enhanced = count_high(true);
    // Roughly 8% against 76% of catches
    assert!(normal < 60, "normal mode rolled {normal} epic+ catches");
    assert!(enhanced > 180, "enhanced mode rolled {enhanced} epic+ catches");
}

#[test]
fn test_master_rod_luck_reaches_the_session() {
    let mut player = PlayerData::new();
    player.gold = 60_000;
    player.buy_rod("Master Rod").expect("affordable");
    assert_eq!(player.rod, Rod::Master);
    assert_eq!(player.current_luck(), 45.0);
    assert_eq!(player.gold, 10_000);
}

// ============================================================================
// Quality Chain Tests
// ============================================================================

#[test]
fn test_weighted_quality_chain_from_four_scores() {
    let times = TargetTimes {
        in_target: 3.5,
        out_target: 1.5,
    };
    let quality = aggregate_quality(QualityPolicy::Weighted, &[80.0, 90.0, 70.0, 85.0], times);
    assert!((quality - 77.875).abs() < 1e-9);
    assert_eq!(QualityTier::from_score(quality), QualityTier::Good);
}

#[test]
fn test_quality_extremes() {
    let full = TargetTimes {
        in_target: 5.0,
        out_target: 0.0,
    };
    let none = TargetTimes {
        in_target: 0.0,
        out_target: 5.0,
    };
    let (best, tier) = grade(QualityPolicy::Weighted, &[100.0; 5], full);
    assert!((best - 100.0).abs() < 1e-9);
    assert_eq!(tier, QualityTier::Perfect);
    assert_eq!(
        grade(QualityPolicy::Weighted, &[0.0; 5], none),
        (0.0, QualityTier::Poor)
    );
}
