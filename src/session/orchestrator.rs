//! Drives the five stages in order and turns the finished run into a catch.

use super::rules::GameRules;
use crate::fishing::{generate_reward, grade, selling_price, CatchResult, TableMode};
use crate::input::InputEvent;
use crate::stages::{Stage, StageKind};
use rand::Rng;

/// What the session needs from the surrounding economy.
pub trait Economy {
    fn current_luck(&self) -> f64;
    fn enhanced_mode_active(&self) -> bool;
    fn price_bonus_active(&self) -> bool;
    /// Takes ownership of a finished catch.
    fn receive_catch(&mut self, catch: CatchResult);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    /// Zero-based index of the active stage.
    Stage(usize),
    Done,
    Aborted,
}

/// Result of one session tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    /// Messages to display to the player
    pub messages: Vec<String>,
    /// Stage that completed this tick, if any
    pub cleared: Option<StageKind>,
    /// Set on the tick the fifth stage completes
    pub catch: Option<CatchResult>,
}

/// One fishing attempt, from the cast to the catch.
#[derive(Debug, Clone)]
pub struct FishingSession<'r> {
    rules: &'r GameRules,
    phase: SessionPhase,
    stages: Vec<Stage>,
    scores: Vec<f64>,
    catch: Option<CatchResult>,
}

impl<'r> FishingSession<'r> {
    pub fn new(rules: &'r GameRules) -> Self {
        Self {
            rules,
            phase: SessionPhase::NotStarted,
            stages: Vec::new(),
            scores: Vec::new(),
            catch: None,
        }
    }

    /// Rolls the stage lineup and activates the first stage. Ignored unless
    /// the session has not started yet.
    pub fn begin<R: Rng>(&mut self, rng: &mut R) {
        if self.phase != SessionPhase::NotStarted {
            return;
        }
        self.stages = Stage::lineup(&self.rules.stages, rng);
        self.phase = SessionPhase::Stage(0);
        log::debug!("session started");
    }

    /// Advances the active stage by `dt` seconds and feeds it this tick's input.
    ///
    /// A session that has not started is started first. Ticks after the
    /// session is done or aborted do nothing.
    pub fn tick<R: Rng, E: Economy>(
        &mut self,
        dt: f64,
        events: &[InputEvent],
        economy: &mut E,
        rng: &mut R,
    ) -> TickResult {
        let mut result = TickResult::default();
        if self.phase == SessionPhase::NotStarted {
            self.begin(rng);
            if let Some(stage) = self.stages.first() {
                result.messages.push(stage.kind().hint().to_string());
            }
        }
        let SessionPhase::Stage(index) = self.phase else {
            return result;
        };
        let Some(stage) = self.stages.get_mut(index) else {
            return result;
        };

        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        stage.advance(dt);
        stage.handle_input(events);
        if !stage.is_completed() {
            return result;
        }

        let kind = stage.kind();
        let score = stage.score();
        self.scores.push(score);
        log::debug!("{} cleared with {:.1}", kind.name(), score);
        result
            .messages
            .push(format!("{} complete! Score: {:.0}", kind.name(), score));
        result.cleared = Some(kind);

        match self.stages.get(index + 1) {
            Some(next) => {
                result.messages.push(next.kind().hint().to_string());
                self.phase = SessionPhase::Stage(index + 1);
            }
            None => {
                let catch = self.finish(economy, rng);
                result.messages.push(format!(
                    "🐟 Caught a {} {}! Quality: {} ({:.1}), worth {} gold",
                    catch.rarity.name(),
                    catch.item_name,
                    catch.quality_tier.name(),
                    catch.quality_score,
                    catch.price
                ));
                result.catch = Some(catch);
                self.phase = SessionPhase::Done;
            }
        }
        result
    }

    fn finish<R: Rng, E: Economy>(&mut self, economy: &mut E, rng: &mut R) -> CatchResult {
        let times = self
            .stages
            .iter()
            .find_map(Stage::target_times)
            .unwrap_or_default();
        let (quality_score, quality_tier) = grade(self.rules.quality_policy, &self.scores, times);

        let mode = TableMode::from_enhanced(economy.enhanced_mode_active());
        let reward = generate_reward(&self.rules.tables, economy.current_luck(), mode, rng);
        let price = selling_price(
            &self.rules.tables,
            reward.rarity,
            quality_score,
            economy.price_bonus_active(),
        );

        let catch = CatchResult {
            item_name: reward.name,
            rarity: reward.rarity,
            quality_tier,
            quality_score,
            price,
        };
        log::info!(
            "caught {} ({:?}, {:?} {:.1}) for {} gold",
            catch.item_name,
            catch.rarity,
            catch.quality_tier,
            catch.quality_score,
            catch.price
        );
        economy.receive_catch(catch.clone());
        self.catch = Some(catch.clone());
        catch
    }

    /// Discards the run. No catch is produced and later ticks do nothing.
    pub fn abort(&mut self) {
        if matches!(self.phase, SessionPhase::Done | SessionPhase::Aborted) {
            return;
        }
        log::debug!("session aborted in {:?}", self.phase);
        self.phase = SessionPhase::Aborted;
    }

    /// Throws away all progress and returns to `NotStarted`.
    pub fn restart(&mut self) {
        self.phase = SessionPhase::NotStarted;
        self.stages.clear();
        self.scores.clear();
        self.catch = None;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn rules(&self) -> &GameRules {
        self.rules
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        match self.phase {
            SessionPhase::Stage(index) => self.stages.get(index),
            _ => None,
        }
    }

    pub fn current_kind(&self) -> Option<StageKind> {
        self.current_stage().map(Stage::kind)
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Scores of the stages cleared so far, in play order.
    pub fn stage_scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn catch(&self) -> Option<&CatchResult> {
        self.catch.as_ref()
    }

    pub fn is_done(&self) -> bool {
        self.phase == SessionPhase::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Default)]
    struct Wallet {
        luck: f64,
        caught: Vec<CatchResult>,
    }

    impl Economy for Wallet {
        fn current_luck(&self) -> f64 {
            self.luck
        }
        fn enhanced_mode_active(&self) -> bool {
            false
        }
        fn price_bonus_active(&self) -> bool {
            false
        }
        fn receive_catch(&mut self, catch: CatchResult) {
            self.caught.push(catch);
        }
    }

    const DT: f64 = 1.0 / 60.0;

    fn confirm() -> Vec<InputEvent> {
        vec![InputEvent::press(KeyCode::Confirm)]
    }

    #[test]
    fn test_first_tick_starts_session() {
        let rules = GameRules::default();
        let mut session = FishingSession::new(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut wallet = Wallet::default();
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.current_stage().is_none());

        let result = session.tick(DT, &[], &mut wallet, &mut rng);
        assert_eq!(session.phase(), SessionPhase::Stage(0));
        assert_eq!(session.current_kind(), Some(StageKind::CastTiming));
        assert_eq!(session.stages().len(), 5);
        assert_eq!(result.messages, vec![StageKind::CastTiming.hint().to_string()]);
    }

    #[test]
    fn test_cast_clear_moves_to_depth() {
        let rules = GameRules::default();
        let mut session = FishingSession::new(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut wallet = Wallet::default();

        session.tick(DT, &[], &mut wallet, &mut rng);
        let result = session.tick(DT, &confirm(), &mut wallet, &mut rng);
        assert_eq!(result.cleared, Some(StageKind::CastTiming));
        assert_eq!(session.phase(), SessionPhase::Stage(1));
        assert_eq!(session.stage_scores().len(), 1);
        assert!(result.catch.is_none());
    }

    #[test]
    fn test_only_active_stage_sees_input() {
        let rules = GameRules::default();
        let mut session = FishingSession::new(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut wallet = Wallet::default();

        session.tick(DT, &[], &mut wallet, &mut rng);
        session.tick(DT, &confirm(), &mut wallet, &mut rng);
        assert!(session.stages()[0].is_completed());
        assert!(!session.stages()[1].is_completed());
        assert!(!session.stages()[2].is_completed());
    }

    #[test]
    fn test_abort_freezes_session() {
        let rules = GameRules::default();
        let mut session = FishingSession::new(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut wallet = Wallet::default();

        session.tick(DT, &[], &mut wallet, &mut rng);
        session.abort();
        assert_eq!(session.phase(), SessionPhase::Aborted);
        let result = session.tick(DT, &confirm(), &mut wallet, &mut rng);
        assert!(result.messages.is_empty());
        assert!(result.cleared.is_none());
        assert!(session.stage_scores().is_empty());
        assert!(wallet.caught.is_empty());
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let rules = GameRules::default();
        let mut session = FishingSession::new(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut wallet = Wallet::default();

        session.tick(DT, &[], &mut wallet, &mut rng);
        let before = match session.current_stage() {
            Some(Stage::Cast(cast)) => cast.marker.position,
            other => panic!("expected cast stage, got {other:?}"),
        };
        session.tick(-1.0, &[], &mut wallet, &mut rng);
        session.tick(f64::NAN, &[], &mut wallet, &mut rng);
        let after = match session.current_stage() {
            Some(Stage::Cast(cast)) => cast.marker.position,
            other => panic!("expected cast stage, got {other:?}"),
        };
        assert_eq!(before, after);
    }

    #[test]
    fn test_restart_resets_progress() {
        let rules = GameRules::default();
        let mut session = FishingSession::new(&rules);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut wallet = Wallet::default();

        session.tick(DT, &[], &mut wallet, &mut rng);
        session.tick(DT, &confirm(), &mut wallet, &mut rng);
        session.restart();
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.stage_scores().is_empty());
        assert!(session.stages().is_empty());
    }
}
