//! Game engine: drives a game from the first pitch to the final out.
//!
//! ## Loop
//! Every [`GameEngine::step`] appends exactly one play-log entry:
//! 1. half-inning bookkeeping and end-of-game checks,
//! 2. a pitching change when one is due (logged as its own entry),
//! 3. otherwise the manager call, then platoon -> card read -> sub-resolvers.
//!
//! Each step builds a new [`GameState`] from the previous one.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::config::EngineConfig;
use super::manager::{DecisionContext, Manager, ManagerCall, StandardManager};
use super::pitching::{closer_due, effective_grade, next_reliever, should_pull};
use super::plate_appearance::{resolve_plate_appearance, MIN_GRADE};
use super::platoon::apply_platoon;
use super::play::{
    forced_ground_out, resolve_bunt_play, resolve_called_steal, resolve_outcome, PlayContext,
    PlayDraft,
};
use super::result_builder::build_game_result;
use super::rng::SeededRng;
use super::state::GameState;
use crate::error::{ConfigError, Result};
use crate::models::{
    Base, Bases, GameResult, Half, PlayEntry, PlayKind, PlayResult, Player, PlayerId, ScoredRun,
    Side, TeamRoster,
};

/// Everything needed to play one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub seed: u64,
    pub away: TeamRoster,
    pub home: TeamRoster,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl GameConfig {
    pub fn new(seed: u64, away: TeamRoster, home: TeamRoster) -> Self {
        Self { seed, away, home, engine: EngineConfig::default() }
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn roster(&self, side: Side) -> &TeamRoster {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    /// All configuration problems surface here, before the first pitch.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.engine.validate()?;
        self.away.validate()?;
        self.home.validate()?;
        Ok(())
    }
}

pub struct GameEngine<'m> {
    config: GameConfig,
    manager: &'m dyn Manager,
    rng: SeededRng,
    state: GameState,
}

impl<'m> GameEngine<'m> {
    pub fn new(config: GameConfig, manager: &'m dyn Manager) -> Result<Self> {
        config.validate()?;
        let rng = SeededRng::new(config.seed);
        let state = GameState::new(&config.away, &config.home);
        info!(
            seed = config.seed,
            away = %config.away.name,
            home = %config.home.name,
            manager = manager.name(),
            "game start"
        );
        Ok(Self { config, manager, rng, state })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn draws(&self) -> u64 {
        self.rng.draws()
    }

    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    /// Play one iteration. Returns the entry it logged, or `None` once the
    /// game is over.
    pub fn step(&mut self) -> Option<&PlayEntry> {
        if self.state.complete {
            return None;
        }
        if !self.settle_half_inning() {
            return None;
        }

        let next = match self.pitching_change() {
            Some(next) => next,
            None => {
                let Some((batter_id, pitcher_id, draft)) = self.next_play() else {
                    warn!(inning = self.state.inning, "lineup references an unknown player; ending game");
                    self.finish();
                    return None;
                };
                self.apply_play(draft, batter_id, pitcher_id)
            }
        };
        self.state = next;

        let entry = self.state.log.last()?;
        trace!(
            seq = entry.seq,
            inning = entry.inning,
            half = ?entry.half,
            outs = entry.outs,
            result = ?entry.result,
            "{}",
            entry.description
        );
        Some(entry)
    }

    /// Play to the end and score the game.
    pub fn run(mut self) -> Result<GameResult> {
        while self.step().is_some() {}
        build_game_result(&self.state, &self.config, &self.rng)
    }

    /// Roll over finished half innings and detect the end of the game.
    /// Returns `false` once the game is over.
    fn settle_half_inning(&mut self) -> bool {
        let regulation = self.config.engine.rules.regulation_innings;
        let max_innings = self.config.engine.rules.max_innings;
        loop {
            if self.state.is_game_over(regulation) {
                self.finish();
                return false;
            }
            if !self.state.half_over() {
                return true;
            }
            if self.state.should_skip_bottom_half(regulation) {
                self.finish();
                return false;
            }
            if self.state.half == Half::Bottom && self.state.inning >= max_innings {
                warn!(
                    inning = self.state.inning,
                    away = self.state.score.away,
                    home = self.state.score.home,
                    "inning cap reached; game ends tied"
                );
                self.finish();
                return false;
            }
            self.state = self.state.advance_half_inning();
            debug!(inning = self.state.inning, half = ?self.state.half, "half inning");
        }
    }

    fn finish(&mut self) {
        let mut done = self.state.clone();
        done.complete = true;
        info!(
            away = done.score.away,
            home = done.score.home,
            innings = done.inning,
            plays = done.log.len(),
            draws = self.rng.draws(),
            "game complete"
        );
        self.state = done;
    }

    // ========== Pitching ==========

    fn pitching_change(&self) -> Option<GameState> {
        let state = &self.state;
        let cfg = &self.config.engine;
        let side = state.half.fielding();
        let team = state.team(side);
        let roster = self.config.roster(side);

        // only before the first entry of the half
        let closer = if state.batters_this_half == 0 && state.pitch_events == 0 {
            closer_due(
                team,
                state.inning,
                cfg.rules.regulation_innings,
                state.score.lead(side),
                &cfg.pitching,
            )
            .filter(|id| *id != team.active_pitcher)
        } else {
            None
        };
        let reliever = closer.or_else(|| {
            let profile = roster.find_player(&team.active_pitcher)?.pitching?;
            if should_pull(&profile, team, &cfg.pitching) {
                next_reliever(team)
            } else {
                None
            }
        })?;

        let outgoing = name_of(roster, &team.active_pitcher);
        let incoming = name_of(roster, &reliever);
        debug!(
            inning = state.inning,
            team = %roster.name,
            outgoing = %team.active_pitcher,
            incoming = %reliever,
            "pitching change"
        );

        let mut next = state.clone();
        next.team_mut(side).change_pitcher(reliever.clone());
        let batter = next.current_batter().cloned().unwrap_or_default();
        let entry = PlayEntry {
            seq: next.log.len() as u32 + 1,
            inning: next.inning,
            half: next.half,
            outs: next.outs,
            batter,
            pitcher: reliever,
            kind: PlayKind::PitchingChange,
            card: None,
            outcome: None,
            result: PlayResult::PitchingChange,
            description: format!("{incoming} replaces {outgoing}"),
            bases: next.bases.snapshot(),
            score: next.score,
            runs: Vec::new(),
            outs_recorded: 0,
            fielder: None,
            error: None,
            runner: None,
            batter_done: false,
        };
        next.log.push(entry);
        Some(next)
    }

    // ========== Plays ==========

    /// Resolve the next play without touching the state.
    fn next_play(&mut self) -> Option<(PlayerId, PlayerId, PlayDraft)> {
        let state = &self.state;
        let cfg = &self.config.engine;
        let batting = self.config.roster(state.half.batting());
        let fielding = self.config.roster(state.half.fielding());
        let fielding_team = state.fielding_team();

        let batter = batting.find_player(state.current_batter()?)?;
        let pitcher = fielding.find_player(&fielding_team.active_pitcher)?;
        let ctx = PlayContext {
            config: cfg,
            batting,
            fielding,
            batter,
            pitcher,
            outs: state.outs,
            strikes: state.strikes,
            bases: &state.bases,
        };
        let rng = &mut self.rng;

        let guard_hit = state.pitch_events >= cfg.rules.max_pitch_events_per_pa
            || state.batters_this_half >= cfg.rules.max_batters_per_half;
        let draft = if guard_hit {
            forced_ground_out(&ctx, rng)
        } else {
            let decision = DecisionContext {
                inning: state.inning,
                half: state.half,
                outs: state.outs,
                strikes: state.strikes,
                bases: &state.bases,
                batting_lead: state.score.lead(state.half.batting()),
                batter,
                runner_on_first: runner_on(batting, &state.bases, Base::First),
                config: &cfg.manager,
            };
            match self.manager.decide(&decision) {
                ManagerCall::Bunt => resolve_bunt_play(&ctx, rng),
                ManagerCall::Steal(from) => match resolve_called_steal(&ctx, from, rng) {
                    Some(draft) => draft,
                    None => card_play(&ctx, fielding_team.pitcher_outs, rng),
                },
                ManagerCall::None => card_play(&ctx, fielding_team.pitcher_outs, rng),
            }
        };
        Some((batter.id.clone(), pitcher.id.clone(), draft))
    }

    /// Fold a resolved play into the next snapshot.
    fn apply_play(&self, draft: PlayDraft, batter: PlayerId, pitcher: PlayerId) -> GameState {
        let prev = &self.state;
        let mut next = prev.clone();
        let batting = prev.half.batting();
        let fielding = prev.half.fielding();

        let outs = (prev.outs + draft.outs_recorded).min(3);
        let inning_over = outs >= 3;
        let earned = draft.error.is_none() && draft.result != PlayResult::PassedBall;
        let rbi = draft.error.is_none() && draft.result.credits_rbi();
        // runs never count on the third out
        let runs: Vec<ScoredRun> = if inning_over {
            Vec::new()
        } else {
            draft
                .scored
                .into_iter()
                .map(|r| ScoredRun { runner: r.runner, charged_to: r.charged_to, earned, rbi })
                .collect()
        };

        next.score.add(batting, runs.len() as u32);
        next.outs = outs;
        next.bases = if inning_over { Bases::empty() } else { draft.bases };
        next.team_mut(fielding).pitcher_outs += draft.outs_recorded as u32;

        if draft.batter_done {
            let reached = draft.result.batter_reached();
            let staff = next.team_mut(fielding);
            staff.baserunner_streak = if reached { staff.baserunner_streak + 1 } else { 0 };
            next.team_mut(batting).advance_batter();
            next.strikes = 0;
            next.pitch_events = 0;
            next.batters_this_half += 1;
        } else {
            next.pitch_events = next.pitch_events.saturating_add(1);
            if draft.strike_added {
                next.strikes += 1;
            }
        }

        let entry = PlayEntry {
            seq: prev.log.len() as u32 + 1,
            inning: prev.inning,
            half: prev.half,
            outs,
            batter,
            pitcher,
            kind: draft.kind,
            card: draft.card,
            outcome: draft.outcome,
            result: draft.result,
            description: draft.description,
            bases: next.bases.snapshot(),
            score: next.score,
            runs,
            outs_recorded: draft.outs_recorded,
            fielder: draft.fielder,
            error: draft.error,
            runner: draft.runner,
            batter_done: draft.batter_done,
        };
        next.log.push(entry);
        next
    }
}

/// Platoon-adjusted card read plus the outcome's sub-resolvers.
fn card_play(ctx: &PlayContext<'_>, pitcher_outs: u32, rng: &mut SeededRng) -> PlayDraft {
    let card = apply_platoon(&ctx.batter.card, ctx.batter.bats, ctx.pitcher.throws);
    let grade = ctx
        .pitcher
        .pitching
        .map(|p| effective_grade(&p, pitcher_outs, &ctx.config.pitching))
        .unwrap_or(MIN_GRADE);
    let pa = resolve_plate_appearance(&card, grade, rng);
    resolve_outcome(ctx, pa.outcome, rng).with_card(pa.card_read(), pa.outcome)
}

fn runner_on<'a>(roster: &'a TeamRoster, bases: &Bases, base: Base) -> Option<&'a Player> {
    bases.get(base).and_then(|r| roster.find_player(&r.runner))
}

fn name_of(roster: &TeamRoster, id: &str) -> String {
    roster.find_player(id).map(|p| p.name.clone()).unwrap_or_else(|| id.to_string())
}

// ============================================
// Entry points
// ============================================

/// Simulate a game with the standard manager.
pub fn simulate_game(config: GameConfig) -> Result<GameResult> {
    simulate_game_with_manager(config, &StandardManager)
}

pub fn simulate_game_with_manager(config: GameConfig, manager: &dyn Manager) -> Result<GameResult> {
    GameEngine::new(config, manager)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::manager::{ManagerKind, PassiveManager};
    use crate::fixtures;
    use crate::models::{values, BaseRunner, Card, Outcome, Score, CARD_ROWS};
    use proptest::prelude::*;

    fn with_card(mut roster: TeamRoster, card: &Card) -> TeamRoster {
        for slot in roster.lineup.iter_mut() {
            slot.player.card = card.clone();
        }
        roster
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = simulate_game(fixtures::sample_game(42)).unwrap();
        let b = simulate_game(fixtures::sample_game(42)).unwrap();
        assert_eq!(a.play_log, b.play_log);
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.determinism, b.determinism);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = simulate_game(fixtures::sample_game(1)).unwrap();
        let b = simulate_game(fixtures::sample_game(2)).unwrap();
        assert_ne!(a.determinism.log_digest, b.determinism.log_digest);
    }

    #[test]
    fn test_game_reaches_regulation_and_has_winner() {
        for seed in 0..20 {
            let result = simulate_game(fixtures::sample_game(seed)).unwrap();
            assert!(result.innings_played >= 9, "seed {seed}");
            assert!(result.winner.is_some(), "seed {seed}");
            assert_ne!(result.final_score.away, result.final_score.home);
        }
    }

    #[test]
    fn test_log_invariants() {
        for seed in 0..10 {
            let result = simulate_game(fixtures::sample_game(seed)).unwrap();
            for (i, entry) in result.play_log.iter().enumerate() {
                assert_eq!(entry.seq as usize, i + 1);
                assert!(entry.outs <= 3);
                if let Some(card) = &entry.card {
                    assert!(card.row < CARD_ROWS);
                }
                let b = &entry.bases;
                let ids: Vec<_> = [&b.first, &b.second, &b.third].into_iter().flatten().collect();
                let mut unique = ids.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(ids.len(), unique.len());
                if entry.outs_recorded > 0 && entry.outs == 3 {
                    assert!(entry.runs.is_empty(), "runs on third out at seq {}", entry.seq);
                }
            }
        }
    }

    #[test]
    fn test_missing_pitcher_is_config_error() {
        let mut config = fixtures::sample_game(7);
        config.home.starting_pitcher = None;
        let err = simulate_game(config).unwrap_err();
        assert!(err.is_config());
        assert!(matches!(err, crate::SimError::Config(ConfigError::NoPitcher { .. })));
    }

    #[test]
    fn test_short_lineup_is_config_error() {
        let mut config = fixtures::sample_game(7);
        config.away.lineup.pop();
        assert!(matches!(
            GameEngine::new(config, &PassiveManager).err(),
            Some(crate::SimError::Config(ConfigError::LineupSize { found: 8, .. }))
        ));
    }

    #[test]
    fn test_step_appends_one_entry_per_call() {
        let mut engine = GameEngine::new(fixtures::sample_game(11), &PassiveManager).unwrap();
        let mut last = 0;
        while let Some(entry) = engine.step() {
            assert_eq!(entry.seq, last + 1);
            last = entry.seq;
        }
        assert!(engine.is_complete());
        assert_eq!(engine.state().log.len() as u32, last);
        assert!(engine.step().is_none());
    }

    #[test]
    fn test_strikeout_only_cards_hit_the_inning_cap() {
        let mut column = [Outcome::StrikeoutSwinging.code(); CARD_ROWS];
        column[0] = values::ANCHOR_STRIKEOUT;
        let card = Card::uniform(column);
        let mut config = fixtures::sample_game(3);
        config.away = with_card(config.away, &card);
        config.home = with_card(config.home, &card);
        config.engine.rules.max_innings = 12;

        let result = simulate_game_with_manager(config, &PassiveManager).unwrap();
        assert_eq!(result.final_score.away, 0);
        assert_eq!(result.final_score.home, 0);
        assert_eq!(result.innings_played, 12);
        assert_eq!(result.winner, None);
        assert_eq!(result.decisions.win, None);
        assert_eq!(result.box_score.line_score.away.len(), 12);
    }

    #[test]
    fn test_walk_only_cards_still_terminate() {
        let card = Card::uniform([Outcome::Walk.code(); CARD_ROWS]);
        let mut config = fixtures::sample_game(3);
        config.away = with_card(config.away, &card);
        config.engine.rules.max_batters_per_half = 12;

        let result = simulate_game_with_manager(config, &PassiveManager).unwrap();
        assert!(result.final_score.away > 0);
        assert_eq!(result.winner, Some(Side::Away));
    }

    /// Engine for the top of the first with every away batter holding `outcome`
    /// on every row and a runner on third.
    fn runner_on_third_engine(outcome: Outcome) -> GameEngine<'static> {
        let card = Card::uniform([outcome.code(); CARD_ROWS]);
        let mut config = fixtures::sample_game(21);
        config.away = with_card(config.away, &card);
        let mut engine = GameEngine::new(config, ManagerKind::Passive.manager()).unwrap();
        engine.state.bases.set(Base::Third, BaseRunner::new("a9", "h_sp"));
        engine
    }

    #[test]
    fn test_pitch_event_cap_retires_batter_on_ground_out() {
        let card = Card::uniform([Outcome::WildPitch.code(); CARD_ROWS]);
        let mut config = fixtures::sample_game(8);
        config.away = with_card(config.away, &card);
        config.home = with_card(config.home, &card);
        config.engine.rules.max_innings = 10;
        let cap = config.engine.rules.max_pitch_events_per_pa as usize;

        let result = simulate_game_with_manager(config, &PassiveManager).unwrap();
        let mut pending = 0;
        let mut plate_appearances = 0;
        for entry in result.play_log.iter().filter(|e| e.kind != PlayKind::PitchingChange) {
            if entry.batter_done {
                assert_eq!(pending, cap, "seq {}", entry.seq);
                assert_eq!(entry.outcome, Some(Outcome::GroundOut));
                assert_eq!(entry.result, PlayResult::Out);
                assert!(entry.card.is_none());
                pending = 0;
                plate_appearances += 1;
            } else {
                assert_eq!(entry.result, PlayResult::WildPitch);
                pending += 1;
            }
        }
        assert_eq!(pending, 0);
        assert_eq!(plate_appearances, 10 * 2 * 3);
        assert_eq!(result.innings_played, 10);
        assert_eq!((result.final_score.away, result.final_score.home), (0, 0));
        assert_eq!(result.winner, None);
    }

    #[test]
    fn test_passed_ball_run_is_unearned() {
        let mut engine = runner_on_third_engine(Outcome::PassedBall);
        let entry = engine.step().cloned().unwrap();
        assert_eq!(entry.result, PlayResult::PassedBall);
        assert!(!entry.batter_done);
        assert_eq!(entry.runs.len(), 1);
        assert!(!entry.runs[0].earned);
        assert!(!entry.runs[0].rbi);
        assert_eq!(entry.score.away, 1);
    }

    #[test]
    fn test_error_run_is_unearned_without_rbi() {
        let mut engine = runner_on_third_engine(Outcome::ReachedOnError);
        let entry = engine.step().cloned().unwrap();
        assert_eq!(entry.result, PlayResult::ReachedOnError);
        assert!(entry.error.is_some());
        assert_eq!(entry.runs.len(), 1);
        assert_eq!(entry.runs[0].runner, "a9");
        assert!(!entry.runs[0].earned);
        assert!(!entry.runs[0].rbi);
    }

    #[test]
    fn test_wild_pitch_run_stays_earned() {
        let mut engine = runner_on_third_engine(Outcome::WildPitch);
        let entry = engine.step().cloned().unwrap();
        assert_eq!(entry.runs.len(), 1);
        assert!(entry.runs[0].earned);
        assert!(!entry.runs[0].rbi);
    }

    /// Top of the ninth, home fielding with the given score, away batters
    /// balking on every row.
    fn ninth_inning_engine(away: u32, home: u32) -> GameEngine<'static> {
        let card = Card::uniform([Outcome::Balk.code(); CARD_ROWS]);
        let mut config = fixtures::sample_game(4);
        config.away = with_card(config.away, &card);
        let mut engine = GameEngine::new(config, ManagerKind::Passive.manager()).unwrap();
        engine.state.inning = 9;
        engine.state.score = Score { away, home };
        engine
    }

    #[test]
    fn test_closer_opens_the_half_in_a_save_situation() {
        let mut engine = ninth_inning_engine(1, 3);
        let entry = engine.step().cloned().unwrap();
        assert_eq!(entry.kind, PlayKind::PitchingChange);
        assert_eq!(entry.pitcher, "h_cl");
    }

    #[test]
    fn test_closer_does_not_enter_mid_plate_appearance() {
        let mut engine = ninth_inning_engine(0, 4);
        engine.state.bases.set(Base::Third, BaseRunner::new("a9", "h_sp"));

        // balk scores the runner: 4-1 is now a save lead, but the batter is still up
        let first = engine.step().cloned().unwrap();
        assert_eq!(first.result, PlayResult::Balk);
        assert_eq!(first.score.away, 1);

        let second = engine.step().cloned().unwrap();
        assert_ne!(second.kind, PlayKind::PitchingChange);
        assert_eq!(second.pitcher, "h_sp");
    }

    #[test]
    fn test_home_team_never_bats_when_leading_after_top_ninth() {
        for seed in 0..40 {
            let result = simulate_game(fixtures::sample_game(seed)).unwrap();
            let last = result.play_log.last().unwrap();
            if result.winner == Some(Side::Home) && last.half == Half::Top {
                let line = &result.box_score.line_score;
                assert!(line.home.len() < line.away.len());
            }
            if result.winner == Some(Side::Home) && last.half == Half::Bottom {
                // walk-off: the game ends on the play that gave the lead
                assert_eq!(last.score.home, result.final_score.home);
                assert!(last.score.home > last.score.away);
            }
        }
    }

    #[test]
    fn test_batting_lines_add_up_to_box_score() {
        let result = simulate_game(fixtures::sample_game(13)).unwrap();
        for side in [Side::Away, Side::Home] {
            let (totals, runs) = match side {
                Side::Away => (&result.box_score.away, result.final_score.away),
                Side::Home => (&result.box_score.home, result.final_score.home),
            };
            let batting = &result.lines(side).batting;
            assert_eq!(batting.iter().map(|l| l.hits).sum::<u32>(), totals.hits);
            assert_eq!(batting.iter().map(|l| l.runs).sum::<u32>(), runs);
        }
    }

    #[test]
    fn test_pitching_change_entries_do_not_advance_batter() {
        let result = simulate_game(fixtures::sample_game(5)).unwrap();
        for pair in result.play_log.windows(2) {
            if pair[0].kind == PlayKind::PitchingChange {
                assert_eq!(pair[0].batter, pair[1].batter);
                assert_eq!(pair[0].pitcher, pair[1].pitcher);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_replay_is_bit_for_bit(seed in any::<u64>()) {
            let a = simulate_game(fixtures::sample_game(seed)).unwrap();
            let b = simulate_game(fixtures::sample_game(seed)).unwrap();
            prop_assert_eq!(&a.play_log, &b.play_log);
            prop_assert_eq!(a.determinism.draws, b.determinism.draws);
        }
    }
}
