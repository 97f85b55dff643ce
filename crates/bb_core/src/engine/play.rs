//! Outcome -> play.
//!
//! Turns a resolved [`Outcome`] (or a manager call) into a [`PlayDraft`]: the
//! bases after the play, who scored, outs recorded and how the play reads in
//! the log. Drafts are pure data; the engine folds them into the next state.

use super::baserunning::{
    advance_on_double, advance_on_home_run, advance_on_single, advance_on_triple,
    advance_runners, advance_two_bases, can_tag_up, effective_speed, force_advance, tag_up,
    AdvanceResult,
};
use super::bunt::{resolve_bunt, BuntResult};
use super::config::EngineConfig;
use super::defense::{assign_fielder, assign_outfielder, check_error, double_play_turns, BattedOut};
use super::rng::SeededRng;
use super::stolen_base::{lead_steal_candidate, resolve_steal, steal_probability};
use crate::models::{
    Archetype, Base, BaseRunner, Bases, CardRead, FieldingError, Outcome, PlayKind, PlayResult,
    Player, PlayerId, Position, TeamRoster,
};

/// Speed assumed for a runner who cannot be found on the roster.
const NEUTRAL_SPEED: f64 = 0.5;

/// Fielder ratings used by the defense checks.
#[derive(Debug, Clone, PartialEq)]
pub struct FielderProfile {
    pub id: PlayerId,
    pub position: Position,
    pub fielding_pct: f64,
    pub arm: f64,
}

/// Situation a play is resolved in.
#[derive(Debug, Clone, Copy)]
pub struct PlayContext<'a> {
    pub config: &'a EngineConfig,
    pub batting: &'a TeamRoster,
    pub fielding: &'a TeamRoster,
    pub batter: &'a Player,
    /// Active pitcher of the fielding side.
    pub pitcher: &'a Player,
    pub outs: u8,
    pub strikes: u8,
    pub bases: &'a Bases,
}

impl<'a> PlayContext<'a> {
    fn batter_runner(&self) -> BaseRunner {
        BaseRunner::new(self.batter.id.clone(), self.pitcher.id.clone())
    }

    fn runner_player(&self, base: Base) -> Option<&'a Player> {
        let id = &self.bases.get(base)?.runner;
        self.batting.find_player(id)
    }

    fn runner_ratings(&self, base: Base) -> (f64, Archetype) {
        self.runner_player(base)
            .map(|p| (p.speed, p.archetype))
            .unwrap_or((NEUTRAL_SPEED, Archetype::default()))
    }

    /// Ratings of whoever covers `position`; a neutral fielder when nobody does.
    pub fn fielder(&self, position: Position) -> FielderProfile {
        let player = if position == Position::Pitcher {
            Some(self.pitcher)
        } else {
            self.fielding.fielder_at(position)
        };
        match player {
            Some(p) => FielderProfile {
                id: p.id.clone(),
                position,
                fielding_pct: p.fielding_pct,
                arm: p.arm,
            },
            None => FielderProfile {
                id: format!("{}-{}", self.fielding.name, position),
                position,
                fielding_pct: self.config.defense.default_fielding_pct,
                arm: self.config.defense.default_arm,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayDraft {
    pub kind: PlayKind,
    pub card: Option<CardRead>,
    pub outcome: Option<Outcome>,
    pub result: PlayResult,
    pub description: String,
    pub bases: Bases,
    pub scored: Vec<BaseRunner>,
    pub outs_recorded: u8,
    pub fielder: Option<Position>,
    pub error: Option<FieldingError>,
    pub runner: Option<PlayerId>,
    pub batter_done: bool,
    pub strike_added: bool,
}

impl PlayDraft {
    fn new(result: PlayResult, advance: AdvanceResult, description: String) -> Self {
        Self {
            kind: PlayKind::PlateAppearance,
            card: None,
            outcome: None,
            result,
            description,
            bases: advance.bases,
            scored: advance.scored,
            outs_recorded: 0,
            fielder: None,
            error: None,
            runner: None,
            batter_done: true,
            strike_added: false,
        }
    }

    fn outs(mut self, outs: u8) -> Self {
        self.outs_recorded = outs;
        self
    }

    fn fielded_by(mut self, position: Position) -> Self {
        self.fielder = Some(position);
        self
    }

    fn batter_stays(mut self) -> Self {
        self.batter_done = false;
        self
    }

    pub fn with_kind(mut self, kind: PlayKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_card(mut self, card: CardRead, outcome: Outcome) -> Self {
        self.card = Some(card);
        self.outcome = Some(outcome);
        self
    }
}

fn unchanged(bases: &Bases) -> AdvanceResult {
    AdvanceResult { bases: bases.clone(), scored: Vec::new(), speed_check: None }
}

// ============================================
// Card outcomes
// ============================================

/// Resolve a card outcome in context. Sub-resolvers draw from `rng` as the
/// outcome requires.
pub fn resolve_outcome(ctx: &PlayContext<'_>, outcome: Outcome, rng: &mut SeededRng) -> PlayDraft {
    let name = &ctx.batter.name;
    let draft = match outcome {
        Outcome::HomeRun => PlayDraft::new(
            PlayResult::HomeRun,
            advance_on_home_run(ctx.bases, ctx.batter_runner()),
            format!("{name} homers"),
        ),
        Outcome::Triple => PlayDraft::new(
            PlayResult::Triple,
            advance_on_triple(ctx.bases, ctx.batter_runner()),
            format!("{name} triples"),
        ),
        Outcome::Double => outfield_hit(ctx, PlayResult::Double, rng),
        Outcome::SingleClean => outfield_hit(ctx, PlayResult::Single, rng),
        Outcome::SingleAdvance => {
            let position = assign_outfielder(rng);
            PlayDraft::new(
                PlayResult::Single,
                advance_two_bases(ctx.bases, ctx.batter_runner()),
                format!("{name} singles to {position}, runners take two"),
            )
            .fielded_by(position)
        }
        Outcome::InfieldSingle => {
            let position = assign_fielder(BattedOut::Ground, rng);
            PlayDraft::new(
                PlayResult::Single,
                force_advance(ctx.bases, ctx.batter_runner()),
                format!("{name} beats out an infield single to {position}"),
            )
            .fielded_by(position)
        }
        Outcome::Walk => award_first(ctx, PlayResult::Walk, "walks"),
        Outcome::IntentionalWalk => {
            award_first(ctx, PlayResult::IntentionalWalk, "is intentionally walked")
        }
        Outcome::HitByPitch => award_first(ctx, PlayResult::HitByPitch, "is hit by a pitch"),
        Outcome::SpecialEvent => {
            award_first(ctx, PlayResult::CatcherInterference, "reaches on catcher interference")
        }
        Outcome::StrikeoutLooking => {
            PlayDraft::new(PlayResult::Strikeout, unchanged(ctx.bases), format!("{name} called out on strikes"))
                .outs(1)
        }
        Outcome::StrikeoutSwinging => {
            PlayDraft::new(PlayResult::Strikeout, unchanged(ctx.bases), format!("{name} strikes out swinging"))
                .outs(1)
        }
        Outcome::GroundOut => batted_out(ctx, BattedOut::Ground, rng),
        Outcome::FlyOut => batted_out(ctx, BattedOut::Fly, rng),
        Outcome::LineOut => batted_out(ctx, BattedOut::Line, rng),
        Outcome::PopOut => batted_out(ctx, BattedOut::Pop, rng),
        Outcome::GroundOutAdvance => {
            let position = assign_fielder(BattedOut::Ground, rng);
            PlayDraft::new(
                PlayResult::Out,
                advance_runners(ctx.bases, 1),
                format!("{name} grounds out to {position}, runners advance"),
            )
            .outs(1)
            .fielded_by(position)
        }
        Outcome::DoublePlay => double_play(ctx, rng),
        Outcome::Sacrifice => sacrifice(ctx, "sacrifices"),
        Outcome::FieldersChoice => {
            if ctx.bases.is_occupied(Base::First) {
                let position = assign_fielder(BattedOut::Ground, rng);
                fielders_choice(ctx, position)
            } else {
                batted_out(ctx, BattedOut::Ground, rng)
            }
        }
        Outcome::ReachedOnError => {
            let position = assign_fielder(BattedOut::Ground, rng);
            reached_on_error(ctx, position)
        }
        Outcome::StolenBaseOpp => match lead_steal_candidate(ctx.bases, ctx.outs) {
            Some(from) => steal(ctx, from, rng),
            None => PlayDraft::new(PlayResult::NoPlay, unchanged(ctx.bases), "no play".to_string())
                .batter_stays(),
        },
        Outcome::WildPitch => pitch_advance(ctx, PlayResult::WildPitch, "wild pitch"),
        Outcome::PassedBall => pitch_advance(ctx, PlayResult::PassedBall, "passed ball"),
        Outcome::Balk => pitch_advance(ctx, PlayResult::Balk, "balk"),
    };
    PlayDraft { outcome: Some(outcome), ..draft }
}

/// Plate appearance closed out by a game-flow guard. No error check: the
/// batter is always retired.
pub fn forced_ground_out(ctx: &PlayContext<'_>, rng: &mut SeededRng) -> PlayDraft {
    let position = assign_fielder(BattedOut::Ground, rng);
    let draft = PlayDraft::new(
        PlayResult::Out,
        unchanged(ctx.bases),
        format!("{} grounds out to {position}", ctx.batter.name),
    )
    .outs(1)
    .fielded_by(position);
    PlayDraft { outcome: Some(Outcome::GroundOut), ..draft }
}

fn outfield_hit(ctx: &PlayContext<'_>, result: PlayResult, rng: &mut SeededRng) -> PlayDraft {
    let position = assign_outfielder(rng);
    let arm = ctx.fielder(position).arm;
    let first_runner_speed = ctx.bases.get(Base::First).map(|_| {
        let (speed, archetype) = ctx.runner_ratings(Base::First);
        effective_speed(speed, archetype, arm, ctx.outs, &ctx.config.baserunning)
    });
    let name = &ctx.batter.name;
    let (advance, verb) = match result {
        PlayResult::Double => {
            (advance_on_double(ctx.bases, ctx.batter_runner(), first_runner_speed, rng), "doubles")
        }
        _ => (advance_on_single(ctx.bases, ctx.batter_runner(), first_runner_speed, rng), "singles"),
    };
    let extra = match (result, advance.speed_check) {
        (PlayResult::Double, Some(true)) => ", runner scores from first",
        (PlayResult::Single, Some(true)) => ", runner takes third",
        _ => "",
    };
    PlayDraft::new(result, advance, format!("{name} {verb} to {position}{extra}")).fielded_by(position)
}

fn award_first(ctx: &PlayContext<'_>, result: PlayResult, verb: &str) -> PlayDraft {
    PlayDraft::new(
        result,
        force_advance(ctx.bases, ctx.batter_runner()),
        format!("{} {verb}", ctx.batter.name),
    )
}

fn batted_out(ctx: &PlayContext<'_>, kind: BattedOut, rng: &mut SeededRng) -> PlayDraft {
    let position = assign_fielder(kind, rng);
    let fielder = ctx.fielder(position);
    if check_error(fielder.fielding_pct, rng) {
        return reached_on_error(ctx, position);
    }

    let name = &ctx.batter.name;
    let verb = match kind {
        BattedOut::Ground => "grounds out",
        BattedOut::Fly => "flies out",
        BattedOut::Line => "lines out",
        BattedOut::Pop => "pops out",
    };
    let draft = PlayDraft::new(PlayResult::Out, unchanged(ctx.bases), format!("{name} {verb} to {position}"))
        .outs(1)
        .fielded_by(position);

    if kind != BattedOut::Fly || !ctx.bases.is_occupied(Base::Third) || !can_tag_up(Base::Third, ctx.outs) {
        return draft;
    }
    let (speed, archetype) = ctx.runner_ratings(Base::Third);
    let eff = effective_speed(speed, archetype, fielder.arm, ctx.outs, &ctx.config.baserunning);
    let advance = tag_up(ctx.bases, ctx.outs, eff, rng);
    if advance.scored.is_empty() {
        return PlayDraft {
            description: format!("{name} flies out to {position}, runner holds"),
            ..draft
        };
    }
    PlayDraft {
        result: PlayResult::SacrificeFly,
        description: format!("{name} hits a sacrifice fly to {position}"),
        bases: advance.bases,
        scored: advance.scored,
        ..draft
    }
}

fn reached_on_error(ctx: &PlayContext<'_>, position: Position) -> PlayDraft {
    let fielder = ctx.fielder(position);
    let mut advance = advance_runners(ctx.bases, 1);
    advance.bases.set(Base::First, ctx.batter_runner());
    PlayDraft {
        error: Some(FieldingError { fielder: fielder.id, position }),
        ..PlayDraft::new(
            PlayResult::ReachedOnError,
            advance,
            format!("{} reaches on an error by {position}", ctx.batter.name),
        )
        .fielded_by(position)
    }
}

fn double_play(ctx: &PlayContext<'_>, rng: &mut SeededRng) -> PlayDraft {
    if !ctx.bases.is_occupied(Base::First) || ctx.outs >= 2 {
        return batted_out(ctx, BattedOut::Ground, rng);
    }
    let position = assign_fielder(BattedOut::Ground, rng);
    let ss = ctx.fielder(Position::Shortstop).fielding_pct;
    let second = ctx.fielder(Position::SecondBase).fielding_pct;
    if !double_play_turns(ss, second, &ctx.config.defense, rng) {
        return fielders_choice(ctx, position);
    }
    let mut next = ctx.bases.clone();
    next.take(Base::First);
    let scored = next.advance_all(1);
    PlayDraft::new(
        PlayResult::DoublePlay,
        AdvanceResult { bases: next, scored, speed_check: None },
        format!("{} grounds into a double play, {position} starts it", ctx.batter.name),
    )
    .outs(2)
    .fielded_by(position)
}

/// Lead runner from first forced at second; batter safe at first.
fn fielders_choice(ctx: &PlayContext<'_>, position: Position) -> PlayDraft {
    let mut next = ctx.bases.clone();
    let lead = next.take(Base::First);
    let mut scored = Vec::new();
    if next.is_occupied(Base::Second) {
        scored.extend(next.take(Base::Third));
        if let Some(runner) = next.take(Base::Second) {
            next.set(Base::Third, runner);
        }
    }
    next.set(Base::First, ctx.batter_runner());
    let forced = lead.map(|r| r.runner).unwrap_or_default();
    PlayDraft::new(
        PlayResult::FieldersChoice,
        AdvanceResult { bases: next, scored, speed_check: None },
        format!("{} reaches on a fielder's choice, {forced} out at second", ctx.batter.name),
    )
    .outs(1)
    .fielded_by(position)
}

fn sacrifice(ctx: &PlayContext<'_>, verb: &str) -> PlayDraft {
    let name = &ctx.batter.name;
    if ctx.bases.is_empty() {
        return PlayDraft::new(PlayResult::Out, unchanged(ctx.bases), format!("{name} is out"))
            .outs(1);
    }
    PlayDraft::new(
        PlayResult::Sacrifice,
        advance_runners(ctx.bases, 1),
        format!("{name} {verb}, runners advance"),
    )
    .outs(1)
}

fn pitch_advance(ctx: &PlayContext<'_>, result: PlayResult, label: &str) -> PlayDraft {
    let advance = advance_runners(ctx.bases, 1);
    let description = if ctx.bases.is_empty() {
        format!("{label}, bases empty")
    } else {
        format!("{label}, runners advance")
    };
    PlayDraft::new(result, advance, description).batter_stays()
}

fn steal(ctx: &PlayContext<'_>, from: Base, rng: &mut SeededRng) -> PlayDraft {
    let (speed, archetype) = ctx.runner_ratings(from);
    let catcher = ctx.fielder(Position::Catcher);
    let p = steal_probability(speed, archetype, catcher.arm, &ctx.config.steal);
    match resolve_steal(ctx.bases, from, ctx.outs, p, rng) {
        Some(res) => {
            let (result, verb) = if res.success {
                (PlayResult::StolenBase, "steals")
            } else {
                (PlayResult::CaughtStealing, "is caught stealing")
            };
            let target = match from {
                Base::First => "second",
                _ => "third",
            };
            let runner = res.runner.runner.clone();
            let mut draft = PlayDraft::new(
                result,
                AdvanceResult { bases: res.bases, scored: Vec::new(), speed_check: None },
                format!("{runner} {verb} {target}"),
            )
            .outs(res.outs_recorded)
            .batter_stays()
            .fielded_by(Position::Catcher);
            draft.runner = Some(runner);
            draft
        }
        None => PlayDraft::new(PlayResult::NoPlay, unchanged(ctx.bases), "no play".to_string())
            .batter_stays(),
    }
}

// ============================================
// Manager calls
// ============================================

/// Manager-called steal; `None` when the runner is not eligible.
pub fn resolve_called_steal(
    ctx: &PlayContext<'_>,
    from: Base,
    rng: &mut SeededRng,
) -> Option<PlayDraft> {
    if !super::stolen_base::is_steal_eligible(ctx.bases, from, ctx.outs) {
        return None;
    }
    Some(steal(ctx, from, rng).with_kind(PlayKind::StolenBase))
}

pub fn resolve_bunt_play(ctx: &PlayContext<'_>, rng: &mut SeededRng) -> PlayDraft {
    let name = &ctx.batter.name;
    let bunt = resolve_bunt(ctx.batter.speed, ctx.strikes, &ctx.config.bunt, rng);
    let draft = match bunt {
        BuntResult::Sacrifice => sacrifice(ctx, "lays down a sacrifice bunt"),
        BuntResult::Foul => {
            let mut d = PlayDraft::new(PlayResult::BuntFoul, unchanged(ctx.bases), format!("{name} bunts foul"))
                .batter_stays();
            d.strike_added = true;
            d
        }
        BuntResult::FoulStrikeout => PlayDraft::new(
            PlayResult::Strikeout,
            unchanged(ctx.bases),
            format!("{name} bunts foul with two strikes, strikeout"),
        )
        .outs(1),
        BuntResult::BuntHit => PlayDraft::new(
            PlayResult::Single,
            force_advance(ctx.bases, ctx.batter_runner()),
            format!("{name} beats out a bunt"),
        ),
        BuntResult::BuntGroundOut => PlayDraft::new(
            PlayResult::Out,
            unchanged(ctx.bases),
            format!("{name} is thrown out bunting for a hit"),
        )
        .outs(1),
        BuntResult::PopOut => PlayDraft::new(
            PlayResult::Out,
            unchanged(ctx.bases),
            format!("{name} pops up the bunt"),
        )
        .outs(1),
    };
    draft.with_kind(PlayKind::Bunt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    struct Setup {
        config: EngineConfig,
        away: TeamRoster,
        home: TeamRoster,
    }

    impl Setup {
        fn new() -> Self {
            Self {
                config: EngineConfig::default(),
                away: fixtures::sample_team("Away", "a"),
                home: fixtures::sample_team("Home", "h"),
            }
        }

        fn ctx<'a>(&'a self, bases: &'a Bases, outs: u8) -> PlayContext<'a> {
            PlayContext {
                config: &self.config,
                batting: &self.away,
                fielding: &self.home,
                batter: &self.away.lineup[0].player,
                pitcher: self.home.starting_pitcher.as_ref().unwrap(),
                outs,
                strikes: 0,
                bases,
            }
        }
    }

    fn runner(id: &str) -> BaseRunner {
        BaseRunner::new(id, "h_sp")
    }

    #[test]
    fn test_home_run_scores_everyone() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::First, runner("a2"));
        bases.set(Base::Third, runner("a3"));
        let mut rng = SeededRng::new(1);
        let draft = resolve_outcome(&setup.ctx(&bases, 0), Outcome::HomeRun, &mut rng);
        assert_eq!(draft.scored.len(), 3);
        assert!(draft.bases.is_empty());
        assert_eq!(draft.result, PlayResult::HomeRun);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_walk_only_forces() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::Third, runner("a3"));
        let mut rng = SeededRng::new(1);
        let draft = resolve_outcome(&setup.ctx(&bases, 0), Outcome::Walk, &mut rng);
        assert!(draft.scored.is_empty());
        assert_eq!(draft.bases.count(), 2);
        assert!(draft.batter_done);
    }

    #[test]
    fn test_double_play_with_sure_handed_middle_infield() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::First, runner("a2"));
        let mut rng = SeededRng::new(2);
        let draft = resolve_outcome(&setup.ctx(&bases, 0), Outcome::DoublePlay, &mut rng);
        assert_eq!(draft.result, PlayResult::DoublePlay);
        assert_eq!(draft.outs_recorded, 2);
        assert!(draft.bases.is_empty());
    }

    #[test]
    fn test_double_play_without_runner_on_first_is_a_ground_ball() {
        let setup = Setup::new();
        let bases = Bases::empty();
        let mut rng = SeededRng::new(2);
        let draft = resolve_outcome(&setup.ctx(&bases, 0), Outcome::DoublePlay, &mut rng);
        assert!(matches!(draft.result, PlayResult::Out | PlayResult::ReachedOnError));
        assert!(draft.outs_recorded <= 1);
    }

    #[test]
    fn test_fielders_choice_forces_lead_runner() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::First, runner("a2"));
        bases.set(Base::Second, runner("a3"));
        let mut rng = SeededRng::new(3);
        let draft = resolve_outcome(&setup.ctx(&bases, 0), Outcome::FieldersChoice, &mut rng);
        assert_eq!(draft.result, PlayResult::FieldersChoice);
        assert_eq!(draft.bases.get(Base::First), Some(&runner_for_batter(&setup)));
        assert_eq!(draft.bases.get(Base::Third), Some(&runner("a3")));
        assert!(!draft.bases.is_occupied(Base::Second));
    }

    fn runner_for_batter(setup: &Setup) -> BaseRunner {
        BaseRunner::new(setup.away.lineup[0].player.id.clone(), "h_sp")
    }

    #[test]
    fn test_pitch_events_keep_batter_up() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::Third, runner("a3"));
        let mut rng = SeededRng::new(4);
        for outcome in [Outcome::WildPitch, Outcome::PassedBall, Outcome::Balk] {
            let draft = resolve_outcome(&setup.ctx(&bases, 1), outcome, &mut rng);
            assert!(!draft.batter_done);
            assert_eq!(draft.scored, vec![runner("a3")]);
        }
    }

    #[test]
    fn test_stolen_base_opportunity_without_runner_is_no_play() {
        let setup = Setup::new();
        let bases = Bases::empty();
        let mut rng = SeededRng::new(4);
        let draft = resolve_outcome(&setup.ctx(&bases, 0), Outcome::StolenBaseOpp, &mut rng);
        assert_eq!(draft.result, PlayResult::NoPlay);
        assert!(!draft.batter_done);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_sacrifice_fly_requires_tag_up_success() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::Third, runner("a3"));
        let mut sac_flies = 0;
        let mut rng = SeededRng::new(5);
        for _ in 0..400 {
            let draft = resolve_outcome(&setup.ctx(&bases, 0), Outcome::FlyOut, &mut rng);
            match draft.result {
                PlayResult::SacrificeFly => {
                    sac_flies += 1;
                    assert_eq!(draft.scored.len(), 1);
                    assert_eq!(draft.outs_recorded, 1);
                }
                PlayResult::Out => assert!(draft.scored.is_empty()),
                PlayResult::ReachedOnError => assert!(draft.error.is_some()),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(sac_flies > 0);
    }

    #[test]
    fn test_no_tag_up_with_two_outs() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::Third, runner("a3"));
        let mut rng = SeededRng::new(6);
        for _ in 0..200 {
            let draft = resolve_outcome(&setup.ctx(&bases, 2), Outcome::FlyOut, &mut rng);
            assert_ne!(draft.result, PlayResult::SacrificeFly);
        }
    }

    #[test]
    fn test_bunt_is_a_bunt_play() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::First, runner("a2"));
        let mut rng = SeededRng::new(7);
        let draft = resolve_bunt_play(&setup.ctx(&bases, 0), &mut rng);
        assert_eq!(draft.kind, PlayKind::Bunt);
        assert_eq!(draft.outcome, None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_called_steal_of_third_base_is_refused() {
        let setup = Setup::new();
        let mut bases = Bases::empty();
        bases.set(Base::Third, runner("a3"));
        let mut rng = SeededRng::new(8);
        assert!(resolve_called_steal(&setup.ctx(&bases, 0), Base::Third, &mut rng).is_none());
    }

    #[test]
    fn test_missing_fielder_uses_neutral_profile() {
        let mut setup = Setup::new();
        setup.home.lineup.retain(|s| s.position != Position::CenterField);
        let bases = Bases::empty();
        let ctx = setup.ctx(&bases, 0);
        let cf = ctx.fielder(Position::CenterField);
        assert_eq!(cf.id, "Home-CF");
        assert!((cf.fielding_pct - 0.970).abs() < 1e-9);
        assert_eq!(ctx.fielder(Position::Pitcher).id, "h_sp");
    }
}
