//! Game result builder.
//!
//! Everything in a [`GameResult`] is derived from the play log: line score,
//! box totals, batting and pitching lines, pitcher decisions and the
//! determinism digest. The helpers are public so a stored log can be
//! re-scored without replaying the game.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use super::config::PitchingConfig;
use super::game::GameConfig;
use super::pitching::is_save_situation;
use super::rng::SeededRng;
use super::state::GameState;
use crate::error::Result;
use crate::models::{
    BattingLine, BoxScore, DeterminismMeta, GameResult, Half, LineScore, PitcherDecisions,
    PitchingLine, PlayEntry, PlayKind, PlayResult, PlayerId, Score, Side, TeamLines, TeamRoster,
    TeamTotals,
};

pub fn build_game_result(state: &GameState, config: &GameConfig, rng: &SeededRng) -> Result<GameResult> {
    let log = &state.log;
    let winner = state.score.leader();
    let starters = Starters {
        away: state.away.starter().cloned().unwrap_or_default(),
        home: state.home.starter().cloned().unwrap_or_default(),
    };

    let away = TeamLines {
        batting: batting_lines(log, Side::Away, &config.away),
        pitching: pitching_lines(log, Side::Away, &starters.away, &config.away),
    };
    let home = TeamLines {
        batting: batting_lines(log, Side::Home, &config.home),
        pitching: pitching_lines(log, Side::Home, &starters.home, &config.home),
    };
    let decisions = pitcher_decisions(log, winner, &starters, &config.engine.pitching);

    let box_score = BoxScore {
        line_score: line_score(log),
        away: team_totals(log, Side::Away, state.score.away),
        home: team_totals(log, Side::Home, state.score.home),
    };

    Ok(GameResult {
        away_team: config.away.name.clone(),
        home_team: config.home.name.clone(),
        final_score: state.score,
        innings_played: state.inning,
        winner,
        decisions,
        box_score,
        away,
        home,
        play_log: log.clone(),
        determinism: DeterminismMeta {
            seed: rng.seed(),
            draws: rng.draws(),
            log_digest: log_digest(log)?,
        },
    })
}

/// SHA-256 of the JSON-serialized log, lowercase hex.
pub fn log_digest(log: &[PlayEntry]) -> Result<String> {
    let bytes = serde_json::to_vec(log)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================
// Box score
// ============================================

/// Runs per half inning. Only halves that appear in the log get a slot, so
/// a skipped home half leaves `home` one shorter than `away`.
pub fn line_score(log: &[PlayEntry]) -> LineScore {
    let mut line = LineScore::default();
    for entry in log {
        let runs = match entry.half {
            Half::Top => &mut line.away,
            Half::Bottom => &mut line.home,
        };
        let idx = entry.inning.saturating_sub(1) as usize;
        if runs.len() <= idx {
            runs.resize(idx + 1, 0);
        }
        runs[idx] += entry.runs.len() as u32;
    }
    line
}

pub fn team_totals(log: &[PlayEntry], side: Side, runs: u32) -> TeamTotals {
    let hits = log
        .iter()
        .filter(|e| e.batting_side() == side && e.result.is_hit())
        .count() as u32;
    let errors = log
        .iter()
        .filter(|e| e.fielding_side() == side && e.error.is_some())
        .count() as u32;
    TeamTotals { runs, hits, errors }
}

// ============================================
// Player lines
// ============================================

/// Lines keyed by player id, kept in first-appearance order.
struct LineBook<T> {
    order: Vec<PlayerId>,
    lines: HashMap<PlayerId, T>,
}

impl<T> LineBook<T> {
    fn new() -> Self {
        Self { order: Vec::new(), lines: HashMap::new() }
    }

    fn entry(&mut self, id: &str, seed: impl FnOnce() -> T) -> &mut T {
        if !self.lines.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.lines.entry(id.to_string()).or_insert_with(seed)
    }

    fn into_vec(mut self) -> Vec<T> {
        self.order.iter().filter_map(|id| self.lines.remove(id)).collect()
    }
}

fn name_in(roster: &TeamRoster, id: &str) -> String {
    roster.find_player(id).map(|p| p.name.clone()).unwrap_or_else(|| id.to_string())
}

/// Batting lines in batting-order order; substitutes follow the starters.
pub fn batting_lines(log: &[PlayEntry], side: Side, roster: &TeamRoster) -> Vec<BattingLine> {
    let mut book: LineBook<BattingLine> = LineBook::new();
    for slot in &roster.lineup {
        book.entry(&slot.player.id, || BattingLine::empty(slot.player.id.clone(), slot.player.name.clone()));
    }
    let seed = |id: &str| {
        let id = id.to_string();
        move || BattingLine::empty(id.clone(), name_in(roster, &id))
    };

    for entry in log.iter().filter(|e| e.batting_side() == side) {
        for run in &entry.runs {
            book.entry(&run.runner, seed(&run.runner)).runs += 1;
        }
        if let Some(runner) = &entry.runner {
            let line = book.entry(runner, seed(runner));
            match entry.result {
                PlayResult::StolenBase => line.stolen_bases += 1,
                PlayResult::CaughtStealing => line.caught_stealing += 1,
                _ => {}
            }
        }
        if !entry.batter_done || entry.kind == PlayKind::PitchingChange {
            continue;
        }

        let line = book.entry(&entry.batter, seed(&entry.batter));
        line.plate_appearances += 1;
        if !entry.result.excluded_from_at_bats() {
            line.at_bats += 1;
        }
        line.rbi += entry.runs.iter().filter(|r| r.rbi).count() as u32;
        match entry.result {
            PlayResult::Single => line.hits += 1,
            PlayResult::Double => {
                line.hits += 1;
                line.doubles += 1;
            }
            PlayResult::Triple => {
                line.hits += 1;
                line.triples += 1;
            }
            PlayResult::HomeRun => {
                line.hits += 1;
                line.home_runs += 1;
            }
            PlayResult::Walk | PlayResult::IntentionalWalk => line.walks += 1,
            PlayResult::HitByPitch => line.hit_by_pitch += 1,
            PlayResult::Strikeout => line.strikeouts += 1,
            PlayResult::Sacrifice | PlayResult::SacrificeFly => line.sacrifices += 1,
            _ => {}
        }
    }
    book.into_vec()
}

/// Pitching lines in order of appearance, starter first.
pub fn pitching_lines(
    log: &[PlayEntry],
    side: Side,
    starter: &str,
    roster: &TeamRoster,
) -> Vec<PitchingLine> {
    let mut book: LineBook<PitchingLine> = LineBook::new();
    let seed = |id: &str| {
        let id = id.to_string();
        move || PitchingLine::empty(id.clone(), name_in(roster, &id))
    };
    book.entry(starter, seed(starter));

    for entry in log.iter().filter(|e| e.fielding_side() == side) {
        let line = book.entry(&entry.pitcher, seed(&entry.pitcher));
        line.outs += entry.outs_recorded as u32;
        if entry.batter_done && entry.kind != PlayKind::PitchingChange {
            line.batters_faced += 1;
            match entry.result {
                PlayResult::Single | PlayResult::Double | PlayResult::Triple => line.hits += 1,
                PlayResult::HomeRun => {
                    line.hits += 1;
                    line.home_runs += 1;
                }
                PlayResult::Walk | PlayResult::IntentionalWalk => line.walks += 1,
                PlayResult::Strikeout => line.strikeouts += 1,
                _ => {}
            }
        }
        for run in &entry.runs {
            let charged = book.entry(&run.charged_to, seed(&run.charged_to));
            charged.runs += 1;
            if run.earned {
                charged.earned_runs += 1;
            }
        }
    }
    book.into_vec()
}

// ============================================
// Decisions
// ============================================

/// Starting pitcher ids per side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Starters {
    pub away: PlayerId,
    pub home: PlayerId,
}

impl Starters {
    fn get(&self, side: Side) -> &PlayerId {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}

/// One pitcher's turn on the mound.
#[derive(Debug, Clone)]
struct Stint {
    pitcher: PlayerId,
    side: Side,
    relief: bool,
    /// Fielding side's lead when he came in.
    entered_lead: i64,
    /// Fielding side's lead when he left; the finisher's is the final lead.
    left_lead: i64,
    outs: u32,
    blown: bool,
}

impl Stint {
    fn new(pitcher: PlayerId, side: Side, relief: bool, entered_lead: i64) -> Self {
        Self { pitcher, side, relief, entered_lead, left_lead: entered_lead, outs: 0, blown: false }
    }
}

fn side_index(side: Side) -> usize {
    match side {
        Side::Away => 0,
        Side::Home => 1,
    }
}

/// Win, loss, save, holds and blown saves from the log.
///
/// The decisive moment is the last time the winning side took a lead it
/// never gave back. No winner, no decisions.
pub fn pitcher_decisions(
    log: &[PlayEntry],
    winner: Option<Side>,
    starters: &Starters,
    cfg: &PitchingConfig,
) -> PitcherDecisions {
    let Some(winner) = winner else {
        return PitcherDecisions::default();
    };

    let mut stints: Vec<Stint> = vec![
        Stint::new(starters.away.clone(), Side::Away, false, 0),
        Stint::new(starters.home.clone(), Side::Home, false, 0),
    ];
    let mut current = [0usize, 1usize];
    let mut charged: HashMap<PlayerId, u32> = HashMap::new();
    let mut before = Score::default();
    // winning side's stint of record and the pitcher charged with the go-ahead run
    let mut decisive: Option<(usize, PlayerId)> = None;

    for entry in log {
        let fielding = entry.fielding_side();
        let f = side_index(fielding);

        if entry.kind == PlayKind::PitchingChange {
            let lead = before.lead(fielding);
            stints[current[f]].left_lead = lead;
            stints.push(Stint::new(entry.pitcher.clone(), fielding, true, lead));
            current[f] = stints.len() - 1;
            continue;
        }

        let after = entry.score;
        for run in &entry.runs {
            *charged.entry(run.charged_to.clone()).or_insert(0) += 1;
        }
        let stint = &mut stints[current[f]];
        stint.outs += entry.outs_recorded as u32;
        if stint.relief
            && !stint.blown
            && is_save_situation(stint.entered_lead, cfg)
            && after.lead(fielding) <= 0
        {
            stint.blown = true;
        }

        if before.lead(winner) <= 0 && after.lead(winner) > 0 {
            // the run that put the winner ahead by one
            let deficit = (-before.lead(winner)).max(0) as usize;
            let go_ahead = entry
                .runs
                .get(deficit)
                .map(|r| r.charged_to.clone())
                .unwrap_or_else(|| entry.pitcher.clone());
            decisive = Some((current[side_index(winner)], go_ahead));
        }
        before = after;
    }
    for side in [Side::Away, Side::Home] {
        let idx = current[side_index(side)];
        stints[idx].left_lead = before.lead(side);
    }

    let mut decisions = PitcherDecisions::default();
    let Some((of_record, go_ahead)) = decisive else {
        return decisions;
    };
    decisions.loss = Some(go_ahead);

    let record = &stints[of_record];
    let win = if record.relief {
        record.pitcher.clone()
    } else {
        let starter = starters.get(winner);
        let starter_outs: u32 = stints
            .iter()
            .filter(|s| s.side == winner && !s.relief)
            .map(|s| s.outs)
            .sum();
        if starter_outs >= cfg.win_min_starter_outs {
            starter.clone()
        } else {
            most_effective_reliever(&stints, winner, &charged).unwrap_or_else(|| starter.clone())
        }
    };

    let finishers = [current[0], current[1]];
    let finisher = &stints[finishers[side_index(winner)]];
    if finisher.relief
        && !finisher.blown
        && finisher.pitcher != win
        && is_save_situation(finisher.entered_lead, cfg)
    {
        decisions.save = Some(finisher.pitcher.clone());
    }

    for (idx, stint) in stints.iter().enumerate().filter(|(_, s)| s.relief) {
        if stint.blown {
            if !decisions.blown_saves.contains(&stint.pitcher) {
                decisions.blown_saves.push(stint.pitcher.clone());
            }
            continue;
        }
        let held = !finishers.contains(&idx)
            && is_save_situation(stint.entered_lead, cfg)
            && stint.left_lead > 0
            && stint.outs > 0;
        if held && stint.pitcher != win && !decisions.holds.contains(&stint.pitcher) {
            decisions.holds.push(stint.pitcher.clone());
        }
    }
    decisions.win = Some(win);
    decisions
}

/// Fewest runs charged, then most outs, then earliest appearance; at least one out.
fn most_effective_reliever(
    stints: &[Stint],
    side: Side,
    charged: &HashMap<PlayerId, u32>,
) -> Option<PlayerId> {
    let mut relievers: Vec<(&PlayerId, u32, usize)> = Vec::new();
    for (order, stint) in stints.iter().enumerate().filter(|(_, s)| s.side == side && s.relief) {
        match relievers.iter_mut().find(|r| *r.0 == stint.pitcher) {
            Some(r) => r.1 += stint.outs,
            None => relievers.push((&stint.pitcher, stint.outs, order)),
        }
    }
    relievers
        .into_iter()
        .filter(|r| r.1 > 0)
        .min_by(|a, b| {
            let runs_a = charged.get(a.0).copied().unwrap_or(0);
            let runs_b = charged.get(b.0).copied().unwrap_or(0);
            runs_a.cmp(&runs_b).then(b.1.cmp(&a.1)).then(a.2.cmp(&b.2))
        })
        .map(|r| r.0.clone())
}
