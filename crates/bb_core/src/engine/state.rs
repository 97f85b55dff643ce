//! Game state snapshots.
//!
//! A [`GameState`] is never edited in place by the engine. Each play builds
//! the next snapshot from the previous one, so any point of a game can be
//! kept, compared or replayed.

use serde::{Deserialize, Serialize};

use crate::models::{
    Bases, Half, PlayEntry, PlayerId, Position, Score, Side, TeamRoster, LINEUP_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub player_id: PlayerId,
    pub position: Position,
}

/// One club's in-game bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub side: Side,
    pub lineup: Vec<LineupEntry>,
    /// 0..=8
    pub batting_index: usize,
    pub active_pitcher: PlayerId,
    pub bullpen: Vec<PlayerId>,
    pub closer: Option<PlayerId>,
    /// Every pitcher who has appeared, in order; the starter is first.
    pub used_pitchers: Vec<PlayerId>,
    /// Outs recorded by the active pitcher.
    pub pitcher_outs: u32,
    /// Consecutive batters who reached base against the active pitcher.
    pub baserunner_streak: u32,
}

impl TeamState {
    /// Rosters are validated before this is called, so a starter is present.
    pub fn from_roster(side: Side, roster: &TeamRoster) -> Self {
        let starter = roster.starting_pitcher.as_ref().map(|p| p.id.clone()).unwrap_or_default();
        Self {
            side,
            lineup: roster
                .lineup
                .iter()
                .map(|s| LineupEntry { player_id: s.player.id.clone(), position: s.position })
                .collect(),
            batting_index: 0,
            active_pitcher: starter.clone(),
            bullpen: roster.bullpen.iter().map(|p| p.id.clone()).collect(),
            closer: roster.closer.clone(),
            used_pitchers: vec![starter],
            pitcher_outs: 0,
            baserunner_streak: 0,
        }
    }

    pub fn current_batter(&self) -> Option<&PlayerId> {
        self.lineup.get(self.batting_index).map(|e| &e.player_id)
    }

    pub fn starter(&self) -> Option<&PlayerId> {
        self.used_pitchers.first()
    }

    pub fn has_pitched(&self, id: &str) -> bool {
        self.used_pitchers.iter().any(|p| p == id)
    }

    pub fn advance_batter(&mut self) {
        self.batting_index = (self.batting_index + 1) % LINEUP_SIZE;
    }

    /// Put a new pitcher on the mound. A pitcher batting for himself is
    /// replaced in the order as well.
    pub fn change_pitcher(&mut self, reliever: PlayerId) {
        for entry in self.lineup.iter_mut() {
            if entry.position == Position::Pitcher && entry.player_id == self.active_pitcher {
                entry.player_id = reliever.clone();
            }
        }
        self.active_pitcher = reliever.clone();
        self.used_pitchers.push(reliever);
        self.pitcher_outs = 0;
        self.baserunner_streak = 0;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 1-based
    pub inning: u32,
    pub half: Half,
    /// 0..=3
    pub outs: u8,
    pub bases: Bases,
    /// Strikes on the current batter; only bunt fouls add them.
    pub strikes: u8,
    /// Non-concluding events seen by the current batter.
    pub pitch_events: u8,
    /// Plate appearances completed this half inning.
    pub batters_this_half: u32,
    pub away: TeamState,
    pub home: TeamState,
    pub score: Score,
    pub log: Vec<PlayEntry>,
    pub complete: bool,
}

impl GameState {
    pub fn new(away: &TeamRoster, home: &TeamRoster) -> Self {
        Self {
            inning: 1,
            half: Half::Top,
            outs: 0,
            bases: Bases::empty(),
            strikes: 0,
            pitch_events: 0,
            batters_this_half: 0,
            away: TeamState::from_roster(Side::Away, away),
            home: TeamState::from_roster(Side::Home, home),
            score: Score::default(),
            log: Vec::new(),
            complete: false,
        }
    }

    pub fn team(&self, side: Side) -> &TeamState {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut TeamState {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    pub fn batting_team(&self) -> &TeamState {
        self.team(self.half.batting())
    }

    pub fn fielding_team(&self) -> &TeamState {
        self.team(self.half.fielding())
    }

    pub fn current_batter(&self) -> Option<&PlayerId> {
        self.batting_team().current_batter()
    }

    pub fn current_pitcher(&self) -> &PlayerId {
        &self.fielding_team().active_pitcher
    }

    /// Top -> bottom of the same inning, bottom -> top of the next. Clears
    /// outs, bases, counts and streaks; the score carries over.
    pub fn advance_half_inning(&self) -> GameState {
        let mut next = self.clone();
        match self.half {
            Half::Top => next.half = Half::Bottom,
            Half::Bottom => {
                next.half = Half::Top;
                next.inning += 1;
            }
        }
        next.outs = 0;
        next.bases = Bases::empty();
        next.strikes = 0;
        next.pitch_events = 0;
        next.batters_this_half = 0;
        next.away.baserunner_streak = 0;
        next.home.baserunner_streak = 0;
        next
    }

    /// The home half is not needed: regulation top half is over and the
    /// home side already leads.
    pub fn should_skip_bottom_half(&self, regulation_innings: u32) -> bool {
        self.half == Half::Top
            && self.inning >= regulation_innings
            && self.score.home > self.score.away
    }

    pub fn is_game_over(&self, regulation_innings: u32) -> bool {
        if self.inning < regulation_innings {
            return false;
        }
        let home_ahead = self.score.home > self.score.away;
        match self.half {
            Half::Top => self.outs >= 3 && home_ahead,
            Half::Bottom => home_ahead || (self.outs >= 3 && self.score.away > self.score.home),
        }
    }

    pub fn half_over(&self) -> bool {
        self.outs >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::models::{Base, BaseRunner};

    fn state() -> GameState {
        GameState::new(&fixtures::sample_team("Away", "a"), &fixtures::sample_team("Home", "h"))
    }

    fn at(inning: u32, half: Half, outs: u8, away: u32, home: u32) -> GameState {
        let mut s = state();
        s.inning = inning;
        s.half = half;
        s.outs = outs;
        s.score = Score::new(away, home);
        s
    }

    #[test]
    fn test_new_game_starts_top_of_first() {
        let s = state();
        assert_eq!((s.inning, s.half, s.outs), (1, Half::Top, 0));
        assert_eq!(s.current_batter(), Some(&"a1".to_string()));
        assert_eq!(s.current_pitcher(), &"h_sp".to_string());
    }

    #[test]
    fn test_advance_half_inning_resets_but_keeps_score() {
        let mut s = at(3, Half::Top, 3, 2, 1);
        s.bases.set(Base::Second, BaseRunner::new("a2", "h_sp"));
        s.home.baserunner_streak = 2;
        let bottom = s.advance_half_inning();
        assert_eq!((bottom.inning, bottom.half, bottom.outs), (3, Half::Bottom, 0));
        assert!(bottom.bases.is_empty());
        assert_eq!(bottom.home.baserunner_streak, 0);
        assert_eq!(bottom.score, Score::new(2, 1));
        // the previous snapshot is untouched
        assert_eq!(s.outs, 3);

        let top = bottom.advance_half_inning();
        assert_eq!((top.inning, top.half), (4, Half::Top));
    }

    #[test]
    fn test_home_leading_after_top_ninth_is_over() {
        let s = at(9, Half::Top, 3, 3, 5);
        assert!(s.is_game_over(9));
        assert!(at(9, Half::Top, 0, 3, 5).should_skip_bottom_half(9));
    }

    #[test]
    fn test_tie_after_nine_continues() {
        assert!(!at(9, Half::Bottom, 3, 3, 3).is_game_over(9));
        assert!(!at(12, Half::Bottom, 3, 3, 3).is_game_over(9));
    }

    #[test]
    fn test_walk_off_ends_immediately() {
        assert!(at(9, Half::Bottom, 1, 4, 5).is_game_over(9));
        assert!(at(11, Half::Bottom, 0, 6, 7).is_game_over(9));
    }

    #[test]
    fn test_not_over_before_regulation() {
        assert!(!at(8, Half::Bottom, 3, 0, 10).is_game_over(9));
        assert!(!at(8, Half::Top, 3, 0, 10).should_skip_bottom_half(9));
    }

    #[test]
    fn test_away_win_needs_three_outs_in_bottom() {
        assert!(!at(9, Half::Bottom, 2, 5, 3).is_game_over(9));
        assert!(at(9, Half::Bottom, 3, 5, 3).is_game_over(9));
        assert!(!at(9, Half::Top, 3, 5, 3).is_game_over(9));
    }

    #[test]
    fn test_batting_order_wraps() {
        let mut team = state().away;
        team.batting_index = 8;
        team.advance_batter();
        assert_eq!(team.batting_index, 0);
    }

    #[test]
    fn test_change_pitcher_tracks_usage() {
        let mut team = state().home;
        team.pitcher_outs = 12;
        team.baserunner_streak = 3;
        team.change_pitcher("h_rp1".into());
        assert_eq!(team.active_pitcher, "h_rp1");
        assert_eq!(team.used_pitchers, vec!["h_sp".to_string(), "h_rp1".to_string()]);
        assert_eq!((team.pitcher_outs, team.baserunner_streak), (0, 0));
    }
}
