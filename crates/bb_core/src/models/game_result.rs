//! Game Result Data Structures
//!
//! Output of the simulation engine. The play log is the source of truth:
//! every box-score number and pitcher decision in [`GameResult`] is derived
//! from it by the result builder, so a stored log can always be re-scored.

use serde::{Deserialize, Serialize};

use super::{BasesSnapshot, Column, Half, Outcome, PlayerId, Position, Score, Side};

// ============================================
// Play log
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayKind {
    /// Card read for the batter.
    PlateAppearance,
    /// Manager-called bunt.
    Bunt,
    /// Manager-called steal.
    StolenBase,
    PitchingChange,
}

/// Where a card value came from when the outcome was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    Primary,
    Fallback,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRead {
    pub column: Column,
    pub row: usize,
    pub raw_value: u8,
    pub source: LookupSource,
}

/// What actually happened on the field, after errors and defensive checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    IntentionalWalk,
    HitByPitch,
    CatcherInterference,
    Strikeout,
    Out,
    DoublePlay,
    Sacrifice,
    SacrificeFly,
    FieldersChoice,
    ReachedOnError,
    StolenBase,
    CaughtStealing,
    WildPitch,
    PassedBall,
    Balk,
    BuntFoul,
    NoPlay,
    PitchingChange,
}

impl PlayResult {
    pub fn is_hit(self) -> bool {
        matches!(self, PlayResult::Single | PlayResult::Double | PlayResult::Triple | PlayResult::HomeRun)
    }

    /// Plate appearances that do not count as an official at-bat.
    pub fn excluded_from_at_bats(self) -> bool {
        matches!(
            self,
            PlayResult::Walk
                | PlayResult::IntentionalWalk
                | PlayResult::HitByPitch
                | PlayResult::CatcherInterference
                | PlayResult::Sacrifice
                | PlayResult::SacrificeFly
        )
    }

    /// Batter reached base safely.
    pub fn batter_reached(self) -> bool {
        self.is_hit()
            || matches!(
                self,
                PlayResult::Walk
                    | PlayResult::IntentionalWalk
                    | PlayResult::HitByPitch
                    | PlayResult::CatcherInterference
                    | PlayResult::ReachedOnError
                    | PlayResult::FieldersChoice
            )
    }

    /// Runs scoring on this kind of play are credited as RBI.
    pub fn credits_rbi(self) -> bool {
        self.is_hit()
            || matches!(
                self,
                PlayResult::Walk
                    | PlayResult::IntentionalWalk
                    | PlayResult::HitByPitch
                    | PlayResult::CatcherInterference
                    | PlayResult::Out
                    | PlayResult::Sacrifice
                    | PlayResult::SacrificeFly
                    | PlayResult::FieldersChoice
            )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRun {
    pub runner: PlayerId,
    /// Pitcher the run is charged to.
    pub charged_to: PlayerId,
    pub earned: bool,
    pub rbi: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldingError {
    pub fielder: PlayerId,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEntry {
    pub seq: u32,
    pub inning: u32,
    pub half: Half,
    /// Outs after the play.
    pub outs: u8,
    pub batter: PlayerId,
    pub pitcher: PlayerId,
    pub kind: PlayKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardRead>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub result: PlayResult,
    pub description: String,
    /// Bases after the play.
    pub bases: BasesSnapshot,
    /// Score after the play.
    pub score: Score,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<ScoredRun>,
    pub outs_recorded: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fielder: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldingError>,
    /// Runner involved in a steal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runner: Option<PlayerId>,
    /// The batter's plate appearance ended on this play.
    pub batter_done: bool,
}

impl PlayEntry {
    pub fn batting_side(&self) -> Side {
        self.half.batting()
    }

    pub fn fielding_side(&self) -> Side {
        self.half.fielding()
    }
}

// ============================================
// Box score
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineScore {
    pub away: Vec<u32>,
    /// Shorter than `away` when the home half of the last inning was not played.
    pub home: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamTotals {
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoxScore {
    pub line_score: LineScore,
    pub away: TeamTotals,
    pub home: TeamTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    pub player_id: PlayerId,
    pub name: String,
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub runs: u32,
    pub hits: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub hit_by_pitch: u32,
    pub stolen_bases: u32,
    pub caught_stealing: u32,
    pub sacrifices: u32,
}

impl BattingLine {
    pub fn empty(player_id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            plate_appearances: 0,
            at_bats: 0,
            runs: 0,
            hits: 0,
            doubles: 0,
            triples: 0,
            home_runs: 0,
            rbi: 0,
            walks: 0,
            strikeouts: 0,
            hit_by_pitch: 0,
            stolen_bases: 0,
            caught_stealing: 0,
            sacrifices: 0,
        }
    }

    pub fn batting_average(&self) -> f64 {
        if self.at_bats == 0 {
            return 0.0;
        }
        self.hits as f64 / self.at_bats as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingLine {
    pub player_id: PlayerId,
    pub name: String,
    pub outs: u32,
    pub batters_faced: u32,
    pub hits: u32,
    pub runs: u32,
    pub earned_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub home_runs: u32,
}

impl PitchingLine {
    pub fn empty(player_id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            name: name.into(),
            outs: 0,
            batters_faced: 0,
            hits: 0,
            runs: 0,
            earned_runs: 0,
            walks: 0,
            strikeouts: 0,
            home_runs: 0,
        }
    }

    /// Innings in scorebook notation: 5 outs -> 1.2
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.outs / 3, self.outs % 3)
    }

    pub fn era(&self) -> f64 {
        if self.outs == 0 {
            return 0.0;
        }
        self.earned_runs as f64 * 27.0 / self.outs as f64
    }

    pub fn whip(&self) -> f64 {
        if self.outs == 0 {
            return 0.0;
        }
        (self.walks + self.hits) as f64 * 3.0 / self.outs as f64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PitcherDecisions {
    pub win: Option<PlayerId>,
    pub loss: Option<PlayerId>,
    pub save: Option<PlayerId>,
    #[serde(default)]
    pub holds: Vec<PlayerId>,
    #[serde(default)]
    pub blown_saves: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamLines {
    pub batting: Vec<BattingLine>,
    pub pitching: Vec<PitchingLine>,
}

/// Reproduction record for a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterminismMeta {
    pub seed: u64,
    /// PRNG draws consumed by the whole game.
    pub draws: u64,
    /// SHA-256 of the JSON-serialized play log, lowercase hex.
    pub log_digest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub away_team: String,
    pub home_team: String,
    pub final_score: Score,
    pub innings_played: u32,
    /// `None` only when the game hit the inning cap tied.
    pub winner: Option<Side>,
    pub decisions: PitcherDecisions,
    pub box_score: BoxScore,
    pub away: TeamLines,
    pub home: TeamLines,
    pub play_log: Vec<PlayEntry>,
    pub determinism: DeterminismMeta,
}

impl GameResult {
    pub fn lines(&self, side: Side) -> &TeamLines {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}
