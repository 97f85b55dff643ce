//! Defense: who fields the ball, errors, and double plays.

use serde::{Deserialize, Serialize};

use super::config::DefenseConfig;
use super::rng::SeededRng;
use crate::models::{Outcome, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattedOut {
    Ground,
    Fly,
    Line,
    Pop,
}

const GROUND_FIELDERS: [Position; 4] =
    [Position::FirstBase, Position::SecondBase, Position::Shortstop, Position::ThirdBase];
const FLY_FIELDERS: [Position; 3] =
    [Position::LeftField, Position::CenterField, Position::RightField];
const POP_FIELDERS: [Position; 5] = [
    Position::Catcher,
    Position::FirstBase,
    Position::SecondBase,
    Position::Shortstop,
    Position::ThirdBase,
];
const LINE_FIELDERS: [Position; 5] = [
    Position::Pitcher,
    Position::FirstBase,
    Position::SecondBase,
    Position::Shortstop,
    Position::ThirdBase,
];

impl BattedOut {
    pub fn from_outcome(outcome: Outcome) -> Option<Self> {
        match outcome {
            Outcome::GroundOut | Outcome::GroundOutAdvance | Outcome::DoublePlay => {
                Some(BattedOut::Ground)
            }
            Outcome::FlyOut => Some(BattedOut::Fly),
            Outcome::LineOut => Some(BattedOut::Line),
            Outcome::PopOut => Some(BattedOut::Pop),
            _ => None,
        }
    }

    pub fn candidate_positions(self) -> &'static [Position] {
        match self {
            BattedOut::Ground => &GROUND_FIELDERS,
            BattedOut::Fly => &FLY_FIELDERS,
            BattedOut::Pop => &POP_FIELDERS,
            BattedOut::Line => &LINE_FIELDERS,
        }
    }
}

/// Uniform pick among the plausible fielders for this kind of out.
pub fn assign_fielder(kind: BattedOut, rng: &mut SeededRng) -> Position {
    let candidates = kind.candidate_positions();
    candidates[rng.pick(candidates.len())]
}

/// Outfielder responsible for a ball hit to the outfield.
pub fn assign_outfielder(rng: &mut SeededRng) -> Position {
    assign_fielder(BattedOut::Fly, rng)
}

pub fn error_probability(fielding_pct: f64) -> f64 {
    if fielding_pct.is_nan() {
        return 0.0;
    }
    (1.0 - fielding_pct).clamp(0.0, 1.0)
}

/// One draw; true when the fielder boots it.
pub fn check_error(fielding_pct: f64, rng: &mut SeededRng) -> bool {
    rng.chance(error_probability(fielding_pct))
}

/// Whether the middle infield turns two. Guaranteed (no draw) when the mean
/// of SS and 2B fielding pct reaches the guarantee line.
pub fn double_play_turns(
    shortstop_pct: f64,
    second_base_pct: f64,
    cfg: &DefenseConfig,
    rng: &mut SeededRng,
) -> bool {
    let mean = (shortstop_pct + second_base_pct) / 2.0;
    if mean >= cfg.double_play_guarantee_pct {
        return true;
    }
    !rng.chance(cfg.double_play_failure_rate)
}
