//! Sample Cards and Rosters
//!
//! Ready-made players and teams for tests, benchmarks and the CLI `sample`
//! command. Cards are built from a column-C distribution and the other four
//! columns are derived from it so that hit rows nest: every row that is a hit
//! in column A is a hit in B, and so on up to E.
//!
//! ## Usage
//! ```rust
//! use bb_core::fixtures;
//! let config = fixtures::sample_game(42);
//! let result = bb_core::simulate_game(config).unwrap();
//! assert!(result.winner.is_some() || result.innings_played > 9);
//! ```

use crate::engine::GameConfig;
use crate::models::{
    values, Archetype, BattingHand, Card, CardColumn, LineupSlot, Outcome, PitchingProfile,
    Player, Position, TeamRoster, ThrowingHand, CARD_ROWS,
};
use crate::models::Outcome::*;

// =============================================================================
// Cards
// =============================================================================

/// Column C of an everyday hitter: 9 hit rows out of 36.
const AVERAGE_C: [Outcome; 34] = [
    SingleClean, GroundOut, Walk, FlyOut, StrikeoutSwinging, Double,
    GroundOut, PopOut, SingleClean, StrikeoutLooking, Walk, LineOut,
    HomeRun, GroundOutAdvance, StrikeoutSwinging, FlyOut, SingleAdvance, DoublePlay,
    HitByPitch, GroundOut, InfieldSingle, StrikeoutSwinging, FlyOut, Walk,
    SingleClean, PopOut, StolenBaseOpp, GroundOut, Double, StrikeoutLooking,
    WildPitch, SingleClean, ReachedOnError, StrikeoutSwinging,
];

/// Column C of a slugger: more home runs, more strikeouts.
const POWER_C: [Outcome; 34] = [
    HomeRun, StrikeoutSwinging, Walk, FlyOut, Double, GroundOut,
    StrikeoutSwinging, SingleClean, Walk, PopOut, HomeRun, StrikeoutLooking,
    GroundOutAdvance, Walk, Double, StrikeoutSwinging, FlyOut, SingleAdvance,
    HitByPitch, GroundOut, StrikeoutSwinging, HomeRun, LineOut, Walk,
    DoublePlay, PopOut, SingleClean, StrikeoutLooking, FlyOut, Double,
    GroundOut, StrikeoutSwinging, ReachedOnError, WildPitch,
];

/// Column C of a pitcher at the plate.
const PITCHER_C: [Outcome; 34] = [
    StrikeoutSwinging, GroundOut, PopOut, StrikeoutLooking, FlyOut, StrikeoutSwinging,
    GroundOut, SingleClean, StrikeoutSwinging, PopOut, Sacrifice, GroundOut,
    StrikeoutLooking, FlyOut, StrikeoutSwinging, Walk, GroundOutAdvance, PopOut,
    StrikeoutSwinging, GroundOut, LineOut, StrikeoutLooking, FlyOut, DoublePlay,
    StrikeoutSwinging, GroundOut, SingleAdvance, PopOut, StrikeoutLooking, FlyOut,
    StrikeoutSwinging, GroundOut, ReachedOnError, StrikeoutLooking,
];

/// Anchors at the ends, the given outcomes in between.
fn anchored_column(outcomes: &[Outcome]) -> CardColumn {
    let mut column = [values::ANCHOR_GROUND_OUT; CARD_ROWS];
    column[0] = values::ANCHOR_STRIKEOUT;
    for (row, outcome) in outcomes.iter().take(CARD_ROWS - 2).enumerate() {
        column[row + 1] = outcome.code();
    }
    column
}

/// Rewrites the first row holding `from`; anchors are never matched.
fn swap_first(mut column: CardColumn, from: Outcome, to: Outcome) -> CardColumn {
    if let Some(slot) = column.iter_mut().find(|v| **v == from.code()) {
        *slot = to.code();
    }
    column
}

/// Five columns from column C: D and E gain a hit each, B and A lose one each.
fn graded_card(c_outcomes: &[Outcome]) -> Card {
    let c = anchored_column(c_outcomes);
    let d = swap_first(c, GroundOut, SingleClean);
    let e = swap_first(d, FlyOut, Double);
    let b = swap_first(c, SingleClean, GroundOut);
    let a = swap_first(b, SingleAdvance, PopOut);
    Card::new([a, b, c, d, e])
}

pub fn average_hitter_card() -> Card {
    graded_card(&AVERAGE_C)
}

pub fn power_hitter_card() -> Card {
    graded_card(&POWER_C)
}

pub fn pitcher_batting_card() -> Card {
    graded_card(&PITCHER_C)
}

// =============================================================================
// Players
// =============================================================================

/// Right-handed position player with default ratings.
pub fn player(id: &str, card: Card) -> Player {
    Player {
        id: id.to_string(),
        name: format!("Player {}", id),
        bats: BattingHand::Right,
        throws: ThrowingHand::Right,
        card,
        fielding_pct: 0.970,
        speed: 0.5,
        arm: 0.5,
        archetype: Archetype::default(),
        pitching: None,
    }
}

/// Pitcher who can also take a lineup slot.
pub fn batting_pitcher(id: &str) -> Player {
    pitcher(id, 15, 6, ThrowingHand::Right)
}

fn pitcher(id: &str, grade: u8, endurance: u8, throws: ThrowingHand) -> Player {
    Player {
        name: format!("Pitcher {}", id),
        throws,
        speed: 0.3,
        archetype: Archetype::new(Archetype::PITCHER, Archetype::NONE),
        pitching: Some(PitchingProfile { grade, endurance }),
        ..player(id, pitcher_batting_card())
    }
}

struct Hitter {
    position: Position,
    bats: BattingHand,
    power: bool,
    speed: f64,
    archetype: Archetype,
    fielding_pct: f64,
    arm: f64,
}

fn batting_order() -> [Hitter; 9] {
    let h = |position, bats, power, speed, archetype, fielding_pct, arm| Hitter {
        position,
        bats,
        power,
        speed,
        archetype,
        fielding_pct,
        arm,
    };
    let speedy = Archetype::new(Archetype::SPEED, Archetype::NONE);
    let table_setter = Archetype::new(Archetype::CONTACT, Archetype::SPEED);
    let slugger = Archetype::new(Archetype::POWER, Archetype::NONE);
    let glove = Archetype::new(Archetype::ELITE_DEFENSE, Archetype::NONE);
    [
        h(Position::CenterField, BattingHand::Left, false, 0.85, speedy, 0.980, 0.6),
        h(Position::Shortstop, BattingHand::Switch, false, 0.75, table_setter, 0.975, 0.7),
        h(Position::FirstBase, BattingHand::Right, true, 0.35, slugger, 0.990, 0.4),
        h(Position::RightField, BattingHand::Left, true, 0.45, slugger, 0.975, 0.8),
        h(Position::DesignatedHitter, BattingHand::Right, true, 0.30, slugger, 0.970, 0.5),
        h(Position::ThirdBase, BattingHand::Right, false, 0.45, Archetype::default(), 0.955, 0.7),
        h(Position::LeftField, BattingHand::Left, false, 0.55, Archetype::default(), 0.970, 0.5),
        h(Position::SecondBase, BattingHand::Right, false, 0.60, glove, 0.985, 0.5),
        h(Position::Catcher, BattingHand::Right, false, 0.25, glove, 0.990, 0.75),
    ]
}

// =============================================================================
// Teams
// =============================================================================

/// DH lineup `{prefix}1..{prefix}9`, starter `{prefix}_sp`, three relievers
/// `{prefix}_rp1..3` and closer `{prefix}_cl`.
pub fn sample_team(name: &str, prefix: &str) -> TeamRoster {
    let lineup = batting_order()
        .into_iter()
        .enumerate()
        .map(|(i, h)| {
            let id = format!("{}{}", prefix, i + 1);
            let card = if h.power { power_hitter_card() } else { average_hitter_card() };
            let player = Player {
                name: format!("{} {}", name, h.position),
                bats: h.bats,
                speed: h.speed,
                archetype: h.archetype,
                fielding_pct: h.fielding_pct,
                arm: h.arm,
                ..player(&id, card)
            };
            LineupSlot { player, position: h.position }
        })
        .collect();

    let arm = |suffix: &str, grade, endurance, throws| {
        pitcher(&format!("{}_{}", prefix, suffix), grade, endurance, throws)
    };
    TeamRoster {
        name: name.to_string(),
        lineup,
        starting_pitcher: Some(arm("sp", 15, 6, ThrowingHand::Right)),
        bullpen: vec![
            arm("rp1", 13, 2, ThrowingHand::Left),
            arm("rp2", 14, 2, ThrowingHand::Right),
            arm("rp3", 11, 3, ThrowingHand::Right),
            arm("cl", 20, 1, ThrowingHand::Right),
        ],
        closer: Some(format!("{}_cl", prefix)),
    }
}

/// Away "a" lineup at home "h" lineup with default tuning.
pub fn sample_game(seed: u64) -> GameConfig {
    GameConfig::new(seed, sample_team("Away", "a"), sample_team("Home", "h"))
}
