//! Game rules, staff management and manager tendencies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRulesConfig {
    /// Innings in a regulation game (default: 9)
    pub regulation_innings: u32,
    /// Hard stop; a game still tied after this inning ends tied (default: 30)
    pub max_innings: u32,
    /// Non-concluding events one batter may see before his PA is closed out (default: 4)
    pub max_pitch_events_per_pa: u8,
    /// Plate appearances in one half before every further batter is retired (default: 40)
    pub max_batters_per_half: u32,
}

impl Default for GameRulesConfig {
    fn default() -> Self {
        Self {
            regulation_innings: 9,
            max_innings: 30,
            max_pitch_events_per_pa: 4,
            max_batters_per_half: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchingConfig {
    /// Grade lost per inning worked beyond endurance (default: 2)
    pub fatigue_grade_penalty: u8,
    /// Consecutive batters reaching base before the pitcher is pulled (default: 3)
    pub pull_after_consecutive_baserunners: u32,
    /// Largest lead that is still a save situation (default: 3)
    pub save_lead_max: u32,
    /// Outs a starter needs to qualify for the win (default: 15)
    pub win_min_starter_outs: u32,
}

impl Default for PitchingConfig {
    fn default() -> Self {
        Self {
            fatigue_grade_penalty: 2,
            pull_after_consecutive_baserunners: 3,
            save_lead_max: 3,
            win_min_starter_outs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Earliest inning for a sacrifice bunt (default: 7)
    pub bunt_min_inning: u32,
    /// Bunt only when the game is within this many runs (default: 1)
    pub bunt_max_run_margin: u32,
    /// Batters with at most this many column-C hit slots are asked to bunt (default: 7)
    pub bunt_max_hit_slots: usize,
    /// Minimum runner speed for a steal call (default: 0.7)
    pub steal_min_speed: f64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self { bunt_min_inning: 7, bunt_max_run_margin: 1, bunt_max_hit_slots: 7, steal_min_speed: 0.7 }
    }
}
