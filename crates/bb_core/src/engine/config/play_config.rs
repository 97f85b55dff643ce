//! Tuning for the per-play sub-resolvers.

use serde::{Deserialize, Serialize};

/// Speed checks on singles, doubles and tag-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaserunningConfig {
    /// Added to a speed specialist's base speed (default: 0.15)
    pub speed_specialist_bonus: f64,
    /// Outfield arm above this slows runners down (default: 0.8)
    pub strong_arm_threshold: f64,
    /// Penalty against a strong outfield arm (default: 0.10)
    pub strong_arm_penalty: f64,
    /// Runners go on contact with two outs (default: 0.10)
    pub two_out_bonus: f64,
}

impl Default for BaserunningConfig {
    fn default() -> Self {
        Self {
            speed_specialist_bonus: 0.15,
            strong_arm_threshold: 0.8,
            strong_arm_penalty: 0.10,
            two_out_bonus: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StealConfig {
    /// Weight of runner speed (default: 0.75)
    pub speed_weight: f64,
    /// Bonus for speed specialists (default: 0.15)
    pub speed_specialist_bonus: f64,
    /// Weight of the catcher's arm against the runner (default: 0.20)
    pub catcher_arm_weight: f64,
}

impl Default for StealConfig {
    fn default() -> Self {
        Self { speed_weight: 0.75, speed_specialist_bonus: 0.15, catcher_arm_weight: 0.20 }
    }
}

/// Partition of the single bunt draw. Whatever is left after the three bands
/// is a failed bunt popped up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuntConfig {
    /// (default: 0.65)
    pub sacrifice: f64,
    /// (default: 0.15)
    pub foul: f64,
    /// (default: 0.10)
    pub bunt_hit_zone: f64,
    /// Batter speed needed to beat out a bunt (default: 0.6)
    pub bunt_hit_speed_threshold: f64,
}

impl Default for BuntConfig {
    fn default() -> Self {
        Self { sacrifice: 0.65, foul: 0.15, bunt_hit_zone: 0.10, bunt_hit_speed_threshold: 0.6 }
    }
}

impl BuntConfig {
    pub fn pop_out(&self) -> f64 {
        (1.0 - self.sacrifice - self.foul - self.bunt_hit_zone).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseConfig {
    /// SS/2B mean fielding pct at which a double play always turns (default: 0.95)
    pub double_play_guarantee_pct: f64,
    /// Failure rate below the guarantee line (default: 0.10)
    pub double_play_failure_rate: f64,
    /// Used when a fielder cannot be found (default: 0.970)
    pub default_fielding_pct: f64,
    /// Used when an arm rating cannot be found (default: 0.5)
    pub default_arm: f64,
}

impl Default for DefenseConfig {
    fn default() -> Self {
        Self {
            double_play_guarantee_pct: 0.95,
            double_play_failure_rate: 0.10,
            default_fielding_pct: 0.970,
            default_arm: 0.5,
        }
    }
}
