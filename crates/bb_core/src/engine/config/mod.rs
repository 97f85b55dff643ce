//! # Engine Configuration
//!
//! Every tuning constant the engine reads lives here, grouped by the
//! resolver that uses it. All groups are `#[serde(default)]`, so a JSON
//! override only needs the fields it changes.
//!
//! ```rust
//! use bb_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.rules.regulation_innings, 9);
//!
//! let seven = EngineConfig::from_json(r#"{ "rules": { "regulation_innings": 7 } }"#).unwrap();
//! assert_eq!(seven.rules.regulation_innings, 7);
//! ```

mod play_config;
mod rules_config;

pub use play_config::{BaserunningConfig, BuntConfig, DefenseConfig, StealConfig};
pub use rules_config::{GameRulesConfig, ManagerConfig, PitchingConfig};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rules: GameRulesConfig,
    pub baserunning: BaserunningConfig,
    pub steal: StealConfig,
    pub bunt: BuntConfig,
    pub defense: DefenseConfig,
    pub pitching: PitchingConfig,
    pub manager: ManagerConfig,
}

fn check_unit(name: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidTuning(format!("{name} must be 0.0-1.0, got {value}")));
    }
    Ok(())
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidTuning(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        if rules.regulation_innings == 0 {
            return Err(ConfigError::InvalidTuning("regulation_innings must be at least 1".into()));
        }
        if rules.max_innings < rules.regulation_innings {
            return Err(ConfigError::InvalidTuning(format!(
                "max_innings ({}) must be >= regulation_innings ({})",
                rules.max_innings, rules.regulation_innings
            )));
        }

        if rules.max_batters_per_half < 3 {
            return Err(ConfigError::InvalidTuning("rules.max_batters_per_half must be at least 3".into()));
        }

        let b = &self.baserunning;
        check_unit("baserunning.speed_specialist_bonus", b.speed_specialist_bonus)?;
        check_unit("baserunning.strong_arm_threshold", b.strong_arm_threshold)?;
        check_unit("baserunning.strong_arm_penalty", b.strong_arm_penalty)?;
        check_unit("baserunning.two_out_bonus", b.two_out_bonus)?;

        let s = &self.steal;
        check_unit("steal.speed_weight", s.speed_weight)?;
        check_unit("steal.speed_specialist_bonus", s.speed_specialist_bonus)?;
        check_unit("steal.catcher_arm_weight", s.catcher_arm_weight)?;

        let bunt = &self.bunt;
        check_unit("bunt.sacrifice", bunt.sacrifice)?;
        check_unit("bunt.foul", bunt.foul)?;
        check_unit("bunt.bunt_hit_zone", bunt.bunt_hit_zone)?;
        check_unit("bunt.bunt_hit_speed_threshold", bunt.bunt_hit_speed_threshold)?;
        let bands = bunt.sacrifice + bunt.foul + bunt.bunt_hit_zone;
        if bands > 1.0 + 1e-9 {
            return Err(ConfigError::InvalidTuning(format!(
                "bunt bands must sum to at most 1.0, got {bands}"
            )));
        }

        let d = &self.defense;
        check_unit("defense.double_play_guarantee_pct", d.double_play_guarantee_pct)?;
        check_unit("defense.double_play_failure_rate", d.double_play_failure_rate)?;
        check_unit("defense.default_fielding_pct", d.default_fielding_pct)?;
        check_unit("defense.default_arm", d.default_arm)?;

        if self.pitching.pull_after_consecutive_baserunners == 0 {
            return Err(ConfigError::InvalidTuning(
                "pitching.pull_after_consecutive_baserunners must be at least 1".into(),
            ));
        }
        check_unit("manager.steal_min_speed", self.manager.steal_min_speed)?;

        Ok(())
    }
}

// ========== Tests ==========
