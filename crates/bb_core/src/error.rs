use thiserror::Error;

use crate::models::Position;

/// Invalid game configuration, detected before the first pitch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{team}: lineup must have 9 batters, found {found}")]
    LineupSize { team: String, found: usize },

    #[error("{team}: fielding position {position} is not covered by the lineup")]
    MissingPosition { team: String, position: Position },

    #[error("{team}: position {position} appears more than once in the lineup")]
    DuplicatePosition { team: String, position: Position },

    #[error("{team}: no pitcher available")]
    NoPitcher { team: String },

    #[error("{team}: {player_id} is listed as a pitcher but has no pitching profile")]
    NotAPitcher { team: String, player_id: String },

    #[error("{team}: pitcher {player_id} has zero endurance")]
    ZeroEndurance { team: String, player_id: String },

    #[error("{team}: closer {player_id} is not in the bullpen")]
    CloserNotInBullpen { team: String, player_id: String },

    #[error("{team}: duplicate player id {player_id}")]
    DuplicatePlayer { team: String, player_id: String },

    #[error("{team}: lineup pitcher slot holds {found}, expected starter {expected}")]
    PitcherSlotMismatch { team: String, found: String, expected: String },

    #[error("card column {column} has {found} rows, expected 36")]
    CardRows { column: char, found: usize },

    #[error("invalid engine config: {0}")]
    InvalidTuning(String),
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SimError {
    /// Configuration problems are the caller's fault; everything else is ours.
    pub fn is_config(&self) -> bool {
        matches!(self, SimError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
