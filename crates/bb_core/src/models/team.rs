use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Player, PlayerId, Position};
use crate::error::ConfigError;

pub const LINEUP_SIZE: usize = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSlot {
    pub player: Player,
    pub position: Position,
}

/// A team as handed to the engine: batting order, starter, bullpen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub name: String,
    pub lineup: Vec<LineupSlot>, // batting order, 9 slots
    #[serde(default)]
    pub starting_pitcher: Option<Player>,
    #[serde(default)]
    pub bullpen: Vec<Player>,
    /// Id of the bullpen arm reserved for save situations.
    #[serde(default)]
    pub closer: Option<PlayerId>,
}

impl TeamRoster {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let team = || self.name.clone();

        if self.lineup.len() != LINEUP_SIZE {
            return Err(ConfigError::LineupSize { team: team(), found: self.lineup.len() });
        }

        let starter = match &self.starting_pitcher {
            Some(p) if p.is_pitcher() => p,
            Some(p) => {
                return Err(ConfigError::NotAPitcher { team: team(), player_id: p.id.clone() })
            }
            None => return Err(ConfigError::NoPitcher { team: team() }),
        };

        for position in Position::LINEUP_FIELDERS {
            let count = self.lineup.iter().filter(|s| s.position == position).count();
            if count == 0 {
                return Err(ConfigError::MissingPosition { team: team(), position });
            }
            if count > 1 {
                return Err(ConfigError::DuplicatePosition { team: team(), position });
            }
        }

        // The ninth slot is either a DH or the pitcher batting for himself.
        let extra: Vec<&LineupSlot> = self
            .lineup
            .iter()
            .filter(|s| matches!(s.position, Position::Pitcher | Position::DesignatedHitter))
            .collect();
        if let [slot] = extra.as_slice() {
            if slot.position == Position::Pitcher && slot.player.id != starter.id {
                return Err(ConfigError::PitcherSlotMismatch {
                    team: team(),
                    found: slot.player.id.clone(),
                    expected: starter.id.clone(),
                });
            }
        } else {
            let position =
                extra.get(1).map(|s| s.position).unwrap_or(Position::DesignatedHitter);
            return Err(ConfigError::DuplicatePosition { team: team(), position });
        }

        for reliever in &self.bullpen {
            if !reliever.is_pitcher() {
                return Err(ConfigError::NotAPitcher {
                    team: team(),
                    player_id: reliever.id.clone(),
                });
            }
        }

        for pitcher in std::iter::once(starter).chain(self.bullpen.iter()) {
            if pitcher.pitching.map(|p| p.endurance == 0).unwrap_or(false) {
                return Err(ConfigError::ZeroEndurance {
                    team: team(),
                    player_id: pitcher.id.clone(),
                });
            }
        }

        if let Some(closer) = &self.closer {
            if !self.bullpen.iter().any(|p| &p.id == closer) {
                return Err(ConfigError::CloserNotInBullpen {
                    team: team(),
                    player_id: closer.clone(),
                });
            }
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for player in self.lineup.iter().map(|s| &s.player).chain(self.bullpen.iter()) {
            if !seen.insert(player.id.as_str()) {
                return Err(ConfigError::DuplicatePlayer {
                    team: team(),
                    player_id: player.id.clone(),
                });
            }
        }
        if !self.bats_pitcher() && seen.contains(starter.id.as_str()) {
            return Err(ConfigError::DuplicatePlayer { team: team(), player_id: starter.id.clone() });
        }

        Ok(())
    }

    /// True when the pitcher occupies a batting-order slot (no DH).
    pub fn bats_pitcher(&self) -> bool {
        self.lineup.iter().any(|s| s.position == Position::Pitcher)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.lineup
            .iter()
            .map(|s| &s.player)
            .chain(self.starting_pitcher.iter())
            .chain(self.bullpen.iter())
    }

    pub fn find_player(&self, id: &str) -> Option<&Player> {
        self.players().find(|p| p.id == id)
    }

    /// Lineup player covering a field position. The pitcher is tracked by the engine.
    pub fn fielder_at(&self, position: Position) -> Option<&Player> {
        self.lineup.iter().find(|s| s.position == position).map(|s| &s.player)
    }
}
