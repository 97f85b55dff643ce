use std::fmt;

use serde::{Deserialize, Serialize};

use super::Card;

pub type PlayerId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattingHand {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "S")]
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThrowingHand {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher,
    #[serde(rename = "C")]
    Catcher,
    #[serde(rename = "1B")]
    FirstBase,
    #[serde(rename = "2B")]
    SecondBase,
    #[serde(rename = "3B")]
    ThirdBase,
    #[serde(rename = "SS")]
    Shortstop,
    #[serde(rename = "LF")]
    LeftField,
    #[serde(rename = "CF")]
    CenterField,
    #[serde(rename = "RF")]
    RightField,
    #[serde(rename = "DH")]
    DesignatedHitter,
}

impl Position {
    /// Positions the batting lineup must cover; the pitcher is covered by the mound.
    pub const LINEUP_FIELDERS: [Position; 8] = [
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::DesignatedHitter => "DH",
        }
    }

    pub fn is_outfield(self) -> bool {
        matches!(self, Position::LeftField | Position::CenterField | Position::RightField)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Stylistic tendency flags. A player carries at most two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Archetype {
    #[serde(default)]
    pub primary: u8,
    #[serde(default)]
    pub secondary: u8,
}

impl Archetype {
    pub const NONE: u8 = 0;
    pub const POWER: u8 = 1;
    pub const SPEED: u8 = 2;
    pub const CONTACT: u8 = 3;
    pub const ELITE_DEFENSE: u8 = 4;
    pub const PITCHER: u8 = 5;

    pub fn new(primary: u8, secondary: u8) -> Self {
        Self { primary, secondary }
    }

    pub fn has(self, flag: u8) -> bool {
        flag != Self::NONE && (self.primary == flag || self.secondary == flag)
    }

    pub fn is_speed_specialist(self) -> bool {
        self.has(Self::SPEED)
    }

    pub fn is_pitcher(self) -> bool {
        self.has(Self::PITCHER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchingProfile {
    /// 1 (weakest) ..= 30 (elite).
    pub grade: u8,
    /// Innings the pitcher can work before his grade starts to decay.
    #[serde(default = "default_endurance")]
    pub endurance: u8,
}

fn default_endurance() -> u8 {
    6
}

fn default_fielding_pct() -> f64 {
    0.970
}

fn default_speed() -> f64 {
    0.5
}

fn default_arm() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub bats: BattingHand,
    pub throws: ThrowingHand,
    pub card: Card,
    #[serde(default = "default_fielding_pct")]
    pub fielding_pct: f64,
    /// 0.0 ..= 1.0
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// 0.0 ..= 1.0
    #[serde(default = "default_arm")]
    pub arm: f64,
    #[serde(default)]
    pub archetype: Archetype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitching: Option<PitchingProfile>,
}

impl Player {
    pub fn is_pitcher(&self) -> bool {
        self.pitching.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_flags() {
        let a = Archetype::new(Archetype::POWER, Archetype::SPEED);
        assert!(a.is_speed_specialist());
        assert!(!a.is_pitcher());
        assert!(!Archetype::default().has(Archetype::NONE));
    }

    #[test]
    fn test_position_serde_uses_scorebook_abbreviations() {
        let json = serde_json::to_string(&Position::Shortstop).unwrap();
        assert_eq!(json, "\"SS\"");
        let back: Position = serde_json::from_str("\"1B\"").unwrap();
        assert_eq!(back, Position::FirstBase);
    }
}
