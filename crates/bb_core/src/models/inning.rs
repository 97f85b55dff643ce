use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    /// Team at the plate in this half.
    pub fn batting(self) -> Side {
        match self {
            Half::Top => Side::Away,
            Half::Bottom => Side::Home,
        }
    }

    pub fn fielding(self) -> Side {
        self.batting().opponent()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub away: u32,
    pub home: u32,
}

impl Score {
    pub fn new(away: u32, home: u32) -> Self {
        Self { away, home }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Away => self.away,
            Side::Home => self.home,
        }
    }

    pub fn add(&mut self, side: Side, runs: u32) {
        match side {
            Side::Away => self.away += runs,
            Side::Home => self.home += runs,
        }
    }

    /// Runs `side` is ahead by (negative when trailing).
    pub fn lead(&self, side: Side) -> i64 {
        self.get(side) as i64 - self.get(side.opponent()) as i64
    }

    pub fn leader(&self) -> Option<Side> {
        match self.away.cmp(&self.home) {
            std::cmp::Ordering::Greater => Some(Side::Away),
            std::cmp::Ordering::Less => Some(Side::Home),
            std::cmp::Ordering::Equal => None,
        }
    }
}
