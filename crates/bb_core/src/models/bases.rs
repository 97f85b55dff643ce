//! Base situation.
//!
//! Three slots, each empty or holding exactly one runner. Every operation
//! returns the runners who crossed the plate, lead runner first, so callers
//! can charge runs in the order they scored.

use serde::{Deserialize, Serialize};

use super::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    pub const ALL: [Base; 3] = [Base::First, Base::Second, Base::Third];

    pub fn index(self) -> usize {
        match self {
            Base::First => 0,
            Base::Second => 1,
            Base::Third => 2,
        }
    }

    /// The next base, or `None` when the next stop is home plate.
    pub fn next(self) -> Option<Base> {
        match self {
            Base::First => Some(Base::Second),
            Base::Second => Some(Base::Third),
            Base::Third => None,
        }
    }
}

/// A runner and the pitcher responsible for him reaching base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseRunner {
    pub runner: PlayerId,
    pub charged_to: PlayerId,
}

impl BaseRunner {
    pub fn new(runner: impl Into<PlayerId>, charged_to: impl Into<PlayerId>) -> Self {
        Self { runner: runner.into(), charged_to: charged_to.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bases {
    slots: [Option<BaseRunner>; 3],
}

impl Bases {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, base: Base) -> Option<&BaseRunner> {
        self.slots[base.index()].as_ref()
    }

    pub fn is_occupied(&self, base: Base) -> bool {
        self.slots[base.index()].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Place a runner; whoever stood there is returned.
    pub fn set(&mut self, base: Base, runner: BaseRunner) -> Option<BaseRunner> {
        self.slots[base.index()].replace(runner)
    }

    pub fn take(&mut self, base: Base) -> Option<BaseRunner> {
        self.slots[base.index()].take()
    }

    /// Batter awarded first; only forced runners move.
    pub fn force_batter(&mut self, batter: BaseRunner) -> Vec<BaseRunner> {
        let mut scored = Vec::new();
        if self.is_occupied(Base::First) {
            if self.is_occupied(Base::Second) {
                if let Some(r) = self.take(Base::Third) {
                    scored.push(r);
                }
                let second = self.take(Base::Second);
                self.slots[Base::Third.index()] = second;
            }
            let first = self.take(Base::First);
            self.slots[Base::Second.index()] = first;
        }
        self.set(Base::First, batter);
        scored
    }

    /// Every runner moves up `bases` bases.
    pub fn advance_all(&mut self, bases: usize) -> Vec<BaseRunner> {
        let mut scored = Vec::new();
        for base in [Base::Third, Base::Second, Base::First] {
            if let Some(runner) = self.take(base) {
                let target = base.index() + bases;
                if target >= 3 {
                    scored.push(runner);
                } else {
                    self.slots[target] = Some(runner);
                }
            }
        }
        scored
    }

    /// Everyone on base scores.
    pub fn clear_scoring(&mut self) -> Vec<BaseRunner> {
        self.advance_all(3)
    }

    pub fn snapshot(&self) -> BasesSnapshot {
        BasesSnapshot {
            first: self.get(Base::First).map(|r| r.runner.clone()),
            second: self.get(Base::Second).map(|r| r.runner.clone()),
            third: self.get(Base::Third).map(|r| r.runner.clone()),
        }
    }
}

/// Runner ids per base, as written to the play log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasesSnapshot {
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
    pub third: Option<PlayerId>,
}
