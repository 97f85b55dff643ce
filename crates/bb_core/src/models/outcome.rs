//! Plate-appearance outcomes.
//!
//! Every card slot resolves to exactly one [`Outcome`]. The canonical raw
//! code of an outcome is its 1-based position in [`Outcome::ALL`]; cards built
//! by the card generator store these codes directly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeRun,
    Triple,
    Double,
    /// Clean single; a runner on first may take third on a speed check.
    SingleClean,
    /// Single where every runner takes two bases.
    SingleAdvance,
    InfieldSingle,
    Walk,
    IntentionalWalk,
    HitByPitch,
    StrikeoutLooking,
    StrikeoutSwinging,
    GroundOut,
    /// Weak contact: batter retired, runners move up a base.
    GroundOutAdvance,
    FlyOut,
    LineOut,
    PopOut,
    DoublePlay,
    Sacrifice,
    FieldersChoice,
    ReachedOnError,
    StolenBaseOpp,
    WildPitch,
    PassedBall,
    Balk,
    /// Catcher interference; batter awarded first.
    SpecialEvent,
}

impl Outcome {
    pub const ALL: [Outcome; 25] = [
        Outcome::HomeRun,
        Outcome::Triple,
        Outcome::Double,
        Outcome::SingleClean,
        Outcome::SingleAdvance,
        Outcome::InfieldSingle,
        Outcome::Walk,
        Outcome::IntentionalWalk,
        Outcome::HitByPitch,
        Outcome::StrikeoutLooking,
        Outcome::StrikeoutSwinging,
        Outcome::GroundOut,
        Outcome::GroundOutAdvance,
        Outcome::FlyOut,
        Outcome::LineOut,
        Outcome::PopOut,
        Outcome::DoublePlay,
        Outcome::Sacrifice,
        Outcome::FieldersChoice,
        Outcome::ReachedOnError,
        Outcome::StolenBaseOpp,
        Outcome::WildPitch,
        Outcome::PassedBall,
        Outcome::Balk,
        Outcome::SpecialEvent,
    ];

    /// Canonical raw card value (1..=25).
    pub fn code(self) -> u8 {
        match self {
            Outcome::HomeRun => 1,
            Outcome::Triple => 2,
            Outcome::Double => 3,
            Outcome::SingleClean => 4,
            Outcome::SingleAdvance => 5,
            Outcome::InfieldSingle => 6,
            Outcome::Walk => 7,
            Outcome::IntentionalWalk => 8,
            Outcome::HitByPitch => 9,
            Outcome::StrikeoutLooking => 10,
            Outcome::StrikeoutSwinging => 11,
            Outcome::GroundOut => 12,
            Outcome::GroundOutAdvance => 13,
            Outcome::FlyOut => 14,
            Outcome::LineOut => 15,
            Outcome::PopOut => 16,
            Outcome::DoublePlay => 17,
            Outcome::Sacrifice => 18,
            Outcome::FieldersChoice => 19,
            Outcome::ReachedOnError => 20,
            Outcome::StolenBaseOpp => 21,
            Outcome::WildPitch => 22,
            Outcome::PassedBall => 23,
            Outcome::Balk => 24,
            Outcome::SpecialEvent => 25,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=25 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn is_hit(self) -> bool {
        matches!(
            self,
            Outcome::HomeRun
                | Outcome::Triple
                | Outcome::Double
                | Outcome::SingleClean
                | Outcome::SingleAdvance
                | Outcome::InfieldSingle
        )
    }

    pub fn is_strikeout(self) -> bool {
        matches!(self, Outcome::StrikeoutLooking | Outcome::StrikeoutSwinging)
    }

    /// Events that happen while the batter is still at the plate.
    pub fn is_pitch_event(self) -> bool {
        matches!(
            self,
            Outcome::StolenBaseOpp | Outcome::WildPitch | Outcome::PassedBall | Outcome::Balk
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::HomeRun => "home run",
            Outcome::Triple => "triple",
            Outcome::Double => "double",
            Outcome::SingleClean => "single",
            Outcome::SingleAdvance => "single, runners advance",
            Outcome::InfieldSingle => "infield single",
            Outcome::Walk => "walk",
            Outcome::IntentionalWalk => "intentional walk",
            Outcome::HitByPitch => "hit by pitch",
            Outcome::StrikeoutLooking => "strikeout looking",
            Outcome::StrikeoutSwinging => "strikeout swinging",
            Outcome::GroundOut => "ground out",
            Outcome::GroundOutAdvance => "ground out, runners advance",
            Outcome::FlyOut => "fly out",
            Outcome::LineOut => "line out",
            Outcome::PopOut => "pop out",
            Outcome::DoublePlay => "double play",
            Outcome::Sacrifice => "sacrifice",
            Outcome::FieldersChoice => "fielder's choice",
            Outcome::ReachedOnError => "reached on error",
            Outcome::StolenBaseOpp => "stolen base opportunity",
            Outcome::WildPitch => "wild pitch",
            Outcome::PassedBall => "passed ball",
            Outcome::Balk => "balk",
            Outcome::SpecialEvent => "catcher interference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_dense_and_unique() {
        for (i, outcome) in Outcome::ALL.iter().enumerate() {
            assert_eq!(outcome.code() as usize, i + 1, "{:?}", outcome);
            assert_eq!(Outcome::from_code(outcome.code()), Some(*outcome));
        }
        assert_eq!(Outcome::from_code(0), None);
        assert_eq!(Outcome::from_code(26), None);
    }

    #[test]
    fn test_hit_classification() {
        let hits = Outcome::ALL.iter().filter(|o| o.is_hit()).count();
        assert_eq!(hits, 6);
        assert!(!Outcome::ReachedOnError.is_hit());
        assert!(Outcome::StrikeoutLooking.is_strikeout());
        assert!(Outcome::Balk.is_pitch_event());
    }
}
