//! Raw card value -> outcome.
//!
//! Lookup runs as an ordered chain: the primary table (canonical codes and
//! layout anchors), then the legacy table for cards produced by the old card
//! format, then a hard ground-out default. Every `u8` resolves.

use tracing::{debug, warn};

use crate::models::{values, LookupSource, Outcome};

/// Values written by the legacy card format.
pub const LEGACY_TABLE: [(u8, Outcome); 22] = [
    (26, Outcome::SingleClean),
    (27, Outcome::SingleClean),
    (28, Outcome::SingleAdvance),
    (29, Outcome::Double),
    (30, Outcome::Triple),
    (31, Outcome::HomeRun),
    (32, Outcome::Walk),
    (33, Outcome::HitByPitch),
    (34, Outcome::StrikeoutSwinging),
    (35, Outcome::StrikeoutLooking),
    (36, Outcome::GroundOut),
    (37, Outcome::FlyOut),
    (38, Outcome::PopOut),
    (39, Outcome::LineOut),
    (40, Outcome::DoublePlay),
    (41, Outcome::StolenBaseOpp),
    (42, Outcome::StolenBaseOpp),
    (43, Outcome::WildPitch),
    (44, Outcome::PassedBall),
    (45, Outcome::Balk),
    (46, Outcome::ReachedOnError),
    (47, Outcome::Sacrifice),
];

pub const DEFAULT_OUTCOME: Outcome = Outcome::GroundOut;

type LookupStage = fn(u8) -> Option<Outcome>;

/// Stages tried in order before falling back to [`DEFAULT_OUTCOME`].
const LOOKUP_CHAIN: [(LookupSource, LookupStage); 2] =
    [(LookupSource::Primary, primary_lookup), (LookupSource::Fallback, fallback_lookup)];

pub fn primary_lookup(raw: u8) -> Option<Outcome> {
    match raw {
        values::ANCHOR_STRIKEOUT => Some(Outcome::StrikeoutSwinging),
        values::ANCHOR_GROUND_OUT => Some(Outcome::GroundOut),
        values::ANCHOR_FLY_OUT => Some(Outcome::FlyOut),
        _ => Outcome::from_code(raw),
    }
}

pub fn fallback_lookup(raw: u8) -> Option<Outcome> {
    LEGACY_TABLE.iter().find(|(value, _)| *value == raw).map(|(_, outcome)| *outcome)
}

pub fn resolve_card_value(raw: u8) -> (Outcome, LookupSource) {
    for (source, stage) in LOOKUP_CHAIN {
        if let Some(outcome) = stage(raw) {
            if source == LookupSource::Fallback {
                debug!(raw, ?outcome, "legacy card value resolved through fallback table");
            }
            return (outcome, source);
        }
    }
    warn!(raw, "unrecognized card value; defaulting to ground out");
    (DEFAULT_OUTCOME, LookupSource::Default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_codes_resolve_primary() {
        for outcome in Outcome::ALL {
            assert_eq!(resolve_card_value(outcome.code()), (outcome, LookupSource::Primary));
        }
    }

    #[test]
    fn test_anchors_resolve_primary() {
        assert_eq!(
            resolve_card_value(values::ANCHOR_STRIKEOUT),
            (Outcome::StrikeoutSwinging, LookupSource::Primary)
        );
        assert_eq!(
            resolve_card_value(values::ANCHOR_FLY_OUT),
            (Outcome::FlyOut, LookupSource::Primary)
        );
    }

    #[test]
    fn test_legacy_table_is_disjoint_from_primary() {
        for (value, _) in LEGACY_TABLE {
            assert!(primary_lookup(value).is_none(), "legacy value {} shadowed", value);
        }
    }

    #[test]
    fn test_legacy_values_resolve_through_fallback() {
        assert_eq!(resolve_card_value(27), (Outcome::SingleClean, LookupSource::Fallback));
        assert_eq!(resolve_card_value(41), (Outcome::StolenBaseOpp, LookupSource::Fallback));
    }

    #[test]
    fn test_every_byte_resolves() {
        let mut defaults = 0;
        for raw in 0..=u8::MAX {
            let (_, source) = resolve_card_value(raw);
            if source == LookupSource::Default {
                defaults += 1;
                assert_eq!(resolve_card_value(raw).0, Outcome::GroundOut);
            }
        }
        // 256 values - 25 canonical - 3 anchors - 22 legacy
        assert_eq!(defaults, 206);
    }
}
