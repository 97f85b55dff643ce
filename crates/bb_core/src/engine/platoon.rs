//! Platoon adjustment.
//!
//! A batter with the platoon edge (switch hitter, or opposite hand to the
//! pitcher) gets a copy of his card nudged toward contact: in every column
//! one plain out becomes a clean single and one strikeout becomes weak
//! contact. The highest eligible row is rewritten; anchors never are.

use crate::models::{values, BattingHand, Card, Column, Outcome, ThrowingHand, CARD_ROWS};

/// Out values a platoon edge may convert into a hit.
pub const PLATOON_OUT_VALUES: [Outcome; 4] =
    [Outcome::GroundOut, Outcome::FlyOut, Outcome::PopOut, Outcome::LineOut];

pub const PLATOON_STRIKEOUT_VALUES: [Outcome; 2] =
    [Outcome::StrikeoutLooking, Outcome::StrikeoutSwinging];

pub const PLATOON_HIT_VALUE: Outcome = Outcome::SingleClean;
pub const PLATOON_CONTACT_VALUE: Outcome = Outcome::GroundOutAdvance;

pub fn has_platoon_advantage(bats: BattingHand, throws: ThrowingHand) -> bool {
    match bats {
        BattingHand::Switch => true,
        BattingHand::Left => throws == ThrowingHand::Right,
        BattingHand::Right => throws == ThrowingHand::Left,
    }
}

fn is_in(value: u8, set: &[Outcome]) -> bool {
    !values::is_structural(value) && set.iter().any(|o| o.code() == value)
}

fn last_row_matching(card: &Card, column: Column, set: &[Outcome]) -> Option<usize> {
    (0..CARD_ROWS).rev().find(|&row| card.value(column, row).map(|v| is_in(v, set)).unwrap_or(false))
}

/// Card as seen in this matchup. With an edge, each column gives up exactly
/// one out slot and one strikeout slot, so a full card shifts five of each.
/// Without an edge the card comes back as an independent copy.
pub fn apply_platoon(card: &Card, bats: BattingHand, throws: ThrowingHand) -> Card {
    if !has_platoon_advantage(bats, throws) {
        return card.clone();
    }

    let mut adjusted = card.clone();
    for column in Column::ALL {
        if let Some(row) = last_row_matching(&adjusted, column, &PLATOON_OUT_VALUES) {
            adjusted = adjusted.with_value(column, row, PLATOON_HIT_VALUE.code());
        }
        if let Some(row) = last_row_matching(&adjusted, column, &PLATOON_STRIKEOUT_VALUES) {
            adjusted = adjusted.with_value(column, row, PLATOON_CONTACT_VALUE.code());
        }
    }
    adjusted
}
