//! Player cards: five columns of 36 raw outcome values.
//!
//! Column C holds the player's unadjusted rates. Column A is what the player
//! looks like against elite pitching, column E against weak pitching.
//!
//! Cards are immutable; anything that adjusts a card returns a new one.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Outcome;
use crate::error::ConfigError;

pub const CARD_ROWS: usize = 36;
pub const CARD_COLUMNS: usize = 5;

/// Raw card values that are not canonical outcome codes.
pub mod values {
    /// Layout anchor resolved as a swinging strikeout.
    pub const ANCHOR_STRIKEOUT: u8 = 90;
    /// Layout anchor resolved as a ground out.
    pub const ANCHOR_GROUND_OUT: u8 = 91;
    /// Layout anchor resolved as a fly out.
    pub const ANCHOR_FLY_OUT: u8 = 92;

    pub const STRUCTURAL: [u8; 3] = [ANCHOR_STRIKEOUT, ANCHOR_GROUND_OUT, ANCHOR_FLY_OUT];

    /// Structural slots are card scaffolding and are never rewritten.
    pub fn is_structural(value: u8) -> bool {
        STRUCTURAL.contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    A,
    B,
    C,
    D,
    E,
}

impl Column {
    pub const ALL: [Column; CARD_COLUMNS] = [Column::A, Column::B, Column::C, Column::D, Column::E];

    pub fn index(self) -> usize {
        match self {
            Column::A => 0,
            Column::B => 1,
            Column::C => 2,
            Column::D => 3,
            Column::E => 4,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Column::A => 'A',
            Column::B => 'B',
            Column::C => 'C',
            Column::D => 'D',
            Column::E => 'E',
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub type CardColumn = [u8; CARD_ROWS];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardColumns", into = "CardColumns")]
pub struct Card {
    columns: [CardColumn; CARD_COLUMNS],
}

/// Wire form of a card: one list per column.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardColumns {
    a: Vec<u8>,
    b: Vec<u8>,
    c: Vec<u8>,
    d: Vec<u8>,
    e: Vec<u8>,
}

impl Card {
    pub fn new(columns: [CardColumn; CARD_COLUMNS]) -> Self {
        Self { columns }
    }

    /// Same column repeated five times; handy for cards with no pitcher gradient.
    pub fn uniform(column: CardColumn) -> Self {
        Self { columns: [column; CARD_COLUMNS] }
    }

    /// Build from variable-length columns, rejecting any column that is not 36 rows.
    pub fn from_columns(columns: [Vec<u8>; CARD_COLUMNS]) -> Result<Self, ConfigError> {
        let mut out = [[0u8; CARD_ROWS]; CARD_COLUMNS];
        for (column, values) in Column::ALL.iter().zip(columns.iter()) {
            if values.len() != CARD_ROWS {
                return Err(ConfigError::CardRows { column: column.letter(), found: values.len() });
            }
            out[column.index()].copy_from_slice(values);
        }
        Ok(Self { columns: out })
    }

    pub fn column(&self, column: Column) -> &CardColumn {
        &self.columns[column.index()]
    }

    pub fn value(&self, column: Column, row: usize) -> Option<u8> {
        self.columns[column.index()].get(row).copied()
    }

    /// Copy of this card with one slot replaced.
    pub fn with_value(&self, column: Column, row: usize, value: u8) -> Card {
        let mut next = self.clone();
        if let Some(slot) = next.columns[column.index()].get_mut(row) {
            *slot = value;
        }
        next
    }

    /// Number of slots in `column` whose raw value satisfies `pred`.
    pub fn count_where(&self, column: Column, pred: impl Fn(u8) -> bool) -> usize {
        self.column(column).iter().filter(|v| pred(**v)).count()
    }

    /// Number of canonical slots in `column` that resolve to `outcome`.
    pub fn count_outcome(&self, column: Column, outcome: Outcome) -> usize {
        self.count_where(column, |v| v == outcome.code())
    }

    /// Hit slots in `column`, counting canonical codes only.
    pub fn hit_slots(&self, column: Column) -> usize {
        self.count_where(column, |v| Outcome::from_code(v).map(Outcome::is_hit).unwrap_or(false))
    }
}

impl TryFrom<CardColumns> for Card {
    type Error = ConfigError;

    fn try_from(raw: CardColumns) -> Result<Self, Self::Error> {
        Card::from_columns([raw.a, raw.b, raw.c, raw.d, raw.e])
    }
}

impl From<Card> for CardColumns {
    fn from(card: Card) -> Self {
        let [a, b, c, d, e] = card.columns;
        CardColumns { a: a.to_vec(), b: b.to_vec(), c: c.to_vec(), d: d.to_vec(), e: e.to_vec() }
    }
}
