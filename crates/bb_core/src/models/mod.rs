pub mod bases;
pub mod card;
pub mod game_result;
pub mod inning;
pub mod outcome;
pub mod player;
pub mod team;

pub use bases::{Base, BaseRunner, Bases, BasesSnapshot};
pub use card::{values, Card, CardColumn, Column, CARD_COLUMNS, CARD_ROWS};
pub use game_result::{
    BattingLine, BoxScore, CardRead, DeterminismMeta, FieldingError, GameResult, LineScore,
    LookupSource, PitcherDecisions, PitchingLine, PlayEntry, PlayKind, PlayResult, ScoredRun,
    TeamLines, TeamTotals,
};
pub use inning::{Half, Score, Side};
pub use outcome::Outcome;
pub use player::{
    Archetype, BattingHand, Player, PlayerId, PitchingProfile, Position, ThrowingHand,
};
pub use team::{LineupSlot, TeamRoster, LINEUP_SIZE};
