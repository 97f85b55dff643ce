//! # bb_core - Deterministic Card-Model Baseball Simulation Engine
//!
//! Plays a full baseball game between two rosters using tabletop-style
//! player cards: five columns of 36 outcomes, one die roll per plate
//! appearance, the pitcher's grade picking the column.
//!
//! ## Features
//! - 100% deterministic simulation (same seed + rosters + manager = same log)
//! - Complete play log with a SHA-256 digest for replay checks
//! - Box score, batting and pitching lines, pitcher decisions
//! - JSON API and a parallel slate runner

pub mod api;
pub mod engine;
pub mod error;
pub mod fixtures;
pub mod models;

// Re-export main API functions
pub use api::{
    simulate_game_json, simulate_slate, simulate_slate_json, GameRequest, GameResponse,
    SlateRequest,
};
pub use engine::{
    simulate_game, simulate_game_with_manager, EngineConfig, GameConfig, GameEngine, Manager,
    ManagerKind, PassiveManager, StandardManager,
};
pub use error::{ConfigError, Result, SimError};
pub use models::{GameResult, TeamRoster};
