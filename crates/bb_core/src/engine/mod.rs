pub mod baserunning;
pub mod bunt;
pub mod card_fallback; // legacy card codes and the default outcome
pub mod config; // tuning knobs, JSON loadable
pub mod defense;
pub mod game;
pub mod manager;
pub mod pitching;
pub mod plate_appearance;
pub mod platoon;
pub mod play; // outcome -> field result
pub mod result_builder; // play log -> box score, decisions, digest
pub mod rng;
pub mod state;
pub mod stolen_base;

pub use card_fallback::resolve_card_value;
pub use config::{
    BaserunningConfig, BuntConfig, DefenseConfig, EngineConfig, GameRulesConfig, ManagerConfig,
    PitchingConfig, StealConfig,
};
pub use game::{simulate_game, simulate_game_with_manager, GameConfig, GameEngine};
pub use manager::{
    DecisionContext, Manager, ManagerCall, ManagerKind, PassiveManager, StandardManager,
};
pub use plate_appearance::{column_for_grade, resolve_plate_appearance, PaResolution};
pub use result_builder::{build_game_result, log_digest};
pub use rng::SeededRng;
pub use state::{GameState, LineupEntry, TeamState};
