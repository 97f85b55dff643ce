pub mod json_api;
pub mod slate;

mod engine_config_env;

/// Stable prefixes for JSON API error strings (`"<CODE>: <message>"`).
pub mod error_codes {
    pub const E_JSON_PARSE: &str = "E_JSON_PARSE";
    pub const E_SCHEMA_VERSION: &str = "E_SCHEMA_VERSION";
    pub const E_CONFIG: &str = "E_CONFIG";
    pub const E_SERIALIZE: &str = "E_SERIALIZE";

    pub(crate) fn err_code(code: &str, message: impl std::fmt::Display) -> String {
        format!("{code}: {message}")
    }
}

pub use json_api::{
    run_game_request, simulate_game_json, simulate_slate_json, GameRequest, GameResponse,
    SlateEntry, SlateRequest, SlateResponse, GAME_SCHEMA_VERSION,
};
pub use slate::{simulate_slate, simulate_slate_with_manager, PARALLEL_SLATE_THRESHOLD};
