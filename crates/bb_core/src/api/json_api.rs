use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine_config_env::engine_config_from_env;
use super::error_codes::{self, err_code};
use super::slate::run_batch;
use crate::engine::{simulate_game_with_manager, EngineConfig, GameConfig, ManagerKind};
use crate::error::SimError;
use crate::models::{GameResult, TeamRoster};

pub const GAME_SCHEMA_VERSION: u8 = 1;

// ============================================================================
// GameRequest (schema_version = 1)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub away: TeamRoster,
    pub home: TeamRoster,
    /// Tuning for this game; defaults when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineConfig>,
    #[serde(default)]
    pub manager: ManagerKind,
}

impl GameRequest {
    pub fn from_config(config: GameConfig, manager: ManagerKind) -> Self {
        let GameConfig { seed, away, home, engine } = config;
        Self { schema_version: GAME_SCHEMA_VERSION, seed, away, home, engine: Some(engine), manager }
    }

    pub fn to_game_config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            away: self.away.clone(),
            home: self.home.clone(),
            engine: self.engine.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub manager: &'static str,
    #[serde(flatten)]
    pub result: GameResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlateRequest {
    pub schema_version: u8,
    pub games: Vec<GameRequest>,
}

/// One slot per requested game, in request order.
#[derive(Debug, Serialize)]
pub struct SlateEntry {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SlateResponse {
    pub schema_version: u8,
    pub games: Vec<SlateEntry>,
}

fn sim_error(err: SimError) -> String {
    match err {
        SimError::Config(e) => err_code(error_codes::E_CONFIG, e),
        SimError::Serialization(e) => err_code(error_codes::E_SERIALIZE, e),
    }
}

fn check_schema(version: u8) -> Result<(), String> {
    if version != GAME_SCHEMA_VERSION {
        return Err(err_code(
            error_codes::E_SCHEMA_VERSION,
            format!("unsupported schema version: {version}"),
        ));
    }
    Ok(())
}

/// Engine override from `BB_ENGINE_CONFIG_PATH`; it replaces any per-request tuning.
fn env_override() -> Result<Option<EngineConfig>, String> {
    engine_config_from_env().map_err(|e| err_code(error_codes::E_CONFIG, e))
}

/// Plays one request. `override_engine` wins over the request's own tuning.
pub fn run_game_request(
    request: &GameRequest,
    override_engine: Option<&EngineConfig>,
) -> Result<GameResponse, String> {
    check_schema(request.schema_version)?;
    let mut config = request.to_game_config();
    if let Some(engine) = override_engine {
        config.engine = engine.clone();
    }
    let manager = request.manager.manager();
    let result = simulate_game_with_manager(config, manager).map_err(sim_error)?;
    Ok(GameResponse { schema_version: GAME_SCHEMA_VERSION, manager: manager.name(), result })
}

/// JSON API: simulates one game from a [`GameRequest`] payload.
///
/// Errors come back as `"<CODE>: <message>"`.
pub fn simulate_game_json(request_json: &str) -> Result<String, String> {
    let request: GameRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::E_JSON_PARSE, e))?;
    let engine = env_override()?;
    if engine.is_some() {
        debug!("engine tuning replaced from environment");
    }

    let response = run_game_request(&request, engine.as_ref())?;
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::E_SERIALIZE, e))
}

/// JSON API: simulates every game of a [`SlateRequest`]. A bad game gets an
/// error slot; the rest of the slate still plays.
pub fn simulate_slate_json(request_json: &str) -> Result<String, String> {
    let request: SlateRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::E_JSON_PARSE, e))?;
    check_schema(request.schema_version)?;
    let engine = env_override()?;

    let games = run_batch(&request.games, |game| run_game_request(game, engine.as_ref()))
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            Ok(game) => SlateEntry { index, game: Some(game), error: None },
            Err(error) => SlateEntry { index, game: None, error: Some(error) },
        })
        .collect();

    let response = SlateResponse { schema_version: GAME_SCHEMA_VERSION, games };
    serde_json::to_string(&response).map_err(|e| err_code(error_codes::E_SERIALIZE, e))
}
