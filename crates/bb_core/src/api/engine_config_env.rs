use crate::engine::EngineConfig;
use std::{env, fs};

pub(crate) const ENGINE_CONFIG_PATH_ENV: &str = "BB_ENGINE_CONFIG_PATH";

/// Engine override named by `BB_ENGINE_CONFIG_PATH`. Unset or blank means no override.
pub(crate) fn engine_config_from_env() -> Result<Option<EngineConfig>, String> {
    let Ok(path) = env::var(ENGINE_CONFIG_PATH_ENV) else {
        return Ok(None);
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    load_engine_config(path).map(Some)
}

pub(crate) fn load_engine_config(path: &str) -> Result<EngineConfig, String> {
    let content = fs::read_to_string(path).map_err(|e| {
        format!("Failed to read engine config file from {ENGINE_CONFIG_PATH_ENV}='{path}': {e}")
    })?;

    // from_json also runs validate()
    EngineConfig::from_json(&content)
        .map_err(|e| format!("Invalid engine config from {ENGINE_CONFIG_PATH_ENV}='{path}': {e}"))
}
