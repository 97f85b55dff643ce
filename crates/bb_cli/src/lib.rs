//! bb_cli library
//!
//! File-level commands behind the `bb_cli` binary. Each returns the text to
//! write so the binary only decides where it goes.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use bb_core::api::{GameRequest, SlateRequest};
use bb_core::{fixtures, simulate_game_json, simulate_slate_json, ManagerKind};
use serde_json::Value;
use tracing::info;

pub fn read_game_request(path: &Path) -> Result<GameRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read game request: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse game request: {}", path.display()))
}

fn render(json: &str, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(json.to_string());
    }
    let value: Value = serde_json::from_str(json).context("engine returned invalid JSON")?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Simulates the game in `input`, optionally replacing its seed.
pub fn simulate(input: &Path, seed: Option<u64>, pretty: bool) -> Result<String> {
    let mut request = read_game_request(input)?;
    if let Some(seed) = seed {
        request.seed = seed;
    }
    info!(seed = request.seed, manager = ?request.manager, "simulating game");
    let json = simulate_game_json(&serde_json::to_string(&request)?).map_err(|e| anyhow!(e))?;
    render(&json, pretty)
}

pub fn slate(input: &Path, pretty: bool) -> Result<String> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read slate: {}", input.display()))?;
    let request: SlateRequest = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse slate: {}", input.display()))?;
    info!(games = request.games.len(), "simulating slate");
    let json = simulate_slate_json(&content).map_err(|e| anyhow!(e))?;
    render(&json, pretty)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub runs: usize,
    pub seed: u64,
    pub digest: String,
}

fn run_digest(request_json: &str) -> Result<String> {
    let response = simulate_game_json(request_json).map_err(|e| anyhow!(e))?;
    let value: Value = serde_json::from_str(&response)?;
    value["determinism"]["log_digest"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("response has no determinism.log_digest"))
}

/// Plays the same request `runs` times and fails unless every play log hashes the same.
pub fn verify(input: &Path, runs: usize) -> Result<VerifyReport> {
    if runs == 0 {
        bail!("--runs must be at least 1");
    }
    let request = read_game_request(input)?;
    let json = serde_json::to_string(&request)?;

    let digest = run_digest(&json)?;
    for run in 2..=runs {
        let current = run_digest(&json)?;
        if current != digest {
            bail!("run {run} produced digest {current}, run 1 produced {digest}");
        }
    }
    Ok(VerifyReport { runs, seed: request.seed, digest })
}

/// Sample request built from the bundled rosters.
pub fn sample(seed: u64) -> Result<String> {
    let request = GameRequest::from_config(fixtures::sample_game(seed), ManagerKind::Standard);
    Ok(serde_json::to_string_pretty(&request)?)
}

/// Writes to `out`, or stdout when no path is given.
pub fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(path) => fs::write(path, contents)
            .with_context(|| format!("Failed to write output: {}", path.display())),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}
