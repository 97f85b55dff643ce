//! Slate runner: many independent games at once.
//!
//! Games share nothing, so a slate parallelizes with rayon. Results come back
//! in input order and each one equals what a sequential run would produce.

use rayon::prelude::*;
use tracing::info;

use crate::engine::{simulate_game_with_manager, GameConfig, Manager, StandardManager};
use crate::error::Result;
use crate::models::GameResult;

/// Below this many games the rayon fan-out costs more than it saves.
pub const PARALLEL_SLATE_THRESHOLD: usize = 4;

/// Maps `run` over `items`, in parallel for batches above the threshold.
pub(crate) fn run_batch<T, R, F>(items: &[T], run: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    if items.len() > PARALLEL_SLATE_THRESHOLD {
        items.par_iter().map(run).collect()
    } else {
        items.iter().map(run).collect()
    }
}

pub fn simulate_slate(configs: &[GameConfig]) -> Vec<Result<GameResult>> {
    simulate_slate_with_manager(configs, &StandardManager)
}

pub fn simulate_slate_with_manager(
    configs: &[GameConfig],
    manager: &dyn Manager,
) -> Vec<Result<GameResult>> {
    info!(games = configs.len(), manager = manager.name(), "slate start");
    run_batch(configs, |config| simulate_game_with_manager(config.clone(), manager))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{simulate_game, PassiveManager};
    use crate::fixtures;

    #[test]
    fn test_parallel_slate_matches_sequential_games() {
        let configs: Vec<GameConfig> = (0..8).map(fixtures::sample_game).collect();
        assert!(configs.len() > PARALLEL_SLATE_THRESHOLD);

        let slate = simulate_slate(&configs);
        assert_eq!(slate.len(), configs.len());
        for (config, result) in configs.iter().zip(slate) {
            let expected = simulate_game(config.clone()).unwrap();
            let result = result.unwrap();
            assert_eq!(result.determinism, expected.determinism);
            assert_eq!(result.final_score, expected.final_score);
        }
    }

    #[test]
    fn test_small_slate_runs_in_order() {
        let configs: Vec<GameConfig> = (10..12).map(fixtures::sample_game).collect();
        let seeds: Vec<u64> = simulate_slate_with_manager(&configs, &PassiveManager)
            .into_iter()
            .map(|r| r.unwrap().determinism.seed)
            .collect();
        assert_eq!(seeds, vec![10, 11]);
    }

    #[test]
    fn test_bad_config_does_not_sink_the_slate() {
        let mut configs: Vec<GameConfig> = (0..6).map(fixtures::sample_game).collect();
        configs[3].home.starting_pitcher = None;
        let results = simulate_slate(&configs);
        assert!(results[3].as_ref().is_err_and(|e| e.is_config()));
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 5);
    }
}
