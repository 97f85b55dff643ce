//! Seeded, per-game random source.
//!
//! Nothing in the engine may touch a thread-local or OS RNG. Every game owns
//! one [`SeededRng`] built from its seed and threads it through each resolver
//! call, so the same seed reproduces the same draws on every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    draws: u64,
    inner: ChaCha8Rng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0, inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Uniform float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.draws += 1;
        self.inner.gen::<f64>()
    }

    /// Bernoulli trial: one draw, true when it lands under `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Index in `0..n`. A single option is returned without drawing.
    pub fn pick(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        self.draws += 1;
        self.inner.gen_range(0..n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRng::new(42);
        let mut b = SeededRng::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
        assert_eq!(a.draws(), 1000);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SeededRng::new(1);
        let mut b = SeededRng::new(2);
        let same = (0..100).filter(|_| a.next_f64() == b.next_f64()).count();
        assert!(same < 5);
    }

    #[test]
    fn test_pick_single_option_does_not_draw() {
        let mut rng = SeededRng::new(7);
        assert_eq!(rng.pick(1), 0);
        assert_eq!(rng.pick(0), 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_pick_and_chance_count_one_draw_each() {
        let mut rng = SeededRng::new(7);
        assert!(rng.pick(9) < 9);
        rng.chance(0.5);
        assert_eq!(rng.draws(), 2);

        let mut a = SeededRng::new(7);
        let mut b = SeededRng::new(7);
        let picks_a: Vec<usize> = (0..50).map(|_| a.pick(6)).collect();
        let picks_b: Vec<usize> = (0..50).map(|_| b.pick(6)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_mean_is_centered() {
        let mut rng = SeededRng::new(99);
        let n = 20_000;
        let mean: f64 = (0..n).map(|_| rng.next_f64()).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean {}", mean);
    }

    proptest! {
        #[test]
        fn prop_draws_stay_in_unit_interval(seed in any::<u64>()) {
            let mut rng = SeededRng::new(seed);
            for _ in 0..256 {
                let x = rng.next_f64();
                prop_assert!((0.0..1.0).contains(&x));
            }
        }

        #[test]
        fn prop_pick_in_range(seed in any::<u64>(), n in 1usize..40) {
            let mut rng = SeededRng::new(seed);
            for _ in 0..64 {
                prop_assert!(rng.pick(n) < n);
            }
        }
    }
}
