//! Bunt resolution.
//!
//! A bunt takes exactly one draw, partitioned into bands:
//!
//! | draw                  | result                                   |
//! |-----------------------|------------------------------------------|
//! | `[0, 0.65)`           | sacrifice                                |
//! | `[0.65, 0.80)`        | foul (strikeout with two strikes)        |
//! | `[0.80, 0.90)`        | bunt for a hit if the batter is fast     |
//! | `[0.90, 1.0)`         | popped up                                |

use serde::{Deserialize, Serialize};

use super::config::BuntConfig;
use super::rng::SeededRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuntResult {
    /// Batter out, runners move up.
    Sacrifice,
    /// Strike added; the batter stays at the plate.
    Foul,
    /// Foul with two strikes.
    FoulStrikeout,
    BuntHit,
    /// Bunt-for-hit attempt thrown out.
    BuntGroundOut,
    PopOut,
}

impl BuntResult {
    pub fn concludes_plate_appearance(self) -> bool {
        !matches!(self, BuntResult::Foul)
    }
}

/// Map a draw onto the bunt bands. Pure; the draw is supplied by the caller.
pub fn classify_bunt_draw(draw: f64, batter_speed: f64, strikes: u8, cfg: &BuntConfig) -> BuntResult {
    let sacrifice_end = cfg.sacrifice;
    let foul_end = sacrifice_end + cfg.foul;
    let hit_end = foul_end + cfg.bunt_hit_zone;

    if draw < sacrifice_end {
        BuntResult::Sacrifice
    } else if draw < foul_end {
        if strikes < 2 {
            BuntResult::Foul
        } else {
            BuntResult::FoulStrikeout
        }
    } else if draw < hit_end {
        if batter_speed > cfg.bunt_hit_speed_threshold {
            BuntResult::BuntHit
        } else {
            BuntResult::BuntGroundOut
        }
    } else {
        BuntResult::PopOut
    }
}

pub fn resolve_bunt(batter_speed: f64, strikes: u8, cfg: &BuntConfig, rng: &mut SeededRng) -> BuntResult {
    classify_bunt_draw(rng.next_f64(), batter_speed, strikes, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        let cfg = BuntConfig::default();
        assert_eq!(classify_bunt_draw(0.0, 0.5, 0, &cfg), BuntResult::Sacrifice);
        assert_eq!(classify_bunt_draw(0.649, 0.5, 0, &cfg), BuntResult::Sacrifice);
        assert_eq!(classify_bunt_draw(0.65, 0.5, 0, &cfg), BuntResult::Foul);
        assert_eq!(classify_bunt_draw(0.79, 0.5, 2, &cfg), BuntResult::FoulStrikeout);
        assert_eq!(classify_bunt_draw(0.85, 0.61, 0, &cfg), BuntResult::BuntHit);
        assert_eq!(classify_bunt_draw(0.85, 0.6, 0, &cfg), BuntResult::BuntGroundOut);
        assert_eq!(classify_bunt_draw(0.90, 0.9, 0, &cfg), BuntResult::PopOut);
        assert_eq!(classify_bunt_draw(0.999, 0.9, 0, &cfg), BuntResult::PopOut);
    }

    #[test]
    fn test_uses_exactly_one_draw() {
        let cfg = BuntConfig::default();
        let mut rng = SeededRng::new(8);
        for i in 0..50 {
            resolve_bunt(0.7, (i % 3) as u8, &cfg, &mut rng);
        }
        assert_eq!(rng.draws(), 50);
    }

    #[test]
    fn test_only_foul_keeps_batter_up() {
        assert!(!BuntResult::Foul.concludes_plate_appearance());
        assert!(BuntResult::FoulStrikeout.concludes_plate_appearance());
        assert!(BuntResult::Sacrifice.concludes_plate_appearance());
    }

    #[test]
    fn test_distribution_converges() {
        let cfg = BuntConfig::default();
        let mut rng = SeededRng::new(31337);
        let n = 6000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            match resolve_bunt(0.9, 0, &cfg, &mut rng) {
                BuntResult::Sacrifice => counts[0] += 1,
                BuntResult::Foul | BuntResult::FoulStrikeout => counts[1] += 1,
                BuntResult::BuntHit | BuntResult::BuntGroundOut => counts[2] += 1,
                BuntResult::PopOut => counts[3] += 1,
            }
        }
        let expected = [cfg.sacrifice, cfg.foul, cfg.bunt_hit_zone, cfg.pop_out()];
        for (count, p) in counts.iter().zip(expected) {
            let rate = *count as f64 / n as f64;
            assert!((rate - p).abs() < 0.025, "rate {} expected {}", rate, p);
        }
    }
}
