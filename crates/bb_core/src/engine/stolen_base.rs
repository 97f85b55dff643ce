//! Stolen-base attempts.

use super::config::StealConfig;
use super::rng::SeededRng;
use crate::models::{Archetype, Base, BaseRunner, Bases};

#[derive(Debug, Clone, PartialEq)]
pub struct StealResult {
    pub bases: Bases,
    pub runner: BaseRunner,
    pub from: Base,
    pub success: bool,
    pub outs_recorded: u8,
}

/// Base a runner would steal. Nobody steals home.
pub fn steal_target(from: Base) -> Option<Base> {
    match from {
        Base::First => Some(Base::Second),
        Base::Second => Some(Base::Third),
        Base::Third => None,
    }
}

pub fn is_steal_eligible(bases: &Bases, from: Base, outs: u8) -> bool {
    if outs >= 2 || !bases.is_occupied(from) {
        return false;
    }
    match steal_target(from) {
        Some(target) => !bases.is_occupied(target),
        None => false,
    }
}

/// Most advanced runner who could go, if any.
pub fn lead_steal_candidate(bases: &Bases, outs: u8) -> Option<Base> {
    [Base::Second, Base::First].into_iter().find(|&b| is_steal_eligible(bases, b, outs))
}

pub fn steal_probability(
    runner_speed: f64,
    archetype: Archetype,
    catcher_arm: f64,
    cfg: &StealConfig,
) -> f64 {
    let mut p = runner_speed * cfg.speed_weight - catcher_arm * cfg.catcher_arm_weight;
    if archetype.is_speed_specialist() {
        p += cfg.speed_specialist_bonus;
    }
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}

/// Attempt a steal. Ineligible attempts return `None` without drawing.
pub fn resolve_steal(
    bases: &Bases,
    from: Base,
    outs: u8,
    probability: f64,
    rng: &mut SeededRng,
) -> Option<StealResult> {
    if !is_steal_eligible(bases, from, outs) {
        return None;
    }
    let target = steal_target(from)?;
    let mut next = bases.clone();
    let runner = next.take(from)?;
    let success = rng.chance(probability);
    if success {
        next.set(target, runner.clone());
    }
    Some(StealResult {
        bases: next,
        runner,
        from,
        success,
        outs_recorded: if success { 0 } else { 1 },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(bases: &[Base]) -> Bases {
        let mut out = Bases::empty();
        for (i, b) in bases.iter().enumerate() {
            out.set(*b, BaseRunner::new(format!("r{i}"), "p"));
        }
        out
    }

    #[test]
    fn test_eligibility_rules() {
        assert!(is_steal_eligible(&on(&[Base::First]), Base::First, 0));
        assert!(is_steal_eligible(&on(&[Base::Second]), Base::Second, 1));
        assert!(!is_steal_eligible(&on(&[Base::First]), Base::First, 2));
        assert!(!is_steal_eligible(&on(&[Base::Third]), Base::Third, 0));
        assert!(!is_steal_eligible(&on(&[Base::First, Base::Second]), Base::First, 0));
        assert!(!is_steal_eligible(&Bases::empty(), Base::First, 0));
    }

    #[test]
    fn test_lead_candidate_prefers_second() {
        assert_eq!(lead_steal_candidate(&on(&[Base::First, Base::Second]), 0), Some(Base::Second));
        assert_eq!(lead_steal_candidate(&on(&[Base::First, Base::Third]), 0), Some(Base::First));
        assert_eq!(lead_steal_candidate(&on(&[Base::Third]), 0), None);
    }

    #[test]
    fn test_probability_formula() {
        let cfg = StealConfig::default();
        let speedy = Archetype::new(Archetype::SPEED, Archetype::NONE);
        let p = steal_probability(0.8, speedy, 0.5, &cfg);
        assert!((p - (0.6 + 0.15 - 0.1)).abs() < 1e-9);
        assert_eq!(steal_probability(0.0, Archetype::default(), 1.0, &cfg), 0.0);
        assert!((steal_probability(1.0, speedy, 0.0, &cfg) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_ineligible_attempt_takes_no_draw() {
        let mut rng = SeededRng::new(1);
        assert!(resolve_steal(&on(&[Base::Third]), Base::Third, 0, 1.0, &mut rng).is_none());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_caught_stealing_removes_runner() {
        let mut rng = SeededRng::new(1);
        let res = resolve_steal(&on(&[Base::First]), Base::First, 0, 0.0, &mut rng).unwrap();
        assert!(!res.success);
        assert_eq!(res.outs_recorded, 1);
        assert!(res.bases.is_empty());
    }

    #[test]
    fn test_success_rate_converges() {
        let cfg = StealConfig::default();
        let p = steal_probability(0.7, Archetype::default(), 0.5, &cfg);
        let bases = on(&[Base::First]);
        let mut rng = SeededRng::new(2024);
        let trials = 4000;
        let safe = (0..trials)
            .filter_map(|_| resolve_steal(&bases, Base::First, 0, p, &mut rng))
            .filter(|r| r.success)
            .count();
        let rate = safe as f64 / trials as f64;
        assert!((rate - p).abs() < 0.03, "rate {} expected {}", rate, p);
    }
}
