//! Baserunner advancement on hits and tag-ups.
//!
//! Runners on second and third always score on a single or double. The
//! runner on first is the only one who has a decision to make, and he makes
//! it with a speed check: one draw against his effective speed.

use super::config::BaserunningConfig;
use super::rng::SeededRng;
use crate::models::{Archetype, Base, BaseRunner, Bases};

/// Bases after a play plus the runners who crossed the plate.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceResult {
    pub bases: Bases,
    pub scored: Vec<BaseRunner>,
    /// Outcome of the runner-on-first speed check, when one was taken.
    pub speed_check: Option<bool>,
}

impl AdvanceResult {
    fn new(bases: Bases, scored: Vec<BaseRunner>) -> Self {
        Self { bases, scored, speed_check: None }
    }
}

/// Runner speed adjusted for the situation, clamped to [0, 1].
pub fn effective_speed(
    base_speed: f64,
    archetype: Archetype,
    outfielder_arm: f64,
    outs: u8,
    cfg: &BaserunningConfig,
) -> f64 {
    let mut speed = base_speed;
    if archetype.is_speed_specialist() {
        speed += cfg.speed_specialist_bonus;
    }
    if outfielder_arm > cfg.strong_arm_threshold {
        speed -= cfg.strong_arm_penalty;
    }
    if outs == 2 {
        speed += cfg.two_out_bonus;
    }
    if speed.is_nan() {
        return 0.0;
    }
    speed.clamp(0.0, 1.0)
}

/// One draw; the runner makes it when the draw lands under his speed.
pub fn speed_check(effective: f64, rng: &mut SeededRng) -> bool {
    rng.chance(effective)
}

/// Only a runner on third with fewer than two outs may tag on a fly ball.
pub fn can_tag_up(base: Base, outs: u8) -> bool {
    base == Base::Third && outs < 2
}

/// Runners on second and third score; the runner on first takes second, or
/// third on a successful speed check. The batter stops at first.
pub fn advance_on_single(
    bases: &Bases,
    batter: BaseRunner,
    first_runner_speed: Option<f64>,
    rng: &mut SeededRng,
) -> AdvanceResult {
    let mut next = bases.clone();
    let mut scored = Vec::new();
    scored.extend(next.take(Base::Third));
    scored.extend(next.take(Base::Second));

    let mut check = None;
    if let Some(runner) = next.take(Base::First) {
        let made_it = speed_check(first_runner_speed.unwrap_or(0.0), rng);
        check = Some(made_it);
        let target = if made_it { Base::Third } else { Base::Second };
        next.set(target, runner);
    }
    next.set(Base::First, batter);
    AdvanceResult { bases: next, scored, speed_check: check }
}

/// Runners on second and third score; the runner on first stops at third,
/// or scores on a successful speed check. The batter stops at second.
pub fn advance_on_double(
    bases: &Bases,
    batter: BaseRunner,
    first_runner_speed: Option<f64>,
    rng: &mut SeededRng,
) -> AdvanceResult {
    let mut next = bases.clone();
    let mut scored = Vec::new();
    scored.extend(next.take(Base::Third));
    scored.extend(next.take(Base::Second));

    let mut check = None;
    if let Some(runner) = next.take(Base::First) {
        let made_it = speed_check(first_runner_speed.unwrap_or(0.0), rng);
        check = Some(made_it);
        if made_it {
            scored.push(runner);
        } else {
            next.set(Base::Third, runner);
        }
    }
    next.set(Base::Second, batter);
    AdvanceResult { bases: next, scored, speed_check: check }
}

/// Everyone on base scores; the batter ends up on third.
pub fn advance_on_triple(bases: &Bases, batter: BaseRunner) -> AdvanceResult {
    let mut next = bases.clone();
    let scored = next.clear_scoring();
    next.set(Base::Third, batter);
    AdvanceResult::new(next, scored)
}

pub fn advance_on_home_run(bases: &Bases, batter: BaseRunner) -> AdvanceResult {
    let mut next = bases.clone();
    let mut scored = next.clear_scoring();
    scored.push(batter);
    AdvanceResult::new(next, scored)
}

/// Every runner takes two bases, no checks; the batter stops at first.
pub fn advance_two_bases(bases: &Bases, batter: BaseRunner) -> AdvanceResult {
    let mut next = bases.clone();
    let scored = next.advance_all(2);
    next.set(Base::First, batter);
    AdvanceResult::new(next, scored)
}

/// Batter to first; only forced runners move.
pub fn force_advance(bases: &Bases, batter: BaseRunner) -> AdvanceResult {
    let mut next = bases.clone();
    let scored = next.force_batter(batter);
    AdvanceResult::new(next, scored)
}

/// Every runner moves up one base. The batter is not placed.
pub fn advance_runners(bases: &Bases, count: usize) -> AdvanceResult {
    let mut next = bases.clone();
    let scored = next.advance_all(count);
    AdvanceResult::new(next, scored)
}

/// Tag-up from third after a catch. Runners who are not eligible hold
/// without a draw.
pub fn tag_up(bases: &Bases, outs: u8, runner_speed: f64, rng: &mut SeededRng) -> AdvanceResult {
    let mut next = bases.clone();
    if !can_tag_up(Base::Third, outs) || !next.is_occupied(Base::Third) {
        return AdvanceResult::new(next, Vec::new());
    }
    let made_it = speed_check(runner_speed, rng);
    let mut scored = Vec::new();
    if made_it {
        scored.extend(next.take(Base::Third));
    }
    AdvanceResult { bases: next, scored, speed_check: Some(made_it) }
}
