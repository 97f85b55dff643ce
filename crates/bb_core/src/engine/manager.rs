//! In-game strategy calls.
//!
//! The engine asks the manager once before every plate-appearance
//! iteration. Managers are plain deterministic functions of the situation;
//! a manager that needs randomness would break replay.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::ManagerConfig;
use super::stolen_base::is_steal_eligible;
use crate::models::{Base, Bases, Column, Half, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerCall {
    /// Let the batter hit.
    None,
    Bunt,
    /// Send the runner on this base.
    Steal(Base),
}

/// Everything a manager may look at.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub inning: u32,
    pub half: Half,
    pub outs: u8,
    pub strikes: u8,
    pub bases: &'a Bases,
    /// Batting team's lead (negative when trailing).
    pub batting_lead: i64,
    pub batter: &'a Player,
    pub runner_on_first: Option<&'a Player>,
    pub config: &'a ManagerConfig,
}

pub trait Manager: Send + Sync {
    fn name(&self) -> &'static str;
    fn decide(&self, ctx: &DecisionContext<'_>) -> ManagerCall;
}

/// Bunts with weak hitters in close late games, runs with fast runners.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardManager;

impl StandardManager {
    fn wants_bunt(ctx: &DecisionContext<'_>) -> bool {
        let cfg = ctx.config;
        let runner_to_move =
            ctx.bases.is_occupied(Base::First) || ctx.bases.is_occupied(Base::Second);
        let weak_hitter = ctx.batter.archetype.is_pitcher()
            || ctx.batter.card.hit_slots(Column::C) <= cfg.bunt_max_hit_slots;
        ctx.outs == 0
            && runner_to_move
            && !ctx.bases.is_occupied(Base::Third)
            && ctx.inning >= cfg.bunt_min_inning
            && ctx.batting_lead.unsigned_abs() <= cfg.bunt_max_run_margin as u64
            && weak_hitter
    }

    fn wants_steal(ctx: &DecisionContext<'_>) -> bool {
        let Some(runner) = ctx.runner_on_first else {
            return false;
        };
        runner.archetype.is_speed_specialist()
            && runner.speed >= ctx.config.steal_min_speed
            && is_steal_eligible(ctx.bases, Base::First, ctx.outs)
    }
}

impl Manager for StandardManager {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn decide(&self, ctx: &DecisionContext<'_>) -> ManagerCall {
        let call = if Self::wants_bunt(ctx) {
            ManagerCall::Bunt
        } else if Self::wants_steal(ctx) {
            ManagerCall::Steal(Base::First)
        } else {
            ManagerCall::None
        };
        if call != ManagerCall::None {
            debug!(inning = ctx.inning, ?call, batter = %ctx.batter.id, "manager call");
        }
        call
    }
}

/// Never calls a play.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveManager;

impl Manager for PassiveManager {
    fn name(&self) -> &'static str {
        "passive"
    }

    fn decide(&self, _ctx: &DecisionContext<'_>) -> ManagerCall {
        ManagerCall::None
    }
}

static STANDARD: StandardManager = StandardManager;
static PASSIVE: PassiveManager = PassiveManager;

/// Manager selection as it appears in requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerKind {
    #[default]
    Standard,
    Passive,
}

impl ManagerKind {
    pub fn manager(self) -> &'static dyn Manager {
        match self {
            ManagerKind::Standard => &STANDARD,
            ManagerKind::Passive => &PASSIVE,
        }
    }
}
