//! The borg escape decision core.
//!
//! Given a danger estimate for the agent's current position and the set of
//! escape resources it carries, this crate decides whether to escape, how,
//! and in what priority order: a tiered cascade of escalating danger
//! brackets, each trying an ordered list of escape actions with
//! fall-through on failure.
//!
//! # Architecture
//!
//! - [`capability`]: the "try to use resource X" surface the host engine
//!   implements; the only permitted mutator of consumables
//! - [`context`]: the explicit mutable decision context (agent state,
//!   oracles, capabilities, injected RNG, per-turn globals)
//! - [`tactics`]: leaf sub-deciders — encirclement risk, Monte Carlo
//!   landing-safety evaluators for random jumps, the controlled-teleport
//!   target picker
//! - [`escape`]: the tiered orchestrator and its named policy table
//!
//! Everything runs to completion synchronously within one game-turn
//! decision step; all "nothing to do" outcomes are `false` returns, never
//! errors.

pub mod capability;
pub mod context;
pub mod escape;
pub mod tactics;

#[cfg(test)]
pub(crate) mod testutil;

pub use capability::{
    ActivationKind, Capabilities, Key, PotionKind, RodKind, ScrollKind, SpellKind, StaffKind,
};
pub use context::{BorgContext, TurnGlobals};
pub use escape::{EscapeDecider, Tier, policy::TierPolicy};
