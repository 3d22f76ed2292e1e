//! Status-flag snapshot for the agent.
//!
//! The perception layer parses game messages into these flags each turn;
//! the decision core only ever reads them. A bitflags snapshot (rather
//! than timed effects) is enough here because durations are the engine's
//! business — the borg only cares whether a condition holds right now.

use bitflags::bitflags;

bitflags! {
    /// Conditions currently afflicting the agent.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct AgentStatus: u16 {
        /// Too frightened to attack in melee.
        const AFRAID = 1 << 0;
        /// Stunned; actions may fail.
        const STUNNED = 1 << 1;
        /// Heavily stunned; one more hit risks a knockout.
        const HEAVY_STUNNED = 1 << 2;
        /// Taking poison damage over time.
        const POISONED = 1 << 3;
        /// Weak from starvation.
        const WEAK = 1 << 4;
        /// Confused; movement is unreliable.
        const CONFUSED = 1 << 5;
        /// Hallucinating; monster identities are unreliable.
        const HALLUCINATING = 1 << 6;
        /// Bleeding from a cut.
        const CUT = 1 << 7;
    }
}

impl AgentStatus {
    /// True if any ailment a town temple or shop could cure is active.
    ///
    /// Used by the escape pre-check: in town with one of these, curing
    /// beats escaping.
    pub const fn needs_town_cure(&self) -> bool {
        self.intersects(
            AgentStatus::WEAK
                .union(AgentStatus::POISONED)
                .union(AgentStatus::CUT),
        )
    }
}
