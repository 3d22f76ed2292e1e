//! Attempt outcomes.

/// Result of evaluating one attempt.
///
/// There is deliberately no "running" state: in a turn-based cascade an
/// attempt either commits an action this turn or passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The attempt committed an action; its side effects have happened.
    Taken,
    /// The attempt passed (unavailable, failed a check, declined).
    Declined,
}

impl Outcome {
    /// Converts a "did I act" boolean into an outcome.
    pub const fn from_acted(acted: bool) -> Self {
        if acted { Outcome::Taken } else { Outcome::Declined }
    }

    pub const fn is_taken(self) -> bool {
        matches!(self, Outcome::Taken)
    }
}
