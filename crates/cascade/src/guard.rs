//! Guard decorator.

use crate::{Attempt, Outcome};

/// Declines unless a predicate holds, then defers to the inner attempt.
///
/// # Semantics
///
/// - If the predicate returns `false`, the guard returns
///   [`Outcome::Declined`] without evaluating the inner attempt
/// - If the predicate returns `true`, the guard returns whatever the
///   inner attempt returns
///
/// Guards keep availability checks (is the spell known? is the evaluator
/// happy?) out of the attempts themselves, so the same attempt can appear
/// in several tiers under different conditions.
pub struct Guard<'c, C: 'c> {
    predicate: Box<dyn Fn(&C) -> bool + 'c>,
    inner: Box<dyn Attempt<C> + 'c>,
}

impl<'c, C: 'c> Guard<'c, C> {
    pub fn new(predicate: impl Fn(&C) -> bool + 'c, inner: Box<dyn Attempt<C> + 'c>) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner,
        }
    }
}

impl<'c, C: 'c> Attempt<C> for Guard<'c, C> {
    fn attempt(&self, ctx: &mut C) -> Outcome {
        if !(self.predicate)(ctx) {
            return Outcome::Declined;
        }
        self.inner.attempt(ctx)
    }

    fn label(&self) -> &'static str {
        self.inner.label()
    }
}
