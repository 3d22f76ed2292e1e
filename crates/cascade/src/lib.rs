//! First-success attempt cascades for turn-based decision logic.
//!
//! This library provides the minimal machinery for expressing "try these
//! things in priority order, commit to the first one that works" as data
//! instead of nested boolean control flow.
//!
//! - **No delta time**: every attempt resolves immediately (turn-based
//!   semantics)
//! - **No Running state**: an attempt is either taken or declined
//! - **Labelled entries**: the winning entry's label is reported so the
//!   caller can log which action actually fired
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Attempt`]: core trait for a single prioritized option
//! - [`Outcome`]: Taken or Declined
//! - [`Cascade`]: ordered list evaluated left to right, short-circuiting
//!   on the first `Taken`
//! - [`Guard`]: decorator that declines unless a predicate holds

pub mod attempt;
pub mod guard;
pub mod outcome;

pub use attempt::{Attempt, Try};
pub use guard::Guard;
pub use outcome::Outcome;

/// Ordered list of attempts evaluated with first-success-wins semantics.
///
/// # Semantics
///
/// `run` evaluates entries from first to last:
/// - If an entry returns [`Outcome::Taken`], the cascade **stops
///   immediately** and reports that entry's label
/// - If an entry returns [`Outcome::Declined`], the cascade **continues**
///   to the next entry
/// - If every entry declines, the cascade reports `None`
///
/// This is a short-circuited logical OR over committed actions: an entry
/// that returns `Taken` has already performed its side effect, so nothing
/// after it may run in the same evaluation.
/// The lifetime `'c` bounds the boxed entries, so cascades can be built
/// over contexts that themselves borrow (a context holding `&'a mut` state
/// yields a `Cascade<'a, Context<'a>>`).
pub struct Cascade<'c, C: 'c> {
    entries: Vec<Box<dyn Attempt<C> + 'c>>,
}

impl<'c, C: 'c> Cascade<'c, C> {
    /// Creates an empty cascade.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a boxed attempt (builder pattern).
    pub fn then(mut self, attempt: Box<dyn Attempt<C> + 'c>) -> Self {
        self.entries.push(attempt);
        self
    }

    /// Appends a labelled closure attempt (builder pattern).
    ///
    /// The closure returns `true` when it committed an action.
    pub fn push(self, label: &'static str, f: impl Fn(&mut C) -> bool + 'c) -> Self {
        self.then(Box::new(Try::new(label, f)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Evaluates entries in order until one is taken.
    ///
    /// Returns the label of the winning entry, or `None` if every entry
    /// declined.
    pub fn run(&self, ctx: &mut C) -> Option<&'static str> {
        for entry in &self.entries {
            match entry.attempt(ctx) {
                Outcome::Taken => return Some(entry.label()),
                Outcome::Declined => continue,
            }
        }
        None
    }
}

impl<'c, C: 'c> Default for Cascade<'c, C> {
    fn default() -> Self {
        Self::new()
    }
}
