//! The core attempt trait and its closure adapter.

use crate::Outcome;

/// A single prioritized option in a cascade.
///
/// Implementations must be all-or-nothing: when `attempt` returns
/// [`Outcome::Taken`] the action has been committed (resources spent,
/// state mutated); when it returns [`Outcome::Declined`] the context must
/// be left untouched apart from read-only queries.
pub trait Attempt<C> {
    /// Tries this option once against the context.
    fn attempt(&self, ctx: &mut C) -> Outcome;

    /// Short human-readable name, used for advisory logging of the entry
    /// that won a cascade.
    fn label(&self) -> &'static str;
}

/// Labelled closure adapter.
///
/// Wraps a `Fn(&mut C) -> bool` where `true` means "I acted". This is the
/// usual way cascade entries are built: each closure delegates to exactly
/// one capability call.
pub struct Try<C, F>
where
    F: Fn(&mut C) -> bool,
{
    label: &'static str,
    f: F,
    _marker: std::marker::PhantomData<fn(&mut C)>,
}

impl<C, F> Try<C, F>
where
    F: Fn(&mut C) -> bool,
{
    pub fn new(label: &'static str, f: F) -> Self {
        Self {
            label,
            f,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<C, F> Attempt<C> for Try<C, F>
where
    F: Fn(&mut C) -> bool,
{
    fn attempt(&self, ctx: &mut C) -> Outcome {
        Outcome::from_acted((self.f)(ctx))
    }

    fn label(&self) -> &'static str {
        self.label
    }
}
