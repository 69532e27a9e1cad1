//! Structural change notifications.
//!
//! An [`IntervalTree`] publishes one [`Change`] per structural modification to
//! an optional [`ChangeListener`]. Listeners are purely observational: any
//! error returned (or panic raised) by a listener is logged and discarded, and
//! never aborts the mutation that triggered it.
//!
//! [`IntervalTree`]: crate::IntervalTree

use std::{
    error::Error,
    fmt::{Debug, Display},
    panic::{catch_unwind, AssertUnwindSafe},
};

use log::{trace, warn};

use crate::interval::Interval;

/// The error type a [`ChangeListener`] may return.
pub type ListenerError = Box<dyn Error + Send + Sync>;

/// The shape of a node removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteKind {
    /// The removed node had no children.
    Leaf,
    /// The removed node had only a left child, which took its place.
    SingleChildLeft,
    /// The removed node had only a right child, which took its place.
    SingleChildRight,
    /// The removed node had two children and its interval was replaced by
    /// that of its in-order successor.
    ///
    /// The successor's own unlinking is part of this change and publishes no
    /// separate [`Change::Deleted`], so every removal yields exactly one
    /// deletion event.
    Successor,
}

/// The shape of a rebalancing rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// A single right rotation of a left-heavy node.
    Right,
    /// A single left rotation of a right-heavy node.
    Left,
    /// A left rotation of the left child followed by a right rotation.
    LeftRight,
    /// A right rotation of the right child followed by a left rotation.
    RightLeft,
}

/// A single structural change to an [`IntervalTree`].
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change<'a, T> {
    /// A new leaf node holding the interval was created.
    Created(&'a Interval<T>),
    /// The interval was removed from the tree.
    Deleted(DeleteKind, &'a Interval<T>),
    /// A rotation was rooted at the node holding the interval.
    Balanced(Rotation, &'a Interval<T>),
    /// All nodes were dropped.
    Cleared,
}

impl<T> Display for Change<'_, T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Change::Created(i) => write!(f, "created {i}"),
            Change::Deleted(kind, i) => write!(f, "deleted {i} ({kind:?})"),
            Change::Balanced(rotation, i) => write!(f, "balanced {i} ({rotation:?})"),
            Change::Cleared => write!(f, "cleared"),
        }
    }
}

/// An observer of [`Change`] events.
///
/// Any `FnMut(&Change<'_, T>)` closure is a [`ChangeListener`].
pub trait ChangeListener<T> {
    fn on_change(&mut self, change: &Change<'_, T>) -> Result<(), ListenerError>;
}

impl<T, F> ChangeListener<T> for F
where
    F: FnMut(&Change<'_, T>),
{
    fn on_change(&mut self, change: &Change<'_, T>) -> Result<(), ListenerError> {
        self(change);
        Ok(())
    }
}

/// Delivers [`Change`] events from the tree internals to the registered
/// listener, if any.
pub(crate) struct Publisher<'a, T> {
    listener: Option<&'a mut Box<dyn ChangeListener<T>>>,
}

impl<'a, T> Publisher<'a, T> {
    pub(crate) fn new(listener: Option<&'a mut Box<dyn ChangeListener<T>>>) -> Self {
        Self { listener }
    }

    pub(crate) fn publish(&mut self, change: Change<'_, T>)
    where
        T: Debug,
    {
        trace!("interval tree change: {change:?}");

        let Some(listener) = self.listener.as_mut() else {
            return;
        };

        match catch_unwind(AssertUnwindSafe(|| listener.on_change(&change))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!("change listener failed on {change:?}: {e}"),
            Err(_) => warn!("change listener panicked on {change:?}"),
        }
    }
}
