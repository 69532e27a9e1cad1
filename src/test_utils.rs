use std::{cell::RefCell, fmt::Display, rc::Rc};

use proptest::prelude::*;

use crate::{
    event::{Change, ChangeListener, ListenerError},
    interval::Interval,
};

const BOUND_MAX: u32 = 20;

/// Install a test logger so `log` output is captured per test.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Shorthand for a valid [`Interval`].
pub(crate) fn interval(lower: u32, upper: u32) -> Interval<u32> {
    Interval::new(lower, upper).unwrap()
}

/// Generate arbitrary (potentially inverted!) bound pairs from
/// [0..[`BOUND_MAX`]).
pub(crate) fn arbitrary_bounds() -> impl Strategy<Value = (u32, u32)> {
    (0..BOUND_MAX, 0..BOUND_MAX)
}

/// Generate arbitrary valid intervals with bounds from [0..[`BOUND_MAX`]).
///
/// A small value domain encourages multiple operations to act on the same
/// interval.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<u32>> {
    arbitrary_bounds().prop_map(|(a, b)| interval(a.min(b), a.max(b)))
}

/// A [`ChangeListener`] that renders every event it observes, shared between
/// clones.
#[derive(Debug, Default, Clone)]
pub(crate) struct Recorder(Rc<RefCell<Vec<String>>>);

impl Recorder {
    /// Drain the recorded events.
    pub(crate) fn events(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl<T> ChangeListener<T> for Recorder
where
    T: Display,
{
    fn on_change(&mut self, change: &Change<'_, T>) -> Result<(), ListenerError> {
        self.0.borrow_mut().push(change.to_string());
        Ok(())
    }
}

/// A [`ChangeListener`] that fails on every event.
#[derive(Debug)]
pub(crate) struct Failing;

impl<T> ChangeListener<T> for Failing {
    fn on_change(&mut self, _change: &Change<'_, T>) -> Result<(), ListenerError> {
        Err("listener failure".into())
    }
}
