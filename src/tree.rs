use std::fmt::Debug;

use log::{debug, error};

use crate::{
    error::InvariantViolation,
    event::{Change, ChangeListener, Publisher},
    interval::Interval,
    iter::{IntoIter, Iter, Overlapping},
    node::{self, InsertResult, Node},
    validate::check_subtree,
};

/// An augmented AVL tree of unique, closed [`Interval`] instances.
///
/// Intervals are kept in ascending [`Interval`] order, and every node caches
/// the maximum upper bound of its subtree so that [`IntervalTree::overlapping()`]
/// can skip subtrees that cannot contain an overlapping interval.
///
/// The number of stored intervals is not cached; [`IntervalTree::len()`]
/// walks the tree.
///
/// ```
/// use interval_avl::{Interval, IntervalTree};
///
/// let mut t = IntervalTree::new();
///
/// assert!(t.insert(Interval::new(0, 9).unwrap()));
/// assert!(t.insert(Interval::new(10, 19).unwrap()));
/// assert!(t.insert(Interval::new(5, 14).unwrap()));
///
/// // Duplicates are rejected.
/// assert!(!t.insert(Interval::new(0, 9).unwrap()));
///
/// let query = Interval::new(12, 30).unwrap();
/// let got = t.overlapping(&query).collect::<Vec<_>>();
/// assert_eq!(got, [&Interval::new(5, 14).unwrap(), &Interval::new(10, 19).unwrap()]);
/// ```
pub struct IntervalTree<T> {
    root: Option<Box<Node<T>>>,
    validation: bool,
    listener: Option<Box<dyn ChangeListener<T>>>,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self {
            root: None,
            validation: false,
            listener: None,
        }
    }
}

impl<T> Debug for IntervalTree<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalTree")
            .field("root", &self.root)
            .field("validation", &self.validation)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl<T> IntervalTree<T> {
    /// Construct an empty tree with invariant validation disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty tree, walking the whole tree to validate its
    /// structural invariants after every mutation if `enabled` is true.
    ///
    /// Validation is a debugging aid and makes every mutation O(n).
    pub fn with_validation(enabled: bool) -> Self {
        Self {
            validation: enabled,
            ..Self::default()
        }
    }

    /// Enable or disable invariant validation after every mutation.
    pub fn set_validation(&mut self, enabled: bool) {
        self.validation = enabled;
    }

    /// Returns true if invariant validation is enabled.
    pub fn validation(&self) -> bool {
        self.validation
    }

    /// Register `listener` to observe every structural [`Change`] to this
    /// tree, replacing any previously registered listener.
    ///
    /// Errors returned (or panics raised) by the listener are logged and
    /// otherwise ignored.
    pub fn set_change_listener(&mut self, listener: impl ChangeListener<T> + 'static) {
        if self.listener.replace(Box::new(listener)).is_some() {
            debug!("replaced interval tree change listener");
        }
    }

    /// Unregister and return the current change listener, if any.
    pub fn take_change_listener(&mut self) -> Option<Box<dyn ChangeListener<T>>> {
        self.listener.take()
    }

    /// Returns the number of intervals in the tree.
    ///
    /// This walks every node of the tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if the tree holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Iterate over the intervals in the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref())
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Remove all intervals from the tree.
    pub fn clear(&mut self)
    where
        T: Debug,
    {
        debug!("clearing interval tree");
        self.root = None;
        Publisher::new(self.listener.as_mut()).publish(Change::Cleared);
    }
}

impl<T> IntervalTree<T>
where
    T: Ord,
{
    /// Returns true if an interval equal to `interval` is in the tree.
    pub fn find(&self, interval: &Interval<T>) -> bool {
        self.root
            .as_deref()
            .map(|v| v.find(interval))
            .unwrap_or_default()
    }

    /// An alias of [`IntervalTree::find()`].
    pub fn contains(&self, interval: &Interval<T>) -> bool {
        self.find(interval)
    }

    /// Returns true if every interval yielded by `intervals` is in the tree.
    pub fn contains_all<'a>(&self, intervals: impl IntoIterator<Item = &'a Interval<T>>) -> bool
    where
        T: 'a,
    {
        intervals.into_iter().all(|v| self.find(v))
    }

    /// Iterate over the intervals in the tree that overlap `query`, in
    /// ascending order.
    ///
    /// Both bounds are inclusive, so intervals touching `query` at an endpoint
    /// are yielded.
    pub fn overlapping<'a, 'q>(&'a self, query: &'q Interval<T>) -> Overlapping<'a, 'q, T> {
        Overlapping::new(self.root.as_deref(), query)
    }

    /// Walk the whole tree, checking every node is ordered, balanced and
    /// carries a correct cached height and subtree maximum.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation>
    where
        T: Debug,
    {
        check_subtree(self.root.as_deref())
    }

    /// Returns a clone of every interval in the tree, in ascending order.
    pub fn to_vec(&self) -> Vec<Interval<T>>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Export the intervals in the tree, in ascending order, into `buf` if it
    /// is large enough.
    ///
    /// If `buf` holds at least [`IntervalTree::len()`] slots, the intervals
    /// are written to the front of `buf`, the slot immediately after the last
    /// interval (if any) is set to [`None`], and [`None`] is returned.
    /// Otherwise `buf` is left untouched and a newly allocated [`Vec`] of
    /// exactly [`IntervalTree::len()`] intervals is returned.
    pub fn to_array_in(&self, buf: &mut [Option<Interval<T>>]) -> Option<Vec<Interval<T>>>
    where
        T: Clone,
    {
        let len = self.len();
        if buf.len() < len {
            return Some(self.to_vec());
        }

        for (slot, v) in buf.iter_mut().zip(self.iter()) {
            *slot = Some(v.clone());
        }
        if let Some(terminator) = buf.get_mut(len) {
            *terminator = None;
        }

        None
    }
}

impl<T> IntervalTree<T>
where
    T: Ord + Clone + Debug,
{
    /// Insert `interval` into the tree.
    ///
    /// Returns true if the interval was not already present in the tree, and
    /// false (leaving the tree unchanged) if an equal interval exists.
    pub fn insert(&mut self, interval: Interval<T>) -> bool {
        let mut events = Publisher::new(self.listener.as_mut());
        let inserted = node::insert(&mut self.root, interval, &mut events) == InsertResult::Inserted;

        if inserted {
            self.validate("insert");
        }
        inserted
    }

    /// Remove the interval equal to `interval` from the tree.
    ///
    /// Returns true if the interval was present in the tree.
    pub fn remove(&mut self, interval: &Interval<T>) -> bool {
        let mut events = Publisher::new(self.listener.as_mut());
        let removed = node::remove(&mut self.root, interval, &mut events).is_some();

        if removed {
            self.validate("remove");
        }
        removed
    }

    /// Insert every interval yielded by `intervals`, returning true if any
    /// was not already present.
    pub fn insert_all(&mut self, intervals: impl IntoIterator<Item = Interval<T>>) -> bool {
        intervals
            .into_iter()
            .fold(false, |changed, v| self.insert(v) | changed)
    }

    /// Remove every interval yielded by `intervals`, returning true if any
    /// was present.
    pub fn remove_all<'a>(&mut self, intervals: impl IntoIterator<Item = &'a Interval<T>>) -> bool
    where
        T: 'a,
    {
        intervals
            .into_iter()
            .fold(false, |changed, v| self.remove(v) | changed)
    }

    /// Retain only the intervals for which `f` returns true, returning true if
    /// any interval was removed.
    pub fn retain<F>(&mut self, mut f: F) -> bool
    where
        F: FnMut(&Interval<T>) -> bool,
    {
        let evict = self
            .iter()
            .filter(|v| !f(*v))
            .cloned()
            .collect::<Vec<_>>();

        self.remove_all(&evict)
    }

    fn validate(&self, op: &str) {
        if !self.validation {
            return;
        }

        if let Err(e) = self.check_invariants() {
            error!("interval tree invariant violated after {op}: {e}");
            panic!("interval tree invariant violated after {op}: {e}");
        }
    }
}

impl<T> Extend<Interval<T>> for IntervalTree<T>
where
    T: Ord + Clone + Debug,
{
    fn extend<I: IntoIterator<Item = Interval<T>>>(&mut self, iter: I) {
        self.insert_all(iter);
    }
}

impl<T> FromIterator<Interval<T>> for IntervalTree<T>
where
    T: Ord + Clone + Debug,
{
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut t = Self::new();
        t.extend(iter);
        t
    }
}

impl<T> IntoIterator for IntervalTree<T> {
    type Item = Interval<T>;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.root)
    }
}

impl<'a, T> IntoIterator for &'a IntervalTree<T> {
    type Item = &'a Interval<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
