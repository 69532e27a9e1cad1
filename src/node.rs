use std::{cmp::Ordering, fmt::Debug, mem};

use crate::{
    event::{Change, DeleteKind, Publisher, Rotation},
    interval::Interval,
};

/// The outcome of inserting an interval into a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertResult {
    /// A new leaf node was created.
    Inserted,

    /// An equal interval already exists; the subtree was not modified.
    Duplicate,
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    /// Child nodes pointers.
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, and an absent child counts as 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    height: u8,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`Node`].
    subtree_max: T,

    interval: Interval<T>,
}

impl<T> Node<T> {
    pub(crate) fn new(interval: Interval<T>) -> Self
    where
        T: Clone,
    {
        Self {
            subtree_max: interval.upper().clone(),
            interval,
            left: None,
            right: None,
            height: 1,
        }
    }

    /// Returns true if an interval equal to `target` exists in the subtree
    /// rooted at `self`.
    pub(crate) fn find(&self, target: &Interval<T>) -> bool
    where
        T: Ord,
    {
        let node = match self.interval.cmp(target) {
            Ordering::Greater => self.left(),
            Ordering::Equal => return true,
            Ordering::Less => self.right(),
        };

        let Some(node) = node else {
            return false;
        };

        // Prune this subtree from the search if the maximum upper bound in the
        // subtree is less than the search upper bound. If true, this subtree
        // cannot contain the search interval.
        if node.subtree_max() < target.upper() {
            return false;
        }

        node.find(target)
    }

    pub(crate) fn interval(&self) -> &Interval<T> {
        &self.interval
    }

    pub(crate) fn subtree_max(&self) -> &T {
        &self.subtree_max
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Remove the left child, if any.
    pub(crate) fn take_left(&mut self) -> Option<Box<Self>> {
        self.left.take()
    }

    /// Remove the right child, if any.
    pub(crate) fn take_right(&mut self) -> Option<Box<Self>> {
        self.right.take()
    }

    /// Consume this [`Node`], returning the [`Interval`] it holds.
    pub(crate) fn into_interval(self) -> Interval<T> {
        self.interval
    }
}

/// Insert `interval` into the subtree rooted at `slot`, creating a new leaf
/// node where the interval belongs.
///
/// Every node on the path back up to `slot` has its augmentation and height
/// refreshed and is rebalanced. If an equal interval already exists,
/// [`InsertResult::Duplicate`] is returned and no node is modified.
pub(crate) fn insert<T>(
    slot: &mut Option<Box<Node<T>>>,
    interval: Interval<T>,
    events: &mut Publisher<'_, T>,
) -> InsertResult
where
    T: Ord + Clone + Debug,
{
    let node = match slot {
        Some(v) => v,
        None => {
            let leaf = slot.insert(Box::new(Node::new(interval)));
            events.publish(Change::Created(&leaf.interval));
            return InsertResult::Inserted;
        }
    };

    let child = match interval.cmp(&node.interval) {
        Ordering::Less => &mut node.left,
        Ordering::Equal => return InsertResult::Duplicate,
        Ordering::Greater => &mut node.right,
    };

    if insert(child, interval, events) == InsertResult::Duplicate {
        // The tree structure has not been modified, so it does not require
        // rebalancing.
        return InsertResult::Duplicate;
    }

    rebalance(node, events);

    InsertResult::Inserted
}

/// Remove the interval equal to `target` from the subtree rooted at `slot`,
/// returning it if it was found.
///
/// Every node on the path back up to `slot` has its augmentation and height
/// refreshed and is rebalanced. Returns [`None`] without modifying the tree if
/// no equal interval exists.
pub(crate) fn remove<T>(
    slot: &mut Option<Box<Node<T>>>,
    target: &Interval<T>,
    events: &mut Publisher<'_, T>,
) -> Option<Interval<T>>
where
    T: Ord + Clone + Debug,
{
    let node = slot.as_mut()?;

    // Prune this subtree from the search if the maximum upper bound in the
    // subtree is less than the search upper bound.
    if node.subtree_max() < target.upper() {
        return None;
    }

    let removed = match target.cmp(&node.interval) {
        Ordering::Less => remove(&mut node.left, target, events)?,
        Ordering::Greater => remove(&mut node.right, target, events)?,
        Ordering::Equal => return unlink(slot, events),
    };

    rebalance(node, events);

    Some(removed)
}

/// Unlink the node in `slot`, which holds the interval being removed.
fn unlink<T>(slot: &mut Option<Box<Node<T>>>, events: &mut Publisher<'_, T>) -> Option<Interval<T>>
where
    T: Ord + Clone + Debug,
{
    let mut node = slot.take()?;

    // This node may have 0, 1 or 2 child node(s):
    //
    //                          +----------+
    //                          |  parent  |
    //                          +----------+
    //                                |
    //                                v
    //                          +----------+
    //                     +----|   node   |----+
    //                     |    +----------+    |
    //                     |                    |
    //                     v                    v
    //               +-----------+       +------------+
    //               | node.left |       | node.right |
    //               +-----------+       +------------+
    //
    // With no children, the parent slot becomes empty. With a single child,
    // that child is spliced into the parent slot in place of "node". Both
    // children are already balanced subtrees, so nothing needs rotating here;
    // the ancestors rebalance as the recursion unwinds.
    let (kind, replacement) = match (node.left.take(), node.right.take()) {
        (None, None) => (DeleteKind::Leaf, None),
        (Some(left), None) => (DeleteKind::SingleChildLeft, Some(left)),
        (None, Some(right)) => (DeleteKind::SingleChildRight, Some(right)),
        (Some(left), Some(right)) => {
            // With two children, "node" stays where it is and takes the
            // interval of its in-order successor: the left-most node of the
            // right subtree. That successor has no left child, so detaching
            // it is a leaf removal or a single right-child splice.
            let mut right = Some(right);
            let Some(successor) = take_min(&mut right, events) else {
                unreachable!("a non-empty subtree has a minimum");
            };

            node.left = Some(left);
            node.right = right;

            let removed = mem::replace(&mut node.interval, successor);
            events.publish(Change::Deleted(DeleteKind::Successor, &removed));

            // The right subtree may have shrunk.
            rebalance(&mut node, events);
            *slot = Some(node);

            return Some(removed);
        }
    };

    *slot = replacement;
    events.publish(Change::Deleted(kind, &node.interval));

    // Invariant: the node being unlinked contains no subtree.
    debug_assert!(node.left.is_none());
    debug_assert!(node.right.is_none());

    Some(node.into_interval())
}

/// Detach the left-most node of the subtree rooted at `slot`, returning its
/// interval and linking its right subtree (if any) in its place.
///
/// Each node on the left edge is rebalanced as the recursion unwinds.
fn take_min<T>(slot: &mut Option<Box<Node<T>>>, events: &mut Publisher<'_, T>) -> Option<Interval<T>>
where
    T: Ord + Clone + Debug,
{
    let node = slot.as_mut()?;

    if node.left.is_some() {
        // Descend left to the end of the left edge.
        let min = take_min(&mut node.left, events);
        rebalance(node, events);
        return min;
    }

    // This node is the end of the left edge.
    //
    // ```text
    //                 6
    //                / \
    //    here ->   <4>   7
    //                \
    //                 5
    // ```
    //
    // Unlink it, promoting its right child (if any).
    let mut node = slot.take()?;
    *slot = node.take_right();

    debug_assert!(node.left.is_none());
    Some(node.into_interval())
}

/// Refresh the augmentation and height of `n` from its (already up to date)
/// children, then restore the AVL balance of the subtree rooted at `n` if the
/// absolute difference in height between its branches is > 1.
fn rebalance<T>(n: &mut Box<Node<T>>, events: &mut Publisher<'_, T>)
where
    T: Ord + Clone + Debug,
{
    update(n);

    match balance(n) {
        // Left-heavy
        (2..) if n.left().map(balance).unwrap_or_default() >= 0 => {
            events.publish(Change::Balanced(Rotation::Right, &n.interval));
            rotate_right(n);
        }
        (2..) => {
            events.publish(Change::Balanced(Rotation::LeftRight, &n.interval));
            if let Some(left) = n.left.as_mut() {
                rotate_left(left);
            }

            // Postcondition: rotating the right-leaning left child leaves the
            // node left-heavy, ready for the final right rotation.
            assert!(
                balance(n) >= 2,
                "node must be left-heavy after rotating its left child (balance={})",
                balance(n)
            );

            rotate_right(n);
        }
        // Right-heavy
        (..=-2) if n.right().map(balance).unwrap_or_default() <= 0 => {
            events.publish(Change::Balanced(Rotation::Left, &n.interval));
            rotate_left(n);
        }
        (..=-2) => {
            events.publish(Change::Balanced(Rotation::RightLeft, &n.interval));
            if let Some(right) = n.right.as_mut() {
                rotate_right(right);
            }

            // Postcondition: rotating the left-leaning right child leaves the
            // node right-heavy, ready for the final left rotation.
            assert!(
                balance(n) <= -2,
                "node must be right-heavy after rotating its right child (balance={})",
                balance(n)
            );

            rotate_left(n);
        }

        #[allow(clippy::manual_range_patterns)]
        -1 | 0 | 1 => { /* balanced */ }
    }

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(n).abs() <= 1);
}

pub(crate) fn height<T>(n: Option<&Node<T>>) -> u8 {
    n.map(|v| v.height()).unwrap_or_default()
}

/// Recompute the subtree max, then the height of `n` from its children.
fn update<T>(n: &mut Node<T>)
where
    T: Ord + Clone,
{
    update_subtree_max(n);
    update_height(n);
}

fn update_height<T>(n: &mut Node<T>) {
    n.height = height(n.left()).max(height(n.right())) + 1;
}

fn update_subtree_max<T>(n: &mut Node<T>)
where
    T: Ord + Clone,
{
    let new_max = n
        .left()
        .map(|v| v.subtree_max())
        .max(n.right().map(|v| v.subtree_max()))
        .max(Some(n.interval().upper()));

    if let Some(new_max) = new_max {
        n.subtree_max = new_max.clone();
    }
}

/// Compute the "balance factor" of the subtree rooted at `n`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
pub(crate) fn balance<T>(n: &Node<T>) -> i8 {
    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(n.left()) as i16 - height(n.right()) as i16) as i8
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right pointer (cannot be rotated).
fn rotate_left<T>(x: &mut Box<Node<T>>)
where
    T: Ord + Clone,
{
    let Some(mut p) = x.right.take() else {
        unreachable!("left rotation of a node without a right child");
    };
    mem::swap(x, &mut p);

    p.right = x.left.take();
    update(&mut p);

    x.left = Some(p);
    update(x);
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left pointer (cannot be rotated).
fn rotate_right<T>(y: &mut Box<Node<T>>)
where
    T: Ord + Clone,
{
    let Some(mut p) = y.left.take() else {
        unreachable!("right rotation of a node without a left child");
    };
    mem::swap(y, &mut p);

    p.left = y.right.take();
    update(&mut p);

    y.right = Some(p);
    update(y);
}
