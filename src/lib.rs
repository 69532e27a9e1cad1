//! An augmented AVL tree of closed intervals.
//!
//! An [`IntervalTree`] stores unique [`Interval`] instances over any
//! totally-ordered scalar type, ordered by their lower bound and tie-broken by
//! their upper bound. Every node caches the height of its subtree (to keep the
//! tree balanced) and the maximum upper bound found in its subtree, which
//! allows [`IntervalTree::overlapping()`] to skip whole subtrees that cannot
//! contain an overlapping interval.
//!
//! Point operations ([`IntervalTree::insert()`], [`IntervalTree::remove()`],
//! [`IntervalTree::find()`]) are O(log n), and an overlap query is
//! O(log n + k) for k results.
//!
//! ```
//! use interval_avl::{Interval, IntervalTree};
//!
//! let mut t = IntervalTree::new();
//! t.insert(Interval::new(0, 9).unwrap());
//! t.insert(Interval::new(10, 19).unwrap());
//! t.insert(Interval::new(20, 29).unwrap());
//! t.insert(Interval::new(5, 14).unwrap());
//!
//! let query = Interval::new(10, 19).unwrap();
//! let got = t.overlapping(&query).collect::<Vec<_>>();
//!
//! assert_eq!(got, [&Interval::new(5, 14).unwrap(), &Interval::new(10, 19).unwrap()]);
//! ```
//!
//! Structural changes can be observed by registering a [`ChangeListener`]
//! with [`IntervalTree::set_change_listener()`], and the internal invariants
//! can be checked after every mutation with
//! [`IntervalTree::with_validation()`].
//!
//! The tree performs no internal synchronisation; mutation requires exclusive
//! (`&mut`) access.

#![deny(rust_2018_idioms, missing_debug_implementations, unsafe_code)]

mod dot;
mod error;
mod event;
mod interval;
mod iter;
mod node;
mod tree;
mod validate;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use event::{Change, ChangeListener, DeleteKind, ListenerError, Rotation};
pub use interval::*;
pub use iter::*;
pub use tree::*;
