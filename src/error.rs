use thiserror::Error;

/// The error returned when constructing an [`Interval`] with an upper bound
/// below its lower bound.
///
/// The rejected bounds are returned to the caller.
///
/// [`Interval`]: crate::Interval
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("interval upper bound {upper:?} must be >= lower bound {lower:?}")]
pub struct InvalidInterval<T> {
    pub lower: T,
    pub upper: T,
}

/// A structural defect found by [`IntervalTree::check_invariants()`].
///
/// Observing one of these indicates a bug in the rebalancing or augmentation
/// logic, not a condition a caller is expected to handle.
///
/// [`IntervalTree::check_invariants()`]: crate::IntervalTree::check_invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("left descendant {child} of node {node} does not order strictly before it")]
    LeftOrder { node: String, child: String },

    #[error("right descendant {child} of node {node} does not order strictly after it")]
    RightOrder { node: String, child: String },

    #[error("node {node} has cached height {cached}, expected {want}")]
    Height { node: String, cached: u8, want: u8 },

    #[error("node {node} has cached subtree maximum {cached}, expected {want}")]
    SubtreeMax {
        node: String,
        cached: String,
        want: String,
    },

    #[error("node {node} has balance factor {balance}")]
    Unbalanced { node: String, balance: i8 },
}
