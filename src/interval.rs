use std::{
    cmp::Ordering,
    fmt::Display,
    ops::RangeInclusive,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::InvalidInterval;

/// A closed interval `[lower, upper]` over a totally-ordered scalar type.
///
/// An [`Interval`] always satisfies `lower <= upper`; constructing one with
/// inverted bounds fails with [`InvalidInterval`].
///
/// Intervals are ordered by their lower bound, tie-broken by the upper bound.
/// This ordering (and not set overlap) defines the position and uniqueness of
/// an interval within an [`IntervalTree`].
///
/// [`IntervalTree`]: crate::IntervalTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawInterval<T>",
        bound(deserialize = "T: Deserialize<'de> + Ord + std::fmt::Debug")
    )
)]
pub struct Interval<T> {
    lower: T,
    upper: T,
}

impl<T> Interval<T>
where
    T: Ord,
{
    /// Construct the interval `[lower, upper]`.
    ///
    /// ```
    /// use interval_avl::Interval;
    ///
    /// let i = Interval::new(1, 5).unwrap();
    /// assert_eq!(*i.lower(), 1);
    /// assert_eq!(*i.upper(), 5);
    ///
    /// assert!(Interval::new(5, 1).is_err());
    /// ```
    pub fn new(lower: T, upper: T) -> Result<Self, InvalidInterval<T>> {
        if upper < lower {
            return Err(InvalidInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Returns true if `self` and `other` share at least one point.
    ///
    /// Both bounds are inclusive, so intervals that touch at an endpoint
    /// overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Returns an interval with the lower bound of `self` and the larger of
    /// the two upper bounds.
    pub fn upper_maximum(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        Self {
            lower: self.lower.clone(),
            upper: (&self.upper).max(&other.upper).clone(),
        }
    }
}

impl<T> Interval<T> {
    /// The inclusive lower bound.
    pub fn lower(&self) -> &T {
        &self.lower
    }

    /// The inclusive upper bound.
    pub fn upper(&self) -> &T {
        &self.upper
    }

    /// Explode this [`Interval`] into its `(lower, upper)` bounds.
    pub fn into_bounds(self) -> (T, T) {
        (self.lower, self.upper)
    }
}

impl<T> PartialOrd for Interval<T>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Interval<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // The lower bound is the primary ordering value, falling back to the
        // upper bound when the lower bounds are equal.
        match self.lower.cmp(&other.lower) {
            Ordering::Equal => self.upper.cmp(&other.upper),
            v => v,
        }
    }
}

impl<T> Display for Interval<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

impl<T> TryFrom<(T, T)> for Interval<T>
where
    T: Ord,
{
    type Error = InvalidInterval<T>;

    fn try_from((lower, upper): (T, T)) -> Result<Self, Self::Error> {
        Self::new(lower, upper)
    }
}

impl<T> TryFrom<RangeInclusive<T>> for Interval<T>
where
    T: Ord,
{
    type Error = InvalidInterval<T>;

    fn try_from(value: RangeInclusive<T>) -> Result<Self, Self::Error> {
        let (lower, upper) = value.into_inner();
        Self::new(lower, upper)
    }
}

/// The unvalidated wire form of an [`Interval`], checked on deserialisation.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawInterval<T> {
    lower: T,
    upper: T,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawInterval<T>> for Interval<T>
where
    T: Ord,
{
    type Error = InvalidInterval<T>;

    fn try_from(value: RawInterval<T>) -> Result<Self, Self::Error> {
        Self::new(value.lower, value.upper)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{arbitrary_bounds, arbitrary_interval};

    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let err = Interval::new(10, 9).unwrap_err();
        assert_eq!(err, InvalidInterval { lower: 10, upper: 9 });
        assert_eq!(
            err.to_string(),
            "interval upper bound 9 must be >= lower bound 10"
        );

        // A single point is a valid closed interval.
        let point = Interval::new(3, 3).unwrap();
        assert_eq!(point.into_bounds(), (3, 3));
    }

    #[test]
    fn test_try_from() {
        assert_eq!(
            Interval::try_from((1, 4)).unwrap(),
            Interval::new(1, 4).unwrap()
        );
        assert_eq!(
            Interval::try_from(2..=7).unwrap(),
            Interval::new(2, 7).unwrap()
        );
        assert!(Interval::try_from(7..=2).is_err());
    }

    #[test]
    fn test_overlaps_touching_endpoints() {
        let a = Interval::new(0, 9).unwrap();
        let b = Interval::new(9, 12).unwrap();
        let c = Interval::new(10, 12).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_upper_maximum() {
        let a = Interval::new(0, 9).unwrap();
        let b = Interval::new(5, 20).unwrap();

        assert_eq!(a.upper_maximum(&b), Interval::new(0, 20).unwrap());
        assert_eq!(b.upper_maximum(&a), b);
        assert_eq!(a.upper_maximum(&a), a);
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(-3, 42).unwrap().to_string(), "[-3, 42]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates() {
        let i = Interval::new(1_u32, 5).unwrap();
        let json = serde_json::to_string(&i).unwrap();
        assert_eq!(json, r#"{"lower":1,"upper":5}"#);
        assert_eq!(serde_json::from_str::<Interval<u32>>(&json).unwrap(), i);

        assert!(serde_json::from_str::<Interval<u32>>(r#"{"lower":5,"upper":1}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_new_validates((lower, upper) in arbitrary_bounds()) {
            match Interval::new(lower, upper) {
                Ok(v) => {
                    assert!(lower <= upper);
                    assert_eq!(*v.lower(), lower);
                    assert_eq!(*v.upper(), upper);
                }
                Err(e) => {
                    assert!(upper < lower);
                    assert_eq!(e, InvalidInterval { lower, upper });
                }
            }
        }

        #[test]
        fn prop_ord(a in arbitrary_interval(), b in arbitrary_interval()) {
            let got = a.cmp(&b);

            if a.lower() == b.lower() {
                // If the lower bounds are equal, then the ordering is defined
                // by the upper bounds.
                assert_eq!(got, a.upper().cmp(b.upper()));
            } else {
                // Otherwise an Interval is ordered by the lower bounds.
                assert_eq!(got, a.lower().cmp(b.lower()));
            }

            assert_eq!(got == Ordering::Equal, a == b);
        }

        #[test]
        fn prop_overlaps_symmetric_pointwise(
            a in arbitrary_interval(),
            b in arbitrary_interval(),
        ) {
            // Two closed intervals overlap iff some integer point lies in
            // both.
            let want = (*a.lower()..=*a.upper()).any(|p| *b.lower() <= p && p <= *b.upper());

            assert_eq!(a.overlaps(&b), want);
            assert_eq!(b.overlaps(&a), want);
        }
    }
}
