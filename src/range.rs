//! Ranges
//!
//! Value types that decide set membership for a scalar. They are used to
//! binarize continuous features: a [`MedianSplit`] holds the two
//! complementary [`SemiRange`]s a table splits a continuous column into.
use crate::errors::SaplingError;
use std::fmt::{self, Display};

/// Anything that can tell whether a value falls inside it.
pub trait Range<V> {
    /// Check whether `value` is a member of the range.
    fn contains(&self, value: &V) -> bool;
}

/// A one-sided interval, bounded either from below or from above.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemiRange<V> {
    bound: V,
    is_lower_bound: bool,
    is_inclusive: bool,
}

impl<V> SemiRange<V> {
    /// Create a new semi-range.
    ///
    /// * `bound` - The single finite end of the range.
    /// * `is_lower_bound` - `true` for `[bound, +inf)`/`(bound, +inf)`,
    ///   `false` for `(-inf, bound]`/`(-inf, bound)`.
    /// * `is_inclusive` - Whether `bound` itself is in the range.
    pub fn new(bound: V, is_lower_bound: bool, is_inclusive: bool) -> Self {
        SemiRange {
            bound,
            is_lower_bound,
            is_inclusive,
        }
    }

    /// `(-inf, bound]`
    pub fn at_most(bound: V) -> Self {
        SemiRange::new(bound, false, true)
    }

    /// `(-inf, bound)`
    pub fn less_than(bound: V) -> Self {
        SemiRange::new(bound, false, false)
    }

    /// `[bound, +inf)`
    pub fn at_least(bound: V) -> Self {
        SemiRange::new(bound, true, true)
    }

    /// `(bound, +inf)`
    pub fn greater_than(bound: V) -> Self {
        SemiRange::new(bound, true, false)
    }

    pub fn bound(&self) -> &V {
        &self.bound
    }

    pub fn is_lower_bound(&self) -> bool {
        self.is_lower_bound
    }

    pub fn is_inclusive(&self) -> bool {
        self.is_inclusive
    }
}

impl<V: Ord> Range<V> for SemiRange<V> {
    fn contains(&self, value: &V) -> bool {
        if *value == self.bound {
            return self.is_inclusive;
        }
        self.is_lower_bound == (*value > self.bound)
    }
}

impl<V: Display> Display for SemiRange<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.is_lower_bound, self.is_inclusive) {
            (true, true) => write!(f, ">= {}", self.bound),
            (true, false) => write!(f, "> {}", self.bound),
            (false, true) => write!(f, "<= {}", self.bound),
            (false, false) => write!(f, "< {}", self.bound),
        }
    }
}

/// An interval with both ends finite.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiniteRange<V> {
    low: V,
    high: V,
    is_low_inclusive: bool,
    is_high_inclusive: bool,
}

impl<V: Ord> FiniteRange<V> {
    /// Create a new finite range, failing if `low > high`.
    pub fn new(low: V, high: V, is_low_inclusive: bool, is_high_inclusive: bool) -> Result<Self, SaplingError> {
        if low > high {
            return Err(SaplingError::InvalidArgument(
                "the bounds of a finite range must satisfy low <= high".to_string(),
            ));
        }
        Ok(FiniteRange {
            low,
            high,
            is_low_inclusive,
            is_high_inclusive,
        })
    }

    /// `[low, high]`
    pub fn closed(low: V, high: V) -> Result<Self, SaplingError> {
        FiniteRange::new(low, high, true, true)
    }

    pub fn low(&self) -> &V {
        &self.low
    }

    pub fn high(&self) -> &V {
        &self.high
    }
}

impl<V: Ord> Range<V> for FiniteRange<V> {
    fn contains(&self, value: &V) -> bool {
        if self.low < *value && *value < self.high {
            return true;
        }
        (self.is_low_inclusive && *value == self.low) || (self.is_high_inclusive && *value == self.high)
    }
}

impl<V: Display> Display for FiniteRange<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let open = if self.is_low_inclusive { '[' } else { '(' };
        let close = if self.is_high_inclusive { ']' } else { ')' };
        write!(f, "{}{}, {}{}", open, self.low, self.high, close)
    }
}

/// The pair of semi-ranges a continuous column is split into at its median.
///
/// `low` is `(-inf, median]` and `high` is `(median, +inf)`, so every value
/// belongs to exactly one of the two.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MedianSplit<V> {
    low: SemiRange<V>,
    high: SemiRange<V>,
}

impl<V: Clone> MedianSplit<V> {
    pub fn at(median: V) -> Self {
        MedianSplit {
            low: SemiRange::at_most(median.clone()),
            high: SemiRange::greater_than(median),
        }
    }
}

impl<V> MedianSplit<V> {
    pub fn median(&self) -> &V {
        self.low.bound()
    }

    pub fn low(&self) -> &SemiRange<V> {
        &self.low
    }

    pub fn high(&self) -> &SemiRange<V> {
        &self.high
    }

    /// Both halves, low first.
    pub fn ranges(&self) -> [&SemiRange<V>; 2] {
        [&self.low, &self.high]
    }
}

impl<V: Ord> MedianSplit<V> {
    /// The half that `value` falls into.
    pub fn locate(&self, value: &V) -> &SemiRange<V> {
        if self.low.contains(value) {
            &self.low
        } else {
            &self.high
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semi_range_contains() {
        let r = SemiRange::at_most(5);
        assert!(r.contains(&5));
        assert!(r.contains(&-10));
        assert!(!r.contains(&6));

        let r = SemiRange::greater_than(5);
        assert!(!r.contains(&5));
        assert!(r.contains(&6));
        assert!(!r.contains(&4));

        let r = SemiRange::at_least(5);
        assert!(r.contains(&5));
        assert!(!r.contains(&4));

        let r = SemiRange::less_than(5);
        assert!(!r.contains(&5));
        assert!(r.contains(&4));
    }

    #[test]
    fn test_semi_range_value_semantics() {
        assert_eq!(SemiRange::at_most(3), SemiRange::new(3, false, true));
        assert_ne!(SemiRange::at_most(3), SemiRange::less_than(3));
        assert_ne!(SemiRange::at_most(3), SemiRange::at_most(4));
    }

    #[test]
    fn test_finite_range() {
        let r = FiniteRange::new(1, 4, true, false).unwrap();
        assert!(r.contains(&1));
        assert!(r.contains(&3));
        assert!(!r.contains(&4));
        assert!(!r.contains(&0));
        assert_eq!(r.to_string(), "[1, 4)");

        let point = FiniteRange::closed(2, 2).unwrap();
        assert!(point.contains(&2));

        assert!(matches!(
            FiniteRange::closed(5, 1),
            Err(SaplingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_median_split_partitions() {
        let split = MedianSplit::at(34);
        assert_eq!(*split.median(), 34);
        for v in [i64::MIN, -1, 0, 33, 34, 35, 1000, i64::MAX] {
            let hits = split.ranges().iter().filter(|r| r.contains(&v)).count();
            assert_eq!(hits, 1, "value {} must be in exactly one half", v);
        }
        assert_eq!(split.locate(&34), split.low());
        assert_eq!(split.locate(&35), split.high());
        assert_eq!(split.low().to_string(), "<= 34");
        assert_eq!(split.high().to_string(), "> 34");
    }
}
