use crate::range::IntRange;
use crate::range_set::IntRangeSet;

/// Integer membership.
pub trait IntContainer {
    fn contains(&self, value: i32) -> bool;

    /// Smallest member, if any.
    fn min(&self) -> Option<i32>;

    /// Largest member, if any.
    fn max(&self) -> Option<i32>;

    /// Number of members.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Integer membership that can also be enumerated as contiguous ranges.
///
/// Implementations must yield ranges in ascending order that are disjoint and
/// non-adjacent, and whose union is exactly the set of values for which
/// [`IntContainer::contains`] returns `true`.
pub trait IntRangeContainer: IntContainer {
    /// Lazily enumerates the container's contents as ranges.
    fn ranges(&self) -> impl Iterator<Item = IntRange> + '_;

    /// `true` when every value of `range` is a member.
    fn contains_all(&self, range: &IntRange) -> bool {
        self.ranges().any(|r| r.contains_range(range))
    }

    /// Every member in ascending order.
    fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.ranges().flatten()
    }

    fn to_range_set(&self) -> IntRangeSet {
        self.ranges().collect()
    }
}
