use crate::container::{IntContainer, IntRangeContainer};
use crate::error::{UtilError, UtilErrorExt};
use crate::range::IntRange;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A set of integers stored as sorted, disjoint, non-adjacent [`IntRange`]s.
///
/// Adding a value or range merges it with any overlapping or adjacent ranges;
/// removing splits ranges as needed. Membership is a binary search over the ranges.
///
/// The text form is a comma-separated list of ranges, e.g. `"1-3,5,7-9"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IntRangeSet {
    ranges: Vec<IntRange>,
}

impl IntRangeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Pre-allocates room for `ranges` disjoint ranges.
    #[must_use]
    pub fn with_capacity(ranges: usize) -> Self {
        Self { ranges: Vec::with_capacity(ranges) }
    }

    /// Adds a single value. Returns `true` if the set changed.
    pub fn add(&mut self, value: i32) -> bool {
        self.add_range(IntRange::of(value))
    }

    /// Adds every value of `range`, merging with overlapping or adjacent ranges.
    /// Returns `true` if the set changed.
    pub fn add_range(&mut self, range: IntRange) -> bool {
        if self.contains_all(&range) {
            return false;
        }

        let start = i64::from(range.start());
        let end = i64::from(range.end());
        let lo = self.ranges.partition_point(|r| i64::from(r.end()) + 1 < start);
        let hi = self.ranges.partition_point(|r| i64::from(r.start()) <= end + 1);

        // ranges[lo..hi] are exactly those overlapping or adjacent to `range`.
        let merged = match (self.ranges[lo..hi].first(), self.ranges[lo..hi].last()) {
            (Some(first), Some(last)) => {
                IntRange::range_of(first.start().min(range.start()), last.end().max(range.end()))
            },
            _ => range,
        };
        self.ranges.splice(lo..hi, [merged]);
        true
    }

    /// Adds every value produced by `values`. Returns `true` if the set changed.
    pub fn add_all(&mut self, values: impl IntoIterator<Item = i32>) -> bool {
        values.into_iter().fold(false, |changed, v| self.add(v) || changed)
    }

    /// Removes a single value. Returns `true` if the set changed.
    pub fn remove(&mut self, value: i32) -> bool {
        self.remove_range(IntRange::of(value))
    }

    /// Removes every value of `range`, splitting ranges that straddle its bounds.
    /// Returns `true` if the set changed.
    pub fn remove_range(&mut self, range: IntRange) -> bool {
        let lo = self.ranges.partition_point(|r| r.end() < range.start());
        let hi = self.ranges.partition_point(|r| r.start() <= range.end());
        if lo >= hi {
            return false;
        }

        let first = self.ranges[lo];
        let last = self.ranges[hi - 1];
        let mut remainder = Vec::with_capacity(2);
        if first.start() < range.start() {
            remainder.push(IntRange::range_of(first.start(), range.start() - 1));
        }
        if last.end() > range.end() {
            remainder.push(IntRange::range_of(range.end() + 1, last.end()));
        }
        self.ranges.splice(lo..hi, remainder);
        true
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Number of disjoint ranges (not values).
    #[must_use]
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Index of the first range whose end is at or above `value`.
    fn search(&self, value: i32) -> usize {
        self.ranges.partition_point(|r| r.end() < value)
    }
}

impl IntContainer for IntRangeSet {
    fn contains(&self, value: i32) -> bool {
        self.ranges.get(self.search(value)).is_some_and(|r| r.start() <= value)
    }

    fn min(&self) -> Option<i32> {
        self.ranges.first().copied().map(IntRange::start)
    }

    fn max(&self) -> Option<i32> {
        self.ranges.last().copied().map(IntRange::end)
    }

    fn len(&self) -> u64 {
        self.ranges.iter().copied().map(IntRange::len).sum()
    }

    fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl IntRangeContainer for IntRangeSet {
    fn ranges(&self) -> impl Iterator<Item = IntRange> + '_ {
        self.ranges.iter().copied()
    }

    fn contains_all(&self, range: &IntRange) -> bool {
        self.ranges.get(self.search(range.start())).is_some_and(|r| r.contains_range(range))
    }
}

impl FromIterator<i32> for IntRangeSet {
    fn from_iter<T: IntoIterator<Item = i32>>(iter: T) -> Self {
        let mut set = Self::new();
        set.add_all(iter);
        set
    }
}

impl FromIterator<IntRange> for IntRangeSet {
    fn from_iter<T: IntoIterator<Item = IntRange>>(iter: T) -> Self {
        let mut set = Self::new();
        for range in iter {
            set.add_range(range);
        }
        set
    }
}

impl Extend<i32> for IntRangeSet {
    fn extend<T: IntoIterator<Item = i32>>(&mut self, iter: T) {
        self.add_all(iter);
    }
}

impl Extend<IntRange> for IntRangeSet {
    fn extend<T: IntoIterator<Item = IntRange>>(&mut self, iter: T) {
        for range in iter {
            self.add_range(range);
        }
    }
}

impl fmt::Display for IntRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}

impl FromStr for IntRangeSet {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut set = Self::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let range = part.parse::<IntRange>().context(format!("Parsing range set '{s}'"))?;
            set.add_range(range);
        }
        Ok(set)
    }
}

impl Serialize for IntRangeSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IntRangeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
