use crate::error::UtilError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::{max, min};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// An inclusive range of integers, `start..=end`, with `start <= end`.
///
/// Ranges order by `start`, then `end`. The text form is `"n"` for a single value
/// and `"start-end"` otherwise; negative bounds are allowed (`"-5--1"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntRange {
    start: i32,
    end: i32,
}

impl IntRange {
    /// Creates a range from ordered bounds.
    ///
    /// # Errors
    /// Returns [`UtilError::InvalidRange`] if `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, UtilError> {
        if start > end {
            return Err(UtilError::InvalidRange {
                message: format!("start {start} is greater than end {end}").into(),
                context: None,
            });
        }
        Ok(Self { start, end })
    }

    /// A range holding exactly one value.
    #[must_use]
    pub const fn of(value: i32) -> Self {
        Self { start: value, end: value }
    }

    /// A range spanning `a` and `b` in whichever order they are given.
    #[must_use]
    pub fn range_of(a: i32, b: i32) -> Self {
        Self { start: min(a, b), end: max(a, b) }
    }

    /// Lower bound, inclusive.
    #[must_use]
    pub const fn start(self) -> i32 {
        self.start
    }

    /// Upper bound, inclusive.
    #[must_use]
    pub const fn end(self) -> i32 {
        self.end
    }

    /// Count of integers in the range. Never zero.
    #[must_use]
    pub fn len(self) -> u64 {
        (i64::from(self.end) - i64::from(self.start) + 1).unsigned_abs()
    }

    #[must_use]
    pub const fn is_single(self) -> bool {
        self.start == self.end
    }

    #[must_use]
    pub const fn contains(self, value: i32) -> bool {
        self.start <= value && value <= self.end
    }

    #[must_use]
    pub const fn contains_range(self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    #[must_use]
    pub const fn intersects(self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// `true` when one range ends exactly one below where the other starts.
    #[must_use]
    pub fn is_adjacent_to(self, other: &Self) -> bool {
        i64::from(self.end) + 1 == i64::from(other.start)
            || i64::from(other.end) + 1 == i64::from(self.start)
    }

    /// `true` when the union of both ranges is itself a contiguous range.
    #[must_use]
    pub fn can_merge_with(self, other: &Self) -> bool {
        self.intersects(other) || self.is_adjacent_to(other)
    }

    /// Returns the contiguous union of both ranges.
    ///
    /// # Errors
    /// Returns [`UtilError::InvalidRange`] if the ranges are neither overlapping nor adjacent.
    pub fn merge_with(self, other: &Self) -> Result<Self, UtilError> {
        if !self.can_merge_with(other) {
            return Err(UtilError::InvalidRange {
                message: format!("{self} and {other} are disjoint").into(),
                context: Some("Merging ranges".into()),
            });
        }
        Ok(Self { start: min(self.start, other.start), end: max(self.end, other.end) })
    }

    /// Iterates the values of the range in ascending order.
    #[must_use]
    pub const fn iter(self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

impl From<i32> for IntRange {
    fn from(value: i32) -> Self {
        Self::of(value)
    }
}

impl TryFrom<RangeInclusive<i32>> for IntRange {
    type Error = UtilError;

    fn try_from(range: RangeInclusive<i32>) -> Result<Self, Self::Error> {
        Self::new(*range.start(), *range.end())
    }
}

impl IntoIterator for IntRange {
    type Item = i32;
    type IntoIter = RangeInclusive<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for IntRange {
    type Err = UtilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .char_indices()
            .skip(1)
            .find(|&(i, c)| c == '-' && s[..i].ends_with(|p: char| p.is_ascii_digit() || p == ' '));

        let (start, end) = match split {
            Some((i, _)) => (&s[..i], &s[i + 1..]),
            None => (s, s),
        };

        let start = parse_bound(start, s)?;
        let end = parse_bound(end, s)?;
        Self::new(start, end)
    }
}

fn parse_bound(bound: &str, whole: &str) -> Result<i32, UtilError> {
    bound.trim().parse::<i32>().map_err(|e| UtilError::Parse {
        message: format!("'{whole}' is not a range: {e}").into(),
        context: None,
    })
}

impl Serialize for IntRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IntRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
