//! # Utilities
//!
//! Small building blocks shared across the common crates:
//!
//! * [`CloseableIterator`]: an iterator that owns a resource and must release it exactly once.
//! * [`IntRange`], [`IntRangeSet`] and the [`IntRangeContainer`] contract: integer membership
//!   that can also be enumerated as ordered, disjoint, contiguous ranges.
//!
//! ## Example
//!
//! ```rust
//! use sn_util::prelude::*;
//!
//! # fn main() -> Result<(), UtilError> {
//! let mut set: IntRangeSet = "1-3,7".parse()?;
//! set.add(4);
//! set.add_range(IntRange::new(8, 10)?);
//!
//! assert!(set.contains(2));
//! assert_eq!(set.to_string(), "1-4,7-10");
//! assert_eq!(set.ranges().count(), 2);
//! # Ok(())
//! # }
//! ```

mod container;
mod error;
pub mod iter;
mod range;
mod range_set;

pub use container::{IntContainer, IntRangeContainer};
pub use error::{UtilError, UtilErrorExt};
pub use iter::{CloseOnDrop, CloseableIterator, CloseableIteratorExt};
pub use range::IntRange;
pub use range_set::IntRangeSet;

pub mod prelude {
    pub use crate::container::{IntContainer, IntRangeContainer};
    pub use crate::error::{UtilError, UtilErrorExt};
    pub use crate::iter::{CloseableIterator, CloseableIteratorExt};
    pub use crate::range::IntRange;
    pub use crate::range_set::IntRangeSet;
}
