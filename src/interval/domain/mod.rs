//! Domain types for datetime intervals.

mod instant;
mod range;

pub use instant::DateTimeValue;
pub use range::{Boundary, DateTimeInterval, DateTimeOffsetRange, DateTimeRange, ResolvedRange};
