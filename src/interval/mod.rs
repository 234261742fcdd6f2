//! Timezone-aware datetime interval containment.
//!
//! An interval is either a fixed range with optional lower and upper
//! boundaries ([`DateTimeRange`]) or a pivot plus offsets
//! ([`DateTimeOffsetRange`]). Boundaries may be deferred, in which case they
//! are resolved on every check and never cached.
//!
//! Offset-aware and local (naive) datetimes are never compared implicitly:
//! unless a local timezone is supplied, such a comparison fails with
//! [`RangeError::MixedTimezoneAwareness`].

pub mod domain;
pub mod error;

pub use domain::{
    Boundary, DateTimeInterval, DateTimeOffsetRange, DateTimeRange, DateTimeValue, ResolvedRange,
};
pub use error::RangeError;

#[cfg(test)]
mod tests;
