//! Error types for datetime intervals.

use thiserror::Error;

/// Errors raised while building or evaluating a datetime interval.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// The lower boundary lies after the upper boundary.
    #[error("lower boundary {lower} is after upper boundary {upper}")]
    InvertedBoundaries {
        /// ISO rendering of the lower boundary.
        lower: String,
        /// ISO rendering of the upper boundary.
        upper: String,
    },

    /// An offset range was built without any offset.
    #[error("at least one of the offsets must be specified")]
    MissingOffset,

    /// An offset-aware datetime was compared with a local one and no local
    /// timezone was supplied.
    #[error("cannot compare offset-aware datetime {aware} with local datetime {local}")]
    MixedTimezoneAwareness {
        /// ISO rendering of the offset-aware datetime.
        aware: String,
        /// ISO rendering of the local datetime.
        local: String,
    },

    /// Applying an offset left the representable datetime range.
    #[error("datetime boundary is out of range")]
    BoundaryOverflow,
}
