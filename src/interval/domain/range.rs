//! Datetime ranges.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use chrono::{FixedOffset, NaiveDateTime, SubsecRound, TimeDelta};
use mockable::{Clock, DefaultClock};

use super::DateTimeValue;
use crate::interval::error::RangeError;
use crate::validation::error::{ErrorKind, ValidationError};

type BoundaryFn = Arc<dyn Fn() -> DateTimeValue + Send + Sync>;

/// One end of a datetime range.
#[derive(Clone)]
pub enum Boundary {
    /// A fixed datetime.
    Fixed(DateTimeValue),
    /// A datetime computed on every check.
    Deferred(BoundaryFn),
}

impl Boundary {
    /// Creates a fixed boundary.
    #[must_use]
    pub fn fixed(datetime: impl Into<DateTimeValue>) -> Self {
        Self::Fixed(datetime.into())
    }

    /// Creates a boundary evaluated on every check.
    #[must_use]
    pub fn deferred<F>(accessor: F) -> Self
    where
        F: Fn() -> DateTimeValue + Send + Sync + 'static,
    {
        Self::Deferred(Arc::new(accessor))
    }

    /// Returns the boundary's datetime, calling the accessor if deferred.
    #[must_use]
    pub fn resolve(&self) -> DateTimeValue {
        match self {
            Self::Fixed(datetime) => *datetime,
            Self::Deferred(accessor) => accessor(),
        }
    }

    fn resolve_in(&self, local_timezone: Option<FixedOffset>) -> DateTimeValue {
        self.resolve().with_local_timezone(local_timezone)
    }
}

impl fmt::Debug for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(datetime) => f.debug_tuple("Fixed").field(datetime).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<DateTimeValue> for Boundary {
    fn from(datetime: DateTimeValue) -> Self {
        Self::Fixed(datetime)
    }
}

impl From<chrono::DateTime<FixedOffset>> for Boundary {
    fn from(datetime: chrono::DateTime<FixedOffset>) -> Self {
        Self::fixed(datetime)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Boundary {
    fn from(datetime: chrono::DateTime<chrono::Utc>) -> Self {
        Self::fixed(datetime)
    }
}

impl From<NaiveDateTime> for Boundary {
    fn from(naive: NaiveDateTime) -> Self {
        Self::fixed(naive)
    }
}

/// Boundaries of a range resolved for a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    /// Inclusive lower boundary, if any.
    pub lower: Option<DateTimeValue>,
    /// Inclusive upper boundary, if any.
    pub upper: Option<DateTimeValue>,
}

impl ResolvedRange {
    /// Returns `true` if `datetime` lies within the boundaries, inclusively.
    ///
    /// `local_timezone` is applied to a local `datetime` before comparing.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::MixedTimezoneAwareness`] if an offset-aware
    /// datetime would be compared with a local one.
    pub fn contains(
        &self,
        datetime: DateTimeValue,
        local_timezone: Option<FixedOffset>,
    ) -> Result<bool, RangeError> {
        let candidate = datetime.with_local_timezone(local_timezone);
        if let Some(lower) = &self.lower
            && candidate.compare(lower)? == Ordering::Less
        {
            return Ok(false);
        }
        if let Some(upper) = &self.upper
            && candidate.compare(upper)? == Ordering::Greater
        {
            return Ok(false);
        }
        Ok(true)
    }

    /// Builds the `datetime_range_error` reporting these boundaries.
    #[must_use]
    pub fn to_error(&self) -> ValidationError {
        ValidationError::new(ErrorKind::DateTimeRange {
            lower_boundary: self.lower.map(|lower| lower.to_iso_string()),
            upper_boundary: self.upper.map(|upper| upper.to_iso_string()),
        })
    }
}

/// A datetime interval checked by the datetime validator.
pub trait DateTimeInterval: Send + Sync + fmt::Debug {
    /// Resolves the boundaries for one check, interpreting local boundaries
    /// in `local_timezone` if given.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] if the boundaries cannot be computed.
    fn resolve(&self, local_timezone: Option<FixedOffset>) -> Result<ResolvedRange, RangeError>;

    /// Returns `true` if `datetime` lies within the interval.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] if the boundaries cannot be computed or
    /// compared with `datetime`.
    fn contains_datetime(
        &self,
        datetime: DateTimeValue,
        local_timezone: Option<FixedOffset>,
    ) -> Result<bool, RangeError> {
        self.resolve(local_timezone)?
            .contains(datetime, local_timezone)
    }
}

/// A range with optional lower and upper boundaries.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use validata::interval::{Boundary, DateTimeInterval, DateTimeRange, DateTimeValue};
///
/// let range = DateTimeRange::new(
///     Some(Boundary::from(DateTime::parse_from_rfc3339("2021-01-01T00:00:00Z")?)),
///     Some(Boundary::from(DateTime::parse_from_rfc3339("2021-12-31T23:59:59.999999Z")?)),
/// )?;
///
/// let inside = DateTimeValue::from(DateTime::parse_from_rfc3339("2020-12-31T23:00:00-01:00")?);
/// assert!(range.contains_datetime(inside, None)?);
///
/// let outside = DateTimeValue::from(DateTime::parse_from_rfc3339("2021-12-31T23:59:59-01:00")?);
/// assert!(!range.contains_datetime(outside, None)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeRange {
    lower: Option<Boundary>,
    upper: Option<Boundary>,
}

impl DateTimeRange {
    /// Creates a range. `None` leaves a side open.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvertedBoundaries`] if both boundaries are
    /// fixed and the lower one lies after the upper one, or
    /// [`RangeError::MixedTimezoneAwareness`] if the two fixed boundaries
    /// cannot be compared.
    pub fn new(lower: Option<Boundary>, upper: Option<Boundary>) -> Result<Self, RangeError> {
        if let (Some(Boundary::Fixed(low)), Some(Boundary::Fixed(high))) = (&lower, &upper)
            && low.compare(high)? == Ordering::Greater
        {
            return Err(RangeError::InvertedBoundaries {
                lower: low.to_iso_string(),
                upper: high.to_iso_string(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Creates a range with only a lower boundary.
    #[must_use]
    pub const fn starting_at(lower: Boundary) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// Creates a range with only an upper boundary.
    #[must_use]
    pub const fn ending_at(upper: Boundary) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }
}

impl DateTimeInterval for DateTimeRange {
    fn resolve(&self, local_timezone: Option<FixedOffset>) -> Result<ResolvedRange, RangeError> {
        Ok(ResolvedRange {
            lower: self.lower.as_ref().map(|lower| lower.resolve_in(local_timezone)),
            upper: self.upper.as_ref().map(|upper| upper.resolve_in(local_timezone)),
        })
    }
}

/// A range spanning a pivot minus and/or plus an offset.
///
/// Without an explicit pivot, the current UTC time truncated to whole
/// seconds is used, read from a [`Clock`]. A missing offset makes the pivot
/// itself the boundary on that side.
#[derive(Clone)]
pub struct DateTimeOffsetRange {
    pivot: Option<Boundary>,
    offset_minus: Option<TimeDelta>,
    offset_plus: Option<TimeDelta>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl DateTimeOffsetRange {
    /// Creates an offset range around `pivot`, or around "now" if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::MissingOffset`] if neither offset is given.
    pub fn new(
        pivot: Option<Boundary>,
        offset_minus: Option<TimeDelta>,
        offset_plus: Option<TimeDelta>,
    ) -> Result<Self, RangeError> {
        if offset_minus.is_none() && offset_plus.is_none() {
            return Err(RangeError::MissingOffset);
        }
        Ok(Self {
            pivot,
            offset_minus,
            offset_plus,
            clock: Arc::new(DefaultClock),
        })
    }

    /// Replaces the clock used for the default pivot.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = clock;
        self
    }

    fn pivot(&self, local_timezone: Option<FixedOffset>) -> DateTimeValue {
        self.pivot.as_ref().map_or_else(
            || DateTimeValue::from(self.clock.utc().trunc_subsecs(0)),
            |pivot| pivot.resolve_in(local_timezone),
        )
    }
}

impl fmt::Debug for DateTimeOffsetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeOffsetRange")
            .field("pivot", &self.pivot)
            .field("offset_minus", &self.offset_minus)
            .field("offset_plus", &self.offset_plus)
            .finish_non_exhaustive()
    }
}

impl DateTimeInterval for DateTimeOffsetRange {
    fn resolve(&self, local_timezone: Option<FixedOffset>) -> Result<ResolvedRange, RangeError> {
        let pivot = self.pivot(local_timezone);
        let lower = self
            .offset_minus
            .map_or(Ok(pivot), |offset| shift(pivot, -offset))?;
        let upper = self
            .offset_plus
            .map_or(Ok(pivot), |offset| shift(pivot, offset))?;
        Ok(ResolvedRange {
            lower: Some(lower),
            upper: Some(upper),
        })
    }
}

fn shift(datetime: DateTimeValue, offset: TimeDelta) -> Result<DateTimeValue, RangeError> {
    let shifted = match datetime {
        DateTimeValue::Aware(aware) => aware.checked_add_signed(offset).map(DateTimeValue::Aware),
        DateTimeValue::Local(naive) => naive.checked_add_signed(offset).map(DateTimeValue::Local),
    };
    shifted.ok_or(RangeError::BoundaryOverflow)
}
