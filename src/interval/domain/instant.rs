//! Offset-aware or local datetime.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, Timelike, Utc};
use serde::{Serialize, Serializer};

use crate::interval::error::RangeError;
use crate::validation::domain::Value;

/// A datetime that either carries a UTC offset or is local (naive).
///
/// The two forms are not comparable with each other; see
/// [`DateTimeValue::compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateTimeValue {
    /// A datetime with an explicit UTC offset.
    Aware(DateTime<FixedOffset>),
    /// A datetime without timezone information.
    Local(NaiveDateTime),
}

impl DateTimeValue {
    /// Returns `true` if the datetime carries a UTC offset.
    #[must_use]
    pub const fn is_aware(&self) -> bool {
        matches!(self, Self::Aware(_))
    }

    /// Interprets a local datetime in `timezone`. Offset-aware datetimes and
    /// a missing timezone leave the value untouched.
    #[must_use]
    pub fn with_local_timezone(self, timezone: Option<FixedOffset>) -> Self {
        match (self, timezone) {
            (Self::Local(naive), Some(offset)) => naive
                .and_local_timezone(offset)
                .single()
                .map_or(self, Self::Aware),
            _ => self,
        }
    }

    /// Converts an offset-aware datetime to `timezone`. Local datetimes are
    /// left untouched.
    #[must_use]
    pub fn to_timezone(self, timezone: FixedOffset) -> Self {
        match self {
            Self::Aware(datetime) => Self::Aware(datetime.with_timezone(&timezone)),
            Self::Local(_) => self,
        }
    }

    /// Drops the sub-second part.
    #[must_use]
    pub fn discard_subseconds(self) -> Self {
        match self {
            Self::Aware(datetime) => Self::Aware(datetime.with_nanosecond(0).unwrap_or(datetime)),
            Self::Local(naive) => Self::Local(naive.with_nanosecond(0).unwrap_or(naive)),
        }
    }

    /// Compares two datetimes of the same form.
    ///
    /// Offset-aware datetimes are compared as instants, so
    /// `2021-01-01T00:00:00+01:00` equals `2020-12-31T23:00:00Z`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::MixedTimezoneAwareness`] if one datetime is
    /// offset-aware and the other is local.
    pub fn compare(&self, other: &Self) -> Result<Ordering, RangeError> {
        match (self, other) {
            (Self::Aware(left), Self::Aware(right)) => Ok(left.cmp(right)),
            (Self::Local(left), Self::Local(right)) => Ok(left.cmp(right)),
            (Self::Aware(aware), Self::Local(local)) | (Self::Local(local), Self::Aware(aware)) => {
                Err(RangeError::MixedTimezoneAwareness {
                    aware: Self::Aware(*aware).to_iso_string(),
                    local: Self::Local(*local).to_iso_string(),
                })
            }
        }
    }

    /// Renders the datetime in ISO 8601, e.g. `2021-12-31T23:59:59.999999+00:00`.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        match self {
            Self::Aware(datetime) => datetime.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            Self::Local(naive) => naive.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        }
    }
}

impl fmt::Display for DateTimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for DateTimeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl From<DateTime<FixedOffset>> for DateTimeValue {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self::Aware(datetime)
    }
}

impl From<DateTime<Utc>> for DateTimeValue {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::Aware(datetime.fixed_offset())
    }
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Local(naive)
    }
}

impl From<DateTimeValue> for Value {
    fn from(datetime: DateTimeValue) -> Self {
        match datetime {
            DateTimeValue::Aware(aware) => Self::DateTime(aware),
            DateTimeValue::Local(naive) => Self::LocalDateTime(naive),
        }
    }
}
