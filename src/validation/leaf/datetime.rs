//! Datetime validator.

use std::fmt;
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use regex::Regex;

use super::{StringValidator, literal_pattern};
use crate::interval::{DateTimeInterval, DateTimeValue};
use crate::validation::domain::{Context, Value};
use crate::validation::error::{ErrorKind, SchemaError, ValidationError};
use crate::validation::ports::{ValidationResult, Validator};

const DATE: &str = r"\d{4}-\d{2}-\d{2}";
const TIME: &str = r"\d{2}:\d{2}:\d{2}(\.\d+)?";
const TIMEZONE: &str = r"(Z|[+-]\d{2}:\d{2})";
const UTC_ONLY: &str = r"(Z|[+-]00:00)";

static ALLOW_TIMEZONE: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(&format!(r"\A{DATE}T{TIME}{TIMEZONE}?\z")));
static REQUIRE_TIMEZONE: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(&format!(r"\A{DATE}T{TIME}{TIMEZONE}\z")));
static REQUIRE_UTC: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(&format!(r"\A{DATE}T{TIME}{UTC_ONLY}\z")));
static LOCAL_ONLY: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(&format!(r"\A{DATE}T{TIME}\z")));
static LOCAL_OR_UTC: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(&format!(r"\A{DATE}T{TIME}{UTC_ONLY}?\z")));

/// Accepted datetime string formats.
///
/// ```text
/// input                     | Allow | Require | Utc | Local | LocalOrUtc
/// 2021-12-31T12:34:56       |   x   |         |     |   x   |     x
/// 2021-12-31T12:34:56Z      |   x   |    x    |  x  |       |     x
/// 2021-12-31T12:34:56+00:00 |   x   |    x    |  x  |       |     x
/// 2021-12-31T12:34:56+02:00 |   x   |    x    |     |       |
/// ```
///
/// Every format accepts a fractional second part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateTimeFormat {
    /// With or without a timezone.
    #[default]
    AllowTimezone,
    /// With any timezone.
    RequireTimezone,
    /// With `Z` or `+00:00`.
    RequireUtc,
    /// Without a timezone.
    LocalOnly,
    /// Without a timezone, or with `Z` or `+00:00`.
    LocalOrUtc,
}

impl DateTimeFormat {
    /// Returns the format as reported in `invalid_datetime` errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllowTimezone => "<DATE>T<TIME>[<TIMEZONE>]",
            Self::RequireTimezone => "<DATE>T<TIME><TIMEZONE>",
            Self::RequireUtc => "<DATE>T<TIME>Z",
            Self::LocalOnly => "<DATE>T<TIME>",
            Self::LocalOrUtc => "<DATE>T<TIME>[Z]",
        }
    }

    /// Returns `true` if strings without a timezone are accepted.
    #[must_use]
    pub const fn allows_local(self) -> bool {
        matches!(self, Self::AllowTimezone | Self::LocalOnly | Self::LocalOrUtc)
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::AllowTimezone => &ALLOW_TIMEZONE,
            Self::RequireTimezone => &REQUIRE_TIMEZONE,
            Self::RequireUtc => &REQUIRE_UTC,
            Self::LocalOnly => &LOCAL_ONLY,
            Self::LocalOrUtc => &LOCAL_OR_UTC,
        }
    }
}

/// Validates ISO 8601 datetime strings such as `2021-12-31T12:34:56.123+02:00`.
///
/// A string without a timezone yields a local datetime unless a local
/// timezone is set, which is then attached to it. A target timezone converts
/// every output; it needs a local timezone whenever the format accepts local
/// datetimes. An optional [`DateTimeInterval`] restricts the accepted
/// instants.
///
/// # Examples
///
/// ```
/// use chrono::FixedOffset;
/// use validata::interval::DateTimeValue;
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::{DateTimeFormat, DateTimeValidator};
/// use validata::validation::ports::Validator;
///
/// let utc = FixedOffset::east_opt(0).ok_or("offset")?;
/// let validator = DateTimeValidator::new(DateTimeFormat::AllowTimezone)
///     .with_local_timezone(utc)
///     .with_target_timezone(utc)?;
///
/// let output = validator.validate(&Value::from("2021-12-31T12:34:56+02:00"), &Context::new())?;
/// assert_eq!(output.to_iso_string(), "2021-12-31T10:34:56+00:00");
/// assert!(matches!(output, DateTimeValue::Aware(_)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Default)]
pub struct DateTimeValidator {
    string: StringValidator,
    format: DateTimeFormat,
    discard_milliseconds: bool,
    local_timezone: Option<FixedOffset>,
    target_timezone: Option<FixedOffset>,
    range: Option<Arc<dyn DateTimeInterval>>,
}

impl DateTimeValidator {
    /// Creates a validator for the given format.
    #[must_use]
    pub fn new(format: DateTimeFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Sets the sub-second part of every output to zero.
    #[must_use]
    pub const fn discard_milliseconds(mut self, discard: bool) -> Self {
        self.discard_milliseconds = discard;
        self
    }

    /// Interprets datetimes without a timezone, including local range
    /// boundaries, in `timezone`.
    #[must_use]
    pub const fn with_local_timezone(mut self, timezone: FixedOffset) -> Self {
        self.local_timezone = Some(timezone);
        self
    }

    /// Converts every output to `timezone`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MissingLocalTimezone`] if the format accepts
    /// local datetimes and no local timezone has been set yet.
    pub fn with_target_timezone(mut self, timezone: FixedOffset) -> Result<Self, SchemaError> {
        if self.format.allows_local() && self.local_timezone.is_none() {
            return Err(SchemaError::MissingLocalTimezone);
        }
        self.target_timezone = Some(timezone);
        Ok(self)
    }

    /// Restricts the accepted datetimes to an interval.
    #[must_use]
    pub fn with_range(mut self, range: impl DateTimeInterval + 'static) -> Self {
        self.range = Some(Arc::new(range));
        self
    }

    fn invalid(&self) -> ValidationError {
        ValidationError::new(ErrorKind::InvalidDateTime {
            datetime_format: self.format.as_str().to_owned(),
        })
    }
}

impl fmt::Debug for DateTimeValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateTimeValidator")
            .field("format", &self.format)
            .field("discard_milliseconds", &self.discard_milliseconds)
            .field("local_timezone", &self.local_timezone)
            .field("target_timezone", &self.target_timezone)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl Validator for DateTimeValidator {
    type Output = DateTimeValue;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<DateTimeValue> {
        let text = self.string.validate(input, context)?;
        if !self.format.pattern().is_match(&text) {
            return Err(self.invalid().into());
        }
        let mut datetime = parse(&text).ok_or_else(|| self.invalid())?;
        if self.discard_milliseconds {
            datetime = datetime.discard_subseconds();
        }
        datetime = datetime.with_local_timezone(self.local_timezone);

        if let Some(range) = &self.range {
            let resolved = range.resolve(self.local_timezone)?;
            if !resolved.contains(datetime, self.local_timezone)? {
                return Err(resolved.to_error().into());
            }
        }

        if let Some(target) = self.target_timezone {
            datetime = datetime.to_timezone(target);
        }
        Ok(datetime)
    }
}

/// Parses a string already accepted by one of the format patterns.
fn parse(text: &str) -> Option<DateTimeValue> {
    let normalised = text
        .strip_suffix('Z')
        .map_or_else(|| text.to_owned(), |stem| format!("{stem}+00:00"));
    DateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M:%S%.f%:z")
        .map(DateTimeValue::Aware)
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&normalised, "%Y-%m-%dT%H:%M:%S%.f").map(DateTimeValue::Local)
        })
        .ok()
}
