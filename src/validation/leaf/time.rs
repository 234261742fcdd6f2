//! Time validator.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

use super::{StringValidator, literal_pattern};
use crate::validation::domain::{Context, Value};
use crate::validation::error::{ErrorKind, ValidationError};
use crate::validation::ports::{ValidationResult, Validator};

static NO_SECONDS: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(r"\A([01][0-9]|2[0-3]):[0-5][0-9]\z"));
static WITH_SECONDS: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(r"\A([01][0-9]|2[0-3])(:[0-5][0-9]){2}\z"));
static OPTIONAL_SECONDS: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(r"\A([01][0-9]|2[0-3])(:[0-5][0-9]){1,2}\z"));

/// Accepted time string formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// `HH:MM`.
    NoSeconds,
    /// `HH:MM:SS`.
    #[default]
    WithSeconds,
    /// `HH:MM` or `HH:MM:SS`.
    OptionalSeconds,
}

impl TimeFormat {
    /// Returns the format as reported in `invalid_time` errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoSeconds => "HH:MM",
            Self::WithSeconds => "HH:MM:SS",
            Self::OptionalSeconds => "HH:MM[:SS]",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::NoSeconds => &NO_SECONDS,
            Self::WithSeconds => &WITH_SECONDS,
            Self::OptionalSeconds => &OPTIONAL_SECONDS,
        }
    }
}

/// Validates time strings and converts them to [`NaiveTime`].
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::{TimeFormat, TimeValidator};
/// use validata::validation::ports::Validator;
///
/// let validator = TimeValidator::new(TimeFormat::OptionalSeconds);
/// let output = validator.validate(&Value::from("09:30"), &Context::new());
/// assert_eq!(output.ok(), NaiveTime::from_hms_opt(9, 30, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeValidator {
    string: StringValidator,
    format: TimeFormat,
}

impl TimeValidator {
    /// Creates a validator for the given format.
    #[must_use]
    pub const fn new(format: TimeFormat) -> Self {
        Self {
            string: StringValidator::new(),
            format,
        }
    }

    fn invalid(&self) -> ValidationError {
        ValidationError::new(ErrorKind::InvalidTime {
            time_format: self.format.as_str().to_owned(),
        })
    }
}

impl Validator for TimeValidator {
    type Output = NaiveTime;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<NaiveTime> {
        let text = self.string.validate(input, context)?;
        if !self.format.pattern().is_match(&text) {
            return Err(self.invalid().into());
        }
        let layout = if text.len() > 5 { "%H:%M:%S" } else { "%H:%M" };
        NaiveTime::parse_from_str(&text, layout).map_err(|_| self.invalid().into())
    }
}
