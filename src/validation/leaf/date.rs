//! Date validator.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{StringValidator, literal_pattern};
use crate::validation::domain::{Context, Value};
use crate::validation::error::{ErrorKind, ValidationError};
use crate::validation::ports::{ValidationResult, Validator};

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| literal_pattern(r"\A\d{4}-\d{2}-\d{2}\z"));

/// Validates `YYYY-MM-DD` strings and converts them to [`NaiveDate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateValidator {
    string: StringValidator,
}

impl DateValidator {
    /// Creates a date validator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            string: StringValidator::new(),
        }
    }
}

impl Validator for DateValidator {
    type Output = NaiveDate;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<NaiveDate> {
        let text = self.string.validate(input, context)?;
        if !DATE_PATTERN.is_match(&text) {
            return Err(ValidationError::new(ErrorKind::InvalidDate).into());
        }
        NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map_err(|_| ValidationError::new(ErrorKind::InvalidDate).into())
    }
}
