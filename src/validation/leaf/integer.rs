//! Integer validator.

use super::ensure_type;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::{ErrorKind, SchemaError, ValidationError};
use crate::validation::ports::{ValidationResult, Validator};

/// Validates integers within an inclusive range.
///
/// By default the range is that of a signed 32-bit integer. Use
/// [`IntegerValidator::unbounded`] to accept any `i64`.
///
/// # Examples
///
/// ```
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::IntegerValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = IntegerValidator::with_range(Some(1), Some(10))?.allow_strings(true);
/// let context = Context::new();
///
/// assert_eq!(validator.validate(&Value::from(" 7 "), &context).ok(), Some(7));
/// assert!(validator.validate(&Value::Int(11), &context).is_err());
/// # Ok::<(), validata::validation::error::SchemaError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerValidator {
    min_value: Option<i64>,
    max_value: Option<i64>,
    allow_strings: bool,
}

impl IntegerValidator {
    /// Default lower bound, `-2^31`.
    pub const DEFAULT_MIN_VALUE: i64 = -2_147_483_648;
    /// Default upper bound, `2^31 - 1`.
    pub const DEFAULT_MAX_VALUE: i64 = 2_147_483_647;

    /// Creates a validator for signed 32-bit integers.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_value: Some(Self::DEFAULT_MIN_VALUE),
            max_value: Some(Self::DEFAULT_MAX_VALUE),
            allow_strings: false,
        }
    }

    /// Creates a validator without range bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min_value: None,
            max_value: None,
            allow_strings: false,
        }
    }

    /// Creates a validator with custom bounds. `None` leaves a side open.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvertedBounds`] if `min_value > max_value`.
    pub const fn with_range(
        min_value: Option<i64>,
        max_value: Option<i64>,
    ) -> Result<Self, SchemaError> {
        if let (Some(min), Some(max)) = (min_value, max_value)
            && min > max
        {
            return Err(SchemaError::InvertedBounds {
                min: "min_value",
                max: "max_value",
            });
        }
        Ok(Self {
            min_value,
            max_value,
            allow_strings: false,
        })
    }

    /// Also accepts strings holding an integer, surrounding whitespace
    /// tolerated.
    #[must_use]
    pub const fn allow_strings(mut self, allow: bool) -> Self {
        self.allow_strings = allow;
        self
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn max_value(&self) -> Option<i64> {
        self.max_value
    }

    fn check_range(&self, number: i64) -> Result<i64, ValidationError> {
        let below = self.min_value.is_some_and(|min| number < min);
        let above = self.max_value.is_some_and(|max| number > max);
        if below || above {
            return Err(ValidationError::number_range(
                self.min_value.map(serde_json::Value::from),
                self.max_value.map(serde_json::Value::from),
            ));
        }
        Ok(number)
    }
}

impl Default for IntegerValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for IntegerValidator {
    type Output = i64;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<i64> {
        if self.allow_strings {
            ensure_type(input, &[ValueKind::Int, ValueKind::Str])?;
        } else {
            ensure_type(input, &[ValueKind::Int])?;
        }
        let number = match input {
            Value::Int(number) => *number,
            Value::Str(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::new(ErrorKind::InvalidInteger))?,
            _ => return Err(ValidationError::invalid_type([ValueKind::Int]).into()),
        };
        Ok(self.check_range(number)?)
    }
}
