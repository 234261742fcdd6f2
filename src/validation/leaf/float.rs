//! Float validator.

use super::ensure_type;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::{ErrorKind, SchemaError, ValidationError};
use crate::validation::ports::{ValidationResult, Validator};

/// Validates finite floats within an optional inclusive range.
///
/// Infinite and NaN values are rejected with `not_a_finite_number`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatValidator {
    min_value: Option<f64>,
    max_value: Option<f64>,
    allow_integers: bool,
}

impl FloatValidator {
    /// Creates a validator accepting any finite float.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_value: None,
            max_value: None,
            allow_integers: false,
        }
    }

    /// Creates a validator with custom bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvertedBounds`] if `min_value > max_value`.
    pub fn with_range(min_value: Option<f64>, max_value: Option<f64>) -> Result<Self, SchemaError> {
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
            allow_integers: false,
        })
    }

    /// Also accepts integers, converting them to floats.
    #[must_use]
    pub const fn allow_integers(mut self, allow: bool) -> Self {
        self.allow_integers = allow;
        self
    }
}

impl Default for FloatValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for FloatValidator {
    type Output = f64;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<f64> {
        if self.allow_integers {
            ensure_type(input, &[ValueKind::Float, ValueKind::Int])?;
        } else {
            ensure_type(input, &[ValueKind::Float])?;
        }
        let number = match input {
            Value::Float(number) => *number,
            Value::Int(number) => int_to_float(*number),
            _ => return Err(ValidationError::invalid_type([ValueKind::Float]).into()),
        };
        if !number.is_finite() {
            return Err(ValidationError::new(ErrorKind::NonFiniteNumber).into());
        }
        let below = self.min_value.is_some_and(|min| number < min);
        let above = self.max_value.is_some_and(|max| number > max);
        if below || above {
            return Err(ValidationError::number_range(
                self.min_value.map(serde_json::Value::from),
                self.max_value.map(serde_json::Value::from),
            )
            .into());
        }
        Ok(number)
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integers are accepted as floats only on request"
)]
const fn int_to_float(number: i64) -> f64 {
    number as f64
}
