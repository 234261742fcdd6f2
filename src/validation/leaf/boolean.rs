//! Boolean validator.

use super::ensure_not_null;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::ValidationError;
use crate::validation::ports::{ValidationResult, Validator};

/// Validates booleans, optionally parsing `"true"` and `"false"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanValidator {
    allow_strings: bool,
}

impl BooleanValidator {
    /// Creates a validator accepting only booleans.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_strings: false,
        }
    }

    /// Also accepts the strings `"true"` and `"false"`, in any letter case.
    #[must_use]
    pub const fn allow_strings(mut self, allow: bool) -> Self {
        self.allow_strings = allow;
        self
    }
}

impl Validator for BooleanValidator {
    type Output = bool;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<bool> {
        ensure_not_null(input)?;
        match input {
            Value::Bool(flag) => return Ok(*flag),
            Value::Str(text) if self.allow_strings => {
                if text.eq_ignore_ascii_case("true") {
                    return Ok(true);
                }
                if text.eq_ignore_ascii_case("false") {
                    return Ok(false);
                }
            }
            _ => {}
        }
        Err(ValidationError::invalid_type([ValueKind::Bool]).into())
    }
}
