//! Discard validator.

use crate::validation::domain::{Context, Value};
use crate::validation::ports::{ValidationResult, Validator};

/// Ignores the input and always returns a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscardValidator {
    output: Value,
}

impl DiscardValidator {
    /// Creates a validator always returning `output`.
    #[must_use]
    pub fn new(output: impl Into<Value>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

impl Validator for DiscardValidator {
    type Output = Value;

    fn validate(&self, _input: &Value, _context: &Context) -> ValidationResult<Value> {
        Ok(self.output.clone())
    }
}
