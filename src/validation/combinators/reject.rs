//! Reject validator.

use crate::validation::domain::{Context, Value};
use crate::validation::error::ValidationError;
use crate::validation::ports::{ValidationResult, Validator};

/// Rejects every input with `field_not_allowed`.
///
/// With [`RejectValidator::allow_null`] the absence-sentinel is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectValidator {
    allow_null: bool,
    code: Option<String>,
    reason: Option<String>,
}

impl RejectValidator {
    /// Creates a validator rejecting everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `Null`.
    #[must_use]
    pub const fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = allow;
        self
    }

    /// Overrides the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attaches a reason to the error.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl Validator for RejectValidator {
    type Output = ();

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<()> {
        if self.allow_null && input.is_null() {
            return Ok(());
        }
        let mut error = ValidationError::field_not_allowed();
        if let Some(code) = &self.code {
            error = error.with_code(code.clone());
        }
        if let Some(reason) = &self.reason {
            error = error.with_reason(reason.clone());
        }
        Err(error.into())
    }
}
