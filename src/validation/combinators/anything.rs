//! Pass-through validator.

use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::SchemaError;
use crate::validation::leaf::{ensure_not_null, ensure_type};
use crate::validation::ports::{ValidationResult, Validator};

/// Returns the input unchanged, optionally restricted to some kinds.
///
/// Without a type list `Null` is accepted unless disabled. With a type list
/// `Null` is accepted only if [`ValueKind::None`] is listed, again unless
/// overridden with [`AnythingValidator::allow_null`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnythingValidator {
    allowed_types: Option<Vec<ValueKind>>,
    allow_null: Option<bool>,
}

impl AnythingValidator {
    /// Creates a validator accepting anything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the accepted kinds.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyAllowedTypes`] if no kind is given.
    pub fn with_allowed_types(
        mut self,
        kinds: impl IntoIterator<Item = ValueKind>,
    ) -> Result<Self, SchemaError> {
        let mut allowed: Vec<ValueKind> = kinds.into_iter().collect();
        allowed.sort_unstable();
        allowed.dedup();
        if allowed.is_empty() {
            return Err(SchemaError::EmptyAllowedTypes);
        }
        self.allowed_types = Some(allowed);
        Ok(self)
    }

    /// Overrides whether `Null` is accepted.
    #[must_use]
    pub const fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = Some(allow);
        self
    }

    fn accepts_null(&self) -> bool {
        self.allow_null.unwrap_or_else(|| {
            self.allowed_types
                .as_ref()
                .is_none_or(|kinds| kinds.contains(&ValueKind::None))
        })
    }
}

impl Validator for AnythingValidator {
    type Output = Value;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<Value> {
        let accepts_null = self.accepts_null();
        if accepts_null && input.is_null() {
            return Ok(Value::Null);
        }
        match &self.allowed_types {
            Some(kinds) => {
                let mut expected = kinds.clone();
                expected.retain(|kind| *kind != ValueKind::None);
                if accepts_null {
                    expected.push(ValueKind::None);
                }
                ensure_type(input, &expected)?;
            }
            None => ensure_not_null(input)?,
        }
        Ok(input.clone())
    }
}
