//! Record field descriptor.

use crate::validation::domain::Value;
use crate::validation::ports::{BoxedValidator, Validator};

use super::FieldDefault;

/// A named record field with its validator and default.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    validator: BoxedValidator,
    default: FieldDefault,
}

impl Field {
    /// Creates a field from an already type-erased validator.
    #[must_use]
    pub fn new(name: impl Into<String>, validator: BoxedValidator, default: FieldDefault) -> Self {
        Self {
            name: name.into(),
            validator,
            default,
        }
    }

    /// Creates a field that must be present.
    #[must_use]
    pub fn required<V>(name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
        V::Output: Into<Value>,
    {
        Self::new(name, BoxedValidator::new(validator), FieldDefault::Required)
    }

    /// Creates a field that falls back to `default` when absent.
    #[must_use]
    pub fn optional<V>(name: impl Into<String>, validator: V, default: FieldDefault) -> Self
    where
        V: Validator + 'static,
        V::Output: Into<Value>,
    {
        Self::new(name, BoxedValidator::new(validator), default)
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field validator.
    #[must_use]
    pub const fn validator(&self) -> &BoxedValidator {
        &self.validator
    }

    /// Returns the field default.
    #[must_use]
    pub const fn default(&self) -> &FieldDefault {
        &self.default
    }
}
