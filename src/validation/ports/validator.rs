//! Validator port.
//!
//! Defines the interface every validator implements, its type-erased form and
//! the shared configuration knobs.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::validation::domain::{Context, Value};
use crate::validation::error::ValidatorError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidatorError>;

/// Port for validating and coercing a single input value.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Be immutable after construction and safe to share between threads
/// - Pass the context unchanged to every child validator
/// - Report bad input as [`ValidatorError::Invalid`] and reserve the other variants
///   for failures that are not the input's fault
pub trait Validator: Send + Sync {
    /// The coerced value produced on success.
    type Output;

    /// Validates `input` and returns the coerced output.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::Invalid`] if the input is rejected, or a fatal error
    /// variant if validation could not be carried out.
    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<Self::Output>;
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    type Output = V::Output;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<Self::Output> {
        (**self).validate(input, context)
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    type Output = V::Output;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<Self::Output> {
        (**self).validate(input, context)
    }
}

trait DynValidator: Send + Sync {
    fn validate_value(&self, input: &Value, context: &Context) -> ValidationResult<Value>;
}

struct IntoValue<V>(V);

impl<V> DynValidator for IntoValue<V>
where
    V: Validator,
    V::Output: Into<Value>,
{
    fn validate_value(&self, input: &Value, context: &Context) -> ValidationResult<Value> {
        self.0.validate(input, context).map(Into::into)
    }
}

struct Serialized<V>(V);

impl<V> DynValidator for Serialized<V>
where
    V: Validator,
    V::Output: Serialize,
{
    fn validate_value(&self, input: &Value, context: &Context) -> ValidationResult<Value> {
        let output = self.0.validate(input, context)?;
        Ok(Value::from(serde_json::to_value(output)?))
    }
}

struct FromFn<F>(F);

impl<F> DynValidator for FromFn<F>
where
    F: Fn(&Value, &Context) -> ValidationResult<Value> + Send + Sync,
{
    fn validate_value(&self, input: &Value, context: &Context) -> ValidationResult<Value> {
        (self.0)(input, context)
    }
}

/// A type-erased validator producing a dynamic [`Value`].
///
/// Dict and record validators hold one of these per field so that fields of
/// different output types can live in one map. Cloning is cheap.
///
/// # Examples
///
/// ```
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::IntegerValidator;
/// use validata::validation::ports::{BoxedValidator, Validator};
///
/// let boxed = BoxedValidator::new(IntegerValidator::new());
/// let output = boxed.validate(&Value::Int(3), &Context::new());
/// assert_eq!(output.ok(), Some(Value::Int(3)));
/// ```
#[derive(Clone)]
pub struct BoxedValidator(Arc<dyn DynValidator>);

impl BoxedValidator {
    /// Erases a validator whose output converts into a [`Value`].
    #[must_use]
    pub fn new<V>(validator: V) -> Self
    where
        V: Validator + 'static,
        V::Output: Into<Value>,
    {
        Self(Arc::new(IntoValue(validator)))
    }

    /// Erases a validator whose output is serialised into a [`Value`].
    ///
    /// Use this for outputs such as enums or nested records that have a
    /// serde representation but no [`Value`] conversion. Serialisation
    /// failures surface as [`ValidatorError::Construction`].
    #[must_use]
    pub fn serialized<V>(validator: V) -> Self
    where
        V: Validator + 'static,
        V::Output: Serialize,
    {
        Self(Arc::new(Serialized(validator)))
    }

    /// Wraps a closure as a validator.
    #[must_use]
    pub fn from_fn<F>(validate: F) -> Self
    where
        F: Fn(&Value, &Context) -> ValidationResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(FromFn(validate)))
    }
}

impl Validator for BoxedValidator {
    type Output = Value;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<Value> {
        self.0.validate_value(input, context)
    }
}

impl fmt::Debug for BoxedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BoxedValidator").finish_non_exhaustive()
    }
}

/// Configuration shared by validators.
///
/// # Examples
///
/// ```
/// use validata::validation::ports::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.max_allowed_values_in_error, 20);
///
/// let compact = ValidationConfig::compact();
/// assert_eq!(compact.max_allowed_values_in_error, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Allow-lists longer than this are omitted from `value_not_allowed`
    /// errors.
    pub max_allowed_values_in_error: usize,
    /// Decimal strings longer than this are rejected before parsing.
    pub max_decimal_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_allowed_values_in_error: 20,
            max_decimal_length: 40,
        }
    }
}

impl ValidationConfig {
    /// Creates a configuration that never lists allowed values in errors.
    ///
    /// Useful when allow-lists are confidential.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            max_allowed_values_in_error: 0,
            ..Self::default()
        }
    }

    /// Sets the maximum number of allowed values listed in errors.
    #[must_use]
    pub const fn with_max_allowed_values_in_error(mut self, limit: usize) -> Self {
        self.max_allowed_values_in_error = limit;
        self
    }

    /// Sets the maximum length of decimal strings.
    #[must_use]
    pub const fn with_max_decimal_length(mut self, limit: usize) -> Self {
        self.max_decimal_length = limit;
        self
    }
}
