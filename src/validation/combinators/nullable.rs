//! Nullable wrapper.

use super::widen_expected_types;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::ports::{ValidationResult, Validator};

/// Accepts the absence-sentinel in addition to what `inner` accepts.
///
/// `Null` yields a clone of the default, `None` unless set. Other input is
/// passed to `inner`; an `invalid_type` error from it also lists `none`.
///
/// # Examples
///
/// ```
/// use validata::validation::combinators::Nullable;
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::IntegerValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = Nullable::new(IntegerValidator::new()).with_default(0);
/// let context = Context::new();
///
/// assert_eq!(validator.validate(&Value::Null, &context).ok(), Some(Some(0)));
/// assert_eq!(validator.validate(&Value::Int(5), &context).ok(), Some(Some(5)));
///
/// let error = validator
///     .validate(&Value::from("x"), &context)
///     .expect_err("strings are rejected")
///     .into_validation()
///     .expect("input error");
/// assert_eq!(error.to_json()["expected_types"], serde_json::json!(["int", "none"]));
/// ```
#[derive(Debug, Clone)]
pub struct Nullable<V: Validator> {
    inner: V,
    default: Option<V::Output>,
}

impl<V: Validator> Nullable<V> {
    /// Wraps `inner`, mapping `Null` to `None`.
    #[must_use]
    pub const fn new(inner: V) -> Self {
        Self {
            inner,
            default: None,
        }
    }

    /// Maps `Null` to `Some(default)` instead.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<V::Output>) -> Self {
        self.default = Some(default.into());
        self
    }
}

impl<V> Validator for Nullable<V>
where
    V: Validator,
    V::Output: Clone + Send + Sync,
{
    type Output = Option<V::Output>;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<Self::Output> {
        if input.is_null() {
            return Ok(self.default.clone());
        }
        self.inner
            .validate(input, context)
            .map(Some)
            .map_err(|err| widen_expected_types(err, ValueKind::None))
    }
}
