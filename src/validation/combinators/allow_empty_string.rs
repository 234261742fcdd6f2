//! Empty-string wrapper.

use super::widen_expected_types;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::ports::{ValidationResult, Validator};

/// Accepts the empty string in addition to what `inner` accepts.
///
/// `""` yields a clone of the default, which is `V::Output::default()`
/// unless set. An `invalid_type` error from `inner` also lists `str`.
#[derive(Debug, Clone)]
pub struct AllowEmptyString<V: Validator> {
    inner: V,
    default: V::Output,
}

impl<V> AllowEmptyString<V>
where
    V: Validator,
    V::Output: Default,
{
    /// Wraps `inner`, mapping `""` to the output type's default.
    #[must_use]
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            default: V::Output::default(),
        }
    }
}

impl<V: Validator> AllowEmptyString<V> {
    /// Wraps `inner`, mapping `""` to `default`.
    #[must_use]
    pub const fn with_default(inner: V, default: V::Output) -> Self {
        Self { inner, default }
    }
}

impl<V> Validator for AllowEmptyString<V>
where
    V: Validator,
    V::Output: Clone + Send + Sync,
{
    type Output = V::Output;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<Self::Output> {
        if input.as_str().is_some_and(str::is_empty) {
            return Ok(self.default.clone());
        }
        self.inner
            .validate(input, context)
            .map_err(|err| widen_expected_types(err, ValueKind::Str))
    }
}
