//! Default values for absent record fields.

use std::fmt;
use std::sync::Arc;

use crate::validation::domain::Value;

type Factory = Arc<dyn Fn() -> Value + Send + Sync>;

/// What happens when a record field is absent from the input.
///
/// Every resolution yields an independent value: constants are cloned and
/// factories are called again, so mutating one record never leaks into the
/// next.
///
/// # Examples
///
/// ```
/// use validata::record::FieldDefault;
/// use validata::validation::domain::Value;
///
/// let tags = FieldDefault::factory(Vec::<Value>::new);
/// assert_eq!(tags.resolve(), Some(Value::List(Vec::new())));
///
/// assert!(FieldDefault::Required.is_required());
/// assert_eq!(FieldDefault::Unset.resolve(), None);
/// ```
#[derive(Clone, Default)]
pub enum FieldDefault {
    /// The field must be present.
    #[default]
    Required,
    /// A value cloned on every resolution.
    Constant(Value),
    /// A function called on every resolution.
    Factory(Factory),
    /// The field is left out of the field map; the record type supplies its
    /// own default during construction.
    Unset,
}

impl FieldDefault {
    /// Creates a constant default.
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    /// Creates a default that calls `factory` on every resolution.
    #[must_use]
    pub fn factory<F, T>(factory: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Into<Value>,
    {
        Self::Factory(Arc::new(move || factory().into()))
    }

    /// Creates a constant `Null` default.
    #[must_use]
    pub const fn null() -> Self {
        Self::Constant(Value::Null)
    }

    /// Returns `true` if the field must be present.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }

    /// Produces the value to insert for an absent field, if any.
    #[must_use]
    pub fn resolve(&self) -> Option<Value> {
        match self {
            Self::Constant(value) => Some(value.clone()),
            Self::Factory(factory) => Some(factory()),
            Self::Required | Self::Unset => None,
        }
    }
}

impl PartialEq for FieldDefault {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Required, Self::Required) | (Self::Unset, Self::Unset) => true,
            (Self::Constant(left), Self::Constant(right)) => left == right,
            (Self::Factory(left), Self::Factory(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
            Self::Unset => f.write_str("Unset"),
        }
    }
}
