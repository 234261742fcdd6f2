//! List validator.

use std::collections::BTreeMap;

use super::collectable;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::{SchemaError, ValidationError};
use crate::validation::leaf::ensure_type;
use crate::validation::ports::{ValidationResult, Validator};

/// Validates a list by validating every item with the same validator.
///
/// Length bounds are checked before any item. Every item is validated, and
/// all failing indices are reported together under `item_errors`. With
/// [`ListValidator::discard_invalid`] failing items are dropped instead, and
/// the minimum length is checked again against the remaining items.
///
/// # Examples
///
/// ```
/// use validata::validation::combinators::ListValidator;
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::IntegerValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = ListValidator::new(IntegerValidator::new()).discard_invalid(true);
/// let input = Value::from(vec![Value::Int(1), Value::from("x"), Value::Int(3)]);
/// assert_eq!(validator.validate(&input, &Context::new()).ok(), Some(vec![1, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct ListValidator<V> {
    item: V,
    min_length: Option<usize>,
    max_length: Option<usize>,
    discard_invalid: bool,
}

impl<V: Validator> ListValidator<V> {
    /// Creates a list validator of any length.
    #[must_use]
    pub const fn new(item: V) -> Self {
        Self {
            item,
            min_length: None,
            max_length: None,
            discard_invalid: false,
        }
    }

    /// Sets length bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvertedBounds`] if `min_length > max_length`.
    pub fn with_length(
        mut self,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Result<Self, SchemaError> {
        if let (Some(min), Some(max)) = (min_length, max_length)
            && min > max
        {
            return Err(SchemaError::InvertedBounds {
                min: "min_length",
                max: "max_length",
            });
        }
        self.min_length = min_length;
        self.max_length = max_length;
        Ok(self)
    }

    /// Drops invalid items instead of failing.
    #[must_use]
    pub const fn discard_invalid(mut self, discard: bool) -> Self {
        self.discard_invalid = discard;
        self
    }

    fn length_error(&self) -> ValidationError {
        ValidationError::list_length(self.min_length, self.max_length)
    }
}

impl<V: Validator> Validator for ListValidator<V>
where
    V::Output: Send + Sync,
{
    type Output = Vec<V::Output>;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<Self::Output> {
        ensure_type(input, &[ValueKind::List])?;
        let Value::List(items) = input else {
            return Err(ValidationError::invalid_type([ValueKind::List]).into());
        };

        let too_short = self.min_length.is_some_and(|min| items.len() < min);
        let too_long = self.max_length.is_some_and(|max| items.len() > max);
        if too_short || too_long {
            return Err(self.length_error().into());
        }

        let mut outputs = Vec::with_capacity(items.len());
        let mut item_errors = BTreeMap::new();
        for (index, item) in items.iter().enumerate() {
            match collectable(self.item.validate(item, context))? {
                Ok(output) => outputs.push(output),
                Err(error) => {
                    item_errors.insert(index, error);
                }
            }
        }

        if self.discard_invalid {
            if self.min_length.is_some_and(|min| outputs.len() < min) {
                return Err(self.length_error().into());
            }
        } else if !item_errors.is_empty() {
            return Err(ValidationError::item_errors_of(item_errors).into());
        }
        Ok(outputs)
    }
}
