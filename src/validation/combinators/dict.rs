//! Dict validator.

use std::collections::{BTreeMap, BTreeSet};

use super::collectable;
use crate::validation::domain::{Context, FieldMap, MapKey, Value, ValueKind};
use crate::validation::error::{ErrorKind, SchemaError, ValidationError};
use crate::validation::leaf::ensure_type;
use crate::validation::ports::{BoxedValidator, ValidationResult, Validator};

/// Validates a map with string keys field by field.
///
/// Present keys are validated by their field validator, or the default
/// validator if there is none; keys with neither are dropped. Every field is
/// validated and all failures, including missing required fields, are
/// reported together under `field_errors`.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validata::validation::combinators::DictValidator;
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::{IntegerValidator, StringValidator};
/// use validata::validation::ports::Validator;
///
/// let validator = DictValidator::builder()
///     .field("id", IntegerValidator::new())
///     .field("name", StringValidator::new())
///     .optional_fields(["name"])
///     .build()?;
///
/// let output = validator.validate(&Value::from(json!({"id": 1, "extra": true})), &Context::new());
/// assert_eq!(output.ok().map(|fields| fields.len()), Some(1));
/// # Ok::<(), validata::validation::error::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DictValidator {
    fields: BTreeMap<String, BoxedValidator>,
    default_validator: Option<BoxedValidator>,
    required_fields: BTreeSet<String>,
}

impl DictValidator {
    /// Starts building a dict validator.
    #[must_use]
    pub fn builder() -> DictValidatorBuilder {
        DictValidatorBuilder::default()
    }

    /// Returns the names of the required fields.
    #[must_use]
    pub const fn required_fields(&self) -> &BTreeSet<String> {
        &self.required_fields
    }

    fn validator_for(&self, name: &str) -> Option<&BoxedValidator> {
        self.fields.get(name).or(self.default_validator.as_ref())
    }
}

impl Validator for DictValidator {
    type Output = FieldMap;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<FieldMap> {
        ensure_type(input, &[ValueKind::Dict])?;
        let Value::Map(entries) = input else {
            return Err(ValidationError::invalid_type([ValueKind::Dict]).into());
        };
        if entries.keys().any(|key| key.as_str().is_none()) {
            return Err(ValidationError::new(ErrorKind::DictInvalidKeyType).into());
        }

        let mut field_errors = BTreeMap::new();
        for name in &self.required_fields {
            if !entries.contains_key(&MapKey::Str(name.clone())) {
                field_errors.insert(name.clone(), ValidationError::new(ErrorKind::RequiredField));
            }
        }

        let mut validated = FieldMap::new();
        for (key, value) in entries {
            let Some(name) = key.as_str() else {
                continue;
            };
            let Some(validator) = self.validator_for(name) else {
                tracing::trace!(field = %name, "ignoring field without validator");
                continue;
            };
            match collectable(validator.validate(value, context))? {
                Ok(output) => {
                    validated.insert(name.to_owned(), output);
                }
                Err(error) => {
                    field_errors.insert(name.to_owned(), error);
                }
            }
        }

        if !field_errors.is_empty() {
            return Err(ValidationError::field_errors_of(field_errors).into());
        }
        Ok(validated)
    }
}

/// Builder for [`DictValidator`].
#[derive(Debug, Clone, Default)]
pub struct DictValidatorBuilder {
    fields: BTreeMap<String, BoxedValidator>,
    default_validator: Option<BoxedValidator>,
    required_fields: Option<BTreeSet<String>>,
    optional_fields: Option<BTreeSet<String>>,
}

impl DictValidatorBuilder {
    /// Adds a field validator, replacing any previous one for `name`.
    #[must_use]
    pub fn field<V>(self, name: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
        V::Output: Into<Value>,
    {
        self.boxed_field(name, BoxedValidator::new(validator))
    }

    /// Adds an already type-erased field validator.
    #[must_use]
    pub fn boxed_field(mut self, name: impl Into<String>, validator: BoxedValidator) -> Self {
        self.fields.insert(name.into(), validator);
        self
    }

    /// Sets the validator for keys without a field validator.
    #[must_use]
    pub fn default_validator<V>(mut self, validator: V) -> Self
    where
        V: Validator + 'static,
        V::Output: Into<Value>,
    {
        self.default_validator = Some(BoxedValidator::new(validator));
        self
    }

    /// Replaces the required set, which otherwise holds every field.
    #[must_use]
    pub fn required_fields<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.required_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Removes fields from the required set.
    #[must_use]
    pub fn optional_fields<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.optional_fields = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NoFieldValidators`] if neither a field nor a
    /// default validator was added, or [`SchemaError::ConflictingFieldSets`]
    /// if both required and optional fields were given.
    pub fn build(self) -> Result<DictValidator, SchemaError> {
        if self.fields.is_empty() && self.default_validator.is_none() {
            return Err(SchemaError::NoFieldValidators);
        }
        let required_fields = match (self.required_fields, self.optional_fields) {
            (Some(_), Some(_)) => return Err(SchemaError::ConflictingFieldSets),
            (Some(required), None) => required,
            (None, Some(optional)) => self
                .fields
                .keys()
                .filter(|name| !optional.contains(*name))
                .cloned()
                .collect(),
            (None, None) => self.fields.keys().cloned().collect(),
        };
        Ok(DictValidator {
            fields: self.fields,
            default_validator: self.default_validator,
            required_fields,
        })
    }
}
