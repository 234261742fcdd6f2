//! Allow-list validators.

use serde::Serialize;

use super::ensure_type;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::{SchemaError, ValidationError};
use crate::validation::ports::{ValidationConfig, ValidationResult, Validator};

/// Validates that the input equals one of a fixed list of values.
///
/// Strings are compared case-insensitively unless
/// [`AnyOfValidator::case_sensitive`] is set. The *declared* value is
/// returned, so `"RED"` validated against `["Red"]` yields `"Red"`. Values of
/// different kinds never compare equal, so `1` does not match `1.0`.
///
/// # Examples
///
/// ```
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::AnyOfValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = AnyOfValidator::new(["Red", "Green"])?;
/// let context = Context::new();
///
/// assert_eq!(validator.validate(&Value::from("RED"), &context).ok(), Some(Value::from("Red")));
/// let error = validator
///     .validate(&Value::from("Blue"), &context)
///     .expect_err("not listed")
///     .into_validation()
///     .expect("input error");
/// assert_eq!(error.to_json()["allowed_values"], serde_json::json!(["Red", "Green"]));
/// # Ok::<(), validata::validation::error::SchemaError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnyOfValidator {
    allowed_values: Vec<Value>,
    allowed_types: Vec<ValueKind>,
    case_sensitive: bool,
    config: ValidationConfig,
}

impl AnyOfValidator {
    /// Creates a validator for the given allow-list.
    ///
    /// The accepted kinds default to the kinds of the listed values.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyAllowedValues`] if the list is empty.
    pub fn new<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Result<Self, SchemaError> {
        let allowed_values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if allowed_values.is_empty() {
            return Err(SchemaError::EmptyAllowedValues);
        }
        let mut allowed_types: Vec<ValueKind> = allowed_values.iter().map(Value::kind).collect();
        allowed_types.sort_unstable();
        allowed_types.dedup();
        Ok(Self {
            allowed_values,
            allowed_types,
            case_sensitive: false,
            config: ValidationConfig::default(),
        })
    }

    /// Overrides the accepted kinds.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::EmptyAllowedTypes`] if no kind is given.
    pub fn with_allowed_types(
        mut self,
        kinds: impl IntoIterator<Item = ValueKind>,
    ) -> Result<Self, SchemaError> {
        let allowed_types: Vec<ValueKind> = kinds.into_iter().collect();
        if allowed_types.is_empty() {
            return Err(SchemaError::EmptyAllowedTypes);
        }
        self.allowed_types = allowed_types;
        Ok(self)
    }

    /// Compares strings case-sensitively.
    #[must_use]
    pub const fn case_sensitive(mut self, enabled: bool) -> Self {
        self.case_sensitive = enabled;
        self
    }

    /// Applies a validation configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the allow-list.
    #[must_use]
    pub fn allowed_values(&self) -> &[Value] {
        &self.allowed_values
    }

    fn matches(&self, input: &Value, allowed: &Value) -> bool {
        match (input, allowed) {
            (Value::Str(given), Value::Str(listed)) if !self.case_sensitive => {
                given.to_lowercase() == listed.to_lowercase()
            }
            _ => input == allowed,
        }
    }

    fn not_allowed(&self) -> ValidationError {
        if self.allowed_values.len() > self.config.max_allowed_values_in_error {
            return ValidationError::value_not_allowed(None);
        }
        ValidationError::value_not_allowed(Some(
            self.allowed_values.iter().map(Value::to_json).collect(),
        ))
    }
}

impl Validator for AnyOfValidator {
    type Output = Value;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<Value> {
        if input.is_null() && self.allowed_values.contains(&Value::Null) {
            return Ok(Value::Null);
        }
        ensure_type(input, &self.allowed_types)?;
        self.allowed_values
            .iter()
            .find(|allowed| self.matches(input, allowed))
            .cloned()
            .ok_or_else(|| self.not_allowed().into())
    }
}

/// Validates the serialised form of an enum's variants and returns the
/// matching variant.
///
/// Rust enums cannot be enumerated at runtime, so the accepted variants are
/// passed explicitly. Passing a subset restricts the accepted values.
///
/// # Examples
///
/// ```
/// use serde::Serialize;
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::EnumValidator;
/// use validata::validation::ports::Validator;
///
/// #[derive(Debug, Clone, PartialEq, Serialize)]
/// #[serde(rename_all = "lowercase")]
/// enum Colour {
///     Red,
///     Green,
/// }
///
/// let validator = EnumValidator::new([Colour::Red, Colour::Green])?;
/// let output = validator.validate(&Value::from("GREEN"), &Context::new());
/// assert_eq!(output.ok(), Some(Colour::Green));
/// # Ok::<(), validata::validation::error::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct EnumValidator<E> {
    any_of: AnyOfValidator,
    variants: Vec<(Value, E)>,
}

impl<E: Serialize + Clone> EnumValidator<E> {
    /// Creates a validator accepting the given variants.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidEnumVariant`] if a variant cannot be
    /// serialised, or [`SchemaError::EmptyAllowedValues`] if no variant is
    /// given.
    pub fn new(accepted: impl IntoIterator<Item = E>) -> Result<Self, SchemaError> {
        let variants = accepted
            .into_iter()
            .map(|variant| {
                serde_json::to_value(&variant)
                    .map(|json| (Value::from(json), variant))
                    .map_err(|err| SchemaError::InvalidEnumVariant(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let any_of = AnyOfValidator::new(variants.iter().map(|(value, _)| value.clone()))?;
        Ok(Self { any_of, variants })
    }

    /// Compares strings case-sensitively.
    #[must_use]
    pub fn case_sensitive(mut self, enabled: bool) -> Self {
        self.any_of = self.any_of.case_sensitive(enabled);
        self
    }

    /// Applies a validation configuration.
    #[must_use]
    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.any_of = self.any_of.with_config(config);
        self
    }
}

impl<E: Clone + Send + Sync> Validator for EnumValidator<E> {
    type Output = E;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<E> {
        let matched = self.any_of.validate(input, context)?;
        self.variants
            .iter()
            .find(|(value, _)| *value == matched)
            .map(|(_, variant)| variant.clone())
            .ok_or_else(|| ValidationError::value_not_allowed(None).into())
    }
}
