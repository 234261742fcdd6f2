//! Error types for validation.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants that can
//! be inspected by callers. Three kinds of failure are kept apart:
//!
//! - [`ValidationError`]: the input is bad. Carries a stable code and, for
//!   aggregates, nested child errors mirroring the input's shape.
//! - [`ValidatorError`]: what `validate` returns. Either an input error or a fatal
//!   error (programmer mistake, failing callback) that aggregating
//!   validators never collect.
//! - [`SchemaError`]: a validator was constructed with invalid options.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::domain::ValueKind;
use crate::interval::RangeError;

/// Error code used by [`ErrorKind::Custom`] unless overridden.
pub const UNKNOWN_ERROR_CODE: &str = "unknown_error";

/// The structured payload of a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    /// The absence-sentinel was passed where a value is required.
    #[error("value is required")]
    RequiredValue,

    /// The field may not be set at all.
    #[error("field is not allowed")]
    FieldNotAllowed,

    /// The input has the wrong runtime type.
    #[error("invalid type, expected {}", format_kinds(.expected_types))]
    InvalidType {
        /// The accepted kinds.
        expected_types: Vec<ValueKind>,
    },

    /// A number is outside of the allowed range.
    #[error("number out of range")]
    NumberRange {
        /// Inclusive lower bound, if any.
        min_value: Option<serde_json::Value>,
        /// Inclusive upper bound, if any.
        max_value: Option<serde_json::Value>,
    },

    /// A string could not be parsed as an integer.
    #[error("invalid integer")]
    InvalidInteger,

    /// A string is not a canonical decimal literal.
    #[error("invalid decimal")]
    InvalidDecimal,

    /// A decimal has too few or too many decimal places.
    #[error("invalid number of decimal places")]
    DecimalPlaces {
        /// Minimum number of places, if any.
        min_places: Option<u32>,
        /// Maximum number of places, if any.
        max_places: Option<u32>,
    },

    /// A float is infinite or NaN.
    #[error("number is not finite")]
    NonFiniteNumber,

    /// A string is shorter than allowed.
    #[error("string is shorter than {min_length} characters")]
    StringTooShort {
        /// Minimum length in characters.
        min_length: usize,
        /// Maximum length in characters, if any.
        max_length: Option<usize>,
    },

    /// A string is longer than allowed.
    #[error("string is longer than {max_length} characters")]
    StringTooLong {
        /// Minimum length in characters, if any.
        min_length: Option<usize>,
        /// Maximum length in characters.
        max_length: usize,
    },

    /// A string contains non-printable characters or disallowed line breaks.
    #[error("string contains invalid characters")]
    StringInvalidCharacters,

    /// A string does not match the required pattern.
    #[error("string does not match the required format")]
    RegexMatch,

    /// The value is not part of the allow-list.
    #[error("value is not allowed")]
    ValueNotAllowed {
        /// The allow-list, omitted when too long to report.
        allowed_values: Option<Vec<serde_json::Value>>,
    },

    /// A string is not a `YYYY-MM-DD` date.
    #[error("invalid date, expected YYYY-MM-DD")]
    InvalidDate,

    /// A string is not a time in the expected format.
    #[error("invalid time, expected {time_format}")]
    InvalidTime {
        /// The accepted format, e.g. `HH:MM[:SS]`.
        time_format: String,
    },

    /// A string is not a datetime in the expected format.
    #[error("invalid datetime, expected {datetime_format}")]
    InvalidDateTime {
        /// The accepted format, e.g. `<DATE>T<TIME>[<TIMEZONE>]`.
        datetime_format: String,
    },

    /// A datetime lies outside of the allowed interval.
    #[error("datetime out of range")]
    DateTimeRange {
        /// ISO rendering of the resolved lower boundary, if any.
        lower_boundary: Option<String>,
        /// ISO rendering of the resolved upper boundary, if any.
        upper_boundary: Option<String>,
    },

    /// A list has too few or too many items.
    #[error("invalid list length")]
    ListLength {
        /// Minimum number of items, if any.
        min_length: Option<usize>,
        /// Maximum number of items, if any.
        max_length: Option<usize>,
    },

    /// One or more list items failed validation.
    #[error("invalid list items: {}", format_children(.0))]
    ListItems(BTreeMap<usize, ValidationError>),

    /// A map has a key that is not a string.
    #[error("dictionary keys must be strings")]
    DictInvalidKeyType,

    /// A required field is missing from a map.
    #[error("field is required")]
    RequiredField,

    /// One or more map fields failed validation.
    #[error("invalid fields: {}", format_children(.0))]
    DictFields(BTreeMap<String, ValidationError>),

    /// A record was constructed but failed a record-level check.
    #[error("post-validation failed")]
    PostValidation {
        /// A field-independent error.
        error: Option<Box<ValidationError>>,
        /// Errors attributed to individual fields.
        field_errors: BTreeMap<String, ValidationError>,
    },

    /// An error defined outside of this crate, identified by its code.
    #[error("validation failed")]
    Custom,
}

impl ErrorKind {
    /// Returns the stable machine-readable code of this kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RequiredValue => "required_value",
            Self::FieldNotAllowed => "field_not_allowed",
            Self::InvalidType { .. } => "invalid_type",
            Self::NumberRange { .. } => "number_range_error",
            Self::InvalidInteger => "invalid_integer",
            Self::InvalidDecimal => "invalid_decimal",
            Self::DecimalPlaces { .. } => "decimal_places",
            Self::NonFiniteNumber => "not_a_finite_number",
            Self::StringTooShort { .. } => "string_too_short",
            Self::StringTooLong { .. } => "string_too_long",
            Self::StringInvalidCharacters => "string_invalid_characters",
            Self::RegexMatch => "invalid_string_format",
            Self::ValueNotAllowed { .. } => "value_not_allowed",
            Self::InvalidDate => "invalid_date",
            Self::InvalidTime { .. } => "invalid_time",
            Self::InvalidDateTime { .. } => "invalid_datetime",
            Self::DateTimeRange { .. } => "datetime_range_error",
            Self::ListLength { .. } => "list_invalid_length",
            Self::ListItems(_) => "list_item_errors",
            Self::DictInvalidKeyType => "dict_invalid_key_type",
            Self::RequiredField => "required_field",
            Self::DictFields(_) => "field_errors",
            Self::PostValidation { .. } => "post_validation_errors",
            Self::Custom => UNKNOWN_ERROR_CODE,
        }
    }

    fn write_payload(&self, object: &mut serde_json::Map<String, serde_json::Value>) {
        match self {
            Self::InvalidType { expected_types } => {
                let mut names: Vec<&str> = expected_types.iter().map(|kind| kind.as_str()).collect();
                names.sort_unstable();
                names.dedup();
                match names.as_slice() {
                    [single] => insert(object, "expected_type", Some(*single)),
                    _ => insert(object, "expected_types", Some(names)),
                }
            }
            Self::NumberRange {
                min_value,
                max_value,
            } => {
                insert(object, "min_value", min_value.clone());
                insert(object, "max_value", max_value.clone());
            }
            Self::DecimalPlaces {
                min_places,
                max_places,
            } => {
                insert(object, "min_places", *min_places);
                insert(object, "max_places", *max_places);
            }
            Self::StringTooShort {
                min_length,
                max_length,
            } => {
                insert(object, "min_length", Some(*min_length));
                insert(object, "max_length", *max_length);
            }
            Self::StringTooLong {
                min_length,
                max_length,
            } => {
                insert(object, "min_length", *min_length);
                insert(object, "max_length", Some(*max_length));
            }
            Self::ListLength {
                min_length,
                max_length,
            } => {
                insert(object, "min_length", *min_length);
                insert(object, "max_length", *max_length);
            }
            Self::ValueNotAllowed { allowed_values } => {
                insert(object, "allowed_values", allowed_values.clone());
            }
            Self::InvalidDate => insert(object, "date_format", Some("YYYY-MM-DD")),
            Self::InvalidTime { time_format } => {
                insert(object, "time_format", Some(time_format.as_str()));
            }
            Self::InvalidDateTime { datetime_format } => {
                insert(object, "datetime_format", Some(datetime_format.as_str()));
            }
            Self::DateTimeRange {
                lower_boundary,
                upper_boundary,
            } => {
                insert(object, "lower_boundary", lower_boundary.clone());
                insert(object, "upper_boundary", upper_boundary.clone());
            }
            Self::ListItems(item_errors) => {
                object.insert("item_errors".to_owned(), children_to_json(item_errors));
            }
            Self::DictFields(field_errors) => {
                object.insert("field_errors".to_owned(), children_to_json(field_errors));
            }
            Self::PostValidation {
                error,
                field_errors,
            } => {
                if let Some(global) = error {
                    object.insert("error".to_owned(), global.to_json());
                }
                if !field_errors.is_empty() {
                    object.insert("field_errors".to_owned(), children_to_json(field_errors));
                }
            }
            Self::RequiredValue
            | Self::FieldNotAllowed
            | Self::InvalidInteger
            | Self::InvalidDecimal
            | Self::NonFiniteNumber
            | Self::StringInvalidCharacters
            | Self::RegexMatch
            | Self::DictInvalidKeyType
            | Self::RequiredField
            | Self::Custom => {}
        }
    }
}

/// A failure caused by bad input.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use validata::validation::domain::ValueKind;
/// use validata::validation::error::ValidationError;
///
/// let mut error = ValidationError::invalid_type([ValueKind::Int]);
/// error.add_expected_type(ValueKind::None);
///
/// assert_eq!(
///     error.to_json(),
///     json!({"code": "invalid_type", "expected_types": ["int", "none"]}),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", describe(.kind, .reason))]
pub struct ValidationError {
    kind: ErrorKind,
    code: Option<String>,
    reason: Option<String>,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl ValidationError {
    /// Creates an error of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            code: None,
            reason: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Creates a custom error identified only by its code.
    #[must_use]
    pub fn custom(code: impl Into<String>) -> Self {
        Self::new(ErrorKind::Custom).with_code(code)
    }

    /// Overrides the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attaches a human-readable reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches an extra named field to the rendered error.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Returns the structured payload.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_else(|| self.kind.code())
    }

    /// Returns the human-readable reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Returns the extra named fields.
    #[must_use]
    pub const fn extra(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    /// Returns `true` if this is an [`ErrorKind::InvalidType`] error.
    #[must_use]
    pub const fn is_invalid_type(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidType { .. })
    }

    /// Returns `true` if this error holds nested errors.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ListItems(_) | ErrorKind::DictFields(_) | ErrorKind::PostValidation { .. }
        )
    }

    /// Adds a kind to the expected types of an [`ErrorKind::InvalidType`]
    /// error, ignoring duplicates. Other kinds are left untouched.
    pub fn add_expected_type(&mut self, kind: ValueKind) {
        if let ErrorKind::InvalidType { expected_types } = &mut self.kind
            && !expected_types.contains(&kind)
        {
            expected_types.push(kind);
        }
    }

    /// Returns the per-field errors of a dict or post-validation aggregate.
    #[must_use]
    pub const fn field_errors(&self) -> Option<&BTreeMap<String, Self>> {
        match &self.kind {
            ErrorKind::DictFields(field_errors)
            | ErrorKind::PostValidation { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// Returns the per-index errors of a list aggregate.
    #[must_use]
    pub const fn item_errors(&self) -> Option<&BTreeMap<usize, Self>> {
        match &self.kind {
            ErrorKind::ListItems(item_errors) => Some(item_errors),
            _ => None,
        }
    }

    /// Renders the error, recursively, as a JSON object.
    ///
    /// The object always has a `code`, then `reason` if set, the kind's
    /// payload (bounds, expected types, nested errors) and any extra fields.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert("code".to_owned(), serde_json::Value::from(self.code()));
        if let Some(reason) = &self.reason {
            object.insert("reason".to_owned(), serde_json::Value::from(reason.as_str()));
        }
        self.kind.write_payload(&mut object);
        for (key, value) in &self.extra {
            object.insert(key.clone(), value.clone());
        }
        serde_json::Value::Object(object)
    }

    // Constructors for the built-in kinds.

    /// Creates a [`ErrorKind::RequiredValue`] error.
    #[must_use]
    pub fn required_value() -> Self {
        Self::new(ErrorKind::RequiredValue)
    }

    /// Creates a [`ErrorKind::FieldNotAllowed`] error.
    #[must_use]
    pub fn field_not_allowed() -> Self {
        Self::new(ErrorKind::FieldNotAllowed)
    }

    /// Creates an [`ErrorKind::InvalidType`] error.
    #[must_use]
    pub fn invalid_type(expected_types: impl IntoIterator<Item = ValueKind>) -> Self {
        Self::new(ErrorKind::InvalidType {
            expected_types: expected_types.into_iter().collect(),
        })
    }

    /// Creates a [`ErrorKind::NumberRange`] error.
    #[must_use]
    pub fn number_range(
        min_value: Option<serde_json::Value>,
        max_value: Option<serde_json::Value>,
    ) -> Self {
        Self::new(ErrorKind::NumberRange {
            min_value,
            max_value,
        })
    }

    /// Creates a [`ErrorKind::DecimalPlaces`] error.
    #[must_use]
    pub fn decimal_places(min_places: Option<u32>, max_places: Option<u32>) -> Self {
        Self::new(ErrorKind::DecimalPlaces {
            min_places,
            max_places,
        })
    }

    /// Creates a [`ErrorKind::ValueNotAllowed`] error.
    #[must_use]
    pub fn value_not_allowed(allowed_values: Option<Vec<serde_json::Value>>) -> Self {
        Self::new(ErrorKind::ValueNotAllowed { allowed_values })
    }

    /// Creates a [`ErrorKind::ListLength`] error.
    #[must_use]
    pub fn list_length(min_length: Option<usize>, max_length: Option<usize>) -> Self {
        Self::new(ErrorKind::ListLength {
            min_length,
            max_length,
        })
    }

    /// Creates a [`ErrorKind::ListItems`] aggregate.
    #[must_use]
    pub fn item_errors_of(item_errors: BTreeMap<usize, Self>) -> Self {
        Self::new(ErrorKind::ListItems(item_errors))
    }

    /// Creates a [`ErrorKind::DictFields`] aggregate.
    #[must_use]
    pub fn field_errors_of(field_errors: BTreeMap<String, Self>) -> Self {
        Self::new(ErrorKind::DictFields(field_errors))
    }

    /// Wraps a field-independent error into a post-validation aggregate.
    ///
    /// An error that already is a post-validation aggregate is returned
    /// unchanged.
    #[must_use]
    pub fn post_validation(error: Self) -> Self {
        if matches!(error.kind, ErrorKind::PostValidation { .. }) {
            return error;
        }
        Self::new(ErrorKind::PostValidation {
            error: Some(Box::new(error)),
            field_errors: BTreeMap::new(),
        })
    }

    /// Creates a post-validation aggregate holding per-field errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use serde_json::json;
    /// use validata::validation::error::ValidationError;
    ///
    /// let error = ValidationError::post_validation_fields(BTreeMap::from([(
    ///     "end".to_owned(),
    ///     ValidationError::custom("end_before_start"),
    /// )]));
    /// assert_eq!(
    ///     error.to_json(),
    ///     json!({
    ///         "code": "post_validation_errors",
    ///         "field_errors": {"end": {"code": "end_before_start"}},
    ///     }),
    /// );
    /// ```
    #[must_use]
    pub fn post_validation_fields(field_errors: BTreeMap<String, Self>) -> Self {
        Self::new(ErrorKind::PostValidation {
            error: None,
            field_errors,
        })
    }
}

impl From<ErrorKind> for ValidationError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Errors returned by validators.
///
/// Only [`ValidatorError::Invalid`] describes bad input. Every other variant is fatal:
/// aggregating validators propagate it immediately instead of collecting it.
#[derive(Debug, Clone, Error)]
pub enum ValidatorError {
    /// The input failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Datetimes could not be compared, e.g. an offset-aware input against a
    /// naive boundary without a local timezone.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A record could not be built from the validated field map.
    #[error("record construction failed: {0}")]
    Construction(Arc<serde_json::Error>),

    /// A caller-supplied callback failed.
    #[error("callback failed: {0}")]
    Callback(Arc<dyn std::error::Error + Send + Sync>),
}

impl ValidatorError {
    /// Wraps a callback error.
    #[must_use]
    pub fn callback(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(err))
    }

    /// Returns the input error, if this is one.
    #[must_use]
    pub const fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// Converts into the input error, if this is one.
    #[must_use]
    pub fn into_validation(self) -> Option<ValidationError> {
        match self {
            Self::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// Returns `true` if this error describes bad input.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

impl From<ErrorKind> for ValidatorError {
    fn from(kind: ErrorKind) -> Self {
        Self::Invalid(ValidationError::new(kind))
    }
}

impl From<serde_json::Error> for ValidatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Construction(Arc::new(err))
    }
}

/// Errors raised when a validator is configured with invalid options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A lower bound is greater than its upper bound.
    #[error("parameter \"{min}\" cannot be greater than \"{max}\"")]
    InvertedBounds {
        /// Name of the lower-bound parameter.
        min: &'static str,
        /// Name of the upper-bound parameter.
        max: &'static str,
    },

    /// An allow-list has no values.
    #[error("allowed values must not be empty")]
    EmptyAllowedValues,

    /// A type allow-list has no types.
    #[error("allowed types must not be empty, use a reject validator instead")]
    EmptyAllowedTypes,

    /// A target timezone was set for a format accepting naive datetimes
    /// without a local timezone to interpret them.
    #[error("a local timezone is required when a target timezone is set and local datetimes are allowed")]
    MissingLocalTimezone,

    /// A regular expression failed to compile.
    #[error("invalid regular expression: {0}")]
    InvalidPattern(String),

    /// A dict validator has neither field validators nor a default validator.
    #[error("at least one field validator or a default validator must be specified")]
    NoFieldValidators,

    /// Required and optional field lists were both given.
    #[error("required fields and optional fields cannot be combined")]
    ConflictingFieldSets,

    /// A field name was declared more than once.
    #[error("duplicate field \"{0}\"")]
    DuplicateField(String),

    /// An enum variant could not be serialised to a value.
    #[error("enum variant could not be serialised: {0}")]
    InvalidEnumVariant(String),

    /// An output scale exceeds what a [`rust_decimal::Decimal`] can hold.
    #[error("output places {places} exceed the maximum decimal scale of {max}")]
    ScaleTooLarge {
        /// Requested number of places.
        places: u32,
        /// Largest supported scale.
        max: u32,
    },

    /// A datetime range was configured incorrectly.
    #[error(transparent)]
    Range(#[from] RangeError),
}

fn describe(kind: &ErrorKind, reason: &Option<String>) -> String {
    reason
        .as_ref()
        .map_or_else(|| kind.to_string(), |text| format!("{kind}: {text}"))
}

fn format_kinds(kinds: &[ValueKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_children<K: Display>(children: &BTreeMap<K, ValidationError>) -> String {
    children
        .iter()
        .map(|(key, error)| format!("{key}: {error}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn children_to_json<K: Display>(children: &BTreeMap<K, ValidationError>) -> serde_json::Value {
    serde_json::Value::Object(
        children
            .iter()
            .map(|(key, error)| (key.to_string(), error.to_json()))
            .collect(),
    )
}

fn insert<T: Serialize>(
    object: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
    value: Option<T>,
) {
    if let Some(json) = value.and_then(|inner| serde_json::to_value(inner).ok()) {
        object.insert(key.to_owned(), json);
    }
}
