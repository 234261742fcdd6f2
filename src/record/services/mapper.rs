//! Record mapper.
//!
//! Drives field validation, default resolution, record construction and the
//! validation hooks.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::record::domain::{Field, FieldDefault};
use crate::validation::combinators::DictValidator;
use crate::validation::domain::{Context, FieldMap, Value, ValueKind};
use crate::validation::error::{SchemaError, ValidationError, ValidatorError};
use crate::validation::leaf::ensure_type;
use crate::validation::ports::{ValidationResult, Validator};

type Constructor<T> = Arc<dyn Fn(FieldMap) -> ValidationResult<T> + Send + Sync>;
type PreHook = Arc<dyn Fn(Value, &Context) -> ValidationResult<Value> + Send + Sync>;
type PostHook<T> = Arc<dyn Fn(&T, &Context) -> ValidationResult<()> + Send + Sync>;

/// Validates a map into a typed record.
///
/// Validation runs in five steps:
///
/// 1. The optional pre-validation hook rewrites the raw input map.
/// 2. Every field is validated; fields with [`FieldDefault::Required`] must
///    be present. All field errors are reported together.
/// 3. Defaults are resolved for absent optional fields.
/// 4. The record is constructed, by default through serde.
/// 5. The optional post-validation hook checks the record.
///
/// An input error raised in steps 4 or 5 is reported as a single
/// `post_validation_errors` error. Other errors propagate unchanged.
///
/// # Examples
///
/// ```
/// use serde::Deserialize;
/// use serde_json::json;
/// use validata::record::{Field, FieldDefault, RecordValidator};
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::error::ValidationError;
/// use validata::validation::leaf::IntegerValidator;
/// use validata::validation::ports::Validator;
///
/// #[derive(Debug, Deserialize)]
/// struct Window {
///     start: i64,
///     end: i64,
/// }
///
/// let validator = RecordValidator::<Window>::new([
///     Field::required("start", IntegerValidator::new()),
///     Field::optional("end", IntegerValidator::new(), FieldDefault::constant(100)),
/// ])?
/// .with_post_validate(|window: &Window, _context: &Context| {
///     if window.end < window.start {
///         return Err(ValidationError::custom("end_before_start").into());
///     }
///     Ok(())
/// });
///
/// let window = validator.validate(&Value::from(json!({"start": 5})), &Context::new())?;
/// assert_eq!(window.end, 100);
///
/// let error = validator
///     .validate(&Value::from(json!({"start": 5, "end": 1})), &Context::new())
///     .expect_err("end lies before start")
///     .into_validation()
///     .expect("input error");
/// assert_eq!(
///     error.to_json(),
///     json!({"code": "post_validation_errors", "error": {"code": "end_before_start"}}),
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct RecordValidator<T> {
    dict: DictValidator,
    defaults: Vec<(String, FieldDefault)>,
    construct: Constructor<T>,
    pre_validate: Option<PreHook>,
    post_validate: Option<PostHook<T>>,
}

impl<T: DeserializeOwned + 'static> RecordValidator<T> {
    /// Creates a record validator that constructs records through serde.
    ///
    /// Deserialisation failures are fatal [`ValidatorError::Construction`]
    /// errors; they indicate a schema that does not fit the record type.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] if a field name repeats, or
    /// [`SchemaError::NoFieldValidators`] if no field is given.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Result<Self, SchemaError> {
        Self::with_constructor(fields, deserialize_record)
    }
}

impl<T> RecordValidator<T> {
    /// Creates a record validator with a custom constructor.
    ///
    /// An input error returned by `construct` is reported as a
    /// post-validation error.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateField`] if a field name repeats, or
    /// [`SchemaError::NoFieldValidators`] if no field is given.
    pub fn with_constructor<F>(
        fields: impl IntoIterator<Item = Field>,
        construct: F,
    ) -> Result<Self, SchemaError>
    where
        F: Fn(FieldMap) -> ValidationResult<T> + Send + Sync + 'static,
    {
        let mut names = BTreeSet::new();
        let mut required = Vec::new();
        let mut defaults = Vec::new();
        let mut builder = DictValidator::builder();
        for field in fields {
            if !names.insert(field.name().to_owned()) {
                return Err(SchemaError::DuplicateField(field.name().to_owned()));
            }
            if field.default().is_required() {
                required.push(field.name().to_owned());
            } else {
                defaults.push((field.name().to_owned(), field.default().clone()));
            }
            builder = builder.boxed_field(field.name(), field.validator().clone());
        }
        let dict = builder.required_fields(required).build()?;
        Ok(Self {
            dict,
            defaults,
            construct: Arc::new(construct),
            pre_validate: None,
            post_validate: None,
        })
    }

    /// Sets a hook that rewrites the raw input map before field validation.
    #[must_use]
    pub fn with_pre_validate<F>(mut self, hook: F) -> Self
    where
        F: Fn(Value, &Context) -> ValidationResult<Value> + Send + Sync + 'static,
    {
        self.pre_validate = Some(Arc::new(hook));
        self
    }

    /// Sets a hook that checks the constructed record.
    #[must_use]
    pub fn with_post_validate<F>(mut self, hook: F) -> Self
    where
        F: Fn(&T, &Context) -> ValidationResult<()> + Send + Sync + 'static,
    {
        self.post_validate = Some(Arc::new(hook));
        self
    }

    /// Returns the names of the required fields.
    #[must_use]
    pub const fn required_fields(&self) -> &BTreeSet<String> {
        self.dict.required_fields()
    }

    fn prepare<'a>(&self, input: &'a Value, context: &Context) -> ValidationResult<Cow<'a, Value>> {
        let Some(hook) = &self.pre_validate else {
            return Ok(Cow::Borrowed(input));
        };
        ensure_type(input, &[ValueKind::Dict])?;
        hook(input.clone(), context).map(Cow::Owned)
    }

    fn fill_defaults(&self, fields: &mut FieldMap) {
        for (name, default) in &self.defaults {
            if fields.contains_key(name) {
                continue;
            }
            if let Some(value) = default.resolve() {
                tracing::trace!(field = %name, "resolved default for absent field");
                fields.insert(name.clone(), value);
            }
        }
    }
}

impl<T> Validator for RecordValidator<T> {
    type Output = T;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<T> {
        let prepared = self.prepare(input, context)?;
        let mut fields = self.dict.validate(&prepared, context).inspect_err(|err| {
            if let Some(error) = err.as_validation() {
                tracing::debug!(
                    code = error.code(),
                    field_errors = error.field_errors().map_or(0, |errors| errors.len()),
                    "record field validation failed"
                );
            }
        })?;
        self.fill_defaults(&mut fields);

        let record = (self.construct)(fields).map_err(into_post_validation)?;
        if let Some(hook) = &self.post_validate {
            hook(&record, context).map_err(into_post_validation)?;
        }
        Ok(record)
    }
}

impl<T> Clone for RecordValidator<T> {
    fn clone(&self) -> Self {
        Self {
            dict: self.dict.clone(),
            defaults: self.defaults.clone(),
            construct: Arc::clone(&self.construct),
            pre_validate: self.pre_validate.clone(),
            post_validate: self.post_validate.clone(),
        }
    }
}

impl<T> fmt::Debug for RecordValidator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordValidator")
            .field("dict", &self.dict)
            .field("defaults", &self.defaults)
            .field("pre_validate", &self.pre_validate.is_some())
            .field("post_validate", &self.post_validate.is_some())
            .finish_non_exhaustive()
    }
}

fn deserialize_record<T: DeserializeOwned>(fields: FieldMap) -> ValidationResult<T> {
    Ok(serde_json::from_value(Value::from(fields).to_json())?)
}

fn into_post_validation(err: ValidatorError) -> ValidatorError {
    match err {
        ValidatorError::Invalid(error) => {
            tracing::debug!(code = error.code(), "record post-validation failed");
            ValidatorError::Invalid(ValidationError::post_validation(error))
        }
        fatal => fatal,
    }
}
