//! Regular expression validator.

use regex::Regex;

use super::StringValidator;
use crate::validation::domain::{Context, Value};
use crate::validation::error::{ErrorKind, SchemaError, ValidationError};
use crate::validation::ports::{ValidationResult, Validator};

/// Validates strings that fully match a regular expression.
///
/// The string is first checked by an inner [`StringValidator`]. The pattern
/// must match the whole string. An optional output template rewrites the
/// result from capture groups using `$1` / `${name}` references.
///
/// # Examples
///
/// ```
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::RegexValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = RegexValidator::new(r"(\d{4})-(\d{2})")?.with_output_template("$2/$1");
/// let output = validator.validate(&Value::from("2024-05"), &Context::new());
/// assert_eq!(output.ok().as_deref(), Some("05/2024"));
///
/// assert!(validator.validate(&Value::from("x2024-05"), &Context::new()).is_err());
/// # Ok::<(), validata::validation::error::SchemaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RegexValidator {
    string: StringValidator,
    pattern: Regex,
    output_template: Option<String>,
    error_code: Option<String>,
    allow_empty: bool,
}

impl RegexValidator {
    /// Creates a validator for the given pattern.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn new(pattern: &str) -> Result<Self, SchemaError> {
        let anchored = format!(r"\A(?:{pattern})\z");
        let compiled =
            Regex::new(&anchored).map_err(|err| SchemaError::InvalidPattern(err.to_string()))?;
        Ok(Self {
            string: StringValidator::new(),
            pattern: compiled,
            output_template: None,
            error_code: None,
            allow_empty: false,
        })
    }

    /// Replaces the inner string validator, e.g. to bound the length.
    #[must_use]
    pub const fn with_string_validator(mut self, string: StringValidator) -> Self {
        self.string = string;
        self
    }

    /// Sets a template expanded from the capture groups on success.
    #[must_use]
    pub fn with_output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    /// Overrides the error code reported on mismatch.
    #[must_use]
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Accepts the empty string without matching it against the pattern.
    #[must_use]
    pub const fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    fn mismatch(&self) -> ValidationError {
        let error = ValidationError::new(ErrorKind::RegexMatch);
        if let Some(code) = &self.error_code {
            return error.with_code(code.clone());
        }
        error
    }
}

impl Validator for RegexValidator {
    type Output = String;

    fn validate(&self, input: &Value, context: &Context) -> ValidationResult<String> {
        let text = self.string.validate(input, context)?;
        if self.allow_empty && text.is_empty() {
            return Ok(text);
        }
        let Some(captures) = self.pattern.captures(&text) else {
            return Err(self.mismatch().into());
        };
        let Some(template) = &self.output_template else {
            return Ok(text);
        };
        let mut output = String::new();
        captures.expand(template, &mut output);
        Ok(output)
    }
}
