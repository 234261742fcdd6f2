//! String validator.

use super::ensure_type;
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::{ErrorKind, SchemaError, ValidationError};
use crate::validation::ports::{ValidationResult, Validator};

/// Reason attached when a non-printable character is found.
const NON_PRINTABLE_REASON: &str = "String contains non-printable characters.";
/// Reason attached when a line break is found in single-line mode.
const MULTILINE_REASON: &str = "No multiline strings allowed.";

/// Validates strings by length and character set.
///
/// Checks run in this order: length in characters, printable characters,
/// line breaks. In multiline mode `\r\n` and `\r` are normalised to `\n`.
/// Unsafe mode skips the printable check and the normalisation.
///
/// # Examples
///
/// ```
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::StringValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = StringValidator::new().multiline(true);
/// let output = validator.validate(&Value::from("a\r\nb\rc"), &Context::new());
/// assert_eq!(output.ok().as_deref(), Some("a\nb\nc"));
///
/// let single_line = StringValidator::new();
/// let error = single_line
///     .validate(&Value::from("a\nb"), &Context::new())
///     .expect_err("line breaks are rejected");
/// assert_eq!(
///     error.as_validation().map(|inner| inner.code()),
///     Some("string_invalid_characters"),
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    multiline: bool,
    unsafe_mode: bool,
}

impl StringValidator {
    /// Creates a validator for single-line printable strings of any length.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_length: None,
            max_length: None,
            multiline: false,
            unsafe_mode: false,
        }
    }

    /// Creates a validator with length bounds in characters.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvertedBounds`] if `min_length > max_length`.
    pub const fn with_length(
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
        Ok(Self {
            min_length,
            max_length,
            multiline: false,
            unsafe_mode: false,
        })
    }

    /// Allows line breaks.
    #[must_use]
    pub const fn multiline(mut self, allow: bool) -> Self {
        self.multiline = allow;
        self
    }

    /// Accepts non-printable characters and keeps line breaks as they are.
    #[must_use]
    pub const fn unsafe_mode(mut self, enabled: bool) -> Self {
        self.unsafe_mode = enabled;
        self
    }

    pub(crate) fn check(&self, text: &str) -> Result<String, ValidationError> {
        let length = text.chars().count();
        if let Some(min) = self.min_length
            && length < min
        {
            return Err(ValidationError::new(ErrorKind::StringTooShort {
                min_length: min,
                max_length: self.max_length,
            }));
        }
        if let Some(max) = self.max_length
            && length > max
        {
            return Err(ValidationError::new(ErrorKind::StringTooLong {
                min_length: self.min_length,
                max_length: max,
            }));
        }

        if !self.unsafe_mode && text.chars().any(is_non_printable) {
            return Err(ValidationError::new(ErrorKind::StringInvalidCharacters)
                .with_reason(NON_PRINTABLE_REASON));
        }

        if !text.contains(['\n', '\r']) {
            return Ok(text.to_owned());
        }
        if !self.multiline {
            return Err(ValidationError::new(ErrorKind::StringInvalidCharacters)
                .with_reason(MULTILINE_REASON));
        }
        if self.unsafe_mode {
            return Ok(text.to_owned());
        }
        Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
    }
}

impl Validator for StringValidator {
    type Output = String;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<String> {
        ensure_type(input, &[ValueKind::Str])?;
        let text = input.as_str().unwrap_or_default();
        Ok(self.check(text)?)
    }
}

/// Returns `true` for characters that do not render as visible text.
///
/// Line breaks are handled separately and count as printable here. The only
/// printable whitespace is the ASCII space.
fn is_non_printable(character: char) -> bool {
    if matches!(character, '\n' | '\r' | ' ') {
        return false;
    }
    character.is_control()
        || character.is_whitespace()
        || is_format_character(character)
        || is_private_use(character)
}

fn is_format_character(character: char) -> bool {
    matches!(
        character,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{08E2}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{110BD}'
            | '\u{110CD}'
            | '\u{13430}'..='\u{1343F}'
            | '\u{1BCA0}'..='\u{1BCA3}'
            | '\u{1D173}'..='\u{1D17A}'
            | '\u{E0001}'
            | '\u{E0020}'..='\u{E007F}'
    )
}

fn is_private_use(character: char) -> bool {
    matches!(
        character,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}'
    )
}
