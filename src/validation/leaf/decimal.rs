//! Decimal validators.
//!
//! Decimal input is a canonical decimal literal: an optional sign, digits and
//! at most one point. Exponents, `Infinity` and `NaN` are not accepted.
//!
//! Literals are parsed exactly. A magnitude beyond [`Decimal::MAX`] fails
//! with `number_range_error`; more significant digits than a [`Decimal`]
//! holds fail with `invalid_decimal`. Nothing is rounded silently.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};

use super::{StringValidator, ensure_type, literal_pattern};
use crate::validation::domain::{Context, Value, ValueKind};
use crate::validation::error::{ErrorKind, SchemaError, ValidationError};
use crate::validation::ports::{ValidationConfig, ValidationResult, Validator};

static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| literal_pattern(r"\A[+-]?([0-9]+\.[0-9]*|\.?[0-9]+)\z"));

/// Largest scale a [`Decimal`] can carry.
pub const MAX_SCALE: u32 = 28;

const PRECISION_REASON: &str = "Decimal has more significant digits than can be represented.";

/// Rounding mode used when quantising to a fixed number of places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Round half away from zero.
    #[default]
    HalfUp,
    /// Round half towards zero.
    HalfDown,
    /// Round half to the nearest even digit.
    HalfEven,
    /// Round away from zero.
    Up,
    /// Round towards zero.
    Down,
    /// Round towards positive infinity.
    Ceiling,
    /// Round towards negative infinity.
    Floor,
}

impl Rounding {
    const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfDown => RoundingStrategy::MidpointTowardZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
            Self::Up => RoundingStrategy::AwayFromZero,
            Self::Down => RoundingStrategy::ToZero,
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
        }
    }
}

/// Validates decimal strings and converts them to [`Decimal`].
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::DecimalValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = DecimalValidator::new().with_output_places(2)?;
/// let output = validator.validate(&Value::from("1.005"), &Context::new());
/// assert_eq!(output.ok().map(|decimal| decimal.to_string()).as_deref(), Some("1.01"));
///
/// let output = validator.validate(&Value::from(".5"), &Context::new());
/// assert_eq!(output.ok().map(|decimal| decimal.to_string()).as_deref(), Some("0.50"));
/// # Ok::<(), validata::validation::error::SchemaError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecimalValidator {
    min_value: Option<Decimal>,
    max_value: Option<Decimal>,
    min_places: Option<u32>,
    max_places: Option<u32>,
    output_places: Option<u32>,
    rounding: Rounding,
    config: ValidationConfig,
}

impl DecimalValidator {
    /// Creates a validator accepting any decimal literal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an inclusive value range.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvertedBounds`] if `min_value > max_value`.
    pub fn with_range(
        mut self,
        min_value: Option<Decimal>,
        max_value: Option<Decimal>,
    ) -> Result<Self, SchemaError> {
        if let (Some(min), Some(max)) = (min_value, max_value)
            && min > max
        {
            return Err(SchemaError::InvertedBounds {
                min: "min_value",
                max: "max_value",
            });
        }
        self.min_value = min_value;
        self.max_value = max_value;
        Ok(self)
    }

    /// Bounds the number of digits after the decimal point in the input.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvertedBounds`] if `min_places > max_places`.
    pub fn with_places(
        mut self,
        min_places: Option<u32>,
        max_places: Option<u32>,
    ) -> Result<Self, SchemaError> {
        if let (Some(min), Some(max)) = (min_places, max_places)
            && min > max
        {
            return Err(SchemaError::InvertedBounds {
                min: "min_places",
                max: "max_places",
            });
        }
        self.min_places = min_places;
        self.max_places = max_places;
        Ok(self)
    }

    /// Quantises every output to exactly `places` decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ScaleTooLarge`] if `places` exceeds
    /// [`MAX_SCALE`].
    pub const fn with_output_places(mut self, places: u32) -> Result<Self, SchemaError> {
        if places > MAX_SCALE {
            return Err(SchemaError::ScaleTooLarge {
                places,
                max: MAX_SCALE,
            });
        }
        self.output_places = Some(places);
        Ok(self)
    }

    /// Sets the rounding mode used by [`Self::with_output_places`].
    #[must_use]
    pub const fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Applies a validation configuration, e.g. a different maximum length.
    #[must_use]
    pub const fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks user-supplied text, including the configured length limit.
    pub(crate) fn check(&self, text: &str) -> Result<Decimal, ValidationError> {
        let string = StringValidator::with_length(None, Some(self.config.max_decimal_length))
            .unwrap_or_default();
        let literal = string.check(text)?;
        self.check_literal(&literal)
    }

    /// Checks a literal without the length limit. Used directly for
    /// literals rendered from numbers.
    pub(crate) fn check_literal(&self, literal: &str) -> Result<Decimal, ValidationError> {
        if !DECIMAL_PATTERN.is_match(literal) {
            return Err(ValidationError::new(ErrorKind::InvalidDecimal));
        }

        let places = literal
            .split_once('.')
            .map_or(0, |(_, fraction)| u32::try_from(fraction.len()).unwrap_or(u32::MAX));
        let too_few = self.min_places.is_some_and(|min| places < min);
        let too_many = self.max_places.is_some_and(|max| places > max);
        if too_few || too_many {
            return Err(ValidationError::decimal_places(
                self.min_places,
                self.max_places,
            ));
        }

        let number = self.parse(literal)?;

        let below = self.min_value.is_some_and(|min| number < min);
        let above = self.max_value.is_some_and(|max| number > max);
        if below || above {
            return Err(ValidationError::number_range(
                self.min_value.map(|min| serde_json::Value::from(min.to_string())),
                self.max_value.map(|max| serde_json::Value::from(max.to_string())),
            ));
        }

        Ok(self.quantise(number))
    }

    /// Parses a literal already accepted by [`DECIMAL_PATTERN`].
    fn parse(&self, literal: &str) -> Result<Decimal, ValidationError> {
        let negative = literal.starts_with('-');
        let digits = literal.trim_start_matches(['+', '-']);
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let significant = whole.trim_start_matches('0');
        if Decimal::from_str_exact(if significant.is_empty() { "0" } else { significant }).is_err()
        {
            return Err(self.out_of_range());
        }

        let mut normalised = String::with_capacity(digits.len() + 2);
        if negative {
            normalised.push('-');
        }
        normalised.push_str(if whole.is_empty() { "0" } else { whole });
        if !fraction.is_empty() {
            normalised.push('.');
            normalised.push_str(fraction);
        }
        Decimal::from_str_exact(&normalised).map_err(|_| {
            ValidationError::new(ErrorKind::InvalidDecimal).with_reason(PRECISION_REASON)
        })
    }

    /// Range error for a magnitude no [`Decimal`] can hold, reporting the
    /// representable limits where no bound is configured.
    fn out_of_range(&self) -> ValidationError {
        ValidationError::number_range(
            Some(serde_json::Value::from(
                self.min_value.unwrap_or(Decimal::MIN).to_string(),
            )),
            Some(serde_json::Value::from(
                self.max_value.unwrap_or(Decimal::MAX).to_string(),
            )),
        )
    }

    fn quantise(&self, number: Decimal) -> Decimal {
        let Some(places) = self.output_places else {
            return number;
        };
        let mut rounded = number.round_dp_with_strategy(places, self.rounding.strategy());
        rounded.rescale(places);
        rounded
    }
}

impl Validator for DecimalValidator {
    type Output = Decimal;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<Decimal> {
        ensure_type(input, &[ValueKind::Str])?;
        let text = input.as_str().unwrap_or_default();
        Ok(self.check(text)?)
    }
}

/// Validates floats (and optionally integers and strings) as decimals.
///
/// Floats are converted through their shortest decimal representation, so
/// `0.1` becomes exactly `0.1`.
///
/// # Examples
///
/// ```
/// use validata::validation::domain::{Context, Value};
/// use validata::validation::leaf::FloatToDecimalValidator;
/// use validata::validation::ports::Validator;
///
/// let validator = FloatToDecimalValidator::numeric();
/// let context = Context::new();
///
/// for input in [Value::Float(0.5), Value::Int(3), Value::from("1.25")] {
///     assert!(validator.validate(&input, &context).is_ok());
/// }
/// assert!(validator.validate(&Value::Float(f64::NAN), &context).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatToDecimalValidator {
    decimal: DecimalValidator,
    allow_integers: bool,
    allow_strings: bool,
}

impl FloatToDecimalValidator {
    /// Creates a validator accepting only floats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator accepting floats, integers and decimal strings.
    #[must_use]
    pub fn numeric() -> Self {
        Self::new().allow_integers(true).allow_strings(true)
    }

    /// Sets an inclusive value range.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvertedBounds`] if `min_value > max_value`.
    pub fn with_range(
        mut self,
        min_value: Option<Decimal>,
        max_value: Option<Decimal>,
    ) -> Result<Self, SchemaError> {
        self.decimal = self.decimal.with_range(min_value, max_value)?;
        Ok(self)
    }

    /// Quantises every output to exactly `places` decimal places.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ScaleTooLarge`] if `places` exceeds
    /// [`MAX_SCALE`].
    pub fn with_output_places(mut self, places: u32) -> Result<Self, SchemaError> {
        self.decimal = self.decimal.with_output_places(places)?;
        Ok(self)
    }

    /// Sets the rounding mode used for quantisation.
    #[must_use]
    pub const fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.decimal = self.decimal.with_rounding(rounding);
        self
    }

    /// Also accepts integers.
    #[must_use]
    pub const fn allow_integers(mut self, allow: bool) -> Self {
        self.allow_integers = allow;
        self
    }

    /// Also accepts decimal strings.
    #[must_use]
    pub const fn allow_strings(mut self, allow: bool) -> Self {
        self.allow_strings = allow;
        self
    }

    fn allowed_kinds(&self) -> Vec<ValueKind> {
        let mut kinds = vec![ValueKind::Float];
        if self.allow_integers {
            kinds.push(ValueKind::Int);
        }
        if self.allow_strings {
            kinds.push(ValueKind::Str);
        }
        kinds
    }
}

impl Validator for FloatToDecimalValidator {
    type Output = Decimal;

    fn validate(&self, input: &Value, _context: &Context) -> ValidationResult<Decimal> {
        let kinds = self.allowed_kinds();
        ensure_type(input, &kinds)?;
        let decimal = match input {
            Value::Float(number) if !number.is_finite() => {
                return Err(ValidationError::new(ErrorKind::NonFiniteNumber).into());
            }
            Value::Float(number) => self.decimal.check_literal(&number.to_string()),
            Value::Int(number) => self.decimal.check_literal(&number.to_string()),
            Value::Str(text) => self.decimal.check(text),
            _ => return Err(ValidationError::invalid_type(kinds).into()),
        };
        Ok(decimal?)
    }
}
