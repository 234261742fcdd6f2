//! Leaf validators.
//!
//! A leaf validator has no child validators. Each one rejects the
//! absence-sentinel with `required_value`, rejects the wrong runtime kind with
//! `invalid_type`, then applies its own checks and returns a coerced value.

mod any_of;
mod boolean;
mod date;
mod datetime;
mod decimal;
mod float;
mod integer;
mod pattern;
mod string;
mod time;

pub use any_of::{AnyOfValidator, EnumValidator};
pub use boolean::BooleanValidator;
pub use date::DateValidator;
pub use datetime::{DateTimeFormat, DateTimeValidator};
pub use decimal::{DecimalValidator, FloatToDecimalValidator, MAX_SCALE, Rounding};
pub use float::FloatValidator;
pub use integer::IntegerValidator;
pub use pattern::RegexValidator;
pub use string::StringValidator;
pub use time::{TimeFormat, TimeValidator};

use regex::Regex;

use crate::validation::domain::{Value, ValueKind};
use crate::validation::error::ValidationError;

/// Compiles a format-gate pattern written into the source.
#[expect(
    clippy::expect_used,
    reason = "literal patterns are exercised by the unit tests"
)]
fn literal_pattern(pattern: &str) -> Regex {
    Regex::new(pattern).expect("literal pattern compiles")
}

/// Fails with `required_value` for the absence-sentinel.
pub(crate) fn ensure_not_null(input: &Value) -> Result<(), ValidationError> {
    if input.is_null() {
        return Err(ValidationError::required_value());
    }
    Ok(())
}

/// Fails unless `input` has one of the `expected` kinds.
///
/// The absence-sentinel yields `required_value` rather than `invalid_type`
/// unless [`ValueKind::None`] is itself expected.
pub(crate) fn ensure_type(input: &Value, expected: &[ValueKind]) -> Result<(), ValidationError> {
    if !expected.contains(&ValueKind::None) {
        ensure_not_null(input)?;
    }
    if !expected.contains(&input.kind()) {
        return Err(ValidationError::invalid_type(expected.iter().copied()));
    }
    Ok(())
}
