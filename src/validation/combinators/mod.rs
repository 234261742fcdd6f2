//! Combinators: validators that wrap or contain other validators.
//!
//! Aggregating combinators ([`ListValidator`], [`DictValidator`]) validate
//! every child and collect each [`ValidationError`] under its index or key.
//! Fatal errors abort immediately and are never collected.

mod allow_empty_string;
mod anything;
mod dict;
mod discard;
mod list;
mod nullable;
mod reject;

pub use allow_empty_string::AllowEmptyString;
pub use anything::AnythingValidator;
pub use dict::{DictValidator, DictValidatorBuilder};
pub use discard::DiscardValidator;
pub use list::ListValidator;
pub use nullable::Nullable;
pub use reject::RejectValidator;

use crate::validation::domain::ValueKind;
use crate::validation::error::{ValidationError, ValidatorError};
use crate::validation::ports::ValidationResult;

/// Separates a child's input error, which the caller collects, from a fatal
/// error, which is returned as the outer `Err`.
pub(crate) fn collectable<T>(
    result: ValidationResult<T>,
) -> Result<Result<T, ValidationError>, ValidatorError> {
    match result {
        Ok(output) => Ok(Ok(output)),
        Err(ValidatorError::Invalid(error)) => Ok(Err(error)),
        Err(fatal) => Err(fatal),
    }
}

/// Adds `kind` to the expected types of an `invalid_type` error.
pub(crate) fn widen_expected_types(err: ValidatorError, kind: ValueKind) -> ValidatorError {
    match err {
        ValidatorError::Invalid(mut error) => {
            error.add_expected_type(kind);
            ValidatorError::Invalid(error)
        }
        fatal => fatal,
    }
}
