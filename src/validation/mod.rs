//! Validator composition engine.
//!
//! This module implements the error model, the dynamic value model, the
//! validator port and every built-in validator.
//!
//! # Architecture
//!
//! - **Domain**: Input/output values ([`domain::Value`]) and the context bag ([`domain::Context`])
//! - **Ports**: The [`ports::Validator`] trait, its type-erased form [`ports::BoxedValidator`]
//!   and [`ports::ValidationConfig`]
//! - **Leaf**: Validators without children that type-check, constrain and coerce a scalar
//! - **Combinators**: Validators that wrap or contain other validators
//!
//! Aggregating combinators never short-circuit: every child is validated and
//! every failure is reported in one nested [`error::ValidationError`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use validata::validation::combinators::ListValidator;
//! use validata::validation::domain::{Context, Value};
//! use validata::validation::leaf::IntegerValidator;
//! use validata::validation::ports::Validator;
//!
//! let validator = ListValidator::new(IntegerValidator::new());
//! let error = validator
//!     .validate(&Value::from(json!([1, "two", 3, null])), &Context::new())
//!     .expect_err("two items are invalid")
//!     .into_validation()
//!     .expect("input error");
//!
//! assert_eq!(error.code(), "list_item_errors");
//! assert_eq!(error.to_json()["item_errors"]["1"]["code"], "invalid_type");
//! assert_eq!(error.to_json()["item_errors"]["3"]["code"], "required_value");
//! ```

pub mod combinators;
pub mod domain;
pub mod error;
pub mod leaf;
pub mod ports;

#[cfg(test)]
mod tests;
