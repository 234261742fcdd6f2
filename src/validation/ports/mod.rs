//! Port trait definitions for the validation engine.
//!
//! Every validator, leaf or combinator, implements [`Validator`]. Containers
//! that hold validators of different output types store them as
//! [`BoxedValidator`].

pub mod validator;

pub use validator::{BoxedValidator, ValidationConfig, ValidationResult, Validator};
