//! Typed records built from validated field maps.
//!
//! A record schema is a list of [`Field`] descriptors, each pairing a name
//! with a validator and a [`FieldDefault`]. [`RecordValidator`] validates an
//! input map against the schema, fills defaults for absent fields, builds the
//! typed record and runs an optional post-validation hook.
//!
//! # Architecture
//!
//! - **Domain**: Field descriptors and default values
//! - **Services**: The record mapper driving validation and construction

pub mod domain;
pub mod services;

pub use domain::{Field, FieldDefault};
pub use services::RecordValidator;

#[cfg(test)]
mod tests;
