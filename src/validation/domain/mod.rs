//! Domain types for the validation engine.
//!
//! These are plain data types with no validation logic of their own.

mod context;
mod value;

pub use context::Context;
pub use value::{FieldMap, MapKey, Value, ValueKind};
