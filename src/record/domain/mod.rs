//! Domain types for record schemas.

mod default;
mod field;

pub use default::FieldDefault;
pub use field::Field;
