//! Validata: schema validation and coercion for tree-shaped input.
//!
//! This crate converts loosely-typed input (nested mappings, sequences and
//! scalars, typically parsed JSON) into strongly-typed values while enforcing
//! constraints and reporting every violation found in a single pass.
//!
//! # Architecture
//!
//! Validata follows the same layering throughout:
//!
//! - **Domain**: Pure data types (`Value`, `Context`, field descriptors, datetime boundaries)
//! - **Ports**: The [`validation::ports::Validator`] trait and its type-erased form
//! - **Services**: Validator implementations and the record mapper
//!
//! # Modules
//!
//! - [`validation`]: Error model, value model, leaf validators and combinators
//! - [`record`]: Field descriptors, default resolution and typed record mapping
//! - [`interval`]: Timezone-aware datetime range containment
//!
//! # Example
//!
//! ```
//! use serde::Deserialize;
//! use serde_json::json;
//! use validata::record::{Field, FieldDefault, RecordValidator};
//! use validata::validation::domain::{Context, Value};
//! use validata::validation::leaf::{IntegerValidator, StringValidator};
//! use validata::validation::ports::Validator;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     name: String,
//!     age: i64,
//! }
//!
//! let validator = RecordValidator::<User>::new([
//!     Field::required("name", StringValidator::new()),
//!     Field::optional("age", IntegerValidator::new(), FieldDefault::constant(18)),
//! ])
//! .expect("valid schema");
//!
//! let input = Value::from(json!({"name": "Ada"}));
//! let user = validator.validate(&input, &Context::new()).expect("valid input");
//! assert_eq!(user.name, "Ada");
//! assert_eq!(user.age, 18);
//! ```

pub mod interval;
pub mod record;
pub mod validation;
