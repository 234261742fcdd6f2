//! Unit tests for the validation module.
//!
//! Tests are organised by validator family, covering accepted input, every
//! error code a validator can produce, and the rendered error payloads.

mod dict_tests;
mod error_tests;
mod property_tests;
