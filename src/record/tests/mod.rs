//! Unit tests for record schemas and the record mapper.
