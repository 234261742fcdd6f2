//! Unit tests for datetime intervals.

mod instant_tests;
