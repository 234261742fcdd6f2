//! Step definitions for booking record validation scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
