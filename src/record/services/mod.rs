//! Services for record validation.

pub mod mapper;

pub use mapper::RecordValidator;
