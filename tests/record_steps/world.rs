//! Shared world state for booking validation BDD scenarios.

use chrono::NaiveDate;
use rstest::fixture;
use serde::Deserialize;
use validata::record::RecordValidator;
use validata::validation::error::ValidatorError;

/// Typed booking produced by a successful validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Booking {
    pub guest: String,
    pub arrival: NaiveDate,
    pub departure: Option<NaiveDate>,
    pub nights: i64,
    pub room_type: String,
}

/// Scenario world for booking validation behaviour tests.
pub struct BookingWorld {
    pub validator: Option<RecordValidator<Booking>>,
    pub input: serde_json::Map<String, serde_json::Value>,
    pub result: Option<Result<Booking, ValidatorError>>,
}

impl BookingWorld {
    /// Creates a world with an empty input map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validator: None,
            input: serde_json::Map::new(),
            result: None,
        }
    }
}

impl Default for BookingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BookingWorld {
    BookingWorld::default()
}
