//! Given steps for booking validation BDD scenarios.

use rstest_bdd_macros::given;
use validata::record::{Field, FieldDefault, RecordValidator};
use validata::validation::combinators::Nullable;
use validata::validation::domain::Context;
use validata::validation::error::ValidationError;
use validata::validation::leaf::{AnyOfValidator, DateValidator, IntegerValidator, StringValidator};

use super::world::{Booking, BookingWorld};

#[given("a booking schema")]
fn booking_schema(world: &mut BookingWorld) -> Result<(), eyre::Report> {
    let validator = RecordValidator::<Booking>::new([
        Field::required("guest", StringValidator::with_length(Some(1), Some(80))?),
        Field::required("arrival", DateValidator::new()),
        Field::optional(
            "departure",
            Nullable::new(DateValidator::new()),
            FieldDefault::null(),
        ),
        Field::optional(
            "nights",
            IntegerValidator::with_range(Some(1), Some(30))?,
            FieldDefault::constant(1),
        ),
        Field::optional(
            "room_type",
            AnyOfValidator::new(["standard", "suite"])?,
            FieldDefault::constant("standard"),
        ),
    ])?
    .with_post_validate(|booking: &Booking, _: &Context| match booking.departure {
        Some(departure) if departure <= booking.arrival => {
            Err(ValidationError::custom("departure_before_arrival").into())
        }
        _ => Ok(()),
    });

    world.validator = Some(validator);
    Ok(())
}

#[given(r#"the field "{name}" is "{value}""#)]
fn field_is_text(world: &mut BookingWorld, name: String, value: String) {
    world.input.insert(name, serde_json::Value::String(value));
}

#[given(r#"the field "{name}" is the number {value:i64}"#)]
fn field_is_number(world: &mut BookingWorld, name: String, value: i64) {
    world.input.insert(name, serde_json::Value::from(value));
}

#[given(r#"the field "{name}" is null"#)]
fn field_is_null(world: &mut BookingWorld, name: String) {
    world.input.insert(name, serde_json::Value::Null);
}
