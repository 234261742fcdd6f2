//! When steps for booking validation BDD scenarios.

use rstest_bdd_macros::when;
use validata::validation::domain::{Context, Value};
use validata::validation::ports::Validator;

use super::world::BookingWorld;

#[when("the booking is validated")]
fn validate_booking(world: &mut BookingWorld) -> Result<(), eyre::Report> {
    let validator = world
        .validator
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing booking schema in scenario world"))?;
    let input = Value::from(serde_json::Value::Object(world.input.clone()));
    world.result = Some(validator.validate(&input, &Context::new()));
    Ok(())
}
