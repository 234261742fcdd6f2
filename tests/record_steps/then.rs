//! Then steps for booking validation BDD scenarios.

use rstest_bdd_macros::then;
use validata::validation::error::{ErrorKind, ValidationError};

use super::world::{Booking, BookingWorld};

fn booking(world: &BookingWorld) -> Result<&Booking, eyre::Report> {
    world
        .result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing validation result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected validation failure: {err}"))
}

fn failure(world: &BookingWorld) -> Result<&ValidationError, eyre::Report> {
    let result = world
        .result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing validation result in scenario world"))?;
    match result {
        Ok(accepted) => Err(eyre::eyre!("expected a validation failure, got {accepted:?}")),
        Err(err) => err
            .as_validation()
            .ok_or_else(|| eyre::eyre!("expected an input error, got fatal error {err}")),
    }
}

#[then("validation succeeds")]
fn validation_succeeds(world: &BookingWorld) -> Result<(), eyre::Report> {
    booking(world).map(|_| ())
}

#[then(r#"the booking has {nights:i64} nights in a "{room_type}" room"#)]
fn booking_has_stay(
    world: &BookingWorld,
    nights: i64,
    room_type: String,
) -> Result<(), eyre::Report> {
    let accepted = booking(world)?;
    if accepted.nights != nights || accepted.room_type != room_type {
        return Err(eyre::eyre!(
            "expected {nights} nights in a {room_type} room, got {accepted:?}"
        ));
    }
    Ok(())
}

#[then(r#"validation fails with code "{code}""#)]
fn validation_fails_with(world: &BookingWorld, code: String) -> Result<(), eyre::Report> {
    let error = failure(world)?;
    if error.code() != code {
        return Err(eyre::eyre!("expected code {code}, got {}", error.code()));
    }
    Ok(())
}

#[then(r#"the field "{name}" fails with code "{code}""#)]
fn field_fails_with(world: &BookingWorld, name: String, code: String) -> Result<(), eyre::Report> {
    let field_error = failure(world)?
        .field_errors()
        .and_then(|errors| errors.get(&name))
        .ok_or_else(|| eyre::eyre!("no error reported for field {name}"))?;
    if field_error.code() != code {
        return Err(eyre::eyre!(
            "expected code {code} for field {name}, got {}",
            field_error.code()
        ));
    }
    Ok(())
}

#[then(r#"the post-validation error has code "{code}""#)]
fn post_validation_error_has(world: &BookingWorld, code: String) -> Result<(), eyre::Report> {
    let ErrorKind::PostValidation {
        error: Some(inner), ..
    } = failure(world)?.kind()
    else {
        return Err(eyre::eyre!("expected a field-independent post-validation error"));
    };
    if inner.code() != code {
        return Err(eyre::eyre!("expected code {code}, got {}", inner.code()));
    }
    Ok(())
}
