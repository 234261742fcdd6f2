//! Unit tests for `DateTimeValue`.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rstest::rstest;

use crate::interval::{DateTimeValue, RangeError};
use crate::validation::domain::Value;

fn aware(text: &str) -> DateTimeValue {
    DateTimeValue::from(DateTime::parse_from_rfc3339(text).expect("valid datetime"))
}

fn local(text: &str) -> DateTimeValue {
    DateTimeValue::from(
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").expect("valid datetime"),
    )
}

fn offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).expect("valid offset")
}

// ============================================================================
// Comparison
// ============================================================================

#[rstest]
#[case("2021-01-01T00:00:00+01:00", "2020-12-31T23:00:00Z", Ordering::Equal)]
#[case("2021-01-01T00:00:00Z", "2021-01-01T00:00:00+01:00", Ordering::Greater)]
#[case("2021-01-01T00:00:00-01:00", "2021-01-01T00:30:00Z", Ordering::Greater)]
fn aware_datetimes_compare_as_instants(
    #[case] left: &str,
    #[case] right: &str,
    #[case] expected: Ordering,
) {
    assert_eq!(aware(left).compare(&aware(right)), Ok(expected));
}

#[rstest]
fn local_datetimes_compare_by_wall_clock() {
    assert_eq!(
        local("2021-01-01T00:00:00").compare(&local("2021-01-01T00:00:01")),
        Ok(Ordering::Less)
    );
}

#[rstest]
fn mixed_awareness_cannot_be_compared() {
    let result = local("2021-01-01T00:00:00").compare(&aware("2021-01-01T00:00:00Z"));
    assert_eq!(
        result,
        Err(RangeError::MixedTimezoneAwareness {
            aware: "2021-01-01T00:00:00+00:00".to_owned(),
            local: "2021-01-01T00:00:00".to_owned(),
        })
    );
}

// ============================================================================
// Conversions
// ============================================================================

#[rstest]
fn local_timezone_is_only_applied_to_local_values() {
    assert_eq!(
        local("2021-06-01T12:00:00").with_local_timezone(Some(offset(2))),
        aware("2021-06-01T12:00:00+02:00")
    );
    assert_eq!(
        aware("2021-06-01T12:00:00-03:00").with_local_timezone(Some(offset(2))),
        aware("2021-06-01T12:00:00-03:00")
    );
    assert!(
        !local("2021-06-01T12:00:00")
            .with_local_timezone(None)
            .is_aware()
    );
}

#[rstest]
fn conversion_keeps_the_instant() {
    let converted = aware("2021-06-01T12:00:00+02:00").to_timezone(offset(0));
    assert_eq!(converted.to_iso_string(), "2021-06-01T10:00:00+00:00");
    assert_eq!(converted, aware("2021-06-01T12:00:00+02:00"));
}

#[rstest]
fn subseconds_can_be_discarded() {
    assert_eq!(
        aware("2021-06-01T12:00:00.987654Z")
            .discard_subseconds()
            .to_iso_string(),
        "2021-06-01T12:00:00+00:00"
    );
    assert_eq!(
        local("2021-06-01T12:00:00.5")
            .discard_subseconds()
            .to_iso_string(),
        "2021-06-01T12:00:00"
    );
}

// ============================================================================
// Rendering
// ============================================================================

#[rstest]
#[case(aware("2021-12-31T23:59:59.999999Z"), "2021-12-31T23:59:59.999999+00:00")]
#[case(aware("2021-12-31T23:59:59+05:30"), "2021-12-31T23:59:59+05:30")]
#[case(local("2021-12-31T23:59:59.25"), "2021-12-31T23:59:59.250")]
#[case(local("2021-12-31T23:59:59"), "2021-12-31T23:59:59")]
fn renders_iso_strings(#[case] datetime: DateTimeValue, #[case] expected: &str) {
    assert_eq!(datetime.to_iso_string(), expected);
    assert_eq!(datetime.to_string(), expected);
}

#[rstest]
fn serialises_as_iso_string() {
    assert_eq!(
        serde_json::to_value(aware("2021-01-01T00:00:00Z")).expect("serialisable"),
        serde_json::json!("2021-01-01T00:00:00+00:00")
    );
}

#[rstest]
fn converts_into_matching_value_variant() {
    assert!(matches!(
        Value::from(aware("2021-01-01T00:00:00Z")),
        Value::DateTime(_)
    ));
    assert!(matches!(
        Value::from(local("2021-01-01T00:00:00")),
        Value::LocalDateTime(_)
    ));
}
