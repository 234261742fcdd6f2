//! Unit tests for the error model.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::interval::RangeError;
use crate::validation::{
    domain::ValueKind,
    error::{ErrorKind, SchemaError, UNKNOWN_ERROR_CODE, ValidationError, ValidatorError},
};

// ============================================================================
// Codes
// ============================================================================

#[rstest]
#[case(ErrorKind::RequiredValue, "required_value")]
#[case(ErrorKind::FieldNotAllowed, "field_not_allowed")]
#[case(ErrorKind::InvalidType { expected_types: vec![ValueKind::Int] }, "invalid_type")]
#[case(ErrorKind::NumberRange { min_value: None, max_value: None }, "number_range_error")]
#[case(ErrorKind::InvalidInteger, "invalid_integer")]
#[case(ErrorKind::InvalidDecimal, "invalid_decimal")]
#[case(ErrorKind::DecimalPlaces { min_places: None, max_places: Some(2) }, "decimal_places")]
#[case(ErrorKind::NonFiniteNumber, "not_a_finite_number")]
#[case(ErrorKind::StringTooShort { min_length: 1, max_length: None }, "string_too_short")]
#[case(ErrorKind::StringTooLong { min_length: None, max_length: 1 }, "string_too_long")]
#[case(ErrorKind::StringInvalidCharacters, "string_invalid_characters")]
#[case(ErrorKind::RegexMatch, "invalid_string_format")]
#[case(ErrorKind::ValueNotAllowed { allowed_values: None }, "value_not_allowed")]
#[case(ErrorKind::InvalidDate, "invalid_date")]
#[case(ErrorKind::InvalidTime { time_format: "HH:MM".to_owned() }, "invalid_time")]
#[case(ErrorKind::InvalidDateTime { datetime_format: "<DATE>T<TIME>".to_owned() }, "invalid_datetime")]
#[case(ErrorKind::DateTimeRange { lower_boundary: None, upper_boundary: None }, "datetime_range_error")]
#[case(ErrorKind::ListLength { min_length: None, max_length: None }, "list_invalid_length")]
#[case(ErrorKind::ListItems(BTreeMap::new()), "list_item_errors")]
#[case(ErrorKind::DictInvalidKeyType, "dict_invalid_key_type")]
#[case(ErrorKind::RequiredField, "required_field")]
#[case(ErrorKind::DictFields(BTreeMap::new()), "field_errors")]
#[case(
    ErrorKind::PostValidation { error: None, field_errors: BTreeMap::new() },
    "post_validation_errors"
)]
#[case(ErrorKind::Custom, UNKNOWN_ERROR_CODE)]
fn error_kind_has_stable_code(#[case] kind: ErrorKind, #[case] expected: &str) {
    assert_eq!(kind.code(), expected);
    assert_eq!(ValidationError::new(kind).code(), expected);
}

#[rstest]
fn code_override_replaces_kind_code() {
    let error = ValidationError::new(ErrorKind::RegexMatch).with_code("invalid_postcode");
    assert_eq!(error.code(), "invalid_postcode");
    assert_eq!(error.kind(), &ErrorKind::RegexMatch);
}

#[rstest]
fn custom_error_without_code_reports_unknown_error() {
    let error = ValidationError::new(ErrorKind::Custom);
    assert_eq!(error.to_json(), json!({"code": "unknown_error"}));
}

// ============================================================================
// Rendering
// ============================================================================

#[rstest]
fn invalid_type_with_single_kind_renders_expected_type() {
    let error = ValidationError::invalid_type([ValueKind::Str]);
    assert_eq!(
        error.to_json(),
        json!({"code": "invalid_type", "expected_type": "str"})
    );
}

#[rstest]
fn invalid_type_with_several_kinds_renders_sorted_list() {
    let error = ValidationError::invalid_type([ValueKind::Str, ValueKind::Int, ValueKind::Float]);
    assert_eq!(
        error.to_json(),
        json!({"code": "invalid_type", "expected_types": ["float", "int", "str"]})
    );
}

#[rstest]
fn add_expected_type_ignores_duplicates() {
    let mut error = ValidationError::invalid_type([ValueKind::Int]);
    error.add_expected_type(ValueKind::None);
    error.add_expected_type(ValueKind::Int);
    error.add_expected_type(ValueKind::None);

    assert_eq!(
        error.kind(),
        &ErrorKind::InvalidType {
            expected_types: vec![ValueKind::Int, ValueKind::None]
        }
    );
}

#[rstest]
fn add_expected_type_leaves_other_kinds_untouched() {
    let mut error = ValidationError::required_value();
    error.add_expected_type(ValueKind::None);
    assert_eq!(error, ValidationError::required_value());
}

#[rstest]
fn absent_bounds_are_omitted() {
    let error = ValidationError::number_range(Some(json!(1)), None);
    assert_eq!(
        error.to_json(),
        json!({"code": "number_range_error", "min_value": 1})
    );
}

#[rstest]
fn reason_and_extras_are_rendered() {
    let error = ValidationError::custom("not_a_prime")
        .with_reason("Number must be prime.")
        .with_extra("candidate", 9);

    assert_eq!(
        error.to_json(),
        json!({
            "code": "not_a_prime",
            "reason": "Number must be prime.",
            "candidate": 9,
        })
    );
}

#[rstest]
fn invalid_date_renders_expected_format() {
    let error = ValidationError::new(ErrorKind::InvalidDate);
    assert_eq!(
        error.to_json(),
        json!({"code": "invalid_date", "date_format": "YYYY-MM-DD"})
    );
}

#[rstest]
fn nested_aggregates_render_as_tree() {
    let items = ValidationError::item_errors_of(BTreeMap::from([
        (0, ValidationError::required_value()),
        (2, ValidationError::invalid_type([ValueKind::Int])),
    ]));
    let error = ValidationError::field_errors_of(BTreeMap::from([
        ("tags".to_owned(), items),
        ("name".to_owned(), ValidationError::new(ErrorKind::RequiredField)),
    ]));

    assert!(error.is_aggregate());
    assert_eq!(
        error.to_json(),
        json!({
            "code": "field_errors",
            "field_errors": {
                "name": {"code": "required_field"},
                "tags": {
                    "code": "list_item_errors",
                    "item_errors": {
                        "0": {"code": "required_value"},
                        "2": {"code": "invalid_type", "expected_type": "int"},
                    },
                },
            },
        })
    );
}

#[rstest]
fn serialize_matches_to_json() {
    let error = ValidationError::list_length(Some(1), Some(3));
    let serialized = serde_json::to_value(&error).expect("error should serialise");
    assert_eq!(serialized, error.to_json());
}

// ============================================================================
// Accessors
// ============================================================================

#[rstest]
fn field_and_item_errors_expose_children() {
    let fields = ValidationError::field_errors_of(BTreeMap::from([(
        "id".to_owned(),
        ValidationError::required_value(),
    )]));
    let items = ValidationError::item_errors_of(BTreeMap::from([(
        4,
        ValidationError::required_value(),
    )]));

    assert_eq!(fields.field_errors().map(BTreeMap::len), Some(1));
    assert!(fields.item_errors().is_none());
    assert_eq!(
        items.item_errors().and_then(|errors| errors.get(&4)),
        Some(&ValidationError::required_value())
    );
    assert!(!ValidationError::required_value().is_aggregate());
}

// ============================================================================
// Post-validation wrapping
// ============================================================================

#[rstest]
fn post_validation_wraps_global_error() {
    let error = ValidationError::post_validation(ValidationError::custom("end_before_start"));
    assert_eq!(
        error.to_json(),
        json!({
            "code": "post_validation_errors",
            "error": {"code": "end_before_start"},
        })
    );
}

#[rstest]
fn post_validation_passes_existing_aggregate_through() {
    let field_error = ValidationError::post_validation_fields(BTreeMap::from([(
        "end".to_owned(),
        ValidationError::custom("end_before_start"),
    )]));

    let wrapped = ValidationError::post_validation(field_error.clone());

    assert_eq!(wrapped, field_error);
    assert_eq!(
        wrapped.field_errors().map(|errors| errors.contains_key("end")),
        Some(true)
    );
}

// ============================================================================
// Display
// ============================================================================

#[rstest]
fn display_includes_reason() {
    let error = ValidationError::required_value().with_reason("Name is mandatory.");
    assert_eq!(error.to_string(), "value is required: Name is mandatory.");
}

#[rstest]
fn display_lists_expected_kinds() {
    let error = ValidationError::invalid_type([ValueKind::Int, ValueKind::None]);
    assert_eq!(error.to_string(), "invalid type, expected int | none");
}

#[rstest]
fn display_lists_children() {
    let error = ValidationError::item_errors_of(BTreeMap::from([(
        1,
        ValidationError::required_value(),
    )]));
    assert_eq!(error.to_string(), "invalid list items: 1: value is required");
}

#[rstest]
fn schema_error_messages_name_parameters() {
    let error = SchemaError::InvertedBounds {
        min: "min_length",
        max: "max_length",
    };
    assert_eq!(
        error.to_string(),
        "parameter \"min_length\" cannot be greater than \"max_length\""
    );
}

// ============================================================================
// ValidatorError
// ============================================================================

#[rstest]
fn validator_error_separates_input_errors_from_fatal_ones() {
    let invalid = ValidatorError::from(ErrorKind::RequiredValue);
    let fatal = ValidatorError::from(RangeError::MissingOffset);
    let callback = ValidatorError::callback(std::io::Error::other("lookup failed"));

    assert!(invalid.is_invalid());
    assert_eq!(
        invalid.as_validation().map(ValidationError::code),
        Some("required_value")
    );
    assert!(!fatal.is_invalid());
    assert!(fatal.into_validation().is_none());
    assert_eq!(callback.to_string(), "callback failed: lookup failed");
}

#[rstest]
fn serde_failures_become_construction_errors() {
    let failure = serde_json::from_str::<u8>("\"x\"").expect_err("not a number");
    let error = ValidatorError::from(failure);
    assert!(matches!(error, ValidatorError::Construction(_)));
}
