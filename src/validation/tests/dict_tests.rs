//! Unit tests for the dict validator.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use serde_json::json;

use super::fixtures::{context, error_json, input, input_error};
use crate::validation::{
    combinators::{DictValidator, ListValidator},
    domain::{Context, FieldMap, Value},
    error::{ErrorKind, SchemaError, ValidationError, ValidatorError},
    leaf::{IntegerValidator, StringValidator},
    ports::{BoxedValidator, Validator},
};

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn person() -> DictValidator {
    DictValidator::builder()
        .field("id", IntegerValidator::new())
        .field("name", StringValidator::new())
        .field("tags", ListValidator::new(StringValidator::new()))
        .optional_fields(["tags"])
        .build()
        .expect("valid dict schema")
}

// ============================================================================
// Validation
// ============================================================================

#[rstest]
fn dict_returns_validated_fields(person: DictValidator, context: Context) {
    let output = person
        .validate(&input(json!({"id": 1, "name": "Ada"})), &context)
        .expect("valid input");

    assert_eq!(
        output,
        FieldMap::from([
            ("id".to_owned(), Value::Int(1)),
            ("name".to_owned(), Value::from("Ada")),
        ])
    );
}

#[rstest]
fn dict_collects_every_field_error(person: DictValidator, context: Context) {
    assert_eq!(
        error_json(person.validate(&input(json!({"name": 5, "tags": ["a", 1]})), &context)),
        json!({
            "code": "field_errors",
            "field_errors": {
                "id": {"code": "required_field"},
                "name": {"code": "invalid_type", "expected_type": "str"},
                "tags": {
                    "code": "list_item_errors",
                    "item_errors": {"1": {"code": "invalid_type", "expected_type": "str"}},
                },
            },
        })
    );
}

#[rstest]
fn dict_distinguishes_missing_from_null(person: DictValidator, context: Context) {
    assert_eq!(
        error_json(person.validate(&input(json!({"id": null, "name": "Ada"})), &context)),
        json!({
            "code": "field_errors",
            "field_errors": {"id": {"code": "required_value"}},
        })
    );
}

#[rstest]
fn dict_drops_unknown_fields(person: DictValidator, context: Context) {
    let output = person
        .validate(&input(json!({"id": 1, "name": "Ada", "admin": true})), &context)
        .expect("valid input");
    assert!(!output.contains_key("admin"));
}

#[rstest]
fn dict_rejects_non_string_keys(person: DictValidator, context: Context) {
    let value = Value::map([(1_i64, Value::Int(1))]);
    assert_eq!(
        error_json(person.validate(&value, &context)),
        json!({"code": "dict_invalid_key_type"})
    );
}

#[rstest]
fn dict_requires_map_input(person: DictValidator, context: Context) {
    assert_eq!(
        error_json(person.validate(&input(json!([1, 2])), &context)),
        json!({"code": "invalid_type", "expected_type": "dict"})
    );
    assert_eq!(
        error_json(person.validate(&Value::Null, &context)),
        json!({"code": "required_value"})
    );
}

#[rstest]
fn default_validator_handles_unknown_fields(context: Context) {
    let validator = DictValidator::builder()
        .default_validator(IntegerValidator::new())
        .build()
        .expect("valid dict schema");

    assert_eq!(
        validator
            .validate(&input(json!({"a": 1, "b": 2})), &context)
            .map(|fields| fields.len())
            .ok(),
        Some(2)
    );
    assert_eq!(
        error_json(validator.validate(&input(json!({"a": "x"})), &context)),
        json!({
            "code": "field_errors",
            "field_errors": {"a": {"code": "invalid_type", "expected_type": "int"}},
        })
    );
}

#[rstest]
fn dict_passes_context_to_fields(context: Context) {
    let tenant = BoxedValidator::from_fn(|_, call_context: &Context| {
        Ok(call_context.get("tenant").cloned().unwrap_or(Value::Null))
    });
    let validator = DictValidator::builder()
        .boxed_field("tenant", tenant)
        .build()
        .expect("valid dict schema");

    let output = validator
        .validate(
            &input(json!({"tenant": "ignored"})),
            &context.with("tenant", "acme"),
        )
        .expect("valid input");
    assert_eq!(output.get("tenant"), Some(&Value::from("acme")));
}

#[rstest]
fn dict_propagates_fatal_errors(context: Context) {
    let failing = BoxedValidator::from_fn(|_, _| {
        Err(ValidatorError::callback(std::io::Error::other("lookup failed")))
    });
    let validator = DictValidator::builder()
        .boxed_field("a", failing)
        .field("b", IntegerValidator::new())
        .build()
        .expect("valid dict schema");

    let error = validator
        .validate(&input(json!({"a": 1, "b": "x"})), &context)
        .expect_err("callback fails");
    assert!(!error.is_invalid());
}

// ============================================================================
// Required set
// ============================================================================

#[rstest]
fn required_fields_default_to_every_field() {
    let validator = DictValidator::builder()
        .field("a", IntegerValidator::new())
        .field("b", IntegerValidator::new())
        .build()
        .expect("valid dict schema");
    assert_eq!(validator.required_fields().len(), 2);
}

#[rstest]
fn required_fields_can_be_replaced(context: Context) {
    let validator = DictValidator::builder()
        .field("a", IntegerValidator::new())
        .field("b", IntegerValidator::new())
        .required_fields(["b"])
        .build()
        .expect("valid dict schema");

    assert!(validator.validate(&input(json!({"b": 1})), &context).is_ok());
    let error = input_error(validator.validate(&input(json!({"a": 1})), &context));
    assert_eq!(
        error.field_errors().and_then(|errors| errors.get("b")),
        Some(&ValidationError::new(ErrorKind::RequiredField))
    );
}

#[rstest]
fn builder_rejects_invalid_schemas() {
    assert!(matches!(
        DictValidator::builder().build(),
        Err(SchemaError::NoFieldValidators)
    ));
    assert!(matches!(
        DictValidator::builder()
            .field("a", IntegerValidator::new())
            .required_fields(["a"])
            .optional_fields(["a"])
            .build(),
        Err(SchemaError::ConflictingFieldSets)
    ));
}
