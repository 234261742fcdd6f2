//! Property tests for range inclusivity, decimal round-trips and error
//! aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::validation::{
    combinators::ListValidator,
    domain::{Context, Value},
    leaf::{DecimalValidator, IntegerValidator},
    ports::Validator,
};

proptest! {
    /// Bounds are inclusive on both sides.
    #[test]
    fn integer_range_accepts_exactly_the_bounded_interval(number in -1000_i64..1000) {
        let validator = IntegerValidator::with_range(Some(1), Some(10)).expect("valid bounds");
        let result = validator.validate(&Value::Int(number), &Context::new());
        prop_assert_eq!(result.is_ok(), (1..=10).contains(&number));
    }

    /// A decimal rendered as a string validates back to the same decimal
    /// with the same scale.
    #[test]
    fn decimal_string_round_trips(mantissa in -1_000_000_000_000_i64..1_000_000_000_000, scale in 0_u32..8) {
        let original = Decimal::new(mantissa, scale);
        let literal = original.to_string();
        let parsed = DecimalValidator::new()
            .validate(&Value::from(literal.as_str()), &Context::new())
            .expect("rendered decimal is a canonical literal");
        prop_assert_eq!(parsed, original);
        prop_assert_eq!(parsed.to_string(), literal);
    }

    /// Quantising twice to the same scale changes nothing.
    #[test]
    fn quantised_output_is_stable(mantissa in -1_000_000_000_i64..1_000_000_000, scale in 0_u32..6) {
        let validator = DecimalValidator::new()
            .with_output_places(2)
            .expect("supported scale");
        let context = Context::new();
        let once = validator
            .validate(&Value::from(Decimal::new(mantissa, scale).to_string()), &context)
            .expect("valid literal");
        let twice = validator
            .validate(&Value::from(once.to_string()), &context)
            .expect("quantised literal");
        prop_assert_eq!(once.to_string(), twice.to_string());
    }

    /// Every invalid item is reported, none is skipped.
    #[test]
    fn every_invalid_item_is_reported(flags in proptest::collection::vec(any::<bool>(), 0..32)) {
        let items: Vec<Value> = flags
            .iter()
            .map(|valid| if *valid { Value::Int(1) } else { Value::from("x") })
            .collect();
        let invalid = flags.iter().filter(|valid| !**valid).count();
        let result = ListValidator::new(IntegerValidator::new())
            .validate(&Value::List(items), &Context::new());

        match result {
            Ok(outputs) => {
                prop_assert_eq!(invalid, 0);
                prop_assert_eq!(outputs.len(), flags.len());
            }
            Err(err) => {
                let reported = err
                    .as_validation()
                    .and_then(|error| error.item_errors())
                    .map_or(0, |errors| errors.len());
                prop_assert_eq!(reported, invalid);
            }
        }
    }
}
