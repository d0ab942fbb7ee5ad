//! Property tests for the scalar and structural validators
//!
//! - Validators are total: any input yields a value or an error, never a panic
//! - Re-applying a validator to its own output is a no-op
//! - Bounds hold for every accepted value

use proptest::prelude::*;
use serde_json::{json, Value};
use shapecheck::{date, float, int, list, object, string, Schema, Validate};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "\\PC{0,12}".prop_map(Value::from),
        "[ ]{0,2}-?[0-9]{1,6}[ ]{0,2}".prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn int_is_idempotent_and_bounded(input in arb_scalar()) {
        let validator = int().min(-1000).max(1000);
        if let Ok(once) = validator.validate(input) {
            if let Some(n) = once.as_i64() {
                prop_assert!((-1000..=1000).contains(&n));
            }
            prop_assert_eq!(validator.validate(once.clone()).unwrap(), once);
        }
    }

    #[test]
    fn float_is_idempotent(input in arb_scalar()) {
        let validator = float();
        if let Ok(once) = validator.validate(input) {
            prop_assert_eq!(validator.validate(once.clone()).unwrap(), once);
        }
    }

    #[test]
    fn string_is_idempotent_and_trimmed(input in arb_value()) {
        let validator = string().max_len(8);
        if let Ok(once) = validator.validate(input) {
            if let Some(text) = once.as_str() {
                prop_assert_eq!(text.trim(), text);
                prop_assert!(text.chars().count() <= 8);
            }
            // A whitespace-only input trims to "", which then reads as absent
            if once != json!("") {
                prop_assert_eq!(validator.validate(once.clone()).unwrap(), once);
            }
        }
    }

    #[test]
    fn date_is_idempotent(y in 1900i32..2100, m in 1u32..=12, d in 1u32..=28) {
        let validator = date();
        let once = validator.validate(json!(format!("{:04}-{:02}-{:02}", y, m, d))).unwrap();
        prop_assert_eq!(validator.validate(once.clone()).unwrap(), once);
    }

    #[test]
    fn structures_are_total(input in arb_value()) {
        let validator = object(
            Schema::new()
                .field("a", int())
                .field("b", list(int()).optional().all(false))
                .field("c", object(Schema::new().field("a", float())).optional()),
        );
        // Must not panic; successful output must be a fixed point
        if let Ok(once) = validator.validate(input) {
            prop_assert_eq!(validator.validate(once.clone()).unwrap(), once);
        }
    }
}
