//! Schema Invariant Tests
//!
//! Tests for composition and aggregation invariants:
//! - Error payloads mirror the shape of the input
//! - Every field and element is attempted before a structure fails
//! - Undeclared fields survive validation untouched
//! - Validation is deterministic and validators are shareable across threads

use serde_json::{json, Value};
use shapecheck::schema::ErrorPayload;
use shapecheck::{date, float, int, list, object, string, Schema, Validate, ValidationErrorCode};
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn order_schema() -> Schema {
    Schema::new()
        .field("id", int().required().min(1))
        .field("customer", string().required().min_len(2))
        .field("placed_on", date().required())
        .field(
            "lines",
            list(object(
                Schema::new()
                    .field("sku", string().required().pattern("[A-Z]{3}-[0-9]+$").unwrap())
                    .field("qty", int().required().min(1))
                    .field("price", float().required().min(0.0)),
            )),
        )
}

fn valid_order() -> Value {
    json!({
        "id": "17",
        "customer": "  Ada Lovelace ",
        "placed_on": "2024-03-01",
        "lines": [
            { "sku": "ABC-1", "qty": 2, "price": "9.999" },
            { "sku": "XYZ-22", "qty": "1", "price": 0 }
        ],
        "note": "leave at door"
    })
}

// =============================================================================
// Normalization Tests
// =============================================================================

/// A valid nested record is normalized field by field.
#[test]
fn test_nested_record_is_normalized() {
    let validator = object(order_schema());
    let validated = validator.validate(valid_order()).unwrap();

    assert_eq!(validated["id"], json!(17));
    assert_eq!(validated["customer"], json!("Ada Lovelace"));
    assert_eq!(validated["placed_on"], json!("2024-03-01"));
    assert_eq!(validated["lines"][0]["price"], json!(10.0));
    assert_eq!(validated["lines"][1]["qty"], json!(1));
}

/// Undeclared fields survive, at every nesting level.
#[test]
fn test_undeclared_fields_survive() {
    let validator = object(order_schema());
    let mut input = valid_order();
    input["lines"][0]["gift"] = json!(true);

    let validated = validator.validate(input).unwrap();
    assert_eq!(validated["note"], json!("leave at door"));
    assert_eq!(validated["lines"][0]["gift"], json!(true));
}

/// Re-validating a validated record returns an equal record.
#[test]
fn test_validation_is_idempotent() {
    let validator = object(order_schema());
    let once = validator.validate(valid_order()).unwrap();
    let twice = validator.validate(once.clone()).unwrap();
    assert_eq!(once, twice);
}

// =============================================================================
// Aggregation Tests
// =============================================================================

/// Errors from every level are aggregated into one payload mirroring the input.
#[test]
fn test_error_payload_mirrors_input_shape() {
    let validator = object(order_schema());
    let input = json!({
        "id": 0,
        "customer": "A",
        "placed_on": "01/03/2024",
        "lines": [
            { "sku": "ABC-1", "qty": 2, "price": 1 },
            { "sku": "abc-1", "qty": 0, "price": 1 }
        ]
    });

    let err = validator.validate(input).unwrap_err();
    assert_eq!(err.code(), ValidationErrorCode::Aggregate);
    assert_eq!(
        serde_json::to_value(err.errors()).unwrap(),
        json!({
            "id": "'0' is less than minimum allowed (1)",
            "customer": "'A' is shorter than minimum required length(2)",
            "placed_on": "'01/03/2024' does not match expected format(%Y-%m-%d)",
            "lines": [
                {
                    "sku": "'abc-1' does not match expected pattern([A-Z]{3}-[0-9]+$)",
                    "qty": "'0' is less than minimum allowed (1)"
                }
            ]
        })
    );
}

/// A caller can walk the payload programmatically.
#[test]
fn test_payload_can_be_walked() {
    let validator = object(order_schema());
    let mut input = valid_order();
    input["lines"][1]["qty"] = json!("many");

    let err = validator.validate(input).unwrap_err();
    let lines = err.errors().field("lines").and_then(ErrorPayload::as_items).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        lines[0].field("qty").and_then(ErrorPayload::as_message),
        Some("'many' is not a valid integer")
    );
}

/// Object failures are reported after all fields are attempted.
#[test]
fn test_missing_required_fields_all_reported() {
    let validator = object(order_schema());
    let err = validator.validate(json!({ "note": "only this" })).unwrap_err();
    let fields = err.errors().as_fields().unwrap();

    assert_eq!(fields.len(), 4);
    for name in ["id", "customer", "placed_on", "lines"] {
        assert_eq!(fields[name], ErrorPayload::from("required but was missing"));
    }
}

/// At-least-one lists inside objects keep only the valid entries.
#[test]
fn test_partial_list_inside_object() {
    let validator = object(
        Schema::new().field("scores", list(int().min(0).max(100)).all(false)),
    );
    let validated = validator
        .validate(json!({ "scores": [10, -5, "x", 100] }))
        .unwrap();
    assert_eq!(validated, json!({ "scores": [10, 100] }));
}

/// Top-level display renders structured payloads as JSON.
#[test]
fn test_display_of_aggregate() {
    let validator = list(int());
    let err = validator.validate(json!([1, "x", 3])).unwrap_err();
    assert_eq!(err.to_string(), r#"["'x' is not a valid integer"]"#);
}

// =============================================================================
// Determinism and Sharing Tests
// =============================================================================

/// Invalid document fails consistently.
#[test]
fn test_invalid_document_fails_consistently() {
    let validator = object(order_schema());
    let input = json!({ "id": "x" });
    let first = validator.validate(input.clone()).unwrap_err();

    for _ in 0..100 {
        assert_eq!(validator.validate(input.clone()).unwrap_err(), first);
    }
}

/// One schema serves many threads without locking.
#[test]
fn test_schema_shared_across_threads() {
    let validator = Arc::new(object(order_schema()));

    let handles: Vec<_> = (1..=8)
        .map(|id| {
            let validator = Arc::clone(&validator);
            std::thread::spawn(move || {
                let mut input = valid_order();
                input["id"] = json!(id);
                validator.validate(input)
            })
        })
        .collect();

    for (id, handle) in (1..=8).zip(handles) {
        let validated = handle.join().unwrap().unwrap();
        assert_eq!(validated["id"], json!(id));
    }
}

/// The same validator instance can be nested in several schemas.
#[test]
fn test_shared_validator_nested_twice() {
    let email = Arc::new(string().required().pattern(r"[^@\s]+@[^@\s]+$").unwrap());
    let validator = object(
        Schema::new()
            .field("from", Arc::clone(&email))
            .field("to", list(Arc::clone(&email))),
    );

    let err = validator
        .validate(json!({ "from": "a@b.c", "to": ["d@e.f", "nope"] }))
        .unwrap_err();
    assert_eq!(
        serde_json::to_value(err.errors()).unwrap(),
        json!({ "to": ["'nope' does not match expected pattern([^@\\s]+@[^@\\s]+$)"] })
    );
}
