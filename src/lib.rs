//! shapecheck - Composable validators with shape-mirroring errors
//!
//! Factories below return validators with default constraints; refine them
//! with builder methods and nest them through `Schema`, `object` and `list`.
//!
//! ```
//! use serde_json::json;
//! use shapecheck::{int, list, object, string, Schema, Validate};
//!
//! let user = object(
//!     Schema::new()
//!         .field("name", string().required().max_len(32))
//!         .field("age", int().required().min(0))
//!         .field("tags", list(string()).optional()),
//! );
//!
//! let err = user.validate(json!({ "name": "Ada", "age": -1 })).unwrap_err();
//! assert_eq!(
//!     serde_json::to_value(err.errors()).unwrap(),
//!     json!({ "age": "'-1' is less than minimum allowed (0)" })
//! );
//! ```

pub mod schema;

pub use schema::{
    BuildError, DateValidator, ErrorPayload, FloatValidator, IntValidator, ListValidator,
    ObjectValidator, Schema, StrValidator, Validate, ValidationError, ValidationErrorCode,
    ValidationResult,
};

/// Create an optional, unbounded integer validator.
pub fn int() -> IntValidator {
    IntValidator::new()
}

/// Create an optional, unbounded float validator rounding to 2 places.
pub fn float() -> FloatValidator {
    FloatValidator::new()
}

/// Create an optional, unconstrained string validator.
pub fn string() -> StrValidator {
    StrValidator::new()
}

/// Create an optional validator for `%Y-%m-%d` dates.
pub fn date() -> DateValidator {
    DateValidator::new()
}

/// Create a required object validator for `schema`.
pub fn object(schema: Schema) -> ObjectValidator {
    ObjectValidator::new(schema)
}

/// Create a required list validator in `all` mode.
pub fn list<V: Validate + 'static>(element: V) -> ListValidator {
    ListValidator::new(element)
}
