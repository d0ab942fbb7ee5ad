//! The validator contract
//!
//! Every validator takes one raw value and returns the normalized value or
//! a `ValidationError`. Validators:
//! - hold only build-time state (constraints, compiled patterns)
//! - never mutate shared state while validating
//! - are `Send + Sync`, so one schema can serve many threads

use std::sync::Arc;

use serde_json::Value;

use super::errors::ValidationResult;

/// A validator for one raw value.
///
/// Structural validators only depend on this trait, so any implementation
/// (including user-defined ones) can be nested inside objects and lists.
pub trait Validate: Send + Sync {
    /// Validates and normalizes `input`.
    ///
    /// `Value::Null` stands for an absent value.
    fn validate(&self, input: Value) -> ValidationResult<Value>;

    /// Validates a borrowed value, cloning it first.
    fn validate_ref(&self, input: &Value) -> ValidationResult<Value> {
        self.validate(input.clone())
    }
}

/// Owned, type-erased validator as stored by schemas and list validators.
pub type BoxedValidator = Box<dyn Validate>;

impl<V: Validate + ?Sized> Validate for Box<V> {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        (**self).validate(input)
    }
}
