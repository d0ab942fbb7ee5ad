//! Object validator
//!
//! Validation semantics:
//! - Declared fields are validated in schema order
//! - Missing fields are validated as `Null`; the result is written back
//! - Undeclared fields pass through untouched
//! - Every field is attempted; failures are collected into a field map
//! - The aggregate error is raised only after all fields were attempted

use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::errors::{FieldErrors, ValidationError, ValidationResult};
use super::types::Schema;
use super::validator::Validate;
use super::value::{is_falsy, json_type_name};

/// Validator for objects against a schema.
///
/// Required by default. A falsy input (including `{}`) is replaced by the
/// default.
#[derive(Debug)]
pub struct ObjectValidator {
    schema: Schema,
    required: bool,
    default: Option<Map<String, Value>>,
}

impl ObjectValidator {
    /// Create a required validator for the given schema
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            required: true,
            default: None,
        }
    }

    /// Allows the object to be absent; an absent object validates to `Null`.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the object used when the input is falsy
    pub fn default_value(mut self, default: Map<String, Value>) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns the schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns whether the object is required
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Validates every declared field of `fields` in place.
    ///
    /// On success the same map is returned with declared fields replaced by
    /// their validated values.
    pub fn validate_fields(&self, mut fields: Map<String, Value>) -> ValidationResult<Map<String, Value>> {
        let mut errors = FieldErrors::new();

        for (name, validator) in self.schema.iter() {
            let raw = fields.get_mut(name).map(Value::take).unwrap_or(Value::Null);
            match validator.validate(raw) {
                Ok(validated) => {
                    fields.insert(name.to_string(), validated);
                }
                Err(e) => {
                    errors.insert(name, e.into_errors());
                }
            }
        }

        if !errors.is_empty() {
            debug!(
                declared = self.schema.len(),
                failed = errors.len(),
                "object validation failed"
            );
            return Err(ValidationError::fields(errors));
        }

        trace!(declared = self.schema.len(), "object validated");
        Ok(fields)
    }
}

impl Validate for ObjectValidator {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        let input = if is_falsy(&input) {
            match &self.default {
                Some(default) => Value::Object(default.clone()),
                None if self.required => return Err(ValidationError::missing_required()),
                None => return Ok(Value::Null),
            }
        } else {
            input
        };

        let fields = match input {
            Value::Object(fields) => fields,
            other => {
                return Err(ValidationError::invalid_type(format!(
                    "expected an object but got {}",
                    json_type_name(&other)
                )))
            }
        };

        self.validate_fields(fields).map(Value::Object)
    }
}
