//! List validator
//!
//! Every element is validated with the same element validator. Elements
//! that fail are dropped from the output and their payloads are collected
//! in element order.
//!
//! Policies:
//! - `all` (default): any failing element fails the list
//! - at-least-one: the list fails when no element validated, including
//!   when there was no element to validate
//!
//! Length bounds apply to the input length, before elements are dropped.

use serde_json::Value;
use tracing::{debug, trace};

use super::errors::{ValidationError, ValidationResult};
use super::validator::{BoxedValidator, Validate};
use super::value::{is_falsy, json_type_name};

/// Validator for lists of homogeneous elements.
pub struct ListValidator {
    element: BoxedValidator,
    required: bool,
    default: Option<Vec<Value>>,
    min_len: usize,
    max_len: Option<usize>,
    all: bool,
}

impl ListValidator {
    /// Create a required list validator in `all` mode
    pub fn new<V: Validate + 'static>(element: V) -> Self {
        Self {
            element: Box::new(element),
            required: true,
            default: None,
            min_len: 0,
            max_len: None,
            all: true,
        }
    }

    /// Allows the list to be absent; an absent list validates to `[]`.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the list used when the input is falsy
    pub fn default_value(mut self, default: Vec<Value>) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the minimum number of input entries
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Sets the maximum number of input entries
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Chooses between `all` mode (`true`) and at-least-one mode (`false`)
    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    /// Returns whether the list is required
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns whether every element must validate
    pub fn requires_all(&self) -> bool {
        self.all
    }

    /// Returns the input length bounds
    pub fn len_bounds(&self) -> (usize, Option<usize>) {
        (self.min_len, self.max_len)
    }

    /// Validates the elements of an already unwrapped list.
    pub fn validate_items(&self, items: Vec<Value>) -> ValidationResult<Vec<Value>> {
        let len = items.len();

        if len < self.min_len {
            return Err(ValidationError::out_of_bounds(format!(
                "expected at least {} entries but got {}",
                self.min_len, len
            )));
        }
        if let Some(max_len) = self.max_len {
            if len > max_len {
                return Err(ValidationError::out_of_bounds(format!(
                    "expected at most {} entries but got {}",
                    max_len, len
                )));
            }
        }

        let mut validated = Vec::with_capacity(len);
        let mut errors = Vec::new();
        for item in items {
            match self.element.validate(item) {
                Ok(value) => validated.push(value),
                Err(e) => errors.push(e.into_errors()),
            }
        }

        let failed = if self.all {
            !errors.is_empty()
        } else {
            validated.is_empty()
        };
        if failed {
            debug!(
                entries = len,
                failed = errors.len(),
                all = self.all,
                "list validation failed"
            );
            return Err(ValidationError::items(errors));
        }

        trace!(entries = len, kept = validated.len(), "list validated");
        Ok(validated)
    }
}

impl std::fmt::Debug for ListValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListValidator")
            .field("required", &self.required)
            .field("default", &self.default)
            .field("min_len", &self.min_len)
            .field("max_len", &self.max_len)
            .field("all", &self.all)
            .finish_non_exhaustive()
    }
}

impl Validate for ListValidator {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        let input = if is_falsy(&input) {
            match &self.default {
                Some(default) if !default.is_empty() => Value::Array(default.clone()),
                _ if self.required => return Err(ValidationError::missing_required()),
                Some(default) => Value::Array(default.clone()),
                None => return Ok(Value::Array(Vec::new())),
            }
        } else {
            input
        };

        let items = match input {
            Value::Array(items) => items,
            other => {
                return Err(ValidationError::invalid_type(format!(
                    "expected a list but got {}",
                    json_type_name(&other)
                )))
            }
        };

        self.validate_items(items).map(Value::Array)
    }
}
