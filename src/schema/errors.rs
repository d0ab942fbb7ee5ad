//! Validation error types
//!
//! Error codes:
//! - VALIDATION_MISSING_REQUIRED
//! - VALIDATION_INVALID_TYPE
//! - VALIDATION_OUT_OF_BOUNDS
//! - VALIDATION_PATTERN_MISMATCH
//! - VALIDATION_AGGREGATE
//!
//! A `ValidationError` carries a payload whose shape mirrors the input that
//! produced it: a message for scalars, a field map for objects and a list
//! for sequences. Parents attach child payloads unchanged.

use std::fmt;
use std::ops::Index;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Message used by every validator when a required value is absent.
pub const MISSING_REQUIRED: &str = "required but was missing";

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Value absent and required
    MissingRequired,
    /// Value present but not coercible to the declared kind
    InvalidType,
    /// Numeric, length or date bound violated
    OutOfBounds,
    /// String does not match the declared pattern
    PatternMismatch,
    /// One or more fields or elements of a structure failed
    Aggregate,
}

impl ValidationErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationErrorCode::MissingRequired => "VALIDATION_MISSING_REQUIRED",
            ValidationErrorCode::InvalidType => "VALIDATION_INVALID_TYPE",
            ValidationErrorCode::OutOfBounds => "VALIDATION_OUT_OF_BOUNDS",
            ValidationErrorCode::PatternMismatch => "VALIDATION_PATTERN_MISMATCH",
            ValidationErrorCode::Aggregate => "VALIDATION_AGGREGATE",
        }
    }

    /// Returns whether errors with this code carry a structured payload
    pub fn is_structural(&self) -> bool {
        matches!(self, ValidationErrorCode::Aggregate)
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Per-field errors of an object, kept in schema declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    entries: Vec<(String, ErrorPayload)>,
}

impl FieldErrors {
    /// Create an empty field map
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the payload of a field. A field recorded twice keeps its
    /// first position and the latest payload.
    pub fn insert(&mut self, name: impl Into<String>, payload: ErrorPayload) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = payload,
            None => self.entries.push((name, payload)),
        }
    }

    /// Looks up the payload of a field
    pub fn get(&self, name: &str) -> Option<&ErrorPayload> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, payload)| payload)
    }

    /// Iterates fields in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorPayload)> {
        self.entries.iter().map(|(name, payload)| (name.as_str(), payload))
    }

    /// Returns the names of failed fields in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of failed fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no field failed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<&str> for FieldErrors {
    type Output = ErrorPayload;

    fn index(&self, name: &str) -> &ErrorPayload {
        match self.get(name) {
            Some(payload) => payload,
            None => panic!("no error recorded for field '{}'", name),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, ErrorPayload)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (S, ErrorPayload)>>(iter: I) -> Self {
        let mut fields = FieldErrors::new();
        for (name, payload) in iter {
            fields.insert(name, payload);
        }
        fields
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Error payload mirroring the shape of the validated input.
///
/// Serializes untagged: a message becomes a JSON string, fields a JSON
/// object and items a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    /// Failure of a scalar value, or of a structure as a whole
    Message(String),
    /// Per-field failures of an object, in schema order
    Fields(FieldErrors),
    /// Failures of list elements, in element order
    Items(Vec<ErrorPayload>),
}

impl ErrorPayload {
    /// Returns the message if this payload is a plain message
    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorPayload::Message(message) => Some(message),
            _ => None,
        }
    }

    /// Returns the field map if this payload came from an object
    pub fn as_fields(&self) -> Option<&FieldErrors> {
        match self {
            ErrorPayload::Fields(fields) => Some(fields),
            _ => None,
        }
    }

    /// Returns the element errors if this payload came from a list
    pub fn as_items(&self) -> Option<&[ErrorPayload]> {
        match self {
            ErrorPayload::Items(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up the payload of a single field
    pub fn field(&self, name: &str) -> Option<&ErrorPayload> {
        self.as_fields().and_then(|fields| fields.get(name))
    }
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPayload::Message(message) => f.write_str(message),
            structured => {
                let rendered = serde_json::to_string(structured).map_err(|_| fmt::Error)?;
                f.write_str(&rendered)
            }
        }
    }
}

impl From<&str> for ErrorPayload {
    fn from(message: &str) -> Self {
        ErrorPayload::Message(message.to_string())
    }
}

impl From<String> for ErrorPayload {
    fn from(message: String) -> Self {
        ErrorPayload::Message(message)
    }
}

/// Validation error with its code and shape-mirroring payload
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{payload}")]
pub struct ValidationError {
    /// Error code
    code: ValidationErrorCode,
    /// Message or structured payload
    payload: ErrorPayload,
}

impl ValidationError {
    /// Create a missing-required error
    pub fn missing_required() -> Self {
        Self {
            code: ValidationErrorCode::MissingRequired,
            payload: MISSING_REQUIRED.into(),
        }
    }

    /// Create a type or parse failure
    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::InvalidType,
            payload: ErrorPayload::Message(message.into()),
        }
    }

    /// Create a bound violation
    pub fn out_of_bounds(message: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::OutOfBounds,
            payload: ErrorPayload::Message(message.into()),
        }
    }

    /// Create a pattern mismatch
    pub fn pattern_mismatch(message: impl Into<String>) -> Self {
        Self {
            code: ValidationErrorCode::PatternMismatch,
            payload: ErrorPayload::Message(message.into()),
        }
    }

    /// Create an aggregate failure of an object, keyed by field name
    pub fn fields(errors: FieldErrors) -> Self {
        Self {
            code: ValidationErrorCode::Aggregate,
            payload: ErrorPayload::Fields(errors),
        }
    }

    /// Create an aggregate failure of a list, one entry per failed element
    pub fn items(errors: Vec<ErrorPayload>) -> Self {
        Self {
            code: ValidationErrorCode::Aggregate,
            payload: ErrorPayload::Items(errors),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Returns the original payload, not its rendered form
    pub fn errors(&self) -> &ErrorPayload {
        &self.payload
    }

    /// Consumes the error, returning the payload for attachment to a parent
    pub fn into_errors(self) -> ErrorPayload {
        self.payload
    }

    /// Returns the message if the payload is a plain message
    pub fn message(&self) -> Option<&str> {
        self.payload.as_message()
    }

    /// Returns whether the value was missing and required
    pub fn is_missing(&self) -> bool {
        self.code == ValidationErrorCode::MissingRequired
    }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while building a validator, before any input is seen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The string pattern does not compile
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Pattern as given
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// The date format contains unknown specifiers
    #[error("invalid date format '{format}'")]
    InvalidDateFormat {
        /// Format as given
        format: String,
    },
}
