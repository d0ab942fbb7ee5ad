//! String validator
//!
//! Falsy inputs count as absent. Present values are rendered to text and
//! trimmed before length and pattern checks. Patterns match at the start
//! of the string only; anchor with `$` to require a full match.

use regex::Regex;
use serde_json::Value;

use super::errors::{BuildError, ValidationError, ValidationResult};
use super::validator::Validate;
use super::value::{is_falsy, render};

/// Constraints of a string validator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrConstraints {
    /// Whether an absent value is an error
    pub required: bool,
    /// Substituted when the input is falsy
    pub default: Option<String>,
    /// Minimum length in characters, after trimming
    pub min_len: Option<usize>,
    /// Maximum length in characters, after trimming
    pub max_len: Option<usize>,
    /// Pattern the trimmed string must match at its start
    pub pattern: Option<String>,
}

/// Validator for strings.
#[derive(Debug, Clone, Default)]
pub struct StrValidator {
    constraints: StrConstraints,
    /// `pattern` compiled with a start anchor
    compiled: Option<Regex>,
}

impl StrValidator {
    /// Create an optional, unconstrained string validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator from plain constraints, compiling the pattern.
    pub fn from_constraints(constraints: StrConstraints) -> Result<Self, BuildError> {
        let compiled = constraints.pattern.as_deref().map(compile_prefix).transpose()?;
        Ok(Self {
            constraints,
            compiled,
        })
    }

    /// Marks the value as required
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Sets the value used when the input is falsy
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.constraints.default = Some(default.into());
        self
    }

    /// Sets the minimum length
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.constraints.min_len = Some(min_len);
        self
    }

    /// Sets the maximum length
    pub fn max_len(mut self, max_len: usize) -> Self {
        self.constraints.max_len = Some(max_len);
        self
    }

    /// Sets the pattern, compiling it once.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidPattern` if the pattern does not compile.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Result<Self, BuildError> {
        let pattern = pattern.into();
        self.compiled = Some(compile_prefix(&pattern)?);
        self.constraints.pattern = Some(pattern);
        Ok(self)
    }

    /// Returns the constraints
    pub fn constraints(&self) -> &StrConstraints {
        &self.constraints
    }

    /// Validates a raw value, returning `None` for an allowed absence.
    pub fn check(&self, input: &Value) -> ValidationResult<Option<String>> {
        let text = if is_falsy(input) {
            match &self.constraints.default {
                Some(default) => default.clone(),
                None if self.constraints.required => return Err(ValidationError::missing_required()),
                None => return Ok(None),
            }
        } else {
            render(input)
        };

        let text = text.trim();
        let len = text.chars().count();

        if let Some(min_len) = self.constraints.min_len {
            if len < min_len {
                return Err(ValidationError::out_of_bounds(format!(
                    "'{}' is shorter than minimum required length({})",
                    text, min_len
                )));
            }
        }
        if let Some(max_len) = self.constraints.max_len {
            if len > max_len {
                return Err(ValidationError::out_of_bounds(format!(
                    "'{}' is longer than maximum required length({})",
                    text, max_len
                )));
            }
        }
        if let (Some(compiled), Some(pattern)) = (&self.compiled, &self.constraints.pattern) {
            if !compiled.is_match(text) {
                return Err(ValidationError::pattern_mismatch(format!(
                    "'{}' does not match expected pattern({})",
                    text, pattern
                )));
            }
        }

        Ok(Some(text.to_string()))
    }
}

impl Validate for StrValidator {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        Ok(self.check(&input)?.map_or(Value::Null, Value::String))
    }
}

/// Compiles a pattern that only matches at the start of the input.
fn compile_prefix(pattern: &str) -> Result<Regex, BuildError> {
    Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|e| BuildError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
