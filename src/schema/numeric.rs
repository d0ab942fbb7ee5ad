//! Integer and floating-point validators
//!
//! Both substitute the default for `Null`, treat a still-absent value as
//! missing only when required, and enforce inclusive bounds.

use serde_json::{Number, Value};

use super::errors::{ValidationError, ValidationResult};
use super::validator::Validate;
use super::value::render;

/// Decimal places floats are rounded to unless configured otherwise
pub const DEFAULT_ROUND_TO: u32 = 2;

/// Constraints shared by the numeric validators
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericConstraints<T> {
    /// Whether an absent value is an error
    pub required: bool,
    /// Substituted when the input is `Null`
    pub default: Option<T>,
    /// Inclusive lower bound
    pub min: Option<T>,
    /// Inclusive upper bound
    pub max: Option<T>,
}

/// Renders a bound or bounded value inside an error message.
///
/// Floats keep their fractional part (`0.0`, not `0`).
trait BoundValue: PartialOrd + Copy {
    /// Returns the rendered value
    fn render_bound(self) -> String;
}

impl BoundValue for i64 {
    fn render_bound(self) -> String {
        self.to_string()
    }
}

impl BoundValue for f64 {
    fn render_bound(self) -> String {
        format!("{:?}", self)
    }
}

impl<T: BoundValue> NumericConstraints<T> {
    /// Checks inclusive bounds against an already parsed value.
    fn check_bounds(&self, value: T) -> ValidationResult<T> {
        if let Some(min) = self.min {
            if value < min {
                return Err(ValidationError::out_of_bounds(format!(
                    "'{}' is less than minimum allowed ({})",
                    value.render_bound(),
                    min.render_bound()
                )));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(ValidationError::out_of_bounds(format!(
                    "'{}' is greater than maximum allowed ({})",
                    value.render_bound(),
                    max.render_bound()
                )));
            }
        }
        Ok(value)
    }
}

/// Validator for integers.
///
/// Accepts integral JSON numbers and strings holding an integer. Floats are
/// rejected rather than truncated.
#[derive(Debug, Clone, Default)]
pub struct IntValidator {
    constraints: NumericConstraints<i64>,
}

impl IntValidator {
    /// Create an optional, unbounded integer validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator from plain constraints
    pub fn from_constraints(constraints: NumericConstraints<i64>) -> Self {
        Self { constraints }
    }

    /// Marks the value as required
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Sets the value used when the input is absent
    pub fn default_value(mut self, default: i64) -> Self {
        self.constraints.default = Some(default);
        self
    }

    /// Sets the inclusive lower bound
    pub fn min(mut self, min: i64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound
    pub fn max(mut self, max: i64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    /// Returns the constraints
    pub fn constraints(&self) -> &NumericConstraints<i64> {
        &self.constraints
    }

    /// Validates a raw value, returning `None` for an allowed absence.
    pub fn check(&self, input: &Value) -> ValidationResult<Option<i64>> {
        let value = match input {
            Value::Null => match self.constraints.default {
                Some(default) => default,
                None if self.constraints.required => return Err(ValidationError::missing_required()),
                None => return Ok(None),
            },
            other => parse_int(other)?,
        };
        self.constraints.check_bounds(value).map(Some)
    }
}

impl Validate for IntValidator {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        Ok(self.check(&input)?.map_or(Value::Null, Value::from))
    }
}

fn parse_int(value: &Value) -> ValidationResult<i64> {
    let parsed = match value {
        // Floats are never truncated
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ValidationError::invalid_type(format!("'{}' is not a valid integer", render(value)))
    })
}

/// Validator for floating-point numbers.
///
/// The parsed value is rounded to `round_to` decimal places once, before
/// bounds are checked.
#[derive(Debug, Clone)]
pub struct FloatValidator {
    constraints: NumericConstraints<f64>,
    round_to: u32,
}

impl Default for FloatValidator {
    fn default() -> Self {
        Self {
            constraints: NumericConstraints::default(),
            round_to: DEFAULT_ROUND_TO,
        }
    }
}

impl FloatValidator {
    /// Create an optional, unbounded float validator rounding to 2 places
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator from plain constraints
    pub fn from_constraints(constraints: NumericConstraints<f64>, round_to: u32) -> Self {
        Self {
            constraints,
            round_to,
        }
    }

    /// Marks the value as required
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Sets the value used when the input is absent
    pub fn default_value(mut self, default: f64) -> Self {
        self.constraints.default = Some(default);
        self
    }

    /// Sets the inclusive lower bound
    pub fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Sets the inclusive upper bound
    pub fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    /// Sets the number of decimal places kept
    pub fn round_to(mut self, places: u32) -> Self {
        self.round_to = places;
        self
    }

    /// Returns the constraints
    pub fn constraints(&self) -> &NumericConstraints<f64> {
        &self.constraints
    }

    /// Returns the number of decimal places kept
    pub fn decimal_places(&self) -> u32 {
        self.round_to
    }

    /// Validates a raw value, returning `None` for an allowed absence.
    pub fn check(&self, input: &Value) -> ValidationResult<Option<f64>> {
        let value = match input {
            Value::Null => match self.constraints.default {
                Some(default) => default,
                None if self.constraints.required => return Err(ValidationError::missing_required()),
                None => return Ok(None),
            },
            other => parse_float(other)?,
        };
        let rounded = round(value, self.round_to);
        self.constraints.check_bounds(rounded).map(Some)
    }
}

impl Validate for FloatValidator {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        match self.check(&input)? {
            Some(value) => Number::from_f64(value).map(Value::Number).ok_or_else(|| {
                ValidationError::invalid_type(format!("'{}' is not a valid floating number", value))
            }),
            None => Ok(Value::Null),
        }
    }
}

fn parse_float(value: &Value) -> ValidationResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    // NaN and infinities have no JSON representation
    parsed.filter(|f| f.is_finite()).ok_or_else(|| {
        ValidationError::invalid_type(format!(
            "'{}' is not a valid floating number",
            render(value)
        ))
    })
}

/// Digits after the point needed to write any `f64` exactly
const MAX_EXACT_PLACES: u32 = 1074;

/// Rounds to `places` decimal places from the exact binary value, with
/// exact ties going to the even digit.
fn round(value: f64, places: u32) -> f64 {
    let places = places.min(MAX_EXACT_PLACES) as usize;
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
