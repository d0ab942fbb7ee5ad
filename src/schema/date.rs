//! Date validator
//!
//! Strings are trimmed and parsed with a strftime-style format. Every field
//! in the format must be present in the input. Formats without a time parse
//! to midnight, formats without a date parse onto 1900-01-01.
//!
//! Bounds reject dates strictly before `min` or strictly after `max`; a date
//! equal to a bound is accepted.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;

use super::errors::{BuildError, ValidationError, ValidationResult};
use super::validator::Validate;
use super::value::{is_falsy, render};

/// Format used when none is configured
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Constraints of a date validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateConstraints {
    /// Whether an absent value is an error
    pub required: bool,
    /// Substituted when the input is falsy
    pub default: Option<NaiveDateTime>,
    /// strftime-style format for parsing and rendering
    pub format: String,
    /// Earliest accepted date
    pub min: Option<NaiveDateTime>,
    /// Latest accepted date
    pub max: Option<NaiveDateTime>,
}

impl Default for DateConstraints {
    fn default() -> Self {
        Self {
            required: false,
            default: None,
            format: DEFAULT_DATE_FORMAT.to_string(),
            min: None,
            max: None,
        }
    }
}

/// Validator for dates.
///
/// `validate` returns the date rendered back in the configured format;
/// `check` returns the parsed `NaiveDateTime`.
#[derive(Debug, Clone, Default)]
pub struct DateValidator {
    constraints: DateConstraints,
}

impl DateValidator {
    /// Create an optional, unbounded validator for `%Y-%m-%d` dates
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator from plain constraints, checking the format.
    pub fn from_constraints(constraints: DateConstraints) -> Result<Self, BuildError> {
        check_format(&constraints.format)?;
        Ok(Self { constraints })
    }

    /// Marks the value as required
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Sets the date used when the input is falsy
    pub fn default_value(mut self, default: NaiveDateTime) -> Self {
        self.constraints.default = Some(default);
        self
    }

    /// Sets the format.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidDateFormat` for unknown specifiers.
    pub fn format(mut self, format: impl Into<String>) -> Result<Self, BuildError> {
        let format = format.into();
        check_format(&format)?;
        self.constraints.format = format;
        Ok(self)
    }

    /// Sets the earliest accepted date
    pub fn min(mut self, min: NaiveDateTime) -> Self {
        self.constraints.min = Some(min);
        self
    }

    /// Sets the latest accepted date
    pub fn max(mut self, max: NaiveDateTime) -> Self {
        self.constraints.max = Some(max);
        self
    }

    /// Returns the constraints
    pub fn constraints(&self) -> &DateConstraints {
        &self.constraints
    }

    /// Validates a raw value, returning `None` for an allowed absence.
    pub fn check(&self, input: &Value) -> ValidationResult<Option<NaiveDateTime>> {
        if self.constraints.required && input.is_null() {
            return Err(ValidationError::missing_required());
        }

        if is_falsy(input) {
            match self.constraints.default {
                // The default is already a date, only its bounds are checked
                Some(default) => return self.check_datetime(default).map(Some),
                None if !self.constraints.required => return Ok(None),
                // Required but falsy: fall through and fail on parsing
                None => {}
            }
        }

        let text = render(input);
        let parsed = parse(text.trim(), &self.constraints.format).ok_or_else(|| {
            ValidationError::invalid_type(format!(
                "'{}' does not match expected format({})",
                text, self.constraints.format
            ))
        })?;
        self.check_datetime(parsed).map(Some)
    }

    /// Checks the bounds of a date that is already parsed.
    pub fn check_datetime(&self, date: NaiveDateTime) -> ValidationResult<NaiveDateTime> {
        if let Some(min) = self.constraints.min {
            if date < min {
                return Err(ValidationError::out_of_bounds(format!(
                    "'{}' occurs before minimum date({})",
                    self.render_date(&date),
                    self.render_date(&min)
                )));
            }
        }
        if let Some(max) = self.constraints.max {
            if date > max {
                return Err(ValidationError::out_of_bounds(format!(
                    "'{}' occurs after maximum date({})",
                    self.render_date(&date),
                    self.render_date(&max)
                )));
            }
        }
        Ok(date)
    }

    /// Renders a date with the configured format.
    ///
    /// Falls back to ISO 8601 when the format needs data a naive date
    /// cannot provide (e.g. `%z`).
    pub fn render_date(&self, date: &NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.constraints.format)).is_err() {
            return date.to_string();
        }
        out
    }
}

impl Validate for DateValidator {
    fn validate(&self, input: Value) -> ValidationResult<Value> {
        Ok(self
            .check(&input)?
            .map_or(Value::Null, |date| Value::String(self.render_date(&date))))
    }
}

fn check_format(format: &str) -> Result<(), BuildError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(BuildError::InvalidDateFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}

fn parse(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            let time = NaiveTime::parse_from_str(text, format).ok()?;
            NaiveDate::from_ymd_opt(1900, 1, 1).map(|date| date.and_time(time))
        })
}
