//! Validator subsystem
//!
//! Validators are built once from constraints and then applied to many raw
//! `serde_json::Value` inputs. Each application returns the normalized value
//! or a `ValidationError` whose payload mirrors the shape of the input.
//!
//! # Design Principles
//!
//! - Constraints are fixed at build time
//! - Build-time misconfiguration is a `BuildError`, never a panic
//! - Leaf validators fail atomically
//! - Structural validators attempt every field and element before failing
//! - Validators are `Send + Sync` and hold no per-call state

mod date;
mod errors;
mod list;
mod numeric;
mod object;
mod string;
mod types;
mod validator;
mod value;

pub use date::{DateConstraints, DateValidator, DEFAULT_DATE_FORMAT};
pub use errors::{
    BuildError, ErrorPayload, FieldErrors, ValidationError, ValidationErrorCode, ValidationResult,
    MISSING_REQUIRED,
};
pub use list::ListValidator;
pub use numeric::{FloatValidator, IntValidator, NumericConstraints, DEFAULT_ROUND_TO};
pub use object::ObjectValidator;
pub use string::{StrConstraints, StrValidator};
pub use types::Schema;
pub use validator::{BoxedValidator, Validate};
pub use value::{is_falsy, json_type_name};
