//! Per-field validation for the public interest form.
//!
//! Each validator is a pure function from the raw field text to a
//! [`FieldVerdict`]; the registry fixes the order in which the form
//! coordinator runs them.

mod fields;
mod registry;

pub use fields::{
    format_digits, format_mobile, format_pincode, validate_age, validate_email,
    validate_full_name, validate_health_note, validate_mobile, validate_pincode, MOBILE_DIGITS,
    PINCODE_DIGITS,
};
pub(crate) use fields::parse_age;
pub use registry::{FieldValidator, ValidatorRegistry};

use serde::Serialize;

/// Structured outcome of a single field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub valid: bool,
    pub message: &'static str,
}

impl FieldVerdict {
    pub(crate) const fn pass() -> Self {
        Self {
            valid: true,
            message: "",
        }
    }

    pub(crate) const fn fail(message: &'static str) -> Self {
        Self {
            valid: false,
            message,
        }
    }
}
