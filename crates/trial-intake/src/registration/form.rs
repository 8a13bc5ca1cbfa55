use serde::{Deserialize, Serialize};

use super::domain::Registrant;
use super::validation::{format_mobile, format_pincode, parse_age, ValidatorRegistry};

/// Raw interest form exactly as posted, before any validation.
///
/// `age` stays a string here; the coordinator parses it only after the age
/// validator accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub health_note: String,
}

/// Inline error for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Aggregate rejection raised when any field fails validation.
///
/// `errors` lists failures in form order and `focus_field` names the first
/// invalid field so the client can move the cursor there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[error("{banner}")]
pub struct FormRejection {
    pub errors: Vec<FieldError>,
    pub focus_field: &'static str,
    pub banner: &'static str,
}

const REJECTION_BANNER: &str = "Please correct the highlighted fields and try again.";

impl FormRejection {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        let focus_field = errors.first().map(|error| error.field).unwrap_or("full_name");
        Self {
            errors,
            focus_field,
            banner: REJECTION_BANNER,
        }
    }
}

/// Runs the digit formatters and the validator registry over a posted form.
#[derive(Debug, Default)]
pub struct FormCoordinator {
    registry: ValidatorRegistry,
}

impl FormCoordinator {
    pub fn standard() -> Self {
        Self {
            registry: ValidatorRegistry::standard(),
        }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Validate the posted fields and build a [`Registrant`].
    ///
    /// Mobile and pincode are reformatted (digits only, length-capped) before
    /// their validators run, matching what the browser-side input mask leaves
    /// in the field.
    pub fn review(&self, form: RegistrationForm) -> Result<Registrant, FormRejection> {
        let mobile = format_mobile(&form.mobile);
        let pincode = format_pincode(&form.pincode);

        let mut errors = Vec::new();
        for (field, validator) in self.registry.iter() {
            let value = match field {
                "full_name" => form.full_name.as_str(),
                "email" => form.email.as_str(),
                "mobile" => mobile.as_str(),
                "pincode" => pincode.as_str(),
                "age" => form.age.as_str(),
                "health_note" => form.health_note.as_str(),
                _ => continue,
            };

            let verdict = validator(value);
            if !verdict.valid {
                errors.push(FieldError {
                    field,
                    message: verdict.message,
                });
            }
        }

        match parse_age(&form.age) {
            Some(age) if errors.is_empty() => Ok(Registrant {
                full_name: form.full_name.trim().to_string(),
                email: form.email.trim().to_string(),
                mobile,
                pincode,
                age,
                health_note: form.health_note.trim().to_string(),
            }),
            _ => Err(FormRejection::new(errors)),
        }
    }
}
