use super::fields;
use super::FieldVerdict;

/// Validator callback applied to one raw form field.
pub type FieldValidator = fn(&str) -> FieldVerdict;

/// Explicit field-name to validator mapping.
///
/// Entries iterate in form order (name, email, mobile, pincode, age, health
/// note) so callers can report errors and focus targets top to bottom.
#[derive(Debug)]
pub struct ValidatorRegistry {
    entries: Vec<(&'static str, FieldValidator)>,
}

impl ValidatorRegistry {
    pub fn standard() -> Self {
        Self {
            entries: vec![
                ("full_name", fields::validate_full_name as FieldValidator),
                ("email", fields::validate_email),
                ("mobile", fields::validate_mobile),
                ("pincode", fields::validate_pincode),
                ("age", fields::validate_age),
                ("health_note", fields::validate_health_note),
            ],
        }
    }

    pub fn lookup(&self, field: &str) -> Option<FieldValidator> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, validator)| *validator)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, FieldValidator)> + '_ {
        self.entries.iter().copied()
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
