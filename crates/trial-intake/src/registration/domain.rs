use serde::{Deserialize, Serialize};

/// Youngest age accepted for trial participation.
pub const MIN_AGE: u8 = 18;

/// Oldest age the intake form accepts as plausible.
pub const MAX_AGE: u8 = 120;

/// Identifier assigned to a stored registration (`reg-000001` style).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegistrationId(pub String);

/// Validated registrant details produced by the form coordinator.
///
/// Every field has already passed its validator: the name is letters and
/// spaces, mobile and pincode are pure digit strings of fixed length, and the
/// age sits inside the accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registrant {
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub pincode: String,
    pub age: u8,
    pub health_note: String,
}
