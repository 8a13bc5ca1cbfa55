use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Registrant, RegistrationId};

/// Stored registration row: the validated registrant plus lifecycle flags.
///
/// `eligible` is computed once at submission and never recomputed;
/// `notified` flips from false to true at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub id: RegistrationId,
    pub registrant: Registrant,
    pub eligible: bool,
    pub notified: bool,
    pub submitted_at: DateTime<Utc>,
}

impl RegistrationRecord {
    pub fn eligibility_label(&self) -> &'static str {
        if self.eligible {
            "eligible"
        } else {
            "not_eligible"
        }
    }

    pub fn status_view(&self) -> RegistrationStatusView {
        RegistrationStatusView {
            registration_id: self.id.clone(),
            full_name: self.registrant.full_name.clone(),
            email: self.registrant.email.clone(),
            mobile: self.registrant.mobile.clone(),
            pincode: self.registrant.pincode.clone(),
            age: self.registrant.age,
            eligible: self.eligible,
            notified: self.notified,
            submitted_at: self.submitted_at,
        }
    }
}

/// Storage abstraction so the registration service can be exercised in
/// isolation.
pub trait RegistrationRepository: Send + Sync {
    fn insert(&self, record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError>;
    fn update(&self, record: RegistrationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<RegistrationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing the outbound acknowledgement mail boundary.
pub trait NotificationDispatcher: Send + Sync {
    fn dispatch(&self, notification: OutboundNotification) -> Result<(), DispatchError>;
}

/// Rendered acknowledgement handed to the mail adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundNotification {
    pub template: String,
    pub registration_id: RegistrationId,
    pub recipient: String,
    pub subject: String,
    pub html_body: String,
}

/// Mail dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
}

/// Public representation of a stored registration.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationStatusView {
    pub registration_id: RegistrationId,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    pub pincode: String,
    pub age: u8,
    pub eligible: bool,
    pub notified: bool,
    pub submitted_at: DateTime<Utc>,
}
