//! Clinical trial interest registration: form validation, eligibility
//! screening, persistence contracts, and the public HTTP surface.
//!
//! Submissions arrive as raw form fields, pass through the per-field
//! validators in form order, and are stored with an eligibility flag derived
//! exactly once from age and pincode region. Advisory screening produces the
//! human-facing outcome message without ever touching the stored flag.

pub(crate) mod eligibility;
pub mod domain;
pub mod form;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{Registrant, RegistrationId, MAX_AGE, MIN_AGE};
pub use eligibility::{
    approved_trial_sites, compose_advisory, normalize_region_code, EligibilityConfig,
    EligibilityEngine, ScreeningAdvisory, TrialSite,
};
pub use form::{FieldError, FormCoordinator, FormRejection, RegistrationForm};
pub use repository::{
    DispatchError, NotificationDispatcher, OutboundNotification, RegistrationRecord,
    RegistrationRepository, RegistrationStatusView, RepositoryError,
};
pub use router::registration_router;
pub use service::{
    NotificationRunSummary, RegistrationService, RegistrationServiceError, RegistrationStats,
    SubmissionReceipt,
};
pub use validation::{FieldVerdict, ValidatorRegistry};
