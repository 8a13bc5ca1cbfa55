use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::domain::RegistrationId;
use super::eligibility::{EligibilityConfig, EligibilityEngine, ScreeningAdvisory};
use super::form::{FormCoordinator, FormRejection, RegistrationForm};
use super::repository::{
    DispatchError, NotificationDispatcher, RegistrationRecord, RegistrationRepository,
    RepositoryError,
};
use crate::notify::template;

/// Service composing the form coordinator, eligibility engine, repository,
/// and mail dispatcher.
pub struct RegistrationService<R, D> {
    coordinator: Arc<FormCoordinator>,
    engine: Arc<EligibilityEngine>,
    repository: Arc<R>,
    dispatcher: Arc<D>,
}

static REGISTRATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_registration_id() -> RegistrationId {
    let id = REGISTRATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    RegistrationId(format!("reg-{id:06}"))
}

impl<R, D> RegistrationService<R, D>
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    pub fn new(repository: Arc<R>, dispatcher: Arc<D>, config: EligibilityConfig) -> Self {
        Self {
            coordinator: Arc::new(FormCoordinator::standard()),
            engine: Arc::new(EligibilityEngine::new(config)),
            repository,
            dispatcher,
        }
    }

    /// Validate and store a new registration.
    ///
    /// The eligibility flag is derived here, exactly once; the returned
    /// receipt pairs the stored record with the advisory screening shown on
    /// the confirmation page.
    pub fn submit(
        &self,
        form: RegistrationForm,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, RegistrationServiceError> {
        let registrant = self.coordinator.review(form)?;
        let eligible = self.engine.decide(&registrant);
        let advisory = self.engine.screen(&registrant);

        let record = RegistrationRecord {
            id: next_registration_id(),
            registrant,
            eligible,
            notified: false,
            submitted_at,
        };

        let stored = self.repository.insert(record)?;
        Ok(SubmissionReceipt {
            record: stored,
            advisory,
        })
    }

    /// Fetch a registration for API responses.
    pub fn get(&self, id: &RegistrationId) -> Result<RegistrationRecord, RegistrationServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<RegistrationRecord>, RegistrationServiceError> {
        Ok(self.repository.list()?)
    }

    /// Dashboard counters over the whole store.
    pub fn stats(&self) -> Result<RegistrationStats, RegistrationServiceError> {
        let records = self.repository.list()?;
        let total = records.len();
        let eligible = records.iter().filter(|record| record.eligible).count();
        let notified = records.iter().filter(|record| record.notified).count();

        Ok(RegistrationStats {
            total,
            eligible,
            not_eligible: total - eligible,
            notified,
        })
    }

    /// Render and dispatch the acknowledgement for each selected id.
    ///
    /// Unknown ids and already-notified records are skipped; `notified`
    /// flips to true only after a successful dispatch, so a failed send
    /// stays retryable.
    pub fn notify_selected(
        &self,
        ids: &[RegistrationId],
    ) -> Result<NotificationRunSummary, RegistrationServiceError> {
        let mut summary = NotificationRunSummary::default();

        for id in ids {
            let mut record = match self.repository.fetch(id)? {
                Some(record) => record,
                None => {
                    summary.skipped += 1;
                    continue;
                }
            };

            if record.notified {
                summary.skipped += 1;
                continue;
            }

            let notification = template::acknowledgement(&record);
            match self.dispatcher.dispatch(notification) {
                Ok(()) => {
                    record.notified = true;
                    self.repository.update(record)?;
                    summary.sent += 1;
                }
                Err(DispatchError::Transport(detail)) => {
                    warn!(registration_id = %id.0, %detail, "acknowledgement dispatch failed");
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}

/// Stored record plus the advisory shown on the confirmation page.
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub record: RegistrationRecord,
    pub advisory: ScreeningAdvisory,
}

/// Admin dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationStats {
    pub total: usize,
    pub eligible: usize,
    pub not_eligible: usize,
    pub notified: usize,
}

/// Outcome counts for one bulk notification run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotificationRunSummary {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Error raised by the registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationServiceError {
    #[error(transparent)]
    Rejected(#[from] FormRejection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
