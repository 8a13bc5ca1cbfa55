use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use trial_intake::notify::NoticeBoard;
use trial_intake::registration::{
    approved_trial_sites, DispatchError, EligibilityConfig, NotificationDispatcher,
    OutboundNotification, RegistrationId, RegistrationRecord, RegistrationRepository,
    RepositoryError, MAX_AGE, MIN_AGE,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Notice board shared across admin requests via an axum extension.
#[derive(Clone, Default)]
pub(crate) struct SharedNotices(pub(crate) Arc<Mutex<NoticeBoard>>);

#[derive(Default, Clone)]
pub(crate) struct InMemoryRegistrationRepository {
    records: Arc<Mutex<HashMap<RegistrationId, RegistrationRecord>>>,
}

impl RegistrationRepository for InMemoryRegistrationRepository {
    fn insert(&self, record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: RegistrationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Stand-in for the SMTP relay that records every rendered acknowledgement.
#[derive(Default, Clone)]
pub(crate) struct RecordingDispatcher {
    sent: Arc<Mutex<Vec<OutboundNotification>>>,
}

impl RecordingDispatcher {
    pub(crate) fn sent(&self) -> Vec<OutboundNotification> {
        self.sent.lock().expect("dispatcher mutex poisoned").clone()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn dispatch(&self, notification: OutboundNotification) -> Result<(), DispatchError> {
        let mut guard = self.sent.lock().expect("dispatcher mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

pub(crate) fn default_eligibility_config() -> EligibilityConfig {
    EligibilityConfig {
        min_age: MIN_AGE,
        max_age: MAX_AGE,
        sites: approved_trial_sites(),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
