use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::registration::domain::RegistrationId;
use crate::registration::eligibility::EligibilityConfig;
use crate::registration::form::RegistrationForm;
use crate::registration::repository::{
    DispatchError, NotificationDispatcher, OutboundNotification, RegistrationRecord,
    RegistrationRepository, RepositoryError,
};
use crate::registration::{registration_router, RegistrationService};

pub(super) fn valid_form() -> RegistrationForm {
    RegistrationForm {
        full_name: "Jane Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        mobile: "98765 43210".to_string(),
        pincode: "560034".to_string(),
        age: "34".to_string(),
        health_note: "No chronic conditions, not on any medication".to_string(),
    }
}

pub(super) fn underage_form() -> RegistrationForm {
    let mut form = valid_form();
    form.age = "17".to_string();
    form
}

pub(super) fn remote_area_form() -> RegistrationForm {
    let mut form = valid_form();
    form.pincode = "999999".to_string();
    form
}

pub(super) fn chemotherapy_form() -> RegistrationForm {
    let mut form = valid_form();
    form.health_note = "Currently receiving chemotherapy for lymphoma".to_string();
    form
}

pub(super) fn eligibility_config() -> EligibilityConfig {
    EligibilityConfig::default()
}

pub(super) fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn build_service() -> (
    RegistrationService<MemoryRepository, MemoryDispatcher>,
    Arc<MemoryRepository>,
    Arc<MemoryDispatcher>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let dispatcher = Arc::new(MemoryDispatcher::default());
    let service =
        RegistrationService::new(repository.clone(), dispatcher.clone(), eligibility_config());
    (service, repository, dispatcher)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<RegistrationId, RegistrationRecord>>>,
}

impl RegistrationRepository for MemoryRepository {
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
        guard.insert(record.id.clone(), record);
        Ok(())
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

#[derive(Default, Clone)]
pub(super) struct MemoryDispatcher {
    sent: Arc<Mutex<Vec<OutboundNotification>>>,
}

impl MemoryDispatcher {
    pub(super) fn sent(&self) -> Vec<OutboundNotification> {
        self.sent.lock().expect("dispatcher mutex poisoned").clone()
    }
}

impl NotificationDispatcher for MemoryDispatcher {
    fn dispatch(&self, notification: OutboundNotification) -> Result<(), DispatchError> {
        self.sent
            .lock()
            .expect("dispatcher mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingDispatcher;

impl NotificationDispatcher for FailingDispatcher {
    fn dispatch(&self, _notification: OutboundNotification) -> Result<(), DispatchError> {
        Err(DispatchError::Transport("smtp offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl RegistrationRepository for ConflictRepository {
    fn insert(&self, _record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: RegistrationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl RegistrationRepository for UnavailableRepository {
    fn insert(&self, _record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: RegistrationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &RegistrationId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn registration_router_with_service(
    service: RegistrationService<MemoryRepository, MemoryDispatcher>,
) -> axum::Router {
    registration_router(Arc::new(service))
}
