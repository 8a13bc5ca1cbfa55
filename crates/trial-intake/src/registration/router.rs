use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::json;

use super::domain::RegistrationId;
use super::form::RegistrationForm;
use super::repository::{NotificationDispatcher, RegistrationRepository, RepositoryError};
use super::service::{RegistrationService, RegistrationServiceError};

/// Router builder exposing the public intake endpoints.
pub fn registration_router<R, D>(service: Arc<RegistrationService<R, D>>) -> Router
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    Router::new()
        .route("/api/v1/registrations", post(submit_handler::<R, D>))
        .route(
            "/api/v1/registrations/:registration_id",
            get(status_handler::<R, D>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, D>(
    State(service): State<Arc<RegistrationService<R, D>>>,
    axum::Form(form): axum::Form<RegistrationForm>,
) -> Response
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    match service.submit(form, Utc::now()) {
        Ok(receipt) => {
            let payload = json!({
                "registration": receipt.record.status_view(),
                "advisory": receipt.advisory,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(RegistrationServiceError::Rejected(rejection)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(rejection)).into_response()
        }
        Err(RegistrationServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "registration already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, D>(
    State(service): State<Arc<RegistrationService<R, D>>>,
    Path(registration_id): Path<String>,
) -> Response
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    let id = RegistrationId(registration_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(RegistrationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "registration_id": id.0,
                "error": "registration not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
