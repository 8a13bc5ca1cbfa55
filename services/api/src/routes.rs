use crate::infra::{AppState, SharedNotices};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use trial_intake::admin::{export_csv, export_filename, filter_records, sort_records, AdminQuery};
use trial_intake::error::AppError;
use trial_intake::notify::MessageTone;
use trial_intake::registration::{
    registration_router, NotificationDispatcher, NotificationRunSummary, RegistrationId,
    RegistrationRepository, RegistrationService, RegistrationStats, RegistrationStatusView,
};

pub(crate) const BULK_NOTICE_SLOT: &str = "bulk_notifications";

#[derive(Debug, Serialize)]
pub(crate) struct AdminDashboardResponse {
    pub(crate) registrations: Vec<RegistrationStatusView>,
    pub(crate) stats: RegistrationStats,
    pub(crate) sort: SortStateView,
    pub(crate) notices: Vec<NoticeView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SortStateView {
    pub(crate) column: &'static str,
    pub(crate) direction: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NoticeView {
    pub(crate) slot: String,
    pub(crate) tone: MessageTone,
    pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkNotificationRequest {
    pub(crate) registration_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkNotificationResponse {
    pub(crate) sent: usize,
    pub(crate) failed: usize,
    pub(crate) skipped: usize,
    pub(crate) notice: String,
}

pub(crate) fn with_registration_routes<R, D>(
    service: Arc<RegistrationService<R, D>>,
) -> axum::Router
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    registration_router(service.clone())
        .merge(admin_router(service))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

fn admin_router<R, D>(service: Arc<RegistrationService<R, D>>) -> axum::Router
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    axum::Router::new()
        .route(
            "/api/v1/admin/registrations",
            axum::routing::get(admin_registrations_endpoint::<R, D>),
        )
        .route(
            "/api/v1/admin/registrations/export",
            axum::routing::get(admin_export_endpoint::<R, D>),
        )
        .route(
            "/api/v1/admin/notifications",
            axum::routing::post(admin_notifications_endpoint::<R, D>),
        )
        .with_state(service)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn admin_registrations_endpoint<R, D>(
    State(service): State<Arc<RegistrationService<R, D>>>,
    Extension(notices): Extension<SharedNotices>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<AdminDashboardResponse>, AppError>
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    let sort = query.table_sort();
    let mut records = filter_records(service.list()?, &query);
    sort_records(&mut records, sort);
    let stats = service.stats()?;

    Ok(Json(AdminDashboardResponse {
        registrations: records.iter().map(|record| record.status_view()).collect(),
        stats,
        sort: SortStateView {
            column: sort.column.label(),
            direction: sort.direction.label(),
        },
        notices: active_notices(&notices),
    }))
}

pub(crate) async fn admin_export_endpoint<R, D>(
    State(service): State<Arc<RegistrationService<R, D>>>,
    Query(query): Query<AdminQuery>,
) -> Result<impl IntoResponse, AppError>
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    let mut records = filter_records(service.list()?, &query);
    sort_records(&mut records, query.table_sort());

    let body = export_csv(&records)?;
    let filename = export_filename(Local::now().date_naive());
    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

pub(crate) async fn admin_notifications_endpoint<R, D>(
    State(service): State<Arc<RegistrationService<R, D>>>,
    Extension(notices): Extension<SharedNotices>,
    Json(request): Json<BulkNotificationRequest>,
) -> Result<Json<BulkNotificationResponse>, AppError>
where
    R: RegistrationRepository + 'static,
    D: NotificationDispatcher + 'static,
{
    if request.registration_ids.is_empty() {
        let message = "Please select at least one registration to notify.".to_string();
        post_notice(&notices, MessageTone::Warning, message.clone());
        return Ok(Json(BulkNotificationResponse {
            sent: 0,
            failed: 0,
            skipped: 0,
            notice: message,
        }));
    }

    let ids: Vec<RegistrationId> = request
        .registration_ids
        .into_iter()
        .map(RegistrationId)
        .collect();
    let summary = service.notify_selected(&ids)?;

    let (tone, message) = run_notice(summary);
    post_notice(&notices, tone, message.clone());

    Ok(Json(BulkNotificationResponse {
        sent: summary.sent,
        failed: summary.failed,
        skipped: summary.skipped,
        notice: message,
    }))
}

fn run_notice(summary: NotificationRunSummary) -> (MessageTone, String) {
    let mut message = if summary.sent > 0 {
        format!("Successfully sent {} acknowledgement emails.", summary.sent)
    } else {
        "No acknowledgement emails were sent.".to_string()
    };
    if summary.failed > 0 {
        message.push_str(&format!(
            " Failed to send {} emails. Please check the email configuration.",
            summary.failed
        ));
    }
    if summary.skipped > 0 {
        message.push_str(&format!(
            " Skipped {} already acknowledged or unknown registrations.",
            summary.skipped
        ));
    }

    let tone = if summary.failed > 0 {
        MessageTone::Error
    } else if summary.sent > 0 {
        MessageTone::Success
    } else {
        MessageTone::Warning
    };

    (tone, message)
}

fn active_notices(notices: &SharedNotices) -> Vec<NoticeView> {
    let now = Utc::now();
    match notices.0.lock() {
        Ok(mut board) => {
            board.sweep(now);
            board
                .active_notices(now)
                .into_iter()
                .map(|(slot, notice)| NoticeView {
                    slot: slot.to_string(),
                    tone: notice.tone,
                    message: notice.message.clone(),
                })
                .collect()
        }
        Err(_) => Vec::new(),
    }
}

fn post_notice(notices: &SharedNotices, tone: MessageTone, message: String) {
    if let Ok(mut board) = notices.0.lock() {
        board.post(BULK_NOTICE_SLOT, tone, message, Utc::now());
    }
}
