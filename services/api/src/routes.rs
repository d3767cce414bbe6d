use crate::infra::{generated_at, AppState, SummarySettings};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response as HttpResponse};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use rorschach_cs::error::AppError;
use rorschach_cs::scoring::tables::TABLE_EDITION;
use rorschach_cs::scoring::{
    calculate, protocol_advisories, sample_data, summary_rows, write_csv, CalculationResult,
    Response,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryRequest {
    #[serde(default)]
    pub(crate) responses: Vec<Response>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SummaryResponse {
    pub(crate) generated_at: DateTime<Utc>,
    pub(crate) table_edition: &'static str,
    #[serde(flatten)]
    pub(crate) result: CalculationResult,
    pub(crate) advisories: Vec<String>,
}

impl SummaryResponse {
    fn new(result: CalculationResult, settings: SummarySettings) -> Self {
        let advisories = result
            .data
            .as_ref()
            .map(|summary| protocol_advisories(summary, settings.min_responses))
            .unwrap_or_default();
        Self {
            generated_at: generated_at(),
            table_edition: TABLE_EDITION,
            result,
            advisories,
        }
    }

    fn status(&self) -> StatusCode {
        if self.result.success {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

impl IntoResponse for SummaryResponse {
    fn into_response(self) -> HttpResponse {
        (self.status(), Json(self)).into_response()
    }
}

/// Structural summary endpoints; infrastructure routes are added by
/// [`with_summary_routes`].
pub(crate) fn summary_router(settings: SummarySettings) -> Router {
    Router::new()
        .route("/api/v1/structural-summary", post(summary_endpoint))
        .route("/api/v1/structural-summary/sample", get(sample_endpoint))
        .route("/api/v1/structural-summary/export", post(export_endpoint))
        .with_state(settings)
}

pub(crate) fn with_summary_routes(settings: SummarySettings) -> Router {
    summary_router(settings)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
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

pub(crate) async fn summary_endpoint(
    State(settings): State<SummarySettings>,
    Json(payload): Json<SummaryRequest>,
) -> SummaryResponse {
    let result = calculate(&payload.responses);
    info!(
        responses = payload.responses.len(),
        success = result.success,
        "structural summary requested"
    );
    SummaryResponse::new(result, settings)
}

pub(crate) async fn sample_endpoint(State(settings): State<SummarySettings>) -> SummaryResponse {
    SummaryResponse::new(calculate(&sample_data()), settings)
}

pub(crate) async fn export_endpoint(
    State(settings): State<SummarySettings>,
    Json(payload): Json<SummaryRequest>,
) -> Result<HttpResponse, AppError> {
    let result = calculate(&payload.responses);
    let Some(summary) = result.data.as_ref() else {
        return Ok(SummaryResponse::new(result, settings).into_response());
    };

    let rows = summary_rows(summary)?;
    let mut body = Vec::new();
    write_csv(&rows, &mut body)?;
    info!(rows = rows.len(), "structural summary exported");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"structural-summary.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}
