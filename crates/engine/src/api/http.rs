//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use ugclab_domain::ParticipantId;
use ugclab_shared::{
    CreatedResponse, ErrorResponse, HealthResponse, ParticipantData, TimeRecordSubmission,
    UgcSubmission,
};

use crate::app::App;
use crate::infrastructure::ports::StoreError;
use crate::use_cases::{ExportFormat, ExportOutput, SubmissionError};

const CSV_FILE_NAME: &str = "experiment_data.csv";

/// Create all HTTP routes.
///
/// The data routes are served both at the root and under `/api`, where
/// existing clients expect them.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(root))
        .merge(data_routes())
        .nest("/api", data_routes())
}

fn data_routes() -> Router<Arc<App>> {
    Router::new()
        .route("/health", get(health))
        .route("/data/ugc", post(submit_ugc))
        .route("/data/time", post(submit_time))
        .route("/data/export/all", get(export_all))
        .route("/data/{participant_id}", get(get_participant))
}

async fn root() -> &'static str {
    "OK"
}

async fn health(State(app): State<Arc<App>>) -> Result<Json<HealthResponse>, ApiError> {
    let health = app.use_cases.health.execute().await?;
    Ok(Json(health))
}

// =============================================================================
// Submissions
// =============================================================================

async fn submit_ugc(
    State(app): State<Arc<App>>,
    payload: Result<Json<UgcSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(submission) = payload?;
    app.use_cases.submission.ugc.execute(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("UGC content added successfully")),
    ))
}

async fn submit_time(
    State(app): State<Arc<App>>,
    payload: Result<Json<TimeRecordSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(submission) = payload?;
    app.use_cases.submission.time.execute(submission).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse::new("Time record added successfully")),
    ))
}

// =============================================================================
// Export
// =============================================================================

async fn get_participant(
    State(app): State<Arc<App>>,
    Path(participant_id): Path<String>,
) -> Result<Json<ParticipantData>, ApiError> {
    let data = app
        .use_cases
        .export
        .participant
        .execute(&ParticipantId::new(participant_id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(data))
}

#[derive(Debug, Deserialize)]
struct ExportQuery {
    format: Option<String>,
}

async fn export_all(
    State(app): State<Arc<App>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format = ExportFormat::from_query(query.format.as_deref());
    let response = match app.use_cases.export.all.execute(format).await? {
        ExportOutput::Json(envelope) => Json(envelope).into_response(),
        ExportOutput::Csv(csv) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{CSV_FILE_NAME}\""),
                ),
            ],
            csv,
        )
            .into_response(),
    };
    Ok(response)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Participant not found")),
            )
                .into_response(),
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::Invalid(e) => ApiError::BadRequest(e.to_string()),
            SubmissionError::Store(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
