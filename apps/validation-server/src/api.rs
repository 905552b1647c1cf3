//! API handlers for the validation server
//!
//! Provides REST endpoints for:
//! - Document validation (required groups + fuzzy targets)
//! - Stored document lookup
//! - Health checks

use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use shared_types::{ApiResponse, DocumentValidation, StoredDocument, ValidateDocumentRequest};
use validation_engine::ValidationEngine;

use crate::error::ServerError;
use crate::AppState;

const INSERTED_MESSAGE: &str = "The pdf has been inserted successfully!";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "validation-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /validate_document
pub async fn handle_validate_document(
    State(state): State<AppState>,
    payload: Result<Json<ValidateDocumentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DocumentValidation>>, ServerError> {
    let Json(req) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;

    let missing = req.missing_fields();
    if !missing.is_empty() {
        warn!("Rejected validation request, missing: {:?}", missing);
        return Err(ServerError::MissingParameters(missing.join(", ")));
    }

    info!(
        "Validating document {}: {} required groups, {} targets",
        req.document_id,
        req.required_strings.len(),
        req.validate_strings.len()
    );

    let payload = req.document.clone();
    let text = run_with_deadline(state.timeout_ms, move || {
        shared_pdf::text_from_base64(&payload)
    })
    .await??;
    debug!("Extracted {} characters", text.chars().count());

    state.store.insert(&req).await?;

    let ValidateDocumentRequest {
        document_id,
        required_strings,
        validate_strings,
        ..
    } = req;
    let report = run_with_deadline(state.timeout_ms, move || {
        ValidationEngine::new().validate(&text, &required_strings, &validate_strings)
    })
    .await?;

    info!(
        "Document {} validated: required={}, average={}",
        document_id, report.required, report.average_score
    );

    Ok(Json(ApiResponse::success(
        vec![DocumentValidation::from_report(document_id, report)],
        INSERTED_MESSAGE,
    )))
}

/// Handler: GET /get_document/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<ApiResponse<StoredDocument>>, ServerError> {
    info!("Getting document {}", document_id);

    let documents = state.store.find_by_document_id(&document_id).await?;
    if documents.is_empty() {
        return Err(ServerError::DocumentNotFound(document_id));
    }

    Ok(Json(ApiResponse::success(documents, "")))
}

/// Run CPU-bound work on the blocking pool, giving up after `timeout_ms`.
///
/// The worker thread is not interrupted on timeout; only the response is.
pub(crate) async fn run_with_deadline<F, T>(timeout_ms: u64, work: F) -> Result<T, ServerError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(work);
    match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_err)) => Err(ServerError::Internal(format!(
            "validation worker failed: {}",
            join_err
        ))),
        Err(_) => {
            warn!("Validation exceeded {}ms deadline", timeout_ms);
            Err(ServerError::Timeout(timeout_ms))
        }
    }
}
