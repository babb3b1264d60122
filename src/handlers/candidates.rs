//! Candidate HTTP handlers.
//!
//! Handlers follow the thin-layer pattern: they parse the request, delegate
//! to the candidate service, and shape the response.

use axum::{
    Json,
    extract::{Extension, Multipart, Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::Result,
    middleware::auth::AuthenticatedUser,
    models::candidates::{Candidate, StatusCheck},
    services::{candidates as candidate_services, uploads::CandidateMultipart},
    state::AppState,
};

// ============================================================================
// CREATE
// ============================================================================

/// POST /api/candidates
///
/// Creates a candidate from multipart fields plus an optional `resume`
/// file. A supplied file is uploaded to object storage and recorded as a
/// time-limited signed URL before the record is persisted.
pub async fn create_candidate(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Candidate>)> {
    tracing::info!(
        operation = "create_candidate",
        user_id = %auth_user.id,
        "Creating new candidate",
    );

    let body =
        CandidateMultipart::read(multipart, state.config.upload.max_file_size_bytes).await?;

    let candidate =
        candidate_services::create_candidate(&state.pool, &state.storage, body).await?;

    Ok((StatusCode::CREATED, Json(candidate)))
}

// ============================================================================
// READ
// ============================================================================

/// GET /api/candidates
///
/// Lists all candidates, each with `referredBy` resolved to name and email.
pub async fn list_candidates(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Candidate>>> {
    let candidates = candidate_services::list_candidates(&state.pool).await?;
    Ok(Json(candidates))
}

/// GET /api/candidates/{id}
pub async fn get_candidate(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Candidate>> {
    let candidate = candidate_services::get_candidate(&state.pool, id).await?;
    Ok(Json(candidate))
}

// ============================================================================
// UPDATE
// ============================================================================

/// PUT /api/candidates/{id}
///
/// Sparse update: only supplied multipart fields are written. A new
/// `resume` file replaces the stored signed URL; no file means the existing
/// URL is left untouched.
pub async fn update_candidate(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Candidate>> {
    tracing::info!(
        operation = "update_candidate",
        user_id = %auth_user.id,
        candidate_id = %id,
        "Updating candidate",
    );

    let body =
        CandidateMultipart::read(multipart, state.config.upload.max_file_size_bytes).await?;

    let candidate =
        candidate_services::update_candidate(&state.pool, &state.storage, id, body).await?;

    Ok(Json(candidate))
}

// ============================================================================
// DELETE
// ============================================================================

/// DELETE /api/candidates/{id}
///
/// Removes the record only; the stored resume object is not deleted.
pub async fn delete_candidate(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    tracing::info!(
        operation = "delete_candidate",
        user_id = %auth_user.id,
        candidate_id = %id,
        "Deleting candidate",
    );

    candidate_services::delete_candidate(&state.pool, id).await?;

    Ok(Json(serde_json::json!({
        "message": "Candidate deleted successfully"
    })))
}

// ============================================================================
// RESUME PROXY
// ============================================================================

/// GET /api/candidates/{id}/resume
///
/// Streams the resume bytes through the server instead of redirecting to
/// the object store, so browsers never hit the store cross-origin.
pub async fn get_resume(
    State(state): State<AppState>,
    Extension(_auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Response> {
    let (name, bytes) = candidate_services::fetch_resume(&state.pool, &state.storage, id).await?;

    let response = (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&name)),
        ],
        bytes,
    )
        .into_response();

    Ok(response)
}

/// Builds the attachment header for a resume download, named after the
/// candidate. Characters that would break the quoted filename are dropped.
fn content_disposition(candidate_name: &str) -> String {
    let safe: String = candidate_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\' && *c != ';')
        .collect();

    format!("attachment; filename=\"{} Resume.pdf\"", safe.trim())
}

// ============================================================================
// PUBLIC STATUS CHECK
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub email: String,
}

/// GET /api/candidates/status/check?email=
///
/// Unauthenticated referral status lookup. Returns only status, name, and
/// job title; an unknown email is a plain 404.
pub async fn check_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<StatusCheck>> {
    let status = candidate_services::status_by_email(&state.pool, &query.email).await?;
    Ok(Json(status))
}
