use axum::{Json, extract::State, http::StatusCode};

use crate::{
    error::Result,
    models::users::{LoginUser, RegisterUser},
    services::users,
    state::AppState,
};

/// POST /api/users/register
///
/// Registers a new user with name, email, and password.
///
/// # HTTP Status Codes
/// - `201 CREATED`: User registered successfully
/// - `400 BAD_REQUEST`: Validation error or email already registered
/// - `500 INTERNAL_SERVER_ERROR`: Database error
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterUser>,
) -> Result<(StatusCode, Json<serde_json::Value>)> {
    users::register_user(&state.pool, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User registered successfully"
        })),
    ))
}

/// POST /api/users/login
///
/// Authenticates a user and issues a bearer token with a fixed lifetime.
/// Unknown email and wrong password produce the same 400 response.
///
/// # HTTP Status Codes
/// - `200 OK`: Authentication successful
/// - `400 BAD_REQUEST`: Invalid credentials
/// - `500 INTERNAL_SERVER_ERROR`: Database error
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginUser>,
) -> Result<Json<serde_json::Value>> {
    let login_result = users::login_user(&state.pool, request, &state.config.auth).await?;

    Ok(Json(serde_json::json!({
        "message": "Login successful",
        "token": login_result.token,
        "expiresAt": login_result.expires_at,
        "user": login_result.user
    })))
}
