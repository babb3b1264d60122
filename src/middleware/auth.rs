//! Bearer-token authentication middleware.
//!
//! Validates the JWT from the Authorization header and adds the
//! authenticated identity to request extensions. The token's `sub` claim is
//! trusted as the user id; no per-request database lookup is performed.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use secrecy::ExposeSecret;
use serde::Serialize;
use uuid::Uuid;

use crate::{error::Result, services::jwt::authenticate_jwt_token, state::AppState};

/// Authenticated user extracted from the JWT token
///
/// This struct is added to request extensions by the auth middleware after
/// successful validation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AuthenticatedUser {
    /// User's unique identifier
    pub id: Uuid,
}

/// JWT authentication middleware
///
/// # Behavior
/// 1. Extracts the bearer token from the Authorization header
/// 2. Validates JWT signature and expiration
/// 3. Adds `AuthenticatedUser` to request extensions
/// 4. Returns 401 if the token is invalid, expired, or missing
///
/// # Usage
/// Apply this middleware to protected routes using `route_layer()`:
///
/// ```ignore
/// Router::new()
///     .route("/protected", get(protected_handler))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         jwt_auth_middleware,
///     ))
/// ```
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let auth_header = headers.get("authorization").and_then(|h| h.to_str().ok());

    let user_id =
        authenticate_jwt_token(auth_header, state.config.auth.jwt_secret.expose_secret())?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { id: user_id });

    Ok(next.run(request).await)
}
