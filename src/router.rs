use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};

use crate::{handlers, middleware::auth::jwt_auth_middleware, state::AppState};

/// Builds the application router.
///
/// All candidate CRUD routes sit behind the bearer-token middleware; the
/// status check, auth endpoints, and health check are public.
pub fn build_router(state: AppState) -> Router {
    // Multipart bodies carry the resume file; leave headroom above the
    // per-file limit for the text fields and part framing.
    let body_limit = state.config.upload.max_file_size_bytes + 1024 * 1024;

    let protected_candidates = Router::new()
        .route(
            "/api/candidates",
            post(handlers::create_candidate).get(handlers::list_candidates),
        )
        .route(
            "/api/candidates/{id}",
            get(handlers::get_candidate)
                .put(handlers::update_candidate)
                .delete(handlers::delete_candidate),
        )
        .route("/api/candidates/{id}/resume", get(handlers::get_resume))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/users/register", post(handlers::register))
        .route("/api/users/login", post(handlers::login))
        .route("/api/candidates/status/check", get(handlers::check_status))
        .merge(protected_candidates)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
