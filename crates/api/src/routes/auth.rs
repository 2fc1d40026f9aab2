use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/verification-email",
            post(auth::request_verification_email),
        )
        .route("/verify-email", get(auth::verify_email))
}
