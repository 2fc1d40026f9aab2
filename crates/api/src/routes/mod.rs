pub mod auth;
pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /tasks                        enqueue (POST), list (GET)
/// /tasks/{id}                   get
///
/// /auth/verification-email      queue a verification email (POST)
/// /auth/verify-email?token=     verify a token (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tasks", tasks::router())
        .nest("/auth", auth::router())
}
