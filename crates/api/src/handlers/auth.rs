//! Email verification endpoints.
//!
//! Requesting a verification email only enqueues a task; the worker renders
//! and sends it. Following the link verifies the signed token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use courier_core::payloads::VerificationRecipient;
use courier_core::task_types;
use courier_core::types::DbId;
use courier_core::verification;
use courier_db::models::task::CreateTask;
use courier_db::repositories::TaskRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response for POST /auth/verification-email.
#[derive(Debug, Serialize)]
pub struct VerificationQueued {
    pub task_id: DbId,
}

/// Query for GET /auth/verify-email.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailParams {
    pub token: String,
}

/// Response for GET /auth/verify-email.
#[derive(Debug, Serialize)]
pub struct VerifiedEmail {
    pub user_id: DbId,
    pub email: String,
}

/// POST /api/auth/verification-email
pub async fn request_verification_email(
    State(state): State<AppState>,
    AppJson(recipient): AppJson<VerificationRecipient>,
) -> AppResult<impl IntoResponse> {
    recipient.validate()?;

    let payload =
        serde_json::to_string(&recipient).map_err(|e| AppError::InternalError(e.to_string()))?;
    let task = TaskRepo::enqueue(
        &state.pool,
        &CreateTask {
            task_type: task_types::SEND_VERIFICATION_EMAIL.to_string(),
            payload,
        },
    )
    .await?;

    tracing::info!(task_id = task.id, user_id = recipient.id, "Verification email queued");
    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: VerificationQueued { task_id: task.id },
        }),
    ))
}

/// GET /api/auth/verify-email?token=
pub async fn verify_email(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<VerifyEmailParams>,
) -> AppResult<impl IntoResponse> {
    let claims = verification::verify_token(&params.token, &state.config.verification)?;
    Ok(Json(DataResponse {
        data: VerifiedEmail {
            user_id: claims.sub,
            email: claims.email,
        },
    }))
}
