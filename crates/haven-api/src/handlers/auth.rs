//! Authentication handlers (login, password reset)

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let success = state
        .identity
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: success.access_token,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/reset-password
///
/// Answers identically whether or not the email is known, so the endpoint
/// is not an account-existence oracle. Delivery of the token is handled
/// out of band.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    if let Some(_token) = state.identity.request_password_reset(&payload.email).await? {
        debug!("Reset token issued");
    }

    Ok(Json(MessageResponse {
        message: "If the account exists, reset instructions have been sent".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct ResetConfirmRequest {
    pub token: String,
    pub password: String,
}

/// POST /api/reset-password/confirm
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<ResetConfirmRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .identity
        .reset_password(&payload.token, &payload.password)
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated".to_string(),
    }))
}
