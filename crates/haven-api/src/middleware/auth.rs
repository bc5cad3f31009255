//! Bearer-token authentication extractor

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::error;

use haven_core::domain::User;
use haven_core::policy::{can_perform, Operation, ResourceKind};

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller. Extraction validates the bearer token, loads
/// the user, and touches `last_active`.
pub struct AuthUser(pub User);

impl AuthUser {
    /// Gates an operation through the central policy. Denial is 401, not
    /// 403, per the existing contract.
    pub fn require(&self, operation: Operation, resource: ResourceKind) -> Result<(), ApiError> {
        if can_perform(self.0.role, operation, resource) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // An absent header gets its own message; anything else wrong with
        // the token is "invalid or expired".
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(ApiError::Unauthenticated)?;
        let token = header
            .to_str()
            .ok()
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or(ApiError::InvalidToken)?;

        let claims = state
            .tokens
            .validate_access_token(token)
            .map_err(|_| ApiError::InvalidToken)?;
        let user_id = claims.user_id().ok_or(ApiError::InvalidToken)?;

        let user = state
            .identity
            .get_user(user_id)
            .await
            .map_err(|_| ApiError::InvalidToken)?;
        if user.archived {
            return Err(ApiError::InvalidToken);
        }

        if let Err(e) = state.identity.touch_last_active(user.id).await {
            // Not worth failing the request over.
            error!("Failed to update last_active: {}", e);
        }

        Ok(AuthUser(user))
    }
}
