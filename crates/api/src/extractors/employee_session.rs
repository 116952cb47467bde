//! Employee session extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::bearer_token;

/// The employee behind the request's `Authorization: Bearer` session token.
#[derive(Debug, Clone)]
pub struct EmployeeSession {
    pub employee_id: Uuid,
    pub employee_name: String,
    /// The presented token, needed to revoke the session on logout.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for EmployeeSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::Unauthorized("Missing session token".to_string()))?;

        let session = state
            .sessions
            .lookup(token)
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".to_string()))?;

        Ok(EmployeeSession {
            employee_id: session.employee_id,
            employee_name: session.employee_name,
            token: token.to_string(),
        })
    }
}
