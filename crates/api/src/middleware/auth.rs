//! Admin authentication middleware.
//!
//! Admin routes accept the admin token as `X-Admin-Token: <token>` or
//! `Authorization: Bearer <token>`.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::crypto::constant_time_eq;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::admin_auth::expected_admin_token;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Returns the token from an `Authorization: Bearer` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn presented_admin_token(headers: &HeaderMap) -> Option<&str> {
    bearer_token(headers).or_else(|| {
        headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// Rejects requests that do not carry the admin token.
///
/// Answers 500 when no admin credentials are configured, so a misconfigured
/// deployment is visible instead of silently locked.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = expected_admin_token(&state.config.admin) else {
        return ApiError::Internal("admin auth not configured".to_string()).into_response();
    };

    match presented_admin_token(req.headers()) {
        Some(token) if constant_time_eq(token, &expected) => next.run(req).await,
        _ => ApiError::Unauthorized("Unauthorized".to_string()).into_response(),
    }
}
