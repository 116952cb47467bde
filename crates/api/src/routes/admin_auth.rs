//! Admin login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::services::admin_auth::{expected_admin_token, verify_admin_credentials};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: String,
}

/// POST /api/v1/admin/login
///
/// Exchanges the admin username and password for the admin token.
pub async fn admin_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let admin = &state.config.admin;
    if admin.password.is_empty() {
        return Err(ApiError::Internal("admin password not configured".to_string()));
    }

    if !verify_admin_credentials(admin, &request.username, &request.password) {
        warn!(username = %request.username, "Admin login rejected");
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = expected_admin_token(admin)
        .ok_or_else(|| ApiError::Internal("admin auth not configured".to_string()))?;

    info!("Admin logged in");
    Ok(Json(AdminLoginResponse {
        success: true,
        token,
    }))
}
