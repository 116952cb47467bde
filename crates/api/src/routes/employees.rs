//! Employee directory routes: admin management, employee login and logout.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::{
    CreateEmployeeRequest, CreatedResponse, DataResponse, Employee, EmployeeLoginRequest,
    EmployeeLoginResponse, LoginOutcome, SuccessResponse,
};
use persistence::repositories::{EmployeeInput, EmployeeRepository};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, EmployeeSession};
use crate::middleware::metrics::record_employee_login;
use crate::middleware::rate_limited_response;

/// POST /api/v1/admin/employees
pub async fn create_employee(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let repo = EmployeeRepository::new(state.pool.clone());
    let employee = repo
        .create(EmployeeInput {
            name: request.name,
            role: request.role,
            phone: request.phone,
            email: request.email,
            login_code: request.login_code,
        })
        .await?;

    info!(employee_id = %employee.id, "Employee created");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(employee.id))))
}

/// GET /api/v1/admin/employees
///
/// Active employees ordered by name.
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<Employee>>>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    let employees = repo
        .list_active()
        .await?
        .into_iter()
        .map(Employee::from)
        .collect();

    Ok(Json(DataResponse::new(employees)))
}

/// DELETE /api/v1/admin/employees/:id
///
/// Soft delete. Existing assignments and reports are kept; open sessions are
/// revoked.
pub async fn deactivate_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let repo = EmployeeRepository::new(state.pool.clone());
    repo.deactivate(employee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

    let revoked = state.sessions.revoke_employee(employee_id);
    info!(employee_id = %employee_id, revoked_sessions = revoked, "Employee deactivated");

    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/employees/login
///
/// Wrong credentials are answered with `success: false` and HTTP 200.
pub async fn employee_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EmployeeLoginRequest>,
) -> Result<Response, ApiError> {
    request.validate()?;

    if let Some(limiter) = &state.login_limiter {
        if let Err(retry_after) = limiter.check(&request.name) {
            record_employee_login("rate_limited");
            return Ok(rate_limited_response(retry_after));
        }
    }

    let name = request.name.trim();
    let outcome = if name.is_empty() || request.code.is_empty() {
        LoginOutcome::NoMatch
    } else {
        let repo = EmployeeRepository::new(state.pool.clone());
        repo.authenticate(name, &request.code)
            .await?
            .map(Employee::from)
            .into()
    };

    state.sessions.purge_expired();
    if let Some(limiter) = &state.login_limiter {
        limiter.retain_recent();
    }

    match outcome {
        LoginOutcome::Authenticated(employee) => {
            let issued = state.sessions.issue(&employee);
            record_employee_login("success");
            info!(employee_id = %employee.id, "Employee logged in");
            Ok(Json(EmployeeLoginResponse::granted(
                employee,
                issued.token,
                issued.session.expires_at,
            ))
            .into_response())
        }
        LoginOutcome::NoMatch => {
            record_employee_login("invalid_credentials");
            debug!("Employee login did not match");
            Ok(Json(EmployeeLoginResponse::denied()).into_response())
        }
    }
}

/// POST /api/v1/employee/logout
pub async fn employee_logout(
    State(state): State<AppState>,
    session: EmployeeSession,
) -> Json<SuccessResponse> {
    state.sessions.revoke(&session.token);
    debug!(employee_id = %session.employee_id, "Employee logged out");
    Json(SuccessResponse::ok())
}
