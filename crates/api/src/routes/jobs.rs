//! Job store routes: admin scheduling and the employee job list.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{
    CreateJobRequest, CreatedResponse, DataResponse, Job, JobWithAssignees, NewJob,
    UpdateJobStatusRequest,
};
use persistence::repositories::JobRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, EmployeeSession};
use crate::middleware::metrics::record_job_created;

/// POST /api/v1/admin/jobs
///
/// Creates the job and its assignments in one transaction. An unknown
/// employee id fails the whole request with 404.
pub async fn create_job(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_job = NewJob::try_from(request)?;

    let repo = JobRepository::new(state.pool.clone());
    let job = repo.create(&new_job).await?;

    record_job_created();
    info!(
        job_id = %job.id,
        date = %new_job.date,
        assignees = new_job.employee_ids.len(),
        "Job created"
    );

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(job.id))))
}

/// GET /api/v1/admin/jobs
///
/// All jobs by date then start time, with comma-joined assignee names.
pub async fn list_jobs(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<JobWithAssignees>>>, ApiError> {
    let repo = JobRepository::new(state.pool.clone());
    let jobs = repo
        .list_with_assignees()
        .await?
        .into_iter()
        .map(JobWithAssignees::from)
        .collect();

    Ok(Json(DataResponse::new(jobs)))
}

/// PATCH /api/v1/admin/jobs/:id/status
///
/// Admin override. Report submissions never go through here.
pub async fn override_job_status(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateJobStatusRequest>,
) -> Result<Json<DataResponse<Job>>, ApiError> {
    request.validate()?;
    let status = request
        .status
        .ok_or_else(|| ApiError::Validation("status is required".to_string()))?;

    let repo = JobRepository::new(state.pool.clone());
    let job = repo
        .override_status(job_id, status, state.clock.now())
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    info!(job_id = %job_id, status = %status, "Job status overridden by admin");

    Ok(Json(DataResponse::new(job.into())))
}

/// GET /api/v1/employee/jobs
///
/// Jobs the session's employee is assigned to.
pub async fn list_my_jobs(
    State(state): State<AppState>,
    session: EmployeeSession,
) -> Result<Json<DataResponse<Vec<Job>>>, ApiError> {
    let repo = JobRepository::new(state.pool.clone());
    let jobs = repo
        .list_for_employee(session.employee_id)
        .await?
        .into_iter()
        .map(Job::from)
        .collect();

    Ok(Json(DataResponse::new(jobs)))
}
