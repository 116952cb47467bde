//! Report ledger routes.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{
    DataResponse, JobReport, JobReportWithEmployee, JobStatus, ReportSubmission,
    SubmitReportRequest,
};
use persistence::repositories::{JobReportRepository, JobRepository};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, EmployeeSession};
use crate::middleware::metrics::record_report_submitted;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportResponse {
    pub success: bool,
    pub report: JobReport,
    pub job_status: JobStatus,
}

/// POST /api/v1/employee/reports
///
/// Merges a `start` or `finish` action into the caller's report for the job
/// and moves the job to the matching status. Employees can only report for
/// themselves.
pub async fn submit_report(
    State(state): State<AppState>,
    session: EmployeeSession,
    ApiJson(request): ApiJson<SubmitReportRequest>,
) -> Result<Json<SubmitReportResponse>, ApiError> {
    let submission = ReportSubmission::try_from(request)?;

    if submission.employee_id != session.employee_id {
        return Err(ApiError::Forbidden(
            "Reports can only be submitted for yourself".to_string(),
        ));
    }

    let repo = JobReportRepository::new(state.pool.clone());
    let submitted = repo.submit(&submission, state.clock.now()).await?;

    record_report_submitted(submission.action);
    info!(
        job_id = %submission.job_id,
        employee_id = %submission.employee_id,
        action = %submission.action,
        created = submitted.created,
        job_status = %submitted.job_status,
        "Job report merged"
    );

    Ok(Json(SubmitReportResponse {
        success: true,
        report: submitted.report.into(),
        job_status: submitted.job_status,
    }))
}

/// GET /api/v1/admin/jobs/:id/reports
pub async fn list_job_reports(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<DataResponse<Vec<JobReportWithEmployee>>>, ApiError> {
    JobRepository::new(state.pool.clone())
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))?;

    let reports = JobReportRepository::new(state.pool.clone())
        .list_for_job(job_id)
        .await?
        .into_iter()
        .map(JobReportWithEmployee::from)
        .collect();

    Ok(Json(DataResponse::new(reports)))
}
