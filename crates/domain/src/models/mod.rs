//! Domain models for Profoma.

pub mod employee;
pub mod intake;
pub mod job;
pub mod job_report;

use serde::Serialize;
use uuid::Uuid;

pub use employee::{
    CreateEmployeeRequest, Employee, EmployeeLoginRequest, EmployeeLoginResponse, LoginOutcome,
};
pub use intake::{
    offer_type_of, CreateHousingRequest, HousingRequest, IntakeStatus, OfferRequest,
    UpdateIntakeStatusRequest,
};
pub use job::{CreateJobRequest, Job, JobStatus, JobWithAssignees, NewJob, UpdateJobStatusRequest};
pub use job_report::{
    JobReport, JobReportWithEmployee, ReportAction, ReportSubmission, SubmitReportRequest,
};

/// Plain acknowledgement: `{ "success": true }`.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response after creating a resource.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: Uuid,
}

impl CreatedResponse {
    pub fn new(id: Uuid) -> Self {
        Self { success: true, id }
    }
}

/// Envelope for list and detail responses: `{ "success": true, "data": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Builds a single-field validation failure.
pub(crate) fn field_error(
    field: &'static str,
    code: &'static str,
    message: &'static str,
) -> validator::ValidationErrors {
    let mut error = validator::ValidationError::new(code);
    error.message = Some(message.into());
    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);
    errors
}
