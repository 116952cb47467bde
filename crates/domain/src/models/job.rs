//! Job domain models.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{parse_time_of_day, validate_time_of_day};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::services::assignment::normalize_employee_ids;
use crate::services::job_lifecycle::initial_status;

// ============================================================================
// Job Status
// ============================================================================

/// Lifecycle status of a job. Stored and serialized with its Dutch label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "Nieuw")]
    New,
    #[serde(rename = "Gepland")]
    Planned,
    #[serde(rename = "Gestart")]
    Started,
    #[serde(rename = "Afgerond")]
    Completed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::New,
        JobStatus::Planned,
        JobStatus::Started,
        JobStatus::Completed,
    ];

    /// Returns the string representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::New => "Nieuw",
            JobStatus::Planned => "Gepland",
            JobStatus::Started => "Gestart",
            JobStatus::Completed => "Afgerond",
        }
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        JobStatus::Planned
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid job status: {}. Must be one of: Nieuw, Gepland, Gestart, Afgerond",
                    s
                )
            })
    }
}

// ============================================================================
// Core Models
// ============================================================================

/// A scheduled unit of field work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub title: String,
    pub location: String,
    pub client: String,
    pub status: JobStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job with the comma-joined display names of its assignees.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithAssignees {
    #[serde(flatten)]
    pub job: Job,
    pub assigned_employee_names: String,
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request payload for creating a job.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobRequest {
    #[validate(required(message = "date is required"))]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(custom(function = "validate_time_of_day"))]
    pub start_time: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_time_of_day"))]
    pub end_time: Option<String>,

    #[serde(default, rename = "type")]
    #[validate(length(max = 100, message = "type must be at most 100 characters"))]
    pub job_type: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "title must be at most 255 characters"))]
    pub title: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub client: String,

    #[serde(default)]
    pub status: Option<JobStatus>,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    #[validate(custom(function = "validate_employee_ids"))]
    pub employee_ids: Vec<String>,
}

/// Every non-blank entry must be an employee id.
fn validate_employee_ids(ids: &[String]) -> Result<(), ValidationError> {
    let malformed = ids
        .iter()
        .map(|id| id.trim())
        .any(|id| !id.is_empty() && Uuid::parse_str(id).is_err());
    if malformed {
        let mut err = ValidationError::new("employee_id");
        err.message = Some("employeeIds must contain valid ids".into());
        return Err(err);
    }
    Ok(())
}

/// A validated job ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub job_type: String,
    pub title: String,
    pub location: String,
    pub client: String,
    pub status: JobStatus,
    pub notes: String,
    /// Distinct assignee ids in submission order.
    pub employee_ids: Vec<Uuid>,
}

impl TryFrom<CreateJobRequest> for NewJob {
    type Error = ValidationErrors;

    fn try_from(request: CreateJobRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let date = request.date.ok_or_else(|| {
            super::field_error("date", "required", "date is required")
        })?;

        Ok(NewJob {
            date,
            start_time: request.start_time.as_deref().and_then(parse_time_of_day),
            end_time: request.end_time.as_deref().and_then(parse_time_of_day),
            job_type: request.job_type,
            title: request.title,
            location: request.location,
            client: request.client,
            status: initial_status(request.status),
            notes: request.notes,
            employee_ids: normalize_employee_ids(&request.employee_ids),
        })
    }
}

/// Request payload for the admin status override.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJobStatusRequest {
    #[validate(required(message = "status is required"))]
    pub status: Option<JobStatus>,
}
