//! Job report entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the job_reports table.
#[derive(Debug, Clone, FromRow)]
pub struct JobReportEntity {
    pub id: Uuid,
    pub job_id: Uuid,
    pub employee_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub before_photos: Vec<String>,
    pub after_photos: Vec<String>,
    pub comments: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A report row joined with the reporting employee's name.
#[derive(Debug, Clone, FromRow)]
pub struct JobReportWithEmployeeEntity {
    #[sqlx(flatten)]
    pub report: JobReportEntity,
    pub employee_name: String,
}

impl From<JobReportEntity> for domain::models::JobReport {
    fn from(entity: JobReportEntity) -> Self {
        Self {
            id: entity.id,
            job_id: entity.job_id,
            employee_id: entity.employee_id,
            started_at: entity.started_at,
            finished_at: entity.finished_at,
            before_photos: entity.before_photos,
            after_photos: entity.after_photos,
            comments: entity.comments,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<JobReportWithEmployeeEntity> for domain::models::JobReportWithEmployee {
    fn from(entity: JobReportWithEmployeeEntity) -> Self {
        Self {
            report: entity.report.into(),
            employee_name: entity.employee_name,
        }
    }
}
