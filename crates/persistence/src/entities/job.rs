//! Job entity (database row mapping).

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use domain::models::JobStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the jobs table.
///
/// `status` is a `job_status` enum in the database and is selected as text.
#[derive(Debug, Clone, FromRow)]
pub struct JobEntity {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub job_type: String,
    pub title: String,
    pub location: String,
    pub client: String,
    pub status: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job row with its aggregated assignee names.
#[derive(Debug, Clone, FromRow)]
pub struct JobWithAssigneesEntity {
    #[sqlx(flatten)]
    pub job: JobEntity,
    pub assigned_employee_names: String,
}

impl From<JobEntity> for domain::models::Job {
    fn from(entity: JobEntity) -> Self {
        let status = entity
            .status
            .parse::<JobStatus>()
            .unwrap_or_default();

        Self {
            id: entity.id,
            date: entity.date,
            start_time: entity.start_time,
            end_time: entity.end_time,
            job_type: entity.job_type,
            title: entity.title,
            location: entity.location,
            client: entity.client,
            status,
            notes: entity.notes,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<JobWithAssigneesEntity> for domain::models::JobWithAssignees {
    fn from(entity: JobWithAssigneesEntity) -> Self {
        Self {
            job: entity.job.into(),
            assigned_employee_names: entity.assigned_employee_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::Job;

    fn entity(status: &str) -> JobEntity {
        let now = Utc::now();
        JobEntity {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0),
            end_time: None,
            job_type: "schoonmaak".to_string(),
            title: "Eindschoonmaak".to_string(),
            location: "Utrecht".to_string(),
            client: "Acme".to_string(),
            status: status.to_string(),
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_job_entity_into_domain() {
        let job: Job = entity("Gestart").into();
        assert_eq!(job.status, JobStatus::Started);
        assert_eq!(job.job_type, "schoonmaak");
        assert_eq!(job.start_time, NaiveTime::from_hms_opt(8, 0, 0));
    }

    #[test]
    fn test_job_entity_unknown_status_falls_back_to_planned() {
        let job: Job = entity("???").into();
        assert_eq!(job.status, JobStatus::Planned);
    }

    #[test]
    fn test_job_with_assignees_into_domain() {
        let row = JobWithAssigneesEntity {
            job: entity("Gepland"),
            assigned_employee_names: "Anna, Bram".to_string(),
        };
        let job: domain::models::JobWithAssignees = row.into();
        assert_eq!(job.assigned_employee_names, "Anna, Bram");
        assert_eq!(job.job.status, JobStatus::Planned);
    }
}
