//! Job report repository: the report ledger.
//!
//! Submissions run as one transaction per (job, employee):
//!
//! 1. `SELECT ... FOR UPDATE` the existing report row.
//! 2. If there is none, `INSERT ... ON CONFLICT DO NOTHING RETURNING`. An
//!    empty result means a concurrent submission created the row first; it is
//!    re-selected `FOR UPDATE` and merged onto.
//! 3. Otherwise the merged state is written back with `UPDATE`.
//! 4. The job status is written from the submitted action.
//!
//! Submissions for the same pair are serialized by the row lock; different
//! pairs only meet at the job status write.

use chrono::{DateTime, Utc};
use domain::models::{JobStatus, ReportSubmission};
use domain::services::{merge_report, status_for_action, ReportState};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{JobReportEntity, JobReportWithEmployeeEntity};
use crate::metrics::QueryTimer;
use crate::repositories::JobRepository;

/// Result of a report submission.
#[derive(Debug, Clone)]
pub struct SubmittedReport {
    pub report: JobReportEntity,
    /// True when this submission created the report.
    pub created: bool,
    pub job_status: JobStatus,
}

/// Repository for job report database operations.
#[derive(Clone)]
pub struct JobReportRepository {
    pool: PgPool,
}

impl JobReportRepository {
    /// Creates a new JobReportRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Merge a report action into the (job, employee) report and advance the
    /// job status. Nothing is written if any step fails.
    pub async fn submit(
        &self,
        submission: &ReportSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmittedReport, sqlx::Error> {
        let timer = QueryTimer::new("submit_job_report");
        timer.finish(self.submit_in_transaction(submission, now).await)
    }

    async fn submit_in_transaction(
        &self,
        submission: &ReportSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmittedReport, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let existing =
            Self::find_for_update(&mut *tx, submission.job_id, submission.employee_id).await?;

        let (report, created) = match existing {
            Some(current) => {
                let merged = merge_report(Some(&state_of(&current)), submission, now);
                (Self::write(&mut *tx, current.id, &merged, now).await?, false)
            }
            None => {
                let fresh = merge_report(None, submission, now);
                match Self::insert_if_absent(&mut *tx, submission, &fresh, now).await? {
                    Some(inserted) => (inserted, true),
                    None => {
                        let winner = Self::find_for_update(
                            &mut *tx,
                            submission.job_id,
                            submission.employee_id,
                        )
                        .await?
                        .ok_or(sqlx::Error::RowNotFound)?;
                        let merged = merge_report(Some(&state_of(&winner)), submission, now);
                        (Self::write(&mut *tx, winner.id, &merged, now).await?, false)
                    }
                }
            }
        };

        let job_status = status_for_action(submission.action);
        JobRepository::write_lifecycle_status(&mut *tx, submission.job_id, job_status, now).await?;

        tx.commit().await?;

        Ok(SubmittedReport {
            report,
            created,
            job_status,
        })
    }

    /// List a job's reports with the reporting employees' names.
    pub async fn list_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<Vec<JobReportWithEmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_job_reports");
        let result = sqlx::query_as::<_, JobReportWithEmployeeEntity>(
            r#"
            SELECT r.id, r.job_id, r.employee_id, r.started_at, r.finished_at,
                   r.before_photos, r.after_photos, r.comments, r.created_at, r.updated_at,
                   e.name AS employee_name
            FROM job_reports r
            JOIN employees e ON e.id = r.employee_id
            WHERE r.job_id = $1
            ORDER BY r.created_at ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find the report for a (job, employee) pair.
    pub async fn find_by_job_and_employee(
        &self,
        job_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Option<JobReportEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_job_report");
        let result = sqlx::query_as::<_, JobReportEntity>(
            r#"
            SELECT id, job_id, employee_id, started_at, finished_at,
                   before_photos, after_photos, comments, created_at, updated_at
            FROM job_reports
            WHERE job_id = $1 AND employee_id = $2
            "#,
        )
        .bind(job_id)
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    async fn find_for_update(
        conn: &mut PgConnection,
        job_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Option<JobReportEntity>, sqlx::Error> {
        sqlx::query_as::<_, JobReportEntity>(
            r#"
            SELECT id, job_id, employee_id, started_at, finished_at,
                   before_photos, after_photos, comments, created_at, updated_at
            FROM job_reports
            WHERE job_id = $1 AND employee_id = $2
            FOR UPDATE
            "#,
        )
        .bind(job_id)
        .bind(employee_id)
        .fetch_optional(conn)
        .await
    }

    async fn insert_if_absent(
        conn: &mut PgConnection,
        submission: &ReportSubmission,
        state: &ReportState,
        now: DateTime<Utc>,
    ) -> Result<Option<JobReportEntity>, sqlx::Error> {
        sqlx::query_as::<_, JobReportEntity>(
            r#"
            INSERT INTO job_reports (
                job_id, employee_id, started_at, finished_at,
                before_photos, after_photos, comments, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ON CONFLICT (job_id, employee_id) DO NOTHING
            RETURNING id, job_id, employee_id, started_at, finished_at,
                      before_photos, after_photos, comments, created_at, updated_at
            "#,
        )
        .bind(submission.job_id)
        .bind(submission.employee_id)
        .bind(state.started_at)
        .bind(state.finished_at)
        .bind(&state.before_photos)
        .bind(&state.after_photos)
        .bind(&state.comments)
        .bind(now)
        .fetch_optional(conn)
        .await
    }

    async fn write(
        conn: &mut PgConnection,
        id: Uuid,
        state: &ReportState,
        now: DateTime<Utc>,
    ) -> Result<JobReportEntity, sqlx::Error> {
        sqlx::query_as::<_, JobReportEntity>(
            r#"
            UPDATE job_reports
            SET started_at = $2, finished_at = $3, before_photos = $4,
                after_photos = $5, comments = $6, updated_at = $7
            WHERE id = $1
            RETURNING id, job_id, employee_id, started_at, finished_at,
                      before_photos, after_photos, comments, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(state.started_at)
        .bind(state.finished_at)
        .bind(&state.before_photos)
        .bind(&state.after_photos)
        .bind(&state.comments)
        .bind(now)
        .fetch_one(conn)
        .await
    }
}

fn state_of(entity: &JobReportEntity) -> ReportState {
    ReportState {
        started_at: entity.started_at,
        finished_at: entity.finished_at,
        before_photos: entity.before_photos.clone(),
        after_photos: entity.after_photos.clone(),
        comments: entity.comments.clone(),
    }
}
