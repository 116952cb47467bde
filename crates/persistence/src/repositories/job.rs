//! Job repository: the job store and its assignment index.

use chrono::{DateTime, Utc};
use domain::models::{JobStatus, NewJob};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{JobEntity, JobWithAssigneesEntity};
use crate::metrics::QueryTimer;

/// Listing order shared by every job query.
const JOB_ORDER: &str = "j.date ASC, j.start_time ASC NULLS LAST, j.created_at ASC";

/// Repository for job and assignment database operations.
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Creates a new JobRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a job and its assignments atomically.
    ///
    /// Assignments keep the order of `job.employee_ids`. An unknown employee id
    /// fails the whole insert with a foreign key violation.
    pub async fn create(&self, job: &NewJob) -> Result<JobEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_job");
        timer.finish(self.insert_with_assignments(job).await)
    }

    async fn insert_with_assignments(&self, job: &NewJob) -> Result<JobEntity, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let entity = sqlx::query_as::<_, JobEntity>(
            r#"
            INSERT INTO jobs (date, start_time, end_time, job_type, title, location, client, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8::job_status, $9)
            RETURNING id, date, start_time, end_time, job_type, title, location, client,
                      status::TEXT AS status, notes, created_at, updated_at
            "#,
        )
        .bind(job.date)
        .bind(job.start_time)
        .bind(job.end_time)
        .bind(&job.job_type)
        .bind(&job.title)
        .bind(&job.location)
        .bind(&job.client)
        .bind(job.status.as_str())
        .bind(&job.notes)
        .fetch_one(&mut *tx)
        .await?;

        if !job.employee_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO job_assignments (job_id, employee_id, position)
                SELECT $1, ids.employee_id, ids.ord
                FROM UNNEST($2::UUID[]) WITH ORDINALITY AS ids(employee_id, ord)
                "#,
            )
            .bind(entity.id)
            .bind(&job.employee_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(entity)
    }

    /// Find a job by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_job_by_id");
        let result = sqlx::query_as::<_, JobEntity>(
            r#"
            SELECT id, date, start_time, end_time, job_type, title, location, client,
                   status::TEXT AS status, notes, created_at, updated_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List all jobs with their assignees' names joined by ", ".
    ///
    /// Names follow assignment order. Jobs without assignees get an empty
    /// string. Duplicate assignment rows produce duplicate names.
    pub async fn list_with_assignees(&self) -> Result<Vec<JobWithAssigneesEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_jobs_with_assignees");
        let sql = format!(
            r#"
            SELECT j.id, j.date, j.start_time, j.end_time, j.job_type, j.title, j.location,
                   j.client, j.status::TEXT AS status, j.notes, j.created_at, j.updated_at,
                   COALESCE(
                       STRING_AGG(e.name, ', ' ORDER BY ja.position, ja.created_at),
                       ''
                   ) AS assigned_employee_names
            FROM jobs j
            LEFT JOIN job_assignments ja ON ja.job_id = j.id
            LEFT JOIN employees e ON e.id = ja.employee_id
            GROUP BY j.id
            ORDER BY {JOB_ORDER}
            "#
        );
        let result = sqlx::query_as::<_, JobWithAssigneesEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.finish(result)
    }

    /// List the jobs an employee is assigned to, each job once.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_jobs_for_employee");
        let sql = format!(
            r#"
            SELECT j.id, j.date, j.start_time, j.end_time, j.job_type, j.title, j.location,
                   j.client, j.status::TEXT AS status, j.notes, j.created_at, j.updated_at
            FROM jobs j
            WHERE EXISTS (
                SELECT 1 FROM job_assignments ja
                WHERE ja.job_id = j.id AND ja.employee_id = $1
            )
            ORDER BY {JOB_ORDER}
            "#
        );
        let result = sqlx::query_as::<_, JobEntity>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await;
        timer.finish(result)
    }

    /// Admin override of a job's status. Returns `None` if the id is unknown.
    ///
    /// This is separate from the status writes that follow report merges.
    pub async fn override_status(
        &self,
        id: Uuid,
        status: JobStatus,
        now: DateTime<Utc>,
    ) -> Result<Option<JobEntity>, sqlx::Error> {
        let timer = QueryTimer::new("override_job_status");
        let result = sqlx::query_as::<_, JobEntity>(
            r#"
            UPDATE jobs
            SET status = $2::job_status, updated_at = $3
            WHERE id = $1
            RETURNING id, date, start_time, end_time, job_type, title, location, client,
                      status::TEXT AS status, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Lifecycle status write, run inside the report merge transaction.
    pub(crate) async fn write_lifecycle_status(
        conn: &mut PgConnection,
        job_id: Uuid,
        status: JobStatus,
        now: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = $2::job_status, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(status.as_str())
        .bind(now)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
        Ok(())
    }
}
