//! Employee repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EmployeeEntity;
use crate::metrics::QueryTimer;

/// Input data for inserting an employee.
#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub login_code: String,
}

/// Repository for employee database operations.
#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new active employee.
    pub async fn create(&self, input: EmployeeInput) -> Result<EmployeeEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_employee");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            INSERT INTO employees (name, role, phone, email, login_code, active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING id, name, role, phone, email, login_code, active, created_at
            "#,
        )
        .bind(input.name.trim())
        .bind(input.role.trim())
        .bind(input.phone.trim())
        .bind(input.email.trim())
        .bind(&input.login_code)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List active employees ordered by name.
    pub async fn list_active(&self) -> Result<Vec<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_employees");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT id, name, role, phone, email, login_code, active, created_at
            FROM employees
            WHERE active
            ORDER BY name ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find an employee by ID, active or not.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_employee_by_id");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT id, name, role, phone, email, login_code, active, created_at
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Find the active employee with the given name and login code.
    ///
    /// Names are not unique. When several active rows match, the oldest wins.
    pub async fn authenticate(
        &self,
        name: &str,
        login_code: &str,
    ) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("authenticate_employee");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            SELECT id, name, role, phone, email, login_code, active, created_at
            FROM employees
            WHERE active AND name = $1 AND login_code = $2
            ORDER BY created_at ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(login_code)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Soft delete: clear the active flag. Returns `None` if the id is unknown.
    pub async fn deactivate(&self, id: Uuid) -> Result<Option<EmployeeEntity>, sqlx::Error> {
        let timer = QueryTimer::new("deactivate_employee");
        let result = sqlx::query_as::<_, EmployeeEntity>(
            r#"
            UPDATE employees
            SET active = FALSE
            WHERE id = $1
            RETURNING id, name, role, phone, email, login_code, active, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }
}
