//! Database metrics.
//!
//! Every repository call is timed under a static query name and labelled with
//! its outcome, so slow and failing queries show up per operation:
//!
//! - `database_query_duration_seconds{query, outcome}`
//! - `database_query_errors_total{query}`
//! - `database_connections_{active,idle,total}`

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Outcome label for a finished query.
pub fn outcome_label<T, E>(result: &Result<T, E>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(_) => "error",
    }
}

/// Samples the connection pool. Called on each metrics scrape.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times one repository operation.
///
/// ```ignore
/// let timer = QueryTimer::new("find_job_by_id");
/// let result = sqlx::query_as::<_, JobEntity>(...).fetch_optional(&pool).await;
/// timer.finish(result)
/// ```
#[derive(Debug)]
pub struct QueryTimer {
    query: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            start: Instant::now(),
        }
    }

    pub fn query(&self) -> &'static str {
        self.query
    }

    /// Records the elapsed time under the result's outcome and hands the
    /// result back.
    pub fn finish<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        let outcome = outcome_label(&result);
        histogram!(
            "database_query_duration_seconds",
            "query" => self.query,
            "outcome" => outcome
        )
        .record(self.start.elapsed().as_secs_f64());

        if result.is_err() {
            counter!("database_query_errors_total", "query" => self.query).increment(1);
        }
        result
    }
}
