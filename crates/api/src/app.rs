use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use chrono::Duration as ChronoDuration;
use domain::services::{Clock, SystemClock};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, require_admin, security_headers_middleware, trace_id,
    RateLimiterState,
};
use crate::routes::{admin_auth, employees, health, intake, jobs, reports};
use crate::services::{EmailService, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub clock: Arc<dyn Clock>,
    pub login_limiter: Option<Arc<RateLimiterState>>,
    pub email: EmailService,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    create_app_with_clock(config, pool, Arc::new(SystemClock))
}

/// Builds the router with an explicit clock for report timestamps and
/// session expiry.
pub fn create_app_with_clock(config: Config, pool: PgPool, clock: Arc<dyn Clock>) -> Router {
    let config = Arc::new(config);

    let sessions = Arc::new(SessionStore::new(
        ChronoDuration::seconds(config.session.ttl_secs),
        clock.clone(),
    ));

    let state = AppState {
        pool,
        config: config.clone(),
        sessions,
        clock,
        login_limiter: RateLimiterState::new(config.security.login_attempts_per_minute)
            .map(Arc::new),
        email: EmailService::new(config.email.clone()),
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::liveness))
        .route("/api/health/ready", get(health::readiness))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/admin/login", post(admin_auth::admin_login))
        .route("/api/v1/employees/login", post(employees::employee_login))
        .route("/api/v1/requests", post(intake::create_housing_request))
        .route("/api/v1/offers", post(intake::create_offer_request));

    // Session tokens are checked by the EmployeeSession extractor.
    let employee_routes = Router::new()
        .route("/api/v1/employee/jobs", get(jobs::list_my_jobs))
        .route("/api/v1/employee/reports", post(reports::submit_report))
        .route("/api/v1/employee/logout", post(employees::employee_logout));

    let admin_routes = Router::new()
        .route(
            "/api/v1/admin/employees",
            post(employees::create_employee).get(employees::list_employees),
        )
        .route(
            "/api/v1/admin/employees/:employee_id",
            delete(employees::deactivate_employee),
        )
        .route(
            "/api/v1/admin/jobs",
            post(jobs::create_job).get(jobs::list_jobs),
        )
        .route(
            "/api/v1/admin/jobs/:job_id/status",
            patch(jobs::override_job_status),
        )
        .route(
            "/api/v1/admin/jobs/:job_id/reports",
            get(reports::list_job_reports),
        )
        .route("/api/v1/admin/requests", get(intake::list_housing_requests))
        .route(
            "/api/v1/admin/requests/:request_id/status",
            patch(intake::update_housing_request_status),
        )
        .route("/api/v1/admin/offers", get(intake::list_offer_requests))
        .route(
            "/api/v1/admin/offers/:offer_id/status",
            patch(intake::update_offer_request_status),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(employee_routes)
        .merge(admin_routes)
        // Global middleware (bottom layers run first)
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(middleware::from_fn_with_state(
            config.security.hsts,
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
