//! Integration tests for the job store and assignment index.
//!
//! Requires PostgreSQL: set TEST_DATABASE_URL.
//! Run with: cargo test --test jobs_integration

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_request, authorized_request, create_employee, create_job, create_test_app,
    create_test_pool, find_admin_job, login, send, test_config, unique_name,
};
use serde_json::{json, Value};

fn position(jobs: &[Value], id: &str) -> usize {
    jobs.iter()
        .position(|job| job["id"] == id)
        .unwrap_or_else(|| panic!("job {} not listed", id))
}

async fn admin_jobs(app: &axum::Router) -> Vec<Value> {
    let (status, body) = send(app, admin_request(Method::GET, "/api/v1/admin/jobs", None)).await;
    assert_eq!(status, StatusCode::OK);
    body["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_create_job_defaults() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);

    let job_id = create_job(&app, json!({ "date": "2025-06-01" })).await;
    let job = find_admin_job(&app, &job_id).await;

    assert_eq!(job["date"], "2025-06-01");
    assert_eq!(job["status"], "Gepland");
    assert_eq!(job["title"], "");
    assert_eq!(job["type"], "");
    assert!(job["startTime"].is_null());
    assert_eq!(job["assignedEmployeeNames"], "");
}

#[tokio::test]
async fn test_create_job_with_explicit_status() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);

    let job_id = create_job(&app, json!({ "date": "2025-06-01", "status": "Nieuw" })).await;
    assert_eq!(find_admin_job(&app, &job_id).await["status"], "Nieuw");
}

#[tokio::test]
async fn test_create_job_without_date_fails() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);

    let (status, body) = send(
        &app,
        admin_request(Method::POST, "/api/v1/admin/jobs", Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "date");
}

#[tokio::test]
async fn test_create_job_rejects_unknown_status_and_fields() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);

    for body in [
        json!({ "date": "2025-06-01", "status": "Klaar" }),
        json!({ "date": "2025-06-01", "priority": "hoog" }),
        json!({ "date": "1 juni" }),
    ] {
        let (status, _) = send(
            &app,
            admin_request(Method::POST, "/api/v1/admin/jobs", Some(body)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_job_lists_both_assignees() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);
    let anna = create_employee(&app).await;
    let bram = create_employee(&app).await;

    let job_id = create_job(
        &app,
        json!({
            "date": "2025-06-01",
            "startTime": "08:00",
            "type": "schoonmaak",
            "title": "Oplevering",
            "location": "Utrecht",
            "client": "Acme",
            "notes": "sleutel bij buren",
            "employeeIds": [anna.id, bram.id]
        }),
    )
    .await;

    let job = find_admin_job(&app, &job_id).await;
    let names = job["assignedEmployeeNames"].as_str().unwrap();
    assert!(names.contains(&anna.name));
    assert!(names.contains(&bram.name));
    assert_eq!(job["status"], "Gepland");
    assert_eq!(job["startTime"], "08:00:00");
    assert_eq!(job["type"], "schoonmaak");
    assert_eq!(job["client"], "Acme");
}

#[tokio::test]
async fn test_blank_and_duplicate_employee_ids_are_skipped() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);
    let anna = create_employee(&app).await;

    let job_id = create_job(
        &app,
        json!({ "date": "2025-06-01", "employeeIds": [anna.id, "", "  ", anna.id] }),
    )
    .await;

    let job = find_admin_job(&app, &job_id).await;
    assert_eq!(job["assignedEmployeeNames"], anna.name.as_str());
}

#[tokio::test]
async fn test_unknown_employee_fails_whole_job() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);
    let anna = create_employee(&app).await;
    let title = unique_name();

    let (status, body) = send(
        &app,
        admin_request(
            Method::POST,
            "/api/v1/admin/jobs",
            Some(json!({
                "date": "2025-06-01",
                "title": title,
                "employeeIds": [anna.id, uuid::Uuid::new_v4().to_string()]
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let jobs = admin_jobs(&app).await;
    assert!(!jobs.iter().any(|job| job["title"] == title.as_str()));
}

#[tokio::test]
async fn test_jobs_ordered_by_date_then_start_time() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);

    let later_day = create_job(&app, json!({ "date": "2031-03-02", "startTime": "07:00" })).await;
    let no_time = create_job(&app, json!({ "date": "2031-03-01" })).await;
    let afternoon = create_job(&app, json!({ "date": "2031-03-01", "startTime": "13:00" })).await;
    let morning = create_job(&app, json!({ "date": "2031-03-01", "startTime": "08:30" })).await;

    let jobs = admin_jobs(&app).await;
    let morning_at = position(&jobs, &morning);
    let afternoon_at = position(&jobs, &afternoon);
    let no_time_at = position(&jobs, &no_time);
    let later_day_at = position(&jobs, &later_day);

    assert!(morning_at < afternoon_at);
    assert!(afternoon_at < no_time_at);
    assert!(no_time_at < later_day_at);
}

#[tokio::test]
async fn test_employee_sees_only_assigned_jobs() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);
    let anna = create_employee(&app).await;
    let bram = create_employee(&app).await;

    let shared_job = create_job(
        &app,
        json!({ "date": "2025-06-01", "employeeIds": [anna.id, bram.id] }),
    )
    .await;
    let bram_only = create_job(&app, json!({ "date": "2025-06-02", "employeeIds": [bram.id] })).await;

    let token = login(&app, &anna).await;
    let (status, body) = send(
        &app,
        authorized_request(Method::GET, "/api/v1/employee/jobs", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let jobs = body["data"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["id"], shared_job.as_str());
    assert!(jobs[0].get("assignedEmployeeNames").is_none());
    assert!(!jobs.iter().any(|job| job["id"] == bram_only.as_str()));
}

#[tokio::test]
async fn test_admin_status_override() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);
    let job_id = create_job(&app, json!({ "date": "2025-06-01" })).await;

    let (status, body) = send(
        &app,
        admin_request(
            Method::PATCH,
            &format!("/api/v1/admin/jobs/{}/status", job_id),
            Some(json!({ "status": "Afgerond" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Afgerond");

    let (status, _) = send(
        &app,
        admin_request(
            Method::PATCH,
            &format!("/api/v1/admin/jobs/{}/status", job_id),
            Some(json!({ "status": "Nieuw" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(find_admin_job(&app, &job_id).await["status"], "Nieuw");
}

#[tokio::test]
async fn test_admin_status_override_errors() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool);
    let job_id = create_job(&app, json!({ "date": "2025-06-01" })).await;

    let (status, _) = send(
        &app,
        admin_request(
            Method::PATCH,
            &format!("/api/v1/admin/jobs/{}/status", uuid::Uuid::new_v4()),
            Some(json!({ "status": "Gestart" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        admin_request(
            Method::PATCH,
            &format!("/api/v1/admin/jobs/{}/status", job_id),
            Some(json!({ "status": "Done" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        admin_request(
            Method::PATCH,
            &format!("/api/v1/admin/jobs/{}/status", job_id),
            Some(json!({})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
