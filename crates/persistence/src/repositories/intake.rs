//! Intake repositories: housing requests and offer requests.

use domain::models::IntakeStatus;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{HousingRequestEntity, OfferRequestEntity};
use crate::metrics::QueryTimer;

/// Input data for inserting a housing request.
#[derive(Debug, Clone, Default)]
pub struct HousingRequestInput {
    pub company: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub region: String,
    pub checkin: String,
    pub duration: String,
    pub total_persons: i32,
    pub persons_per_room: String,
    pub budget: String,
    pub included: String,
    pub notes: String,
}

/// Repository for housing request database operations.
#[derive(Clone)]
pub struct HousingRequestRepository {
    pool: PgPool,
}

impl HousingRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        input: &HousingRequestInput,
    ) -> Result<HousingRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_housing_request");
        let result = sqlx::query_as::<_, HousingRequestEntity>(
            r#"
            INSERT INTO housing_requests (
                company, contact_person, email, phone, region, checkin, duration,
                total_persons, persons_per_room, budget, included, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, company, contact_person, email, phone, region, checkin, duration,
                      total_persons, persons_per_room, budget, included, notes,
                      status::TEXT AS status, created_at
            "#,
        )
        .bind(&input.company)
        .bind(&input.contact_person)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.region)
        .bind(&input.checkin)
        .bind(&input.duration)
        .bind(input.total_persons)
        .bind(&input.persons_per_room)
        .bind(&input.budget)
        .bind(&input.included)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List housing requests, newest first.
    pub async fn list(&self) -> Result<Vec<HousingRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_housing_requests");
        let result = sqlx::query_as::<_, HousingRequestEntity>(
            r#"
            SELECT id, company, contact_person, email, phone, region, checkin, duration,
                   total_persons, persons_per_room, budget, included, notes,
                   status::TEXT AS status, created_at
            FROM housing_requests
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Returns `None` if the id is unknown.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: IntakeStatus,
    ) -> Result<Option<HousingRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_housing_request_status");
        let result = sqlx::query_as::<_, HousingRequestEntity>(
            r#"
            UPDATE housing_requests
            SET status = $2::intake_status
            WHERE id = $1
            RETURNING id, company, contact_person, email, phone, region, checkin, duration,
                      total_persons, persons_per_room, budget, included, notes,
                      status::TEXT AS status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }
}

/// Repository for offer request database operations.
#[derive(Clone)]
pub struct OfferRequestRepository {
    pool: PgPool,
}

impl OfferRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a submitted offer body verbatim.
    pub async fn create(
        &self,
        offer_type: &str,
        payload: &Value,
    ) -> Result<OfferRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_offer_request");
        let result = sqlx::query_as::<_, OfferRequestEntity>(
            r#"
            INSERT INTO offer_requests (offer_type, payload)
            VALUES ($1, $2)
            RETURNING id, offer_type, payload, status::TEXT AS status, created_at
            "#,
        )
        .bind(offer_type)
        .bind(payload)
        .fetch_one(&self.pool)
        .await;
        timer.finish(result)
    }

    /// List offer requests, newest first.
    pub async fn list(&self) -> Result<Vec<OfferRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_offer_requests");
        let result = sqlx::query_as::<_, OfferRequestEntity>(
            r#"
            SELECT id, offer_type, payload, status::TEXT AS status, created_at
            FROM offer_requests
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.finish(result)
    }

    /// Returns `None` if the id is unknown.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: IntakeStatus,
    ) -> Result<Option<OfferRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_offer_request_status");
        let result = sqlx::query_as::<_, OfferRequestEntity>(
            r#"
            UPDATE offer_requests
            SET status = $2::intake_status
            WHERE id = $1
            RETURNING id, offer_type, payload, status::TEXT AS status, created_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await;
        timer.finish(result)
    }
}
