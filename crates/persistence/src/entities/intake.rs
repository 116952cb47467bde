//! Intake entities: housing and offer requests.

use chrono::{DateTime, Utc};
use domain::models::IntakeStatus;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the housing_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct HousingRequestEntity {
    pub id: Uuid,
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
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Database row mapping for the offer_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct OfferRequestEntity {
    pub id: Uuid,
    pub offer_type: String,
    pub payload: Value,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

fn intake_status(raw: &str) -> IntakeStatus {
    raw.parse().unwrap_or_default()
}

impl From<HousingRequestEntity> for domain::models::HousingRequest {
    fn from(entity: HousingRequestEntity) -> Self {
        Self {
            status: intake_status(&entity.status),
            id: entity.id,
            company: entity.company,
            contact_person: entity.contact_person,
            email: entity.email,
            phone: entity.phone,
            region: entity.region,
            checkin: entity.checkin,
            duration: entity.duration,
            total_persons: entity.total_persons,
            persons_per_room: entity.persons_per_room,
            budget: entity.budget,
            included: entity.included,
            notes: entity.notes,
            created_at: entity.created_at,
        }
    }
}

impl From<OfferRequestEntity> for domain::models::OfferRequest {
    fn from(entity: OfferRequestEntity) -> Self {
        Self {
            status: intake_status(&entity.status),
            id: entity.id,
            offer_type: entity.offer_type,
            payload: entity.payload,
            created_at: entity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_offer_entity_into_domain() {
        let entity = OfferRequestEntity {
            id: Uuid::new_v4(),
            offer_type: "verhuizing".to_string(),
            payload: json!({"type": "verhuizing"}),
            status: "In behandeling".to_string(),
            created_at: Utc::now(),
        };
        let offer: domain::models::OfferRequest = entity.into();
        assert_eq!(offer.status, IntakeStatus::InProgress);
        assert_eq!(offer.payload["type"], "verhuizing");
    }

    #[test]
    fn test_intake_status_fallback() {
        assert_eq!(intake_status("Afgewezen"), IntakeStatus::Rejected);
        assert_eq!(intake_status(""), IntakeStatus::New);
    }
}
