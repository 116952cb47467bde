//! Intake models: housing requests and generic offer requests.
//!
//! Intake is independent of jobs; it only shares the admin surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// Offer type used when the submitted payload carries none.
pub const UNKNOWN_OFFER_TYPE: &str = "onbekend";

/// Processing status of an intake record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntakeStatus {
    #[serde(rename = "Nieuw")]
    New,
    #[serde(rename = "In behandeling")]
    InProgress,
    #[serde(rename = "Offerte verstuurd")]
    QuoteSent,
    #[serde(rename = "Afgerond")]
    Completed,
    #[serde(rename = "Afgewezen")]
    Rejected,
}

impl IntakeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStatus::New => "Nieuw",
            IntakeStatus::InProgress => "In behandeling",
            IntakeStatus::QuoteSent => "Offerte verstuurd",
            IntakeStatus::Completed => "Afgerond",
            IntakeStatus::Rejected => "Afgewezen",
        }
    }
}

impl Default for IntakeStatus {
    fn default() -> Self {
        IntakeStatus::New
    }
}

impl fmt::Display for IntakeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for IntakeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Nieuw" => Ok(IntakeStatus::New),
            "In behandeling" => Ok(IntakeStatus::InProgress),
            "Offerte verstuurd" => Ok(IntakeStatus::QuoteSent),
            "Afgerond" => Ok(IntakeStatus::Completed),
            "Afgewezen" => Ok(IntakeStatus::Rejected),
            _ => Err(format!("Invalid intake status: {}", s)),
        }
    }
}

// ============================================================================
// Housing requests
// ============================================================================

/// A staff-housing request submitted through the public form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousingRequest {
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
    pub status: IntakeStatus,
    pub created_at: DateTime<Utc>,
}

/// Request payload for the public housing form. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateHousingRequest {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub company: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub contact_person: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub phone: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub checkin: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 10000, message = "totalPersons must be between 0 and 10000"))]
    pub total_persons: Option<i32>,
    #[serde(default)]
    pub persons_per_room: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub included: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub notes: String,
}

impl CreateHousingRequest {
    /// The included amenities as stored: joined with ", ".
    pub fn included_joined(&self) -> String {
        self.included.join(", ")
    }
}

// ============================================================================
// Offer requests
// ============================================================================

/// A generic quote request; the submitted body is kept verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub offer_type: String,
    pub payload: Value,
    pub status: IntakeStatus,
    pub created_at: DateTime<Utc>,
}

/// Derives the offer type from a submitted payload's `type` field.
pub fn offer_type_of(payload: &Value) -> String {
    let raw = match payload.get("type") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    if raw.is_empty() {
        UNKNOWN_OFFER_TYPE.to_string()
    } else {
        raw
    }
}

/// Request payload for changing an intake record's status.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateIntakeStatusRequest {
    #[validate(required(message = "status is required"))]
    pub status: Option<IntakeStatus>,
}
