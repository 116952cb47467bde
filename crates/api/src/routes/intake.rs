//! Intake routes: public housing and offer forms, admin follow-up.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::models::{
    offer_type_of, CreateHousingRequest, CreatedResponse, DataResponse, HousingRequest,
    OfferRequest, SuccessResponse, UpdateIntakeStatusRequest,
};
use persistence::repositories::{
    HousingRequestInput, HousingRequestRepository, OfferRequestRepository,
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;

fn required_status(
    request: UpdateIntakeStatusRequest,
) -> Result<domain::models::IntakeStatus, ApiError> {
    request.validate()?;
    request
        .status
        .ok_or_else(|| ApiError::Validation("status is required".to_string()))
}

/// POST /api/v1/requests
///
/// Stores the request, then queues the notification mail. Mail failures
/// never fail the request.
pub async fn create_housing_request(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateHousingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;

    let input = HousingRequestInput {
        included: request.included_joined(),
        company: request.company,
        contact_person: request.contact_person,
        email: request.email,
        phone: request.phone,
        region: request.region,
        checkin: request.checkin,
        duration: request.duration,
        total_persons: request.total_persons.unwrap_or(0),
        persons_per_room: request.persons_per_room,
        budget: request.budget,
        notes: request.notes,
    };

    let repo = HousingRequestRepository::new(state.pool.clone());
    let stored: HousingRequest = repo.create(&input).await?.into();

    info!(request_id = %stored.id, "Housing request received");
    state.email.notify_housing_request(&stored);

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(stored.id))))
}

/// GET /api/v1/admin/requests
pub async fn list_housing_requests(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<HousingRequest>>>, ApiError> {
    let repo = HousingRequestRepository::new(state.pool.clone());
    let requests = repo
        .list()
        .await?
        .into_iter()
        .map(HousingRequest::from)
        .collect();

    Ok(Json(DataResponse::new(requests)))
}

/// PATCH /api/v1/admin/requests/:id/status
pub async fn update_housing_request_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateIntakeStatusRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let status = required_status(request)?;

    HousingRequestRepository::new(state.pool.clone())
        .update_status(id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    info!(request_id = %id, status = %status, "Housing request status updated");
    Ok(Json(SuccessResponse::ok()))
}

/// POST /api/v1/offers
///
/// Any JSON object is accepted and stored verbatim.
pub async fn create_offer_request(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<Value>,
) -> Result<impl IntoResponse, ApiError> {
    if !payload.is_object() {
        return Err(ApiError::Validation(
            "Offer body must be a JSON object".to_string(),
        ));
    }

    let offer_type = offer_type_of(&payload);
    let repo = OfferRequestRepository::new(state.pool.clone());
    let stored = repo.create(&offer_type, &payload).await?;

    info!(offer_id = %stored.id, offer_type = %offer_type, "Offer request received");

    Ok((StatusCode::CREATED, Json(CreatedResponse::new(stored.id))))
}

/// GET /api/v1/admin/offers
pub async fn list_offer_requests(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Vec<OfferRequest>>>, ApiError> {
    let repo = OfferRequestRepository::new(state.pool.clone());
    let offers = repo
        .list()
        .await?
        .into_iter()
        .map(OfferRequest::from)
        .collect();

    Ok(Json(DataResponse::new(offers)))
}

/// PATCH /api/v1/admin/offers/:id/status
pub async fn update_offer_request_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateIntakeStatusRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let status = required_status(request)?;

    OfferRequestRepository::new(state.pool.clone())
        .update_status(id, status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Offer not found".to_string()))?;

    info!(offer_id = %id, status = %status, "Offer request status updated");
    Ok(Json(SuccessResponse::ok()))
}
