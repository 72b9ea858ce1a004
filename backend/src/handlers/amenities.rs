use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;

use super::{ApiJson, WithMessage, parse_id};
use crate::{
    app::AppState,
    error::Result,
    models::{Amenity, AmenityResponse, AmenityUpdate, Entity},
    services::{AuthUser, policy},
};

#[derive(Debug, Deserialize)]
pub struct CreateAmenityRequest {
    pub name: String,
}

pub async fn create_amenity(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateAmenityRequest>,
) -> Result<(StatusCode, Json<WithMessage<AmenityResponse>>)> {
    policy::ensure_admin(&caller)?;
    let amenity = state.facade.create_amenity(&req.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(WithMessage::new(
            AmenityResponse::from(&amenity),
            "Amenity created successfully",
        )),
    ))
}

pub async fn list_amenities(State(state): State<AppState>) -> Result<Json<Vec<AmenityResponse>>> {
    let amenities = state.facade.get_all_amenities().await?;
    Ok(Json(amenities.iter().map(AmenityResponse::from).collect()))
}

pub async fn get_amenity(
    State(state): State<AppState>,
    Path(amenity_id): Path<String>,
) -> Result<Json<AmenityResponse>> {
    let amenity_id = parse_id(&amenity_id, Amenity::KIND)?;
    let amenity = state.facade.get_amenity(amenity_id).await?;
    Ok(Json(AmenityResponse::from(&amenity)))
}

pub async fn update_amenity(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(amenity_id): Path<String>,
    ApiJson(update): ApiJson<AmenityUpdate>,
) -> Result<Json<WithMessage<AmenityResponse>>> {
    policy::ensure_admin(&caller)?;
    let amenity_id = parse_id(&amenity_id, Amenity::KIND)?;
    let amenity = state.facade.update_amenity(amenity_id, update).await?;
    Ok(Json(WithMessage::new(
        AmenityResponse::from(&amenity),
        "Amenity updated successfully",
    )))
}
