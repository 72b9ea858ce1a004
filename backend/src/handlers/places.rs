use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use super::{ApiJson, MessageResponse, WithMessage, parse_id};
use crate::{
    app::AppState,
    error::{HbnbError, Result},
    models::{Entity, Place, PlaceInput, PlaceResponse, PlaceUpdate, ReviewResponse},
    services::{AuthUser, policy},
};

/// The owner always comes from the access token, never from the body.
#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub amenities: Vec<Uuid>,
    #[serde(default, deserialize_with = "present")]
    pub owner_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlaceRequest {
    #[serde(flatten)]
    pub fields: PlaceUpdate,
    #[serde(default, deserialize_with = "present")]
    pub owner_id: Option<Value>,
}

/// `Some` whenever the key is in the body, `null` included.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
pub struct AmenityRef {
    pub id: Uuid,
}

pub async fn create_place(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreatePlaceRequest>,
) -> Result<(StatusCode, Json<WithMessage<PlaceResponse>>)> {
    if req.owner_id.is_some() {
        return Err(HbnbError::bad_request("You cannot modify the owner_id"));
    }

    let input = PlaceInput {
        title: req.title,
        description: req.description,
        price: req.price,
        latitude: req.latitude,
        longitude: req.longitude,
        amenities: req.amenities,
    };
    let details = state.facade.create_place(input, caller.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(WithMessage::new(
            PlaceResponse::from(&details),
            "Place created successfully",
        )),
    ))
}

pub async fn list_places(State(state): State<AppState>) -> Result<Json<Vec<PlaceResponse>>> {
    let places = state.facade.get_all_places().await?;
    Ok(Json(places.iter().map(PlaceResponse::from).collect()))
}

pub async fn get_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<PlaceResponse>> {
    let place_id = parse_id(&place_id, Place::KIND)?;
    let details = state.facade.get_place_details(place_id).await?;
    Ok(Json(PlaceResponse::from(&details)))
}

pub async fn update_place(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(place_id): Path<String>,
    ApiJson(req): ApiJson<UpdatePlaceRequest>,
) -> Result<Json<WithMessage<PlaceResponse>>> {
    let place_id = parse_id(&place_id, Place::KIND)?;
    let place = state.facade.get_place(place_id).await?;
    policy::ensure_can_edit_place(&caller, &place)?;

    if req.owner_id.is_some() {
        return Err(HbnbError::bad_request("You cannot modify the owner_id"));
    }

    let details = state.facade.update_place(place_id, req.fields).await?;
    Ok(Json(WithMessage::new(
        PlaceResponse::from(&details),
        "Place updated successfully",
    )))
}

pub async fn delete_place(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(place_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let place_id = parse_id(&place_id, Place::KIND)?;
    let place = state.facade.get_place(place_id).await?;
    policy::ensure_can_edit_place(&caller, &place)?;

    state.facade.delete_place(place_id).await?;
    Ok(Json(MessageResponse::new("Place deleted successfully")))
}

pub async fn add_amenities(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(place_id): Path<String>,
    ApiJson(amenities): ApiJson<Vec<AmenityRef>>,
) -> Result<Json<WithMessage<PlaceResponse>>> {
    if amenities.is_empty() {
        return Err(HbnbError::bad_request("Invalid input data"));
    }
    let place_id = parse_id(&place_id, Place::KIND)?;
    let place = state.facade.get_place(place_id).await?;
    policy::ensure_can_edit_place(&caller, &place)?;

    let ids: Vec<Uuid> = amenities.iter().map(|amenity| amenity.id).collect();
    let details = state.facade.add_amenities_to_place(place_id, &ids).await?;
    Ok(Json(WithMessage::new(
        PlaceResponse::from(&details),
        "Amenities added successfully",
    )))
}

pub async fn list_place_reviews(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>> {
    let place_id = parse_id(&place_id, Place::KIND)?;
    let reviews = state.facade.get_reviews_by_place(place_id).await?;
    Ok(Json(reviews.iter().map(ReviewResponse::from).collect()))
}
