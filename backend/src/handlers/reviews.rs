use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{ApiJson, MessageResponse, WithMessage, parse_id};
use crate::{
    app::AppState,
    error::Result,
    models::{Entity, Review, ReviewResponse, ReviewUpdate},
    services::{AuthUser, NewReview, policy},
};

/// The author is the caller; a `user_id` in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
    pub rating: i32,
    pub place_id: Uuid,
}

pub async fn create_review(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateReviewRequest>,
) -> Result<(StatusCode, Json<WithMessage<ReviewResponse>>)> {
    let new_review = NewReview {
        text: req.text,
        rating: req.rating,
        place_id: req.place_id,
    };
    let review = state.facade.create_review(new_review, caller.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(WithMessage::new(
            ReviewResponse::from(&review),
            "Review created successfully",
        )),
    ))
}

pub async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<ReviewResponse>>> {
    let reviews = state.facade.get_all_reviews().await?;
    Ok(Json(reviews.iter().map(ReviewResponse::from).collect()))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<ReviewResponse>> {
    let review_id = parse_id(&review_id, Review::KIND)?;
    let review = state.facade.get_review(review_id).await?;
    Ok(Json(ReviewResponse::from(&review)))
}

pub async fn update_review(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(review_id): Path<String>,
    ApiJson(update): ApiJson<ReviewUpdate>,
) -> Result<Json<WithMessage<ReviewResponse>>> {
    let review_id = parse_id(&review_id, Review::KIND)?;
    let review = state.facade.get_review(review_id).await?;
    policy::ensure_can_edit_review(&caller, &review)?;

    let review = state.facade.update_review(review_id, update).await?;
    Ok(Json(WithMessage::new(
        ReviewResponse::from(&review),
        "Review updated successfully",
    )))
}

pub async fn delete_review(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(review_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let review_id = parse_id(&review_id, Review::KIND)?;
    let review = state.facade.get_review(review_id).await?;
    policy::ensure_can_edit_review(&caller, &review)?;

    state.facade.delete_review(review_id).await?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
