use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::{ApiJson, WithMessage, parse_id};
use crate::{
    app::AppState,
    error::Result,
    models::{Entity, User, UserResponse, UserUpdate},
    services::{AuthUser, policy},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let user = state.facade.authenticate(&req.email, &req.password).await?;
    let access_token = state.jwt.generate_token(user.id(), user.is_admin())?;

    tracing::info!(user_id = %user.id(), "User logged in");
    Ok(Json(TokenResponse { access_token }))
}

pub async fn protected(user: AuthUser) -> Json<Value> {
    Json(json!({
        "message": format!("Hello, user {}", user.user_id),
        "admin": user.is_admin,
    }))
}

/// Admin-only update that may change any field, credentials included.
pub async fn admin_update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(user_id): Path<String>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<Json<WithMessage<UserResponse>>> {
    policy::ensure_admin(&user)?;
    let user_id = parse_id(&user_id, User::KIND)?;

    let updated = state.facade.update_user(user_id, update, true).await?;
    Ok(Json(WithMessage::new(
        UserResponse::from(&updated),
        "User updated successfully",
    )))
}
