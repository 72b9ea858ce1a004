use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use super::{ApiJson, MessageResponse, WithMessage, parse_id};
use crate::{
    app::AppState,
    error::{HbnbError, Result},
    models::{Entity, User, UserResponse, UserUpdate},
    services::{AuthUser, NewUser, policy},
};

/// Registration payload. Any `is_admin` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterUserRequest {
    fn into_new_user(self, is_admin: bool) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
            is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub id: Uuid,
    pub message: &'static str,
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<CreatedUser>)> {
    let user = state.facade.create_user(req.into_new_user(false)).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            id: user.id(),
            message: "User registered successfully",
        }),
    ))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.facade.get_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user_id = parse_id(&user_id, User::KIND)?;
    let user = state.facade.get_user(user_id).await?;
    Ok(Json(UserResponse::from(&user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(user_id): Path<String>,
    ApiJson(update): ApiJson<UserUpdate>,
) -> Result<Json<WithMessage<UserResponse>>> {
    let user_id = parse_id(&user_id, User::KIND)?;
    state.facade.get_user(user_id).await?;
    policy::ensure_can_edit_user(&caller, user_id)?;

    if !caller.is_admin && update.touches_credentials() {
        return Err(HbnbError::bad_request("You cannot modify email or password."));
    }

    let updated = state
        .facade
        .update_user(user_id, update, caller.is_admin)
        .await?;
    Ok(Json(WithMessage::new(
        UserResponse::from(&updated),
        "User updated successfully",
    )))
}

/// Creates an account with admin rights. Only admins may call this.
pub async fn create_admin_user(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<CreatedUser>)> {
    policy::ensure_admin(&caller)?;

    if state.facade.get_user_by_email(&req.email).await?.is_some() {
        return Err(HbnbError::bad_request("Email already registered"));
    }

    let user = state.facade.create_user(req.into_new_user(true)).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            id: user.id(),
            message: "User created by admin",
        }),
    ))
}

pub async fn check_admin(caller: AuthUser) -> Json<Value> {
    Json(json!({ "is_admin": caller.is_admin }))
}

pub async fn protected(caller: AuthUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("Hello, user {}", caller.user_id)))
}
