//! Owner-or-admin rules shared by every protected route.

use anyhow::Result;
use uuid::Uuid;

use super::jwt::Claims;
use crate::error::HbnbError;
use crate::models::{Place, Review};

/// The caller identified by a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl TryFrom<Claims> for AuthUser {
    type Error = anyhow::Error;

    fn try_from(claims: Claims) -> Result<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            is_admin: claims.is_admin,
        })
    }
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), HbnbError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(HbnbError::forbidden("Admin privileges required"))
    }
}

pub fn ensure_can_edit_user(user: &AuthUser, target_id: Uuid) -> Result<(), HbnbError> {
    if user.is_admin || user.user_id == target_id {
        Ok(())
    } else {
        Err(HbnbError::forbidden("Unauthorized"))
    }
}

pub fn ensure_can_edit_place(user: &AuthUser, place: &Place) -> Result<(), HbnbError> {
    if user.is_admin || place.is_owned_by(user.user_id) {
        Ok(())
    } else {
        Err(HbnbError::forbidden(
            "Unauthorized: You are not the owner of this place",
        ))
    }
}

pub fn ensure_can_edit_review(user: &AuthUser, review: &Review) -> Result<(), HbnbError> {
    if user.is_admin || review.is_written_by(user.user_id) {
        Ok(())
    } else {
        Err(HbnbError::forbidden("Unauthorized"))
    }
}
