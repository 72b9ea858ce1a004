pub mod amenities;
pub mod auth;
pub mod extract;
pub mod places;
pub mod reviews;
pub mod users;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{HbnbError, Result};

pub use extract::ApiJson;

/// A resource body with a human-readable `message` merged into it.
#[derive(Debug, Serialize)]
pub struct WithMessage<T> {
    #[serde(flatten)]
    pub data: T,
    pub message: &'static str,
}

impl<T> WithMessage<T> {
    pub fn new(data: T, message: &'static str) -> Self {
        Self { data, message }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Path ids that are not UUIDs can't name a stored record.
pub(crate) fn parse_id(raw: &str, kind: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| HbnbError::not_found(kind))
}
