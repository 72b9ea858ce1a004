use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{ValidationError, ValidationResult};
use super::Entity;
use crate::constants::{MAX_REVIEW_RATING, MIN_REVIEW_RATING};

#[derive(Debug, Clone, FromRow)]
pub struct Review {
    id: Uuid,
    text: String,
    rating: i32,
    user_id: Uuid,
    place_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Only the text and rating of a review can change after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdate {
    pub text: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub user_id: Uuid,
    pub place_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(text: &str, rating: i32, user_id: Uuid, place_id: Uuid) -> ValidationResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            text: validate_text(text)?,
            rating: validate_rating(rating)?,
            user_id,
            place_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn place_id(&self) -> Uuid {
        self.place_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_written_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn set_text(&mut self, value: &str) -> ValidationResult<()> {
        self.text = validate_text(value)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_rating(&mut self, value: i32) -> ValidationResult<()> {
        self.rating = validate_rating(value)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn apply(&mut self, update: ReviewUpdate) -> ValidationResult<()> {
        let mut next = self.clone();
        if let Some(text) = update.text.as_deref() {
            next.set_text(text)?;
        }
        if let Some(rating) = update.rating {
            next.set_rating(rating)?;
        }
        *self = next;
        Ok(())
    }
}

impl Entity for Review {
    const KIND: &'static str = "Review";
    const ATTRIBUTES: &'static [&'static str] = &["id", "text", "rating", "user_id", "place_id"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "text" => Some(self.text.clone()),
            "rating" => Some(self.rating.to_string()),
            "user_id" => Some(self.user_id.to_string()),
            "place_id" => Some(self.place_id.to_string()),
            _ => None,
        }
    }

    // One review per user and place
    fn unique_key(&self) -> Option<String> {
        Some(format!("{}:{}", self.user_id, self.place_id))
    }
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            text: review.text.clone(),
            rating: review.rating,
            user_id: review.user_id,
            place_id: review.place_id,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

fn validate_text(value: &str) -> ValidationResult<String> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("text", "is required"));
    }
    Ok(value.to_string())
}

fn validate_rating(value: i32) -> ValidationResult<i32> {
    if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&value) {
        return Err(ValidationError::new(
            "rating",
            format!(
                "must be an integer between {} and {}",
                MIN_REVIEW_RATING, MAX_REVIEW_RATING
            ),
        ));
    }
    Ok(value)
}
