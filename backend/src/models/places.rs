use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::amenities::{Amenity, AmenityResponse};
use super::users::User;
use super::validation::{self, ValidationError, ValidationResult};
use super::Entity;
use crate::constants::{
    MAX_LATITUDE, MAX_LONGITUDE, MAX_PLACE_TITLE_LENGTH, MIN_LATITUDE, MIN_LONGITUDE,
    MIN_PLACE_PRICE,
};

#[derive(Debug, Clone, FromRow)]
pub struct Place {
    id: Uuid,
    title: String,
    description: String,
    price: f64,
    latitude: f64,
    longitude: f64,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Fields a caller supplies when listing a new place. The owner comes from the token.
#[derive(Debug, Clone, Default)]
pub struct PlaceInput {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub amenities: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceUpdate {
    #[serde(alias = "name")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A place with its owner and amenities resolved.
#[derive(Debug, Clone)]
pub struct PlaceDetails {
    pub place: Place,
    pub owner: Option<User>,
    pub amenities: Vec<Amenity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOwner {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    pub owner: Option<PlaceOwner>,
    pub amenities: Vec<AmenityResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    pub fn new(
        title: &str,
        description: &str,
        price: f64,
        latitude: f64,
        longitude: f64,
        owner_id: Uuid,
    ) -> ValidationResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: validate_title(title)?,
            description: description.to_string(),
            price: validate_price(price)?,
            latitude: validation::in_range("latitude", latitude, MIN_LATITUDE, MAX_LATITUDE)?,
            longitude: validation::in_range("longitude", longitude, MIN_LONGITUDE, MAX_LONGITUDE)?,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn set_title(&mut self, value: &str) -> ValidationResult<()> {
        self.title = validate_title(value)?;
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = value.to_string();
        self.touch();
    }

    pub fn set_price(&mut self, value: f64) -> ValidationResult<()> {
        self.price = validate_price(value)?;
        self.touch();
        Ok(())
    }

    pub fn set_latitude(&mut self, value: f64) -> ValidationResult<()> {
        self.latitude = validation::in_range("latitude", value, MIN_LATITUDE, MAX_LATITUDE)?;
        self.touch();
        Ok(())
    }

    pub fn set_longitude(&mut self, value: f64) -> ValidationResult<()> {
        self.longitude = validation::in_range("longitude", value, MIN_LONGITUDE, MAX_LONGITUDE)?;
        self.touch();
        Ok(())
    }

    pub fn apply(&mut self, update: PlaceUpdate) -> ValidationResult<()> {
        let mut next = self.clone();
        if let Some(title) = update.title.as_deref() {
            next.set_title(title)?;
        }
        if let Some(description) = update.description.as_deref() {
            next.set_description(description);
        }
        if let Some(price) = update.price {
            next.set_price(price)?;
        }
        if let Some(latitude) = update.latitude {
            next.set_latitude(latitude)?;
        }
        if let Some(longitude) = update.longitude {
            next.set_longitude(longitude)?;
        }
        *self = next;
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Place {
    const KIND: &'static str = "Place";
    const ATTRIBUTES: &'static [&'static str] = &[
        "id",
        "title",
        "description",
        "price",
        "latitude",
        "longitude",
        "owner_id",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "title" => Some(self.title.clone()),
            "description" => Some(self.description.clone()),
            "price" => Some(self.price.to_string()),
            "latitude" => Some(self.latitude.to_string()),
            "longitude" => Some(self.longitude.to_string()),
            "owner_id" => Some(self.owner_id.to_string()),
            _ => None,
        }
    }
}

impl From<&User> for PlaceOwner {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            email: user.email().to_string(),
        }
    }
}

impl From<&PlaceDetails> for PlaceResponse {
    fn from(details: &PlaceDetails) -> Self {
        let place = &details.place;
        Self {
            id: place.id,
            title: place.title.clone(),
            description: place.description.clone(),
            price: place.price,
            latitude: place.latitude,
            longitude: place.longitude,
            owner_id: place.owner_id,
            owner: details.owner.as_ref().map(PlaceOwner::from),
            amenities: details.amenities.iter().map(AmenityResponse::from).collect(),
            created_at: place.created_at,
            updated_at: place.updated_at,
        }
    }
}

fn validate_title(value: &str) -> ValidationResult<String> {
    validation::required_text("title", value, MAX_PLACE_TITLE_LENGTH)
}

fn validate_price(value: f64) -> ValidationResult<f64> {
    if !value.is_finite() || value < MIN_PLACE_PRICE {
        return Err(ValidationError::new("price", "must be a non-negative number"));
    }
    Ok(value)
}
