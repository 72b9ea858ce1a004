use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{self, ValidationResult};
use super::Entity;
use crate::constants::MAX_AMENITY_NAME_LENGTH;

#[derive(Debug, Clone, FromRow)]
pub struct Amenity {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmenityResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Amenity {
    pub fn new(name: &str) -> ValidationResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: validation::required_text("name", name, MAX_AMENITY_NAME_LENGTH)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_name(&mut self, value: &str) -> ValidationResult<()> {
        self.name = validation::required_text("name", value, MAX_AMENITY_NAME_LENGTH)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn apply(&mut self, update: AmenityUpdate) -> ValidationResult<()> {
        if let Some(name) = update.name.as_deref() {
            self.set_name(name)?;
        }
        Ok(())
    }
}

impl Entity for Amenity {
    const KIND: &'static str = "Amenity";
    const ATTRIBUTES: &'static [&'static str] = &["id", "name"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            _ => None,
        }
    }
}

impl From<&Amenity> for AmenityResponse {
    fn from(amenity: &Amenity) -> Self {
        Self {
            id: amenity.id,
            name: amenity.name.clone(),
            created_at: amenity.created_at,
            updated_at: amenity.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amenity_name_rules() {
        assert!(Amenity::new("Wifi").is_ok());
        assert!(Amenity::new("").is_err());
        assert!(Amenity::new(&"x".repeat(51)).is_err());
        assert!(Amenity::new(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn test_set_name_keeps_old_value_on_error() {
        let mut amenity = Amenity::new("Wifi").unwrap();
        assert!(amenity.set_name("  ").is_err());
        assert_eq!(amenity.name(), "Wifi");
        amenity.set_name("Pool").unwrap();
        assert_eq!(amenity.name(), "Pool");
    }
}
