use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::validation::{self, ValidationError, ValidationResult};
use super::Entity;
use crate::constants::{MAX_USER_NAME_LENGTH, MIN_PASSWORD_LENGTH};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update accepted by `PUT /users/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    pub fn touches_credentials(&self) -> bool {
        self.email.is_some() || self.password.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> ValidationResult<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            first_name: validation::required_text("first_name", first_name, MAX_USER_NAME_LENGTH)?,
            last_name: validation::required_text("last_name", last_name, MAX_USER_NAME_LENGTH)?,
            email: validation::email("email", email)?,
            password_hash: hash_password(password)?,
            is_admin,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_first_name(&mut self, value: &str) -> ValidationResult<()> {
        self.first_name = validation::required_text("first_name", value, MAX_USER_NAME_LENGTH)?;
        self.touch();
        Ok(())
    }

    pub fn set_last_name(&mut self, value: &str) -> ValidationResult<()> {
        self.last_name = validation::required_text("last_name", value, MAX_USER_NAME_LENGTH)?;
        self.touch();
        Ok(())
    }

    pub fn set_email(&mut self, value: &str) -> ValidationResult<()> {
        self.email = validation::email("email", value)?;
        self.touch();
        Ok(())
    }

    /// Hashes and stores a new password. The plaintext is never kept.
    pub fn set_password(&mut self, password: &str) -> ValidationResult<()> {
        self.password_hash = hash_password(password)?;
        self.touch();
        Ok(())
    }

    pub fn set_is_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
        self.touch();
    }

    pub fn verify_password(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password_hash) else {
            tracing::warn!(user_id = %self.id, "Stored password hash is not parseable");
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }

    /// Applies every present field, or none of them if any fails validation.
    pub fn apply(&mut self, update: UserUpdate) -> ValidationResult<()> {
        let mut next = self.clone();
        if let Some(first_name) = update.first_name.as_deref() {
            next.set_first_name(first_name)?;
        }
        if let Some(last_name) = update.last_name.as_deref() {
            next.set_last_name(last_name)?;
        }
        if let Some(email) = update.email.as_deref() {
            next.set_email(email)?;
        }
        if let Some(password) = update.password.as_deref() {
            next.set_password(password)?;
        }
        if let Some(is_admin) = update.is_admin {
            next.set_is_admin(is_admin);
        }
        *self = next;
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for User {
    const KIND: &'static str = "User";
    const ATTRIBUTES: &'static [&'static str] =
        &["id", "first_name", "last_name", "email", "is_admin"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "first_name" => Some(self.first_name.clone()),
            "last_name" => Some(self.last_name.clone()),
            "email" => Some(self.email.clone()),
            "is_admin" => Some(self.is_admin.to_string()),
            _ => None,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.clone())
    }
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

fn hash_password(password: &str) -> ValidationResult<String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ValidationError::new("password", format!("could not be hashed: {}", e)))
}
