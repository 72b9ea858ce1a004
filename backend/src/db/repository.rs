use anyhow::{Result, bail};
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Entity, Place, Review};

/// CRUD over one kind of stored record.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync + 'static {
    async fn add(&self, entity: T) -> Result<T>;

    async fn get(&self, id: Uuid) -> Result<Option<T>>;

    /// All records, oldest first.
    async fn get_all(&self) -> Result<Vec<T>>;

    /// Replaces the stored record carrying the same id. `None` if there is none.
    async fn update(&self, entity: T) -> Result<Option<T>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;

    /// First record whose `name` field renders as `value`.
    async fn get_by_attribute(&self, name: &str, value: &str) -> Result<Option<T>>;
}

#[async_trait]
pub trait PlaceRepository: Repository<Place> {
    /// Links an amenity to a place. Linking twice is a no-op.
    async fn add_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<()>;

    async fn amenity_ids(&self, place_id: Uuid) -> Result<Vec<Uuid>>;
}

#[async_trait]
pub trait ReviewRepository: Repository<Review> {
    async fn get_by_place(&self, place_id: Uuid) -> Result<Vec<Review>>;

    async fn get_by_user_and_place(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<Option<Review>>;
}

/// A write collided with an existing record on a unique key.
#[derive(Debug, thiserror::Error)]
#[error("{kind} violates a unique constraint")]
pub struct DuplicateKey {
    pub kind: &'static str,
}

pub fn is_duplicate(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DuplicateKey>().is_some()
}

/// Turns a Postgres unique violation (SQLSTATE 23505) into `DuplicateKey`.
pub fn unique_violation<T: Entity>(err: sqlx::Error) -> anyhow::Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            tracing::debug!(kind = T::KIND, constraint = ?db_err.constraint(), "Unique violation");
            DuplicateKey { kind: T::KIND }.into()
        }
        _ => err.into(),
    }
}

/// Rejects attribute names the entity does not expose.
pub fn check_attribute<T: Entity>(name: &str) -> Result<()> {
    if !T::ATTRIBUTES.contains(&name) {
        bail!("unknown attribute '{}' for {}", name, T::KIND);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_check_attribute() {
        assert!(check_attribute::<User>("email").is_ok());
        assert!(check_attribute::<User>("password_hash").is_err());
    }

    #[test]
    fn test_other_database_errors_are_not_duplicates() {
        let err = unique_violation::<User>(sqlx::Error::RowNotFound);
        assert!(!is_duplicate(&err));
        assert!(err.downcast_ref::<sqlx::Error>().is_some());
    }

    #[test]
    fn test_duplicate_key_is_detected() {
        let err: anyhow::Error = DuplicateKey { kind: "User" }.into();
        assert!(is_duplicate(&err));
        assert_eq!(err.to_string(), "User violates a unique constraint");
    }
}
