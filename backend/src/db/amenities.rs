use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repository::{Repository, check_attribute};
use crate::models::Amenity;

const AMENITY_COLUMNS: &str = "id, name, created_at, updated_at";

pub struct PgAmenityRepository {
    pool: PgPool,
}

impl PgAmenityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Amenity> for PgAmenityRepository {
    async fn add(&self, amenity: Amenity) -> Result<Amenity> {
        let sql = format!(
            r#"
            INSERT INTO amenities (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {AMENITY_COLUMNS}
            "#
        );
        let amenity = sqlx::query_as::<_, Amenity>(&sql)
            .bind(amenity.id())
            .bind(amenity.name())
            .bind(amenity.created_at())
            .bind(amenity.updated_at())
            .fetch_one(&self.pool)
            .await?;

        Ok(amenity)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Amenity>> {
        let sql = format!("SELECT {AMENITY_COLUMNS} FROM amenities WHERE id = $1");
        let amenity = sqlx::query_as::<_, Amenity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(amenity)
    }

    async fn get_all(&self) -> Result<Vec<Amenity>> {
        let sql = format!("SELECT {AMENITY_COLUMNS} FROM amenities ORDER BY created_at ASC");
        let amenities = sqlx::query_as::<_, Amenity>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(amenities)
    }

    async fn update(&self, amenity: Amenity) -> Result<Option<Amenity>> {
        let sql = format!(
            "UPDATE amenities SET name = $2, updated_at = $3 \
             WHERE id = $1 RETURNING {AMENITY_COLUMNS}"
        );
        let amenity = sqlx::query_as::<_, Amenity>(&sql)
            .bind(amenity.id())
            .bind(amenity.name())
            .bind(amenity.updated_at())
            .fetch_optional(&self.pool)
            .await?;

        Ok(amenity)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM amenities WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_attribute(&self, name: &str, value: &str) -> Result<Option<Amenity>> {
        check_attribute::<Amenity>(name)?;
        let sql =
            format!("SELECT {AMENITY_COLUMNS} FROM amenities WHERE {name}::text = $1 LIMIT 1");
        let amenity = sqlx::query_as::<_, Amenity>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(amenity)
    }
}
