use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repository::{PlaceRepository, Repository, check_attribute};
use crate::models::Place;

const PLACE_COLUMNS: &str =
    "id, title, description, price, latitude, longitude, owner_id, created_at, updated_at";

pub struct PgPlaceRepository {
    pool: PgPool,
}

impl PgPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Place> for PgPlaceRepository {
    async fn add(&self, place: Place) -> Result<Place> {
        let sql = format!(
            r#"
            INSERT INTO places
                (id, title, description, price, latitude, longitude, owner_id,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PLACE_COLUMNS}
            "#
        );
        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(place.id())
            .bind(place.title())
            .bind(place.description())
            .bind(place.price())
            .bind(place.latitude())
            .bind(place.longitude())
            .bind(place.owner_id())
            .bind(place.created_at())
            .bind(place.updated_at())
            .fetch_one(&self.pool)
            .await?;

        Ok(place)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Place>> {
        let sql = format!("SELECT {PLACE_COLUMNS} FROM places WHERE id = $1");
        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(place)
    }

    async fn get_all(&self) -> Result<Vec<Place>> {
        let sql = format!("SELECT {PLACE_COLUMNS} FROM places ORDER BY created_at ASC");
        let places = sqlx::query_as::<_, Place>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(places)
    }

    async fn update(&self, place: Place) -> Result<Option<Place>> {
        let sql = format!(
            r#"
            UPDATE places
            SET title = $2, description = $3, price = $4, latitude = $5, longitude = $6,
                updated_at = $7
            WHERE id = $1
            RETURNING {PLACE_COLUMNS}
            "#
        );
        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(place.id())
            .bind(place.title())
            .bind(place.description())
            .bind(place.price())
            .bind(place.latitude())
            .bind(place.longitude())
            .bind(place.updated_at())
            .fetch_optional(&self.pool)
            .await?;

        Ok(place)
    }

    /// Reviews and amenity links go with the place (ON DELETE CASCADE).
    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_attribute(&self, name: &str, value: &str) -> Result<Option<Place>> {
        check_attribute::<Place>(name)?;
        let sql = format!("SELECT {PLACE_COLUMNS} FROM places WHERE {name}::text = $1 LIMIT 1");
        let place = sqlx::query_as::<_, Place>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(place)
    }
}

#[async_trait]
impl PlaceRepository for PgPlaceRepository {
    async fn add_amenity(&self, place_id: Uuid, amenity_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO place_amenity (place_id, amenity_id)
            VALUES ($1, $2)
            ON CONFLICT (place_id, amenity_id) DO NOTHING
            "#,
        )
        .bind(place_id)
        .bind(amenity_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn amenity_ids(&self, place_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT pa.amenity_id
            FROM place_amenity pa
            JOIN amenities a ON a.id = pa.amenity_id
            WHERE pa.place_id = $1
            ORDER BY a.created_at ASC
            "#,
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
