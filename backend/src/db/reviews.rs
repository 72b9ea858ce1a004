use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repository::{Repository, ReviewRepository, check_attribute, unique_violation};
use crate::models::Review;

const REVIEW_COLUMNS: &str = "id, text, rating, user_id, place_id, created_at, updated_at";

pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Review> for PgReviewRepository {
    async fn add(&self, review: Review) -> Result<Review> {
        let sql = format!(
            r#"
            INSERT INTO reviews (id, text, rating, user_id, place_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REVIEW_COLUMNS}
            "#
        );
        let review = sqlx::query_as::<_, Review>(&sql)
            .bind(review.id())
            .bind(review.text())
            .bind(review.rating())
            .bind(review.user_id())
            .bind(review.place_id())
            .bind(review.created_at())
            .bind(review.updated_at())
            .fetch_one(&self.pool)
            .await
            .map_err(unique_violation::<Review>)?;

        Ok(review)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1");
        let review = sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(review)
    }

    async fn get_all(&self) -> Result<Vec<Review>> {
        let sql = format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY created_at ASC");
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }

    async fn update(&self, review: Review) -> Result<Option<Review>> {
        let sql = format!(
            r#"
            UPDATE reviews
            SET text = $2, rating = $3, updated_at = $4
            WHERE id = $1
            RETURNING {REVIEW_COLUMNS}
            "#
        );
        let review = sqlx::query_as::<_, Review>(&sql)
            .bind(review.id())
            .bind(review.text())
            .bind(review.rating())
            .bind(review.updated_at())
            .fetch_optional(&self.pool)
            .await
            .map_err(unique_violation::<Review>)?;

        Ok(review)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_attribute(&self, name: &str, value: &str) -> Result<Option<Review>> {
        check_attribute::<Review>(name)?;
        let sql =
            format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE {name}::text = $1 LIMIT 1");
        let review = sqlx::query_as::<_, Review>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(review)
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn get_by_place(&self, place_id: Uuid) -> Result<Vec<Review>> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE place_id = $1 ORDER BY created_at ASC"
        );
        let reviews = sqlx::query_as::<_, Review>(&sql)
            .bind(place_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(reviews)
    }

    async fn get_by_user_and_place(
        &self,
        user_id: Uuid,
        place_id: Uuid,
    ) -> Result<Option<Review>> {
        let sql =
            format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = $1 AND place_id = $2");
        let review = sqlx::query_as::<_, Review>(&sql)
            .bind(user_id)
            .bind(place_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(review)
    }
}
