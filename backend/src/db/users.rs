use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repository::{Repository, check_attribute, unique_violation};
use crate::models::User;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, is_admin, created_at, updated_at";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<User> for PgUserRepository {
    async fn add(&self, user: User) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users
                (id, first_name, last_name, email, password_hash, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user.id())
            .bind(user.first_name())
            .bind(user.last_name())
            .bind(user.email())
            .bind(user.password_hash())
            .bind(user.is_admin())
            .bind(user.created_at())
            .bind(user.updated_at())
            .fetch_one(&self.pool)
            .await
            .map_err(unique_violation::<User>)?;

        Ok(user)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_all(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC");
        let users = sqlx::query_as::<_, User>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn update(&self, user: User) -> Result<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, password_hash = $5,
                is_admin = $6, updated_at = $7
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user.id())
            .bind(user.first_name())
            .bind(user.last_name())
            .bind(user.email())
            .bind(user.password_hash())
            .bind(user.is_admin())
            .bind(user.updated_at())
            .fetch_optional(&self.pool)
            .await
            .map_err(unique_violation::<User>)?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_attribute(&self, name: &str, value: &str) -> Result<Option<User>> {
        check_attribute::<User>(name)?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {name}::text = $1 LIMIT 1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
