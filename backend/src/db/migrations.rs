use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::migrate::Migrator;

/// Schema for users, places, reviews, amenities and their link table.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("failed to apply database migrations")?;

    tracing::info!(known = MIGRATOR.iter().count(), "Database schema is up to date");
    Ok(())
}
