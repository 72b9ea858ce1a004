use anyhow::{Result, bail};
use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_JWT_EXPIRY_MINUTES, DEFAULT_SERVER_PORT, DEV_JWT_SECRET};

/// Where the repositories keep their records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => bail!("Unknown STORAGE backend '{}' (expected memory or postgres)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_minutes: i64,
    pub storage: StorageBackend,
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = match env::var("STORAGE") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::default(),
        };
        let jwt_secret = resolve_jwt_secret(env::var("JWT_SECRET_KEY").ok(), storage)?;

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SERVER_PORT),
            jwt_secret,
            jwt_expiry_minutes: env::var("JWT_EXPIRY_MINUTES")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_MINUTES.to_string())
                .parse()
                .unwrap_or(DEFAULT_JWT_EXPIRY_MINUTES),
            storage,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERVER_PORT,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiry_minutes: DEFAULT_JWT_EXPIRY_MINUTES,
            storage: StorageBackend::Memory,
            allowed_origins: Vec::new(),
        }
    }
}

/// The development key is only acceptable while nothing is persisted.
fn resolve_jwt_secret(secret: Option<String>, storage: StorageBackend) -> Result<String> {
    match secret {
        Some(secret) if !secret.trim().is_empty() => Ok(secret),
        _ if storage == StorageBackend::Postgres => {
            bail!("JWT_SECRET_KEY must be set when STORAGE=postgres")
        }
        _ => {
            tracing::warn!("JWT_SECRET_KEY not set, using the development signing key");
            Ok(DEV_JWT_SECRET.to_string())
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
