pub mod app;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use app::{AppState, create_router};
pub use db::connection::get_db_pool;
pub use error::{HbnbError, Result};
pub use services::{HbnbFacade, JwtService};
pub use utils::config::{Config, StorageBackend};

// Re-export common types
pub use sqlx::PgPool;
pub use uuid::Uuid;
pub use chrono::{DateTime, Utc};
