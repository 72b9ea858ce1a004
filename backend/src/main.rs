use hbnb::{
    AppState, Config, HbnbFacade, JwtService, StorageBackend, create_router, db, get_db_pool,
    utils,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let config = Config::from_env()?;

    let facade = match config.storage {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            HbnbFacade::in_memory()
        }
        StorageBackend::Postgres => {
            let db_config = db::DatabaseConfig::from_env()?;
            let pool = get_db_pool(&db_config).await?;

            // Run migrations
            db::migrations::run_migrations(&pool).await?;
            HbnbFacade::postgres(pool)
        }
    };

    let jwt = JwtService::new(
        &config.jwt_secret,
        chrono::Duration::minutes(config.jwt_expiry_minutes),
    );
    let app = create_router(AppState::new(facade, jwt), &config);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
