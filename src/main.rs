use std::process::ExitCode;
use std::sync::Arc;

use stock_registry_api::database::establish_connection_pool;
use stock_registry_api::{
    create_router, AppConfig, InMemoryStockRepository, StockRepository, StockRepositoryImpl,
    StockService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stock_registry_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    let repository = initialize_repository(&config).await;
    let service = Arc::new(StockService::with_span(
        repository,
        tracing::info_span!("stock_service"),
    ));

    let app = create_router(service);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("🚀 Stock Registry API running on http://{}", config.bind_addr);
    tracing::info!("📊 Health check: http://{}/health", config.bind_addr);
    tracing::info!("📚 Swagger UI: http://{}/swagger-ui", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Pick the entity store
///
/// PostgreSQL when `DATABASE_URL` is set and reachable, the in-memory store
/// otherwise.
async fn initialize_repository(config: &AppConfig) -> Arc<dyn StockRepository> {
    let Some(database_url) = config.database_url.clone() else {
        tracing::info!("🗄️  DATABASE_URL not set, keeping stocks in memory");
        return Arc::new(InMemoryStockRepository::new());
    };

    tracing::info!("🗄️  Initializing PostgreSQL connection...");

    let pool_size = config.pool_size;
    let run_migrations = config.run_migrations;

    // Pool setup and migrations block on network I/O
    let pool = tokio::task::spawn_blocking(move || {
        let pool = establish_connection_pool(&database_url, pool_size)?;
        if run_migrations {
            pool.run_migrations()?;
        }
        Ok::<_, stock_registry_api::database::DatabaseError>(pool)
    })
    .await;

    match pool {
        Ok(Ok(pool)) => {
            tracing::info!("✅ Database connection established");
            Arc::new(StockRepositoryImpl::new(move || pool.get_conn()))
        }
        Ok(Err(e)) => {
            tracing::error!("❌ Failed to initialize database: {}", e);
            tracing::warn!("⚠️  Server will start with the in-memory store");
            Arc::new(InMemoryStockRepository::new())
        }
        Err(e) => {
            tracing::error!("❌ Database initialization task failed: {}", e);
            tracing::warn!("⚠️  Server will start with the in-memory store");
            Arc::new(InMemoryStockRepository::new())
        }
    }
}
