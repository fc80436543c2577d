use anyhow::{Context, Result};
use inventory::{
    config::{myconfig::Config, server_config::ServerConfig},
    handler::AppRouter,
    state::AppState,
};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

const SERVICE_NAME: &str = "inventory-service";

#[tokio::main]
async fn main() -> Result<()> {
    let (server_config, state, telemetry) =
        setup().await.context("Failed to setup application")?;

    let result = AppRouter::serve(server_config.http_addr, state).await;

    if let Err(e) = &result {
        error!("💥 HTTP server stopped with error: {e:#}");
    }

    shutdown(telemetry).await;

    result
}

async fn setup() -> Result<(ServerConfig, AppState, Telemetry)> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;
    let server_config = ServerConfig::from_config(&config)?;

    let mut telemetry = Telemetry::new(SERVICE_NAME, config.otel_endpoint.clone());
    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize OTLP logger")?;
    telemetry
        .init_meter()
        .context("Failed to initialize OTLP meter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize OTLP tracer")?;

    init_logger(
        logger_provider,
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting Inventory Service initialization...");

    let db_pool = ConnectionManager::new_pool(
        &server_config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    } else {
        info!("⏭️ Skipping database migrations");
    }

    let state = AppState::new(db_pool).await;

    info!("✅ Application setup completed successfully.");
    Ok((server_config, state, telemetry))
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("📦 Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Migrations applied");
    Ok(())
}

async fn shutdown(telemetry: Telemetry) {
    if let Err(e) = telemetry.shutdown().await {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Inventory Service shutdown complete.");
}
