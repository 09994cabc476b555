//! Delivery Fee Service
//!
//! REST API for weather-adjusted courier delivery fees, with an hourly job
//! that ingests weather observations.
//! Reads configuration from TOML file (~/.config/delivery-fee/config.toml).

use std::sync::Arc;
use std::time::Duration;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use delivery_fee::application::{
    start_weather_ingest_task, DeliveryFeeService, IngestSchedule, WeatherIngestService,
};
use delivery_fee::domain::WeatherRepository;
use delivery_fee::infrastructure::database::migrator::Migrator;
use delivery_fee::infrastructure::IlmateenistusFeed;
use delivery_fee::interfaces::http::modules::metrics::describe_metrics;
use delivery_fee::shared::{RetryPolicy, ShutdownCoordinator};
use delivery_fee::{
    create_api_router, default_config_path, init_database, ApiState, AppConfig, DatabaseConfig,
    SeaOrmWeatherRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!(path = %config_path.display(), "Configuration loaded");
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }
    };

    info!("Starting Delivery Fee Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()?;
    describe_metrics();
    info!("📊 Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!(error = %e, "Failed to run migrations");
        return Err(e.into());
    }
    info!("Migrations completed");

    let weather_repo: Arc<dyn WeatherRepository> =
        Arc::new(SeaOrmWeatherRepository::new(db.clone()));

    // ── Services ───────────────────────────────────────────────
    let fee_service = Arc::new(DeliveryFeeService::new(weather_repo.clone()));

    let feed = IlmateenistusFeed::new(
        app_cfg.weather.feed_url.clone(),
        Duration::from_secs(app_cfg.weather.request_timeout_secs),
    )?;
    info!(url = feed.url(), "🌦️ Weather feed configured");
    let ingest_service = Arc::new(WeatherIngestService::new(
        Arc::new(feed),
        weather_repo.clone(),
        RetryPolicy::default().with_max_attempts(app_cfg.weather.retry_attempts),
    ));

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // ── Weather ingestion ──────────────────────────────────────
    let ingest_task = start_weather_ingest_task(
        ingest_service,
        IngestSchedule {
            fetch_minute: app_cfg.weather.fetch_minute,
            run_on_startup: app_cfg.weather.fetch_on_startup,
        },
        shutdown_signal.clone(),
    );

    // ── REST API ───────────────────────────────────────────────
    let api_router = create_api_router(ApiState::new(
        fee_service,
        weather_repo,
        db.clone(),
        prometheus_handle,
    ));

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    if let Err(e) = api_server.await {
        error!(error = %e, "REST API server error");
    }
    // Stop the ingest task too when the server exits on error
    shutdown_signal.trigger();

    // ── Final cleanup ──────────────────────────────────────────
    info!("🧹 Performing final cleanup...");
    let finished = shutdown
        .cleanup(async {
            if let Err(e) = ingest_task.await {
                warn!(error = %e, "Weather ingest task panicked");
            }
        })
        .await;
    if !finished {
        warn!("Weather ingest task did not stop in time");
    }

    if let Err(e) = db.close().await {
        warn!(error = %e, "Error closing database connection");
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 Delivery Fee Service shutdown complete");
    Ok(())
}
