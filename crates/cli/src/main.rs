use padron_service::{PersonService, PgStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod menu;

use config::AppConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "padron=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = AppConfig::from_env();
    tracing::info!(max_connections = config.max_connections, "Loaded configuration");

    // --- Database ---
    let pool = padron_db::create_pool(&config.database_url, config.max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    padron_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    padron_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Service ---
    let service = PersonService::new(PgStore::new(pool));

    // --- Menu loop ---
    menu::run(&service).await.expect("Terminal I/O failed");
}
