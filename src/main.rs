//! Server binary: reads config from the environment, connects the pool lazily, serves until killed.

use axum::{extract::Request, ServiceExt};
use crud_api::{app, AppConfig, AppState, ConfigError, PgRecordStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crud_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Lazy: connections open on first query.
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.database_url)?;
    let store = PgRecordStore::new(pool, &config.records_schema, &config.records_table);
    let state = AppState::new(store);

    let listener = TcpListener::bind(config.socket_addr())
        .await
        .map_err(ConfigError::Listen)?;
    tracing::info!("app is running on {}", listener.local_addr()?);
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state, &config))).await?;
    Ok(())
}
