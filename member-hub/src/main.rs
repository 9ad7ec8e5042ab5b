//! member-hub — membership management backend
//!
//! Long-running service that:
//! - Imports members from spreadsheet-shaped JSON (localized headers)
//! - Reconciles member phones, categories, properties and tags
//! - Serves member tasks to application operators (JWT authenticated)

mod api;
mod auth;
mod config;
mod db;
mod error;
mod import;
mod state;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "member_hub=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting member-hub (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("member-hub HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
