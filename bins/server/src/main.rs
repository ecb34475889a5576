//! Cashdesk API Server
//!
//! Main entry point for the Cashdesk backend service.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cashdesk_api::{create_router, AppState};
use cashdesk_shared::AppConfig;
use cashdesk_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cashdesk=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Seed the store and the initial admin account
    let store = Store::new(config.ledger.opening_balance);
    let admin = store
        .bootstrap_admin(&config.bootstrap.admin_name, &config.bootstrap.admin_email)
        .await;
    info!(admin_id = %admin.id, email = %admin.email, "Admin account ready");

    // Create router
    let app = create_router(AppState::new(store));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
