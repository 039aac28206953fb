//! # jebs-api
//!
//! Backend for Jeb's website.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables (or put them in .env)
//! export STRIPE_SECRET_KEY=sk_test_...
//! export RESEND_API_KEY=re_...              # optional, applications are logged without it
//! export JEB_APPLICATION_EMAIL=jobs@...     # optional
//! export CORS_ORIGIN=https://jebs.example   # optional, defaults to *
//!
//! # Run the server
//! jebs-api
//! ```

use jebs_api::{routes, state::AppConfig, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    // Initialize logging
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    info!(
        "{} v{} ({})",
        jebs_api::state::SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        config.environment
    );
    info!("CORS origin: {}", config.cors_origin);

    // Initialize application state
    let state = AppState::from_config(config)?;

    // Create router
    let app = routes::create_router(state);

    info!("Listening on http://{}", addr);
    if !is_prod {
        info!("Health: GET http://{}/api/health", addr);
        info!("Checkout: POST http://{}/api/create-checkout-session", addr);
        info!("Applications: POST http://{}/api/submit-application", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
