use anyhow::{Context, Result};
use tracing::info;

use decoupled_articles::{cms::DrupalSource, config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("decoupled_articles=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    info!("Starting decoupled article server");

    // Load configuration from environment
    let config = config::Config::from_env()?;
    info!(
        "Backend: {} | Locales: {} (default: {}) | Frontend: {}",
        config.drupal_url,
        config.locales.codes().join(", "),
        config.locales.default_locale().code(),
        config.frontend_url
    );
    if config.credentials().is_none() {
        info!("No client credentials configured, backend requests are anonymous");
    }

    let source = DrupalSource::from_config(&config);
    let addr = format!("0.0.0.0:{}", config.port);
    let app = server::router(server::AppState::new(config, source));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("✓ Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
