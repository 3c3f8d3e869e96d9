//! Print every renderable article route as JSON.
//!
//! Usage:
//!   cargo run --bin list_paths            # {"paths": [...], "fallback": false}
//!   cargo run --bin list_paths -- --urls  # one frontend URL path per line
//!
//! Required environment variables:
//! - DRUPAL_URL
//!
//! Optional:
//! - LOCALES / DEFAULT_LOCALE
//! - CLIENT_ID / CLIENT_SECRET
//! - STRICT_PATH_ALIASES

use anyhow::{Context, Result};
use tracing::info;
use decoupled_articles::{cms::DrupalSource, config, paths};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr, so stdout stays machine readable)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("decoupled_articles=info".parse()?),
        )
        .init();

    let urls_only = std::env::args().any(|a| a == "--urls");

    // Load config from environment
    let config = config::Config::from_env()?;
    let source = DrupalSource::from_config(&config);

    let routes = paths::enumerate_paths(&config, &source)
        .await
        .context("Failed to enumerate article paths")?;

    if urls_only {
        for route in &routes {
            println!("{}", route.url_path(&config.locales));
        }
    } else {
        let set = paths::RouteSet::from(routes);
        println!("{}", serde_json::to_string_pretty(&set)?);
    }

    info!("✓ Listed article paths");
    Ok(())
}
