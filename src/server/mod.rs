//! HTTP surface: rendered article pages, props as JSON, the route list and
//! a health check.

mod error;
mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::cms::ContentSource;
use crate::config::Config;

pub use error::{HttpError, HttpResult};
pub use handlers::{preview_data, PreviewParams};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn ContentSource>,
}

impl AppState {
    pub fn new(config: Config, source: impl ContentSource + 'static) -> Self {
        Self {
            config: Arc::new(config),
            source: Arc::new(source),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/paths", get(handlers::list_paths))
        .route("/api/articles/:locale/*slug", get(handlers::article_props))
        .route("/articles/*slug", get(handlers::default_locale_page))
        .route("/:locale/articles/*slug", get(handlers::localized_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
