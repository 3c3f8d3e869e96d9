use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::article::{resolve_article, ArticlePage, ArticleRequest, PreviewData};
use crate::config::Config;
use crate::paths::{enumerate_paths, RouteSet};
use crate::render::render_article_page;
use crate::security::preview_authorized;
use crate::server::error::{HttpError, HttpResult};
use crate::server::AppState;

/// Preview query parameters: `?preview=<key>&resourceVersion=<id>&secret=<secret>`
#[derive(Debug, Default, Deserialize)]
pub struct PreviewParams {
    pub preview: Option<String>,
    #[serde(rename = "resourceVersion")]
    pub resource_version: Option<String>,
    pub secret: Option<String>,
}

/// Preview data for a request, if it asked for one and is allowed to
pub fn preview_data(config: &Config, params: PreviewParams) -> Option<PreviewData> {
    let preview = PreviewData {
        key: params.preview.filter(|k| !k.is_empty()),
        resource_version_id: params.resource_version.filter(|v| !v.is_empty()),
    };
    if preview.is_empty() {
        return None;
    }
    if !preview_authorized(config, params.secret.as_deref()) {
        warn!("Ignoring preview parameters without a valid secret");
        return None;
    }
    Some(preview)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn list_paths(State(state): State<AppState>) -> HttpResult<Json<RouteSet>> {
    let paths = enumerate_paths(&state.config, state.source.as_ref()).await?;
    Ok(Json(RouteSet::from(paths)))
}

/// `GET /api/articles/:locale/*slug` - page props as JSON
pub async fn article_props(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
    Query(params): Query<PreviewParams>,
) -> HttpResult<impl IntoResponse> {
    let page = resolve(&state, locale, &slug, params).await?;
    Ok((
        [(header::CACHE_CONTROL, page.cache.header_value())],
        Json(page.props),
    ))
}

/// `GET /articles/*slug` - page in the default locale
pub async fn default_locale_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PreviewParams>,
) -> HttpResult<impl IntoResponse> {
    let locale = state.config.locales.default_locale().code().to_string();
    render_page(&state, locale, &slug, params).await
}

/// `GET /:locale/articles/*slug` - page in an explicit locale
pub async fn localized_page(
    State(state): State<AppState>,
    Path((locale, slug)): Path<(String, String)>,
    Query(params): Query<PreviewParams>,
) -> HttpResult<impl IntoResponse> {
    render_page(&state, locale, &slug, params).await
}

async fn render_page(
    state: &AppState,
    locale: String,
    slug: &str,
    params: PreviewParams,
) -> HttpResult<impl IntoResponse> {
    let page = resolve(state, locale.clone(), slug, params).await?;
    let html = render_article_page(&state.config, &locale, &page.props);
    Ok(([(header::CACHE_CONTROL, page.cache.header_value())], Html(html)))
}

async fn resolve(
    state: &AppState,
    locale: String,
    slug: &str,
    params: PreviewParams,
) -> HttpResult<ArticlePage> {
    if state.config.locales.get(&locale).is_none() {
        return Err(HttpError::not_found(format!("unknown locale: {}", locale)));
    }

    let slug = slug.trim_matches('/');
    if slug.is_empty() {
        return Err(HttpError::not_found("empty article slug"));
    }

    debug!("Resolving article {}/{}", locale, slug);
    let request = ArticleRequest {
        slug: slug.to_string(),
        preview: preview_data(&state.config, params),
        locale,
    };
    Ok(resolve_article(&state.config, state.source.as_ref(), &request).await?)
}
