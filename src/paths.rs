//! Route enumeration: every (locale, slug) pair the site can render.

use std::collections::HashSet;
use std::sync::OnceLock;

use futures::future::try_join_all;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::cms::{ContentSource, Query, ARTICLE};
use crate::config::Config;
use crate::error::{ResolveError, ResolveResult};
use crate::locale::LocaleSet;

/// Fixed prefix of every article alias
pub const ARTICLE_PREFIX: &str = "/articles/";

fn article_alias_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/articles/(.+)$").expect("article alias pattern is valid"))
}

/// Externally addressable identity of a renderable page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RouteKey {
    pub locale: String,
    pub slug: String,
}

impl RouteKey {
    /// Frontend URL path of this route
    pub fn url_path(&self, locales: &LocaleSet) -> String {
        if locales.is_multi_language() {
            format!("/{}{}{}", self.locale, ARTICLE_PREFIX, self.slug)
        } else {
            format!("{}{}", ARTICLE_PREFIX, self.slug)
        }
    }
}

/// Statically known routes. Anything outside `paths` is a hard miss.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSet {
    pub paths: Vec<RouteKey>,
    pub fallback: bool,
}

impl From<Vec<RouteKey>> for RouteSet {
    fn from(paths: Vec<RouteKey>) -> Self {
        Self {
            paths,
            fallback: false,
        }
    }
}

/// Extract the slug from an article alias: everything after `/articles/`.
pub fn extract_slug(alias: &str) -> ResolveResult<&str> {
    article_alias_pattern()
        .captures(alias)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ResolveError::malformed_alias(alias))
}

/// Enumerate the routes of every article in every configured locale.
///
/// Locales are listed concurrently; the result is ordered by configured
/// locale, then by backend order. Any store failure fails the whole
/// enumeration. Articles whose alias lacks the `/articles/` prefix are
/// skipped with a warning, or abort the enumeration when
/// `strict_path_aliases` is set.
pub async fn enumerate_paths(config: &Config, source: &dyn ContentSource) -> ResolveResult<Vec<RouteKey>> {
    let locales = &config.locales;
    info!("Enumerating article paths for {} locale(s)", locales.len());

    let per_locale = locales.iter().map(|locale| async move {
        let store = source.open(locales.scope_for(locale.code()));
        let query = Query::new().fields(ARTICLE, &["path"]);
        let articles = store
            .list_objects(ARTICLE, &query)
            .await
            .map_err(ResolveError::into_upstream)?;

        let mut routes = Vec::with_capacity(articles.len());
        for article in &articles {
            match extract_slug(&article.path.alias) {
                Ok(slug) => routes.push(RouteKey {
                    locale: locale.code().to_string(),
                    slug: slug.to_string(),
                }),
                Err(e) if config.strict_path_aliases => return Err(e),
                Err(e) => warn!("[{}] Skipping article {}: {}", locale.code(), article.id, e),
            }
        }
        Ok::<_, ResolveError>(routes)
    });

    let by_locale = try_join_all(per_locale).await?;

    let mut seen = HashSet::new();
    let mut paths = Vec::new();
    for route in by_locale.into_iter().flatten() {
        if seen.insert(route.clone()) {
            paths.push(route);
        } else {
            warn!("Duplicate route {}/{} dropped", route.locale, route.slug);
        }
    }

    info!("Enumerated {} article paths", paths.len());
    Ok(paths)
}
