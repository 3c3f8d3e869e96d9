//! Article resolution: content, language alternates and cache policy for one
//! page request.

use std::fmt;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cms::{ContentItem, ContentSource, ContentStore, Query, ARTICLE, MEDIA_IMAGE_INCLUDE};
use crate::config::Config;
use crate::error::{ResolveError, ResolveResult};
use crate::paths::ARTICLE_PREFIX;

/// Suggested regeneration interval for resolved pages, in seconds
pub const REVALIDATE_SECS: u64 = 60;

/// Draft overrides for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewData {
    /// Preview token; the draft it addresses replaces the published article
    pub key: Option<String>,
    /// Revision to pin the canonical lookup to
    pub resource_version_id: Option<String>,
}

impl PreviewData {
    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.resource_version_id.is_none()
    }
}

/// One incoming page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRequest {
    pub locale: String,
    pub slug: String,
    pub preview: Option<PreviewData>,
}

/// Language alternate advertised for an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrefAlternate {
    #[serde(rename = "hrefLang")]
    pub href_lang: String,
    pub href: String,
}

/// Props handed to the page renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleProps {
    pub article: ContentItem,
    #[serde(rename = "hrefLang")]
    pub href_lang: Vec<HrefAlternate>,
    pub revalidate: u64,
}

/// Shared-cache policy attached to every resolved page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub s_maxage: u32,
    pub stale_while_revalidate: u32,
}

impl CachePolicy {
    pub const ARTICLE: CachePolicy = CachePolicy {
        s_maxage: 10,
        stale_while_revalidate: 6000,
    };

    /// Value of the `Cache-Control` header
    pub fn header_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "public, s-maxage={}, stale-while-revalidate={}",
            self.s_maxage, self.stale_while_revalidate
        )
    }
}

/// A fully resolved article page
#[derive(Debug, Clone, PartialEq)]
pub struct ArticlePage {
    pub props: ArticleProps,
    pub cache: CachePolicy,
}

/// Path the backend knows the article under, locale-prefixed on
/// multi-language sites.
pub fn canonical_path(locale: &str, slug: &str, multi_language: bool) -> String {
    if multi_language {
        format!("/{}{}{}", locale, ARTICLE_PREFIX, slug)
    } else {
        format!("{}{}", ARTICLE_PREFIX, slug)
    }
}

/// Fields requested for a full article render
pub fn article_query() -> Query {
    let mut query = Query::new()
        .fields(ARTICLE, &["title", "body", "path", "field_media_image"])
        .fields("media--image", &["field_media_image"])
        .fields("file--file", &["uri"]);
    query.add_include(&[MEDIA_IMAGE_INCLUDE]);
    query
}

/// Look the article up by path unless an override (a fetched draft) is
/// supplied, in which case it is returned as is.
pub async fn resolve_canonical(
    store: &dyn ContentStore,
    path: &str,
    query: &Query,
    override_item: Option<ContentItem>,
) -> ResolveResult<ContentItem> {
    match override_item {
        Some(item) => {
            debug!("Using override content {} for {}", item.id, path);
            Ok(item)
        }
        None => store
            .get_object_by_path(ARTICLE, path, query)
            .await
            .map_err(|e| match e {
                ResolveError::NotFound(_) => ResolveError::not_found(path),
                other => other,
            }),
    }
}

/// Resolve the alias of `article_id` in every configured locale and build
/// the language alternates, in configured locale order.
pub async fn resolve_alternates(
    config: &Config,
    source: &dyn ContentSource,
    article_id: &str,
) -> ResolveResult<Vec<HrefAlternate>> {
    let locales = &config.locales;
    let lookups = locales.iter().map(|locale| async move {
        let store = source.open(locales.scope_for(locale.code()));
        let query = Query::new().fields(ARTICLE, &["path"]);
        // A missing translation is a backend inconsistency, not a missing page
        let translation = store
            .get_object(ARTICLE, article_id, &query)
            .await
            .map_err(ResolveError::into_upstream)?;

        let href_lang = translation
            .path
            .langcode
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| locale.code().to_string());
        let href = format!(
            "{}/{}{}",
            config.frontend_url, href_lang, translation.path.alias
        );
        Ok::<_, ResolveError>(HrefAlternate { href_lang, href })
    });

    try_join_all(lookups).await
}

/// Resolve the content, alternates and cache policy for one request.
pub async fn resolve_article(
    config: &Config,
    source: &dyn ContentSource,
    request: &ArticleRequest,
) -> ResolveResult<ArticlePage> {
    let multi_language = config.locales.is_multi_language();
    let store = source.open(config.locales.scope_for(&request.locale));
    let path = canonical_path(&request.locale, &request.slug, multi_language);
    let mut query = article_query();

    let mut draft = None;
    if let Some(preview) = &request.preview {
        if let Some(key) = &preview.key {
            info!("Fetching preview for {}", path);
            let item = store
                .fetch_preview(key, query.includes())
                .await
                .map_err(ResolveError::into_upstream)?;
            debug!("Preview {} resolved to {}", key, item.id);
            draft = Some(item);
        }
        if let Some(revision) = &preview.resource_version_id {
            info!("Pinning {} to revision {}", path, revision);
            query.add_custom_param("resourceVersion", &format!("id:{}", revision));
        }
    }

    let article = resolve_canonical(store.as_ref(), &path, &query, draft).await?;
    let href_lang = resolve_alternates(config, source, &article.id).await?;

    info!(
        "Resolved {} ({}) with {} alternates",
        path,
        article.id,
        href_lang.len()
    );

    Ok(ArticlePage {
        props: ArticleProps {
            article,
            href_lang,
            revalidate: REVALIDATE_SECS,
        },
        cache: CachePolicy::ARTICLE,
    })
}
