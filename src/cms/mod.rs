//! Content store access.
//!
//! - `content`: normalized article types
//! - `query`: sparse fieldset / include / custom parameter builder
//! - `document`: JSON:API document normalization
//! - `drupal`: the Drupal JSON:API backed store
//!
//! Resolution code only talks to the [`ContentStore`] and [`ContentSource`]
//! traits, so tests can substitute in-memory stores.

mod content;
mod document;
mod drupal;
mod query;

#[cfg(test)]
pub(crate) mod memory;

use async_trait::async_trait;

use crate::error::ResolveResult;

pub use content::{ContentItem, PathAlias, RichText};
pub use drupal::{DrupalSource, DrupalStore};
pub use query::Query;

/// JSON:API resource name of articles
pub const ARTICLE: &str = "node--article";

/// Relationship path from an article to its media image file
pub const MEDIA_IMAGE_INCLUDE: &str = "field_media_image.field_media_image";

/// A content store scoped to at most one locale.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Every resource of `object_name`, in backend order
    async fn list_objects(&self, object_name: &str, query: &Query) -> ResolveResult<Vec<ContentItem>>;

    /// A single resource by identifier
    async fn get_object(&self, object_name: &str, id: &str, query: &Query) -> ResolveResult<ContentItem>;

    /// A single resource by its path alias
    async fn get_object_by_path(
        &self,
        object_name: &str,
        path: &str,
        query: &Query,
    ) -> ResolveResult<ContentItem>;

    /// Draft content addressed by a preview token
    async fn fetch_preview(&self, token: &str, includes: &[String]) -> ResolveResult<ContentItem>;

    /// Authorization header value, `None` when no credentials are configured
    async fn auth_header(&self) -> ResolveResult<Option<String>>;
}

/// Opens a fresh store per locale scope.
///
/// `None` opens an unscoped store, used by single-language sites.
pub trait ContentSource: Send + Sync {
    fn open(&self, locale: Option<&str>) -> Box<dyn ContentStore>;
}
