use serde::{Deserialize, Serialize};

/// A single article as returned by the backend, normalized.
///
/// Which fields are populated depends on the query: route listings only
/// request the path, so `title` and `body` stay empty there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Stable identifier, shared by every translation of the article
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<RichText>,
    #[serde(default)]
    pub path: PathAlias,
    /// Path of the article's media image file, relative to the image host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_image_url: Option<String>,
}

/// Formatted text field. `value` is pre-sanitized markup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub processed: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// URL alias of one translation of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAlias {
    /// Empty when the backend has no alias for this translation
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub langcode: Option<String>,
    #[serde(default)]
    pub pid: Option<u64>,
}

impl ContentItem {
    /// Markup of the body field, or an empty string when the article has none
    pub fn body_markup(&self) -> &str {
        self.body.as_ref().map(|b| b.value.as_str()).unwrap_or("")
    }
}
