//! JSON:API document normalization.
//!
//! Turns the `data` / `included` structure returned by Drupal into flat
//! [`ContentItem`] values, following the media image relationship chain
//! (`node -> media--image -> file--file`) through `included`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::cms::content::{ContentItem, PathAlias, RichText};
use crate::error::{ResolveError, ResolveResult};

/// Relationship on the article pointing at its media entity, and on the
/// media entity pointing at its file.
pub const MEDIA_IMAGE_FIELD: &str = "field_media_image";

#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    data: Option<PrimaryData>,
    #[serde(default)]
    included: Vec<Resource>,
    #[serde(default)]
    links: Option<Links>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PrimaryData {
    Many(Vec<Resource>),
    One(Box<Resource>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub relationships: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Links {
    #[serde(default)]
    next: Option<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    href: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawPath {
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    langcode: Option<String>,
    #[serde(default)]
    pid: Option<u64>,
}

impl Document {
    /// URL of the next page of a collection, if any
    pub fn next_page(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.next.as_ref())
            .map(|l| l.href.as_str())
    }

    /// Normalize every primary resource (collection or single)
    pub fn into_items(self) -> ResolveResult<Vec<ContentItem>> {
        match &self.data {
            Some(PrimaryData::Many(resources)) => resources
                .iter()
                .map(|r| to_content_item(r, &self.included))
                .collect(),
            Some(PrimaryData::One(resource)) => Ok(vec![to_content_item(resource, &self.included)?]),
            None => Ok(Vec::new()),
        }
    }

    /// Normalize a single-resource document
    pub fn into_item(self) -> ResolveResult<ContentItem> {
        match &self.data {
            Some(PrimaryData::One(resource)) => to_content_item(resource, &self.included),
            Some(PrimaryData::Many(_)) => Err(ResolveError::upstream(
                "expected a single resource, got a collection",
            )),
            None => Err(ResolveError::not_found("document has no primary data")),
        }
    }
}

/// Flatten a resource into a content item, resolving the media image URL
/// from `included`. An attribute present with an unexpected shape is an
/// upstream error rather than a silently empty field.
pub fn to_content_item(resource: &Resource, included: &[Resource]) -> ResolveResult<ContentItem> {
    let attrs = &resource.attributes;

    let title = attrs
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let body = attribute::<RichText>(resource, "body")?;
    let raw_path = attribute::<RawPath>(resource, "path")?.unwrap_or_default();

    let media_image_url = related(resource, MEDIA_IMAGE_FIELD, included)
        .and_then(|media| related(media, MEDIA_IMAGE_FIELD, included))
        .and_then(|file| file.attributes.get("uri"))
        .and_then(|uri| uri.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ContentItem {
        id: resource.id.clone(),
        title,
        body,
        path: PathAlias {
            alias: raw_path.alias.unwrap_or_default(),
            langcode: raw_path.langcode,
            pid: raw_path.pid,
        },
        media_image_url,
    })
}

/// Decode an optional attribute; absent and `null` are both `None`.
fn attribute<T: DeserializeOwned>(resource: &Resource, name: &str) -> ResolveResult<Option<T>> {
    match resource.attributes.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
            ResolveError::upstream(format!(
                "{} {} has an invalid {} attribute: {}",
                resource.kind, resource.id, name, e
            ))
        }),
    }
}

/// Follow a to-one relationship into `included`. For to-many relationships
/// the first target wins.
fn related<'a>(resource: &Resource, field: &str, included: &'a [Resource]) -> Option<&'a Resource> {
    let data = resource.relationships.get(field)?.get("data")?;
    let identifier = match data {
        Value::Array(items) => items.first()?,
        Value::Object(_) => data,
        _ => return None,
    };
    let kind = identifier.get("type")?.as_str()?;
    let id = identifier.get("id")?.as_str()?;

    included.iter().find(|r| r.kind == kind && r.id == id)
}
