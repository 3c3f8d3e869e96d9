use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::cms::content::ContentItem;
use crate::cms::document::Document;
use crate::cms::query::Query;
use crate::cms::{ContentSource, ContentStore};
use crate::config::{Config, Credentials};
use crate::error::{ResolveError, ResolveResult};

const JSON_API: &str = "application/vnd.api+json";

/// Opens locale-scoped [`DrupalStore`]s against one Drupal site.
///
/// The underlying `reqwest::Client` is shared so stores reuse its
/// connection pool; stores themselves hold no content state.
#[derive(Debug, Clone)]
pub struct DrupalSource {
    http: reqwest::Client,
    api_base: String,
    credentials: Option<Credentials>,
}

impl DrupalSource {
    pub fn new(api_base: &str, credentials: Option<Credentials>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.drupal_url, config.credentials())
    }

    /// Open a store directly (without boxing)
    pub fn store(&self, locale: Option<&str>) -> DrupalStore {
        DrupalStore {
            http: self.http.clone(),
            api_base: self.api_base.clone(),
            locale: locale.map(str::to_string),
            credentials: self.credentials.clone(),
            auth_cache: OnceCell::new(),
        }
    }
}

impl ContentSource for DrupalSource {
    fn open(&self, locale: Option<&str>) -> Box<dyn ContentStore> {
        Box::new(self.store(locale))
    }
}

/// Drupal JSON:API client scoped to at most one locale.
#[derive(Debug)]
pub struct DrupalStore {
    http: reqwest::Client,
    api_base: String,
    locale: Option<String>,
    credentials: Option<Credentials>,
    auth_cache: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

#[derive(Debug, Deserialize)]
struct TranslatedPath {
    entity: TranslatedEntity,
}

#[derive(Debug, Deserialize)]
struct TranslatedEntity {
    uuid: String,
}

impl DrupalStore {
    /// JSON:API root, locale-prefixed when the store is scoped
    pub fn api_root(&self) -> String {
        match &self.locale {
            Some(locale) => format!("{}/{}/jsonapi/", self.api_base, locale),
            None => format!("{}/jsonapi/", self.api_base),
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// "node--article" -> "{apiRoot}node/article"
    fn collection_url(&self, object_name: &str) -> String {
        format!("{}{}", self.api_root(), object_name.replacen("--", "/", 1))
    }

    /// `{apiRoot}decoupled-preview/{token}` with the token as one encoded segment
    fn preview_url(&self, token: &str) -> ResolveResult<Url> {
        let mut url = Url::parse(&self.api_root())
            .map_err(|e| ResolveError::upstream(format!("invalid API base {}: {}", self.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ResolveError::upstream(format!("API base {} cannot carry a path", self.api_base)))?
            .pop_if_empty()
            .push("decoupled-preview")
            .push(token);
        Ok(url)
    }

    async fn fetch_token(&self, credentials: &Credentials) -> ResolveResult<String> {
        let url = format!("{}/oauth/token", self.api_base);
        debug!("Requesting OAuth token from {}", url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::upstream(format!(
                "OAuth token request failed ({}): {}",
                status, body
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(format!("{} {}", token.token_type, token.access_token))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> ResolveResult<T> {
        let mut request = self.http.get(url).header(ACCEPT, JSON_API);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(auth) = self.auth_header().await? {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ResolveError::not_found(url));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolveError::upstream(format!(
                "{} returned HTTP {}: {}",
                url, status, body
            )));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ContentStore for DrupalStore {
    async fn list_objects(&self, object_name: &str, query: &Query) -> ResolveResult<Vec<ContentItem>> {
        let mut items = Vec::new();
        let mut document: Document = self
            .get_json(&self.collection_url(object_name), &query.to_pairs())
            .await?;

        // Follow pagination links; `next` already carries the query string
        let mut visited = HashSet::new();
        loop {
            let next = document.next_page().map(str::to_string);
            items.extend(document.into_items()?);
            match next {
                Some(url) => {
                    if !visited.insert(url.clone()) {
                        return Err(ResolveError::upstream(format!(
                            "pagination cycle while listing {}: {} was already fetched",
                            object_name, url
                        )));
                    }
                    debug!("Fetching next page: {}", url);
                    document = self.get_json(&url, &[]).await?;
                }
                None => break,
            }
        }

        info!(
            "Listed {} {} resources (locale: {})",
            items.len(),
            object_name,
            self.locale.as_deref().unwrap_or("-")
        );
        Ok(items)
    }

    async fn get_object(&self, object_name: &str, id: &str, query: &Query) -> ResolveResult<ContentItem> {
        let url = format!("{}/{}", self.collection_url(object_name), id);
        let document: Document = self.get_json(&url, &query.to_pairs()).await?;
        document.into_item()
    }

    async fn get_object_by_path(
        &self,
        object_name: &str,
        path: &str,
        query: &Query,
    ) -> ResolveResult<ContentItem> {
        let router_url = format!("{}/router/translate-path", self.api_base);
        let translated: TranslatedPath = self
            .get_json(
                &router_url,
                &[
                    ("path".to_string(), path.to_string()),
                    ("_format".to_string(), "json".to_string()),
                ],
            )
            .await
            .map_err(|e| match e {
                ResolveError::NotFound(_) => ResolveError::not_found(path),
                other => other,
            })?;

        debug!("Path {} resolved to {}", path, translated.entity.uuid);
        self.get_object(object_name, &translated.entity.uuid, query).await
    }

    async fn fetch_preview(&self, token: &str, includes: &[String]) -> ResolveResult<ContentItem> {
        let url = self.preview_url(token)?;
        let query = if includes.is_empty() {
            Vec::new()
        } else {
            vec![("include".to_string(), includes.join(","))]
        };

        let document: Document = self.get_json(url.as_str(), &query).await?;
        document.into_item()
    }

    async fn auth_header(&self) -> ResolveResult<Option<String>> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };
        let header = self
            .auth_cache
            .get_or_try_init(|| self.fetch_token(credentials))
            .await?;
        Ok(Some(header.clone()))
    }
}
