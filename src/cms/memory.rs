//! In-memory content source for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::cms::{ContentItem, ContentSource, ContentStore, PathAlias, Query, RichText};
use crate::error::{ResolveError, ResolveResult};

/// One recorded store call: (scope, operation, query)
pub type Call = (Option<String>, String, Query);

#[derive(Default, Clone)]
pub struct MemorySource {
    articles: HashMap<Option<String>, Vec<ContentItem>>,
    previews: HashMap<String, ContentItem>,
    failing: HashSet<Option<String>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_articles(mut self, scope: Option<&str>, items: Vec<ContentItem>) -> Self {
        self.articles.insert(scope.map(str::to_string), items);
        self
    }

    pub fn with_preview(mut self, token: &str, item: ContentItem) -> Self {
        self.previews.insert(token.to_string(), item);
        self
    }

    pub fn failing(mut self, scope: Option<&str>) -> Self {
        self.failing.insert(scope.map(str::to_string));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl ContentSource for MemorySource {
    fn open(&self, locale: Option<&str>) -> Box<dyn ContentStore> {
        let scope = locale.map(str::to_string);
        Box::new(MemoryStore {
            items: self.articles.get(&scope).cloned().unwrap_or_default(),
            previews: self.previews.clone(),
            failing: self.failing.contains(&scope),
            calls: Arc::clone(&self.calls),
            scope,
        })
    }
}

struct MemoryStore {
    scope: Option<String>,
    items: Vec<ContentItem>,
    previews: HashMap<String, ContentItem>,
    failing: bool,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MemoryStore {
    fn record(&self, op: &str, query: &Query) -> ResolveResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((self.scope.clone(), op.to_string(), query.clone()));
        if self.failing {
            return Err(ResolveError::upstream(format!(
                "store for {:?} is unavailable",
                self.scope
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_objects(&self, _object_name: &str, query: &Query) -> ResolveResult<Vec<ContentItem>> {
        self.record("list", query)?;
        Ok(self.items.clone())
    }

    async fn get_object(&self, _object_name: &str, id: &str, query: &Query) -> ResolveResult<ContentItem> {
        self.record("get", query)?;
        self.items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| ResolveError::not_found(id))
    }

    async fn get_object_by_path(
        &self,
        _object_name: &str,
        path: &str,
        query: &Query,
    ) -> ResolveResult<ContentItem> {
        self.record("by_path", query)?;
        self.items
            .iter()
            .find(|i| match &self.scope {
                Some(locale) => format!("/{}{}", locale, i.path.alias) == path,
                None => i.path.alias == path,
            })
            .cloned()
            .ok_or_else(|| ResolveError::not_found(path))
    }

    async fn fetch_preview(&self, token: &str, _includes: &[String]) -> ResolveResult<ContentItem> {
        self.record("preview", &Query::new())?;
        self.previews
            .get(token)
            .cloned()
            .ok_or_else(|| ResolveError::not_found(token))
    }

    async fn auth_header(&self) -> ResolveResult<Option<String>> {
        Ok(None)
    }
}

/// Article with a title, a body and an aliased path
pub fn article(id: &str, alias: &str, title: &str) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        title: title.to_string(),
        body: Some(RichText {
            value: format!("<p>{}</p>", title),
            format: Some("basic_html".to_string()),
            ..Default::default()
        }),
        path: PathAlias {
            alias: alias.to_string(),
            langcode: None,
            pid: None,
        },
        media_image_url: None,
    }
}
