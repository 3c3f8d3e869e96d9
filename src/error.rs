use thiserror::Error;

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Failures while resolving routes or article content.
///
/// All variants propagate to the request boundary; nothing here is retried.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("path alias {alias:?} does not start with /articles/")]
    MalformedAlias { alias: String },

    #[error("content not found: {0}")]
    NotFound(String),

    #[error("upstream fetch failed: {0}")]
    Upstream(String),
}

impl ResolveError {
    pub fn malformed_alias(alias: impl Into<String>) -> Self {
        Self::MalformedAlias {
            alias: alias.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Reclassify a miss as a backend failure. Used for lookups whose
    /// absence says nothing about the requested page.
    pub fn into_upstream(self) -> Self {
        match self {
            Self::NotFound(what) => Self::Upstream(format!("{} not found", what)),
            other => other,
        }
    }
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Upstream(format!("invalid JSON from backend: {}", err))
    }
}
