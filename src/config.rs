use anyhow::{Context, Result};
use crate::locale::LocaleSet;

#[derive(Debug, Clone)]
pub struct Config {
    // Drupal backend
    pub drupal_url: String,
    pub image_url: String,

    // OAuth client credentials (both must be set to be used)
    pub client_id: Option<String>,
    pub client_secret: Option<String>,

    // Frontend
    pub frontend_url: String,
    pub locales: LocaleSet,

    // Preview
    pub preview_secret: Option<String>,

    // Path enumeration
    pub strict_path_aliases: bool,

    // Server
    pub port: u16,
}

/// Client credentials used to obtain an OAuth token from the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let drupal_url = std::env::var("DRUPAL_URL")
            .context("DRUPAL_URL not set")?
            .trim_end_matches('/')
            .to_string();

        let locale_codes: Vec<String> = std::env::var("LOCALES")
            .unwrap_or_else(|_| "en".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let default_locale = std::env::var("DEFAULT_LOCALE")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let locales = LocaleSet::new(locale_codes.as_slice(), default_locale.as_deref())
            .context("Invalid LOCALES / DEFAULT_LOCALE")?;

        Ok(Self {
            image_url: std::env::var("IMAGE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| drupal_url.clone()),
            drupal_url,

            client_id: non_empty_var("CLIENT_ID"),
            client_secret: non_empty_var("CLIENT_SECRET"),

            frontend_url: std::env::var("FRONTEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            locales,

            preview_secret: non_empty_var("PREVIEW_SECRET"),

            strict_path_aliases: std::env::var("STRICT_PATH_ALIASES")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),

            port,
        })
    }

    /// Credentials for authenticated requests, only when both halves are configured
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Some(Credentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn create_test_config(locales: LocaleSet) -> Config {
    Config {
        drupal_url: "https://cms.example.com".to_string(),
        image_url: "https://img.example.com".to_string(),
        client_id: None,
        client_secret: None,
        frontend_url: "https://www.example.com".to_string(),
        locales,
        preview_secret: None,
        strict_path_aliases: false,
        port: 3000,
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
