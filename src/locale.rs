//! Locale set: the ordered list of locales the site is published in.
//!
//! The set decides whether content lookups are locale-scoped. A site with a
//! single locale addresses content without a locale segment; as soon as a
//! second locale is configured every lookup carries one.

use anyhow::{bail, Result};
use serde::Serialize;

/// A configured locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locale {
    /// Language code as used in URLs and by the backend (e.g., "en", "es")
    code: String,

    /// Whether this is the site's default locale (exactly one is)
    is_default: bool,
}

impl Locale {
    /// Get the locale code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Check if this is the default locale.
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Returns true iff more than one locale is configured.
///
/// The flag decides how every downstream query is scoped: `false` means
/// no locale prefix is applied anywhere.
pub fn is_multi_language<T>(locales: &[T]) -> bool {
    locales.len() > 1
}

/// Ordered, validated set of locales.
///
/// Order is significant: route enumeration and language alternates are
/// emitted in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<Locale>,
}

impl LocaleSet {
    /// Build a locale set from configured codes.
    ///
    /// # Arguments
    /// * `codes` - Locale codes in display order
    /// * `default` - The default locale; the first code when `None`
    ///
    /// # Returns
    /// * `Err` if `codes` is empty, contains duplicates, or `default` is not one of them
    pub fn new<S: AsRef<str>>(codes: &[S], default: Option<&str>) -> Result<Self> {
        let Some(first) = codes.first() else {
            bail!("At least one locale must be configured");
        };
        let default = default.unwrap_or_else(|| first.as_ref());

        let mut locales: Vec<Locale> = Vec::with_capacity(codes.len());
        for code in codes {
            let code = code.as_ref();
            if locales.iter().any(|l| l.code == code) {
                bail!("Duplicate locale code: '{}'", code);
            }
            locales.push(Locale {
                code: code.to_string(),
                is_default: code == default,
            });
        }

        if !locales.iter().any(|l| l.is_default) {
            bail!("Default locale '{}' is not in the configured locales", default);
        }

        Ok(Self { locales })
    }

    /// Convenience constructor for a single-language site.
    pub fn single(code: &str) -> Self {
        Self {
            locales: vec![Locale {
                code: code.to_string(),
                is_default: true,
            }],
        }
    }

    /// Whether lookups must be locale-scoped.
    pub fn is_multi_language(&self) -> bool {
        is_multi_language(self.locales.as_slice())
    }

    /// Get a locale by its code.
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.locales.iter().find(|l| l.code == code)
    }

    /// Get the default locale.
    pub fn default_locale(&self) -> &Locale {
        // `new` and `single` guarantee exactly one default
        self.locales
            .iter()
            .find(|l| l.is_default)
            .unwrap_or(&self.locales[0])
    }

    /// Iterate over locales in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.locales.iter().map(|l| l.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// The locale scope a content store should be opened with.
    ///
    /// # Returns
    /// `Some(code)` in multi-language mode, `None` otherwise.
    pub fn scope_for<'a>(&self, locale: &'a str) -> Option<&'a str> {
        if self.is_multi_language() {
            Some(locale)
        } else {
            None
        }
    }
}
