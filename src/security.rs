use subtle::ConstantTimeEq;

use crate::config::Config;

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Whether a request may see draft content.
///
/// Preview is only available when a preview secret is configured and the
/// request presents the same secret.
pub fn preview_authorized(config: &Config, provided: Option<&str>) -> bool {
    match (config.preview_secret.as_deref(), provided) {
        (Some(expected), Some(provided)) => constant_time_compare(expected, provided),
        _ => false,
    }
}
