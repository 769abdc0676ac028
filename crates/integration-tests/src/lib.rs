//! Shared helpers for AcuteMeter integration tests.

/// Base URL for the site under test (configurable via environment).
#[must_use]
pub fn site_base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
