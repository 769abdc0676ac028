//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Landing page
//! GET  /preorder      - Pre-order form page
//! POST /api/preorder  - Pre-order submission (JSON)
//! GET  /health        - Health check
//! ```

pub mod home;
pub mod preorder;

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/preorder", get(preorder::page))
        .route("/api/preorder", post(preorder::submit))
        .fallback(not_found)
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
