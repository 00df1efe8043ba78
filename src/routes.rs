//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`  - Health check: resolver self-test, heartbeat queue (JSON)
//! - everything else - Documentation redirect, home page, or error page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//!
//! Trailing slashes are deliberately left untouched: `/13/` is an empty
//! fragment, not `/13`.

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
