//! # pxy-redirect
//!
//! A small HTTP redirector that turns short links of the form
//! `/<major>/<fragment>` into the Clang diagnostics reference page of the
//! matching LLVM release, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Path parsing, version rules, validation errors
//! - **Infrastructure Layer** ([`infrastructure`]) - Uptime heartbeat reporters
//! - **API Layer** ([`api`]) - Redirect and health handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML home and error pages
//!
//! ## Example
//!
//! `GET /13/wall` answers `308 Permanent Redirect` with
//! `Location: https://releases.llvm.org/13.0.0/tools/clang/docs/DiagnosticsReference.html#wall`.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::domain::{PathResolver, Resolution, ValidationError, VersionRules};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
