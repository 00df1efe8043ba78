//! HTML pages served to browsers.
//!
//! Uses Askama templates for server-side rendering. Templates auto-escape
//! every interpolated value; the only value marked safe is the validation
//! message, which is escaped when the error is built.
//!
//! # Modules
//!
//! - [`pages`] - Home and error page templates

pub mod pages;

pub use pages::{ErrorPage, HomePage};
