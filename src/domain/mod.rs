//! Domain layer: request path resolution.
//!
//! Everything here is synchronous and free of I/O. The layer knows nothing
//! about HTTP handlers, logging, or the heartbeat; those live in
//! [`crate::api`] and [`crate::infrastructure`].
//!
//! # Modules
//!
//! - [`resolver`] - [`resolver::PathResolver`], the single entry point
//! - [`segments`] - Path decoding and splitting into version/fragment
//! - [`fragment`] - Anchor normalization and validation
//! - [`version`] - Version exception rule table
//! - [`errors`] - Validation errors with escaped HTML explanations
//! - [`request_context`] - Client metadata passed through for logging
//!
//! # Resolution Flow
//!
//! 1. Decode the path, rejecting non-UTF-8 input
//! 2. Split into `/<version>/<fragment>` (or recognize the home page)
//! 3. Validate the version as a non-negative integer
//! 4. Normalize and validate the fragment
//! 5. Look up minor/patch levels in [`version::VersionRules`]
//! 6. Compose the documentation URL

pub mod errors;
pub mod fragment;
pub mod request_context;
pub mod resolver;
pub mod segments;
pub mod version;

pub use errors::{ErrorKind, ValidationError};
pub use request_context::RequestContext;
pub use resolver::{PathResolver, Resolution, TargetUrl};
pub use version::{MajorPredicate, VersionRule, VersionRules, VersionSpec};
