//! Infrastructure layer for external integrations.
//!
//! Nothing here affects how a path resolves; these are side channels owned by
//! the HTTP layer.
//!
//! # Modules
//!
//! - [`heartbeat`] - Liveness pings to an uptime monitor (HTTP and no-op implementations)

pub mod heartbeat;
