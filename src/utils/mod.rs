//! Request handling helpers.
//!
//! - [`client_ip`] - Client IP and request metadata extraction from HTTP headers

pub mod client_ip;
