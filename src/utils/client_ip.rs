//! Client metadata extraction from HTTP request headers.

use axum::http::{HeaderMap, header};
use std::net::SocketAddr;

use crate::domain::RequestContext;

/// Header set by the DigitalOcean edge with the connecting client address.
const DO_CONNECTING_IP: &str = "do-connecting-ip";
const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";
const X_REQUEST_ID: &str = "x-request-id";

/// Determines the client IP address.
///
/// When `behind_proxy` is set, forwarding headers are consulted in order:
/// 1. `do-connecting-ip`
/// 2. first entry of `X-Forwarded-For`
/// 3. `X-Real-IP`
///
/// Falls back to the peer socket address otherwise.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let ip = extract_client_ip(&headers, Some(peer), true);
/// assert_eq!(ip.as_deref(), Some("203.0.113.7"));
/// ```
pub fn extract_client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> Option<String> {
    if behind_proxy {
        let forwarded = header_str(headers, DO_CONNECTING_IP)
            .or_else(|| {
                header_str(headers, X_FORWARDED_FOR)
                    .and_then(|v| v.split(',').next())
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
            })
            .or_else(|| header_str(headers, X_REAL_IP));

        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

/// Builds the logging context for a request.
pub fn request_context(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> RequestContext {
    RequestContext::new(
        extract_client_ip(headers, peer, behind_proxy),
        header_str(headers, header::USER_AGENT.as_str()),
        header_str(headers, header::REFERER.as_str()),
        header_str(headers, X_REQUEST_ID),
    )
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
