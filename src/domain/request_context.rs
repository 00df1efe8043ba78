//! Per-request metadata carried alongside resolution for observability.

/// Client metadata attached to log records around a resolution.
///
/// Purely pass-through: resolution never looks at it. All fields are optional
/// so missing headers degrade to empty log fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub request_id: Option<String>,
}

impl RequestContext {
    /// Creates a new request context.
    ///
    /// # Arguments
    ///
    /// - `ip` - Client IP address as resolved by the caller
    /// - `user_agent` - Optional User-Agent header
    /// - `referer` - Optional Referer header
    /// - `request_id` - Optional `X-Request-Id` header
    pub fn new(
        ip: Option<String>,
        user_agent: Option<&str>,
        referer: Option<&str>,
        request_id: Option<&str>,
    ) -> Self {
        Self {
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
            request_id: request_id.map(|s| s.to_string()),
        }
    }

    /// Field value for logging, `""` when absent.
    pub fn ip_or_empty(&self) -> &str {
        self.ip.as_deref().unwrap_or_default()
    }

    pub fn user_agent_or_empty(&self) -> &str {
        self.user_agent.as_deref().unwrap_or_default()
    }

    pub fn referer_or_empty(&self) -> &str {
        self.referer.as_deref().unwrap_or_default()
    }

    pub fn request_id_or_empty(&self) -> &str {
        self.request_id.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_full() {
        let ctx = RequestContext::new(
            Some("192.168.1.2".to_string()),
            Some("Mozilla/5.0"),
            Some("https://pxy.fi/6/wc++98-c++11-compat-binary-literal"),
            Some("4d84db433a35256e7fdd395f430a9121"),
        );

        assert_eq!(ctx.ip_or_empty(), "192.168.1.2");
        assert_eq!(ctx.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(
            ctx.referer_or_empty(),
            "https://pxy.fi/6/wc++98-c++11-compat-binary-literal"
        );
        assert_eq!(ctx.request_id_or_empty(), "4d84db433a35256e7fdd395f430a9121");
    }

    #[test]
    fn test_request_context_minimal() {
        let ctx = RequestContext::new(None, None, None, None);

        assert_eq!(ctx, RequestContext::default());
        assert_eq!(ctx.ip_or_empty(), "");
        assert_eq!(ctx.user_agent_or_empty(), "");
        assert_eq!(ctx.referer_or_empty(), "");
        assert_eq!(ctx.request_id_or_empty(), "");
    }
}
