//! Page templates.

use askama::Template;
use askama_web::WebTemplate;
use url::Url;

use crate::domain::ValidationError;
use crate::domain::errors::DOCUMENTATION_URL;

/// Informational page served for `/` and `/index.html`.
///
/// Renders `templates/home.html`.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomePage {
    title: &'static str,
    page_type: &'static str,
    scheme: String,
    host: String,
    docs_url: &'static str,
}

impl HomePage {
    /// Builds the page for the public address of this service.
    pub fn new(public_base: &Url) -> Self {
        let host = match (public_base.host_str(), public_base.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        Self {
            title: "pxy.fi",
            page_type: "info",
            scheme: public_base.scheme().to_string(),
            host,
            docs_url: DOCUMENTATION_URL,
        }
    }
}

/// Error page wrapping a validation message.
///
/// Renders `templates/error.html`.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPage {
    title: &'static str,
    page_type: &'static str,
    /// Already HTML-safe, embedded unescaped.
    message: String,
}

impl ErrorPage {
    pub fn from_validation(error: &ValidationError) -> Self {
        Self::with_message(error.html().to_string())
    }

    /// Page with a fixed, trusted HTML message.
    pub fn with_message(message: String) -> Self {
        Self {
            title: "pxy.fi",
            page_type: "error",
            message,
        }
    }
}
