//! Validation errors produced by path resolution.
//!
//! Every error carries an HTML explanation rendered at construction time.
//! User-supplied text only ever reaches that HTML through the auto-escaping
//! template in `templates/fragments/validation_error.html`.

use askama::Template;
use std::fmt;

/// Project documentation linked from every error message.
pub const DOCUMENTATION_URL: &str = "https://github.com/jonasbn/pxy-redirect-ow-function";

/// Fallback used if the message template ever fails to render.
const FALLBACK_MESSAGE: &str =
    "<p>Invalid URL format. Please check the documentation for proper usage.</p>";

/// Why a request path could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The path does not decode to UTF-8 text.
    MalformedInput,
    /// No fragment segment at all, e.g. `/13`.
    InsufficientParts,
    /// Empty, oversized, or non-numeric version segment.
    InvalidVersion,
    /// Empty, oversized, or disallowed characters after normalization.
    InvalidFragment,
}

impl ErrorKind {
    /// Stable machine-readable tag, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedInput => "malformed_input",
            Self::InsufficientParts => "insufficient_parts",
            Self::InvalidVersion => "invalid_version",
            Self::InvalidFragment => "invalid_fragment",
        }
    }

    /// HTTP status the error maps to.
    ///
    /// Unparseable input is reported as a server-side failure, every other
    /// kind as a bad request.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MalformedInput => 500,
            Self::InsufficientParts | Self::InvalidVersion | Self::InvalidFragment => 400,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Template)]
#[template(path = "fragments/validation_error.html")]
struct ValidationMessage<'a> {
    kind: ErrorKind,
    scheme: &'a str,
    host: &'a str,
    version: &'a str,
    fragment: &'a str,
    docs_url: &'a str,
}

/// A rejected request path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: version >{version}< fragment >{fragment}<")]
pub struct ValidationError {
    kind: ErrorKind,
    version: String,
    fragment: String,
    message: String,
}

impl ValidationError {
    /// Builds the error and renders its HTML explanation.
    ///
    /// `scheme` and `host` describe the public address of this service and
    /// are echoed back in the example URL.
    pub fn new(
        kind: ErrorKind,
        scheme: &str,
        host: &str,
        version: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        let version = version.into();
        let fragment = fragment.into();

        let message = ValidationMessage {
            kind,
            scheme,
            host,
            version: &version,
            fragment: &fragment,
            docs_url: DOCUMENTATION_URL,
        }
        .render()
        .unwrap_or_else(|_| FALLBACK_MESSAGE.to_string());

        Self {
            kind,
            version,
            fragment,
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Raw version segment as received (unescaped).
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Raw fragment as checked (unescaped).
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// HTML-safe explanation, ready to embed in a page.
    pub fn html(&self) -> &str {
        &self.message
    }

    pub fn http_status(&self) -> u16 {
        self.kind.http_status()
    }
}
