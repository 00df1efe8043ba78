//! Request path to documentation URL resolution.

use std::fmt;

use url::Url;

use crate::domain::errors::{ErrorKind, ValidationError};
use crate::domain::fragment::Fragment;
use crate::domain::segments::{Segments, decode_path, split_path};
use crate::domain::version::{VersionRules, VersionSpec};

/// Maximum accepted length of the version segment, in bytes.
pub const MAX_VERSION_LENGTH: usize = 100;

/// Public address the service is reachable under by default.
pub const DEFAULT_PUBLIC_BASE: &str = "https://pxy.fi";

/// Redirect destination on the upstream documentation site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(String);

impl TargetUrl {
    fn compose(version: VersionSpec, fragment: &Fragment) -> Self {
        Self(format!(
            "https://releases.llvm.org/{version}/tools/clang/docs/DiagnosticsReference.html#{fragment}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful outcome of [`PathResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Not a redirect; the caller serves the informational page.
    Home,
    Redirect(TargetUrl),
}

/// Maps `/<major>/<fragment>` paths onto the versioned diagnostics reference.
///
/// Holds no mutable state: one instance is shared across all requests and
/// `resolve` is a pure function of its input and the rule table.
///
/// # Examples
///
/// ```
/// use pxy_redirect::domain::resolver::{PathResolver, Resolution};
///
/// let resolver = PathResolver::default();
/// let Ok(Resolution::Redirect(target)) = resolver.resolve("/18/wall") else {
///     panic!("expected a redirect");
/// };
/// assert_eq!(
///     target.as_str(),
///     "https://releases.llvm.org/18.1.0/tools/clang/docs/DiagnosticsReference.html#wall"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PathResolver {
    rules: VersionRules,
    public_base: Url,
}

impl PathResolver {
    /// Creates a resolver.
    ///
    /// `public_base` is only used to echo this service's own address in
    /// error messages.
    pub fn new(rules: VersionRules, public_base: Url) -> Self {
        Self { rules, public_base }
    }

    pub fn rules(&self) -> &VersionRules {
        &self.rules
    }

    pub fn public_base(&self) -> &Url {
        &self.public_base
    }

    /// Resolves a request path.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::MalformedInput`] if the path does not decode to UTF-8
    /// - [`ErrorKind::InsufficientParts`] if there is no fragment segment
    /// - [`ErrorKind::InvalidVersion`] for an empty, oversized, or non-numeric version
    /// - [`ErrorKind::InvalidFragment`] for a fragment that fails validation
    ///   after normalization
    pub fn resolve(&self, path: &str) -> Result<Resolution, ValidationError> {
        let decoded = decode_path(path)
            .map_err(|_| self.reject(ErrorKind::MalformedInput, "", ""))?;

        let (version, raw_fragment) = match split_path(&decoded) {
            Segments::Home => return Ok(Resolution::Home),
            Segments::VersionOnly { version } => {
                return Err(self.reject(ErrorKind::InsufficientParts, version, ""));
            }
            Segments::Full { version, fragment } => (version, fragment),
        };

        let major = parse_major(version)
            .ok_or_else(|| self.reject(ErrorKind::InvalidVersion, version, raw_fragment))?;

        let fragment = Fragment::parse(raw_fragment).map_err(|(_, normalized)| {
            self.reject(ErrorKind::InvalidFragment, version, normalized)
        })?;

        let spec = self.rules.spec_for(major);

        Ok(Resolution::Redirect(TargetUrl::compose(spec, &fragment)))
    }

    fn reject(&self, kind: ErrorKind, version: &str, fragment: impl Into<String>) -> ValidationError {
        let host = self.public_base.host_str().unwrap_or_default();
        let authority = match self.public_base.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        ValidationError::new(
            kind,
            self.public_base.scheme(),
            &authority,
            version,
            fragment,
        )
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        let public_base = Url::parse(DEFAULT_PUBLIC_BASE).expect("default public base is a valid URL");
        Self::new(VersionRules::builtin(), public_base)
    }
}

/// Parses a non-negative base-10 major version.
///
/// Only ASCII digits are accepted, so signs and whitespace are rejected.
fn parse_major(version: &str) -> Option<u64> {
    if version.is_empty()
        || version.len() > MAX_VERSION_LENGTH
        || !version.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    version.parse().ok()
}
