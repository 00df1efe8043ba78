//! Request path splitting.

use percent_encoding::percent_decode_str;

/// Structural shape of a request path.
///
/// `/<version>/<fragment>` splits into at most three pieces, the first always
/// empty because of the leading slash. Anything after the second slash stays
/// part of the fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segments<'a> {
    /// `/` or `/index.html`.
    Home,
    /// Only a version segment, e.g. `/13`.
    VersionOnly { version: &'a str },
    /// Both segments present, either may be empty.
    Full { version: &'a str, fragment: &'a str },
}

/// The decoded path could not be interpreted as UTF-8 text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unable to parse received URL: >{0}<")]
pub struct MalformedPath(pub String);

/// Returns the percent-decoded path of `raw`.
///
/// Query strings and `#` parts are discarded. Nothing else is rewritten:
/// backslashes, control characters and dot segments reach the splitter as
/// received, so they fail validation instead of being normalized away.
pub fn decode_path(raw: &str) -> Result<String, MalformedPath> {
    let path_only = raw.split(['?', '#']).next().unwrap_or_default();

    let decoded = percent_decode_str(path_only)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| MalformedPath(raw.to_string()))?;

    if decoded.starts_with('/') {
        Ok(decoded)
    } else {
        Ok(format!("/{decoded}"))
    }
}

/// Splits a decoded path into its structural segments.
pub fn split_path(path: &str) -> Segments<'_> {
    if path == "/" || path == "/index.html" {
        return Segments::Home;
    }

    let mut parts = path.splitn(3, '/');
    let _leading = parts.next();
    let version = parts.next().unwrap_or_default();

    match parts.next() {
        Some(fragment) => Segments::Full { version, fragment },
        None => Segments::VersionOnly { version },
    }
}
