//! Version exception rules.
//!
//! Upstream publishes the diagnostics reference under release numbers that do
//! not always follow `<major>.0.0` (17 shipped as 17.0.1, 18 onwards as
//! `<major>.1.0`). [`VersionRules`] maps a requested major version to the
//! minor and patch levels the documentation actually lives under.
//!
//! Rules are evaluated top-to-bottom and the first matching rule wins. When no
//! rule matches, minor and patch default to `0`.
//!
//! ## Rule files
//!
//! The built-in table can be replaced with a TOML file:
//!
//! ```toml
//! [[rule]]
//! when = { eq = 17 }
//! minor = 0
//! patch = 1
//!
//! [[rule]]
//! when = { range = { from = 18, to = 20 } }
//! minor = 1
//! patch = 0
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Errors raised while loading a rule table.
#[derive(Debug, thiserror::Error)]
pub enum VersionRulesError {
    #[error("Failed to read version rules from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version rules: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Rule #{index} has an empty range {from}..={to}")]
    EmptyRange { index: usize, from: u64, to: u64 },
}

/// Resolved `major.minor.patch` triple used in the documentation URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionSpec {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl fmt::Display for VersionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Condition on the requested major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MajorPredicate {
    Lt(u64),
    Le(u64),
    Eq(u64),
    Ge(u64),
    Gt(u64),
    /// Inclusive on both ends.
    Range { from: u64, to: u64 },
}

impl MajorPredicate {
    pub fn matches(&self, major: u64) -> bool {
        match *self {
            Self::Lt(n) => major < n,
            Self::Le(n) => major <= n,
            Self::Eq(n) => major == n,
            Self::Ge(n) => major >= n,
            Self::Gt(n) => major > n,
            Self::Range { from, to } => (from..=to).contains(&major),
        }
    }
}

impl fmt::Display for MajorPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lt(n) => write!(f, "< {n}"),
            Self::Le(n) => write!(f, "<= {n}"),
            Self::Eq(n) => write!(f, "== {n}"),
            Self::Ge(n) => write!(f, ">= {n}"),
            Self::Gt(n) => write!(f, "> {n}"),
            Self::Range { from, to } => write!(f, "{from}..={to}"),
        }
    }
}

/// A single row of the exception table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRule {
    pub when: MajorPredicate,
    #[serde(default)]
    pub minor: u64,
    #[serde(default)]
    pub patch: u64,
}

impl VersionRule {
    pub const fn new(when: MajorPredicate, minor: u64, patch: u64) -> Self {
        Self { when, minor, patch }
    }
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(rename = "rule", default)]
    rules: Vec<VersionRule>,
}

/// Ordered exception table, first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRules {
    rules: Vec<VersionRule>,
}

impl VersionRules {
    pub fn new(rules: Vec<VersionRule>) -> Self {
        Self { rules }
    }

    /// The table matching what releases.llvm.org currently publishes.
    pub fn builtin() -> Self {
        Self::new(vec![
            // 17.0.0 was never published, 17.0.1 replaced it.
            VersionRule::new(MajorPredicate::Eq(17), 0, 1),
            // 18 onwards are released and documented as <major>.1.0.
            VersionRule::new(MajorPredicate::Ge(18), 1, 0),
        ])
    }

    /// Parses a TOML rule table.
    ///
    /// # Errors
    ///
    /// Returns [`VersionRulesError::Parse`] on malformed TOML and
    /// [`VersionRulesError::EmptyRange`] for a `range` whose `from` exceeds `to`.
    pub fn from_toml_str(input: &str) -> Result<Self, VersionRulesError> {
        let file: RuleFile = toml::from_str(input)?;

        for (index, rule) in file.rules.iter().enumerate() {
            if let MajorPredicate::Range { from, to } = rule.when
                && from > to
            {
                return Err(VersionRulesError::EmptyRange { index, from, to });
            }
        }

        Ok(Self::new(file.rules))
    }

    /// Reads and parses a TOML rule file.
    ///
    /// # Errors
    ///
    /// Returns [`VersionRulesError::Io`] when the file cannot be read, otherwise
    /// the errors of [`VersionRules::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VersionRulesError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VersionRulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Returns the documentation version for `major`.
    pub fn spec_for(&self, major: u64) -> VersionSpec {
        let (minor, patch) = self
            .rules
            .iter()
            .find(|rule| rule.when.matches(major))
            .map_or((0, 0), |rule| (rule.minor, rule.patch));

        VersionSpec {
            major,
            minor,
            patch,
        }
    }

    pub fn rules(&self) -> &[VersionRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for VersionRules {
    fn default() -> Self {
        Self::builtin()
    }
}
