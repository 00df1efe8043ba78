//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! None of these settings change how a path resolves except
//! `VERSION_RULES_FILE`, which replaces the built-in version exception table.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log filter (default: `LOG_LEVEL`, then `info`)
//! - `LOG_LEVEL` - Plain verbosity switch, e.g. `debug`
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `PUBLIC_HOST` - Host echoed in error pages (default: `pxy.fi`)
//! - `PUBLIC_SCHEME` - Scheme echoed in error pages (default: `https`)
//! - `BEHIND_PROXY` - Read client IP from forwarding headers (default: `false`)
//! - `VERSION_RULES_FILE` - TOML file overriding the version exception table
//! - `HEARTBEAT_TARGET` - Uptime monitor base URL
//! - `HEARTBEAT_TOKEN` - Uptime monitor token; heartbeats are disabled when empty
//! - `HEARTBEAT_TARGET_TIMEOUT` - Heartbeat timeout in seconds (default: 10)
//! - `HEARTBEAT_QUEUE_CAPACITY` - Pending heartbeat buffer size (default: 64)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::domain::VersionRules;

/// Default heartbeat timeout in seconds.
pub const DEFAULT_HEARTBEAT_TIMEOUT_SECS: u64 = 10;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub public_scheme: String,
    pub public_host: String,
    /// When true, the client IP logged for a request is read from
    /// `do-connecting-ip` / `X-Forwarded-For` / `X-Real-IP`.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub version_rules_file: Option<PathBuf>,

    // ── Heartbeat ───────────────────────────────────────────────────────────
    pub heartbeat_target: Option<String>,
    /// Empty or unset disables heartbeats.
    pub heartbeat_token: Option<String>,
    pub heartbeat_timeout_secs: u64,
    /// Rejected `HEARTBEAT_TARGET_TIMEOUT` value, reported by `print_summary`.
    pub heartbeat_timeout_invalid: Option<String>,
    pub heartbeat_queue_capacity: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG")
            .or_else(|_| env::var("LOG_LEVEL"))
            .unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let public_scheme = env::var("PUBLIC_SCHEME").unwrap_or_else(|_| "https".to_string());
        let public_host = env::var("PUBLIC_HOST").unwrap_or_else(|_| "pxy.fi".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let version_rules_file = env::var("VERSION_RULES_FILE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let heartbeat_target = env::var("HEARTBEAT_TARGET").ok();
        let heartbeat_token = env::var("HEARTBEAT_TOKEN").ok().filter(|v| !v.is_empty());
        let (heartbeat_timeout_secs, heartbeat_timeout_invalid) = Self::load_heartbeat_timeout();

        let heartbeat_queue_capacity = env::var("HEARTBEAT_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(64);

        Self {
            listen_addr,
            log_level,
            log_format,
            public_scheme,
            public_host,
            behind_proxy,
            version_rules_file,
            heartbeat_target,
            heartbeat_token,
            heartbeat_timeout_secs,
            heartbeat_timeout_invalid,
            heartbeat_queue_capacity,
        }
    }

    /// Reads `HEARTBEAT_TARGET_TIMEOUT`.
    ///
    /// A non-numeric value falls back to the default and is returned alongside
    /// it. Logging is not set up yet at this point.
    fn load_heartbeat_timeout() -> (u64, Option<String>) {
        match env::var("HEARTBEAT_TARGET_TIMEOUT") {
            Ok(raw) if !raw.is_empty() => match raw.parse() {
                Ok(secs) => (secs, None),
                Err(_) => (DEFAULT_HEARTBEAT_TIMEOUT_SECS, Some(raw)),
            },
            _ => (DEFAULT_HEARTBEAT_TIMEOUT_SECS, None),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the public scheme/host do not form a valid URL
    /// - a heartbeat token is set without a target, or the target is not HTTP(S)
    /// - heartbeat timeout or queue capacity are out of range
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        self.public_base()?;

        if self.heartbeat_token.is_some() {
            let target = self
                .heartbeat_target
                .as_deref()
                .filter(|t| !t.is_empty())
                .context("HEARTBEAT_TARGET must be set when HEARTBEAT_TOKEN is provided")?;

            if !target.starts_with("http://") && !target.starts_with("https://") {
                anyhow::bail!(
                    "HEARTBEAT_TARGET must start with 'http://' or 'https://', got '{}'",
                    target
                );
            }
        }

        if self.heartbeat_timeout_secs == 0 {
            anyhow::bail!("HEARTBEAT_TARGET_TIMEOUT must be greater than 0");
        }

        if self.heartbeat_queue_capacity == 0 || self.heartbeat_queue_capacity > 10_000 {
            anyhow::bail!(
                "HEARTBEAT_QUEUE_CAPACITY must be between 1 and 10000, got {}",
                self.heartbeat_queue_capacity
            );
        }

        Ok(())
    }

    /// Public address of this service, echoed in error pages.
    ///
    /// # Errors
    ///
    /// Returns an error if `PUBLIC_SCHEME://PUBLIC_HOST` is not a valid URL.
    pub fn public_base(&self) -> Result<Url> {
        let raw = format!("{}://{}", self.public_scheme, self.public_host);
        let url = Url::parse(&raw)
            .with_context(|| format!("PUBLIC_SCHEME/PUBLIC_HOST form an invalid URL: '{raw}'"))?;

        if url.host_str().is_none() {
            anyhow::bail!("PUBLIC_HOST must name a host, got '{}'", self.public_host);
        }

        Ok(url)
    }

    /// Loads the version rule table, from `VERSION_RULES_FILE` if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule file cannot be read or parsed.
    pub fn version_rules(&self) -> Result<VersionRules> {
        match &self.version_rules_file {
            Some(path) => VersionRules::from_file(path)
                .with_context(|| format!("Failed to load VERSION_RULES_FILE {}", path.display())),
            None => Ok(VersionRules::builtin()),
        }
    }

    /// Returns whether heartbeats are enabled.
    pub fn is_heartbeat_enabled(&self) -> bool {
        self.heartbeat_token.is_some()
    }

    pub fn heartbeat_timeout(&self) -> Duration {
        Duration::from_secs(self.heartbeat_timeout_secs)
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        if let Some(raw) = &self.heartbeat_timeout_invalid {
            tracing::warn!(
                "Invalid HEARTBEAT_TARGET_TIMEOUT value: {}, using default {} seconds",
                raw,
                DEFAULT_HEARTBEAT_TIMEOUT_SECS
            );
        }

        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!(
            "  Public address: {}://{}",
            self.public_scheme,
            self.public_host
        );
        tracing::info!("  Behind proxy: {}", self.behind_proxy);

        match &self.version_rules_file {
            Some(path) => tracing::info!("  Version rules: {}", path.display()),
            None => tracing::info!("  Version rules: built-in"),
        }

        if let (Some(target), Some(token)) = (&self.heartbeat_target, &self.heartbeat_token) {
            tracing::info!(
                "  Heartbeat: {}{} (timeout {}s)",
                target,
                mask_token(token),
                self.heartbeat_timeout_secs
            );
        } else {
            tracing::info!("  Heartbeat: disabled");
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks a secret token for logging, keeping the first four characters.
///
/// - `abcdef123456` → `abcd***`
/// - `abc` → `***`
pub(crate) fn mask_token(token: &str) -> String {
    match token.char_indices().nth(4) {
        Some((idx, _)) => format!("{}***", &token[..idx]),
        None => "***".to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: &[&str] = &[
        "LISTEN",
        "RUST_LOG",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "PUBLIC_SCHEME",
        "PUBLIC_HOST",
        "BEHIND_PROXY",
        "VERSION_RULES_FILE",
        "HEARTBEAT_TARGET",
        "HEARTBEAT_TOKEN",
        "HEARTBEAT_TARGET_TIMEOUT",
        "HEARTBEAT_QUEUE_CAPACITY",
    ];

    fn clear_env() {
        // SAFETY: Tests touching the environment are run serially
        unsafe {
            for var in ENV_VARS {
                env::remove_var(var);
            }
        }
    }

    fn test_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            public_scheme: "https".to_string(),
            public_host: "pxy.fi".to_string(),
            behind_proxy: false,
            version_rules_file: None,
            heartbeat_target: None,
            heartbeat_token: None,
            heartbeat_timeout_secs: 10,
            heartbeat_timeout_invalid: None,
            heartbeat_queue_capacity: 64,
        }
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("abcdef123456"), "abcd***");
        assert_eq!(mask_token("abcd"), "***");
        assert_eq!(mask_token(""), "***");
    }

    #[test]
    fn test_config_validation() {
        let mut config = test_config();
        assert!(config.validate().is_ok());

        // Test invalid log format
        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        // Test invalid listen address
        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "0.0.0.0:3000".to_string();

        // Test invalid public host
        config.public_host = "bad host".to_string();
        assert!(config.validate().is_err());

        config.public_host = "pxy.fi".to_string();

        config.heartbeat_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.heartbeat_timeout_secs = 10;
        config.heartbeat_queue_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_heartbeat_validation() {
        let mut config = test_config();

        // Token without target
        config.heartbeat_token = Some("token".to_string());
        assert!(config.validate().is_err());

        config.heartbeat_target = Some("ftp://uptime.example.com/".to_string());
        assert!(config.validate().is_err());

        config.heartbeat_target = Some("https://uptime.example.com/ping/".to_string());
        assert!(config.validate().is_ok());
        assert!(config.is_heartbeat_enabled());
    }

    #[test]
    fn test_public_base() {
        let mut config = test_config();
        config.public_scheme = "http".to_string();
        config.public_host = "localhost:3000".to_string();

        let base = config.public_base().unwrap();
        assert_eq!(base.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_version_rules_builtin() {
        let rules = test_config().version_rules().unwrap();
        assert_eq!(rules, VersionRules::builtin());
    }

    #[test]
    fn test_version_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[[rule]]\nwhen = { ge = 21 }\nminor = 2\n",
        )
        .unwrap();

        let mut config = test_config();
        config.version_rules_file = Some(file.path().to_path_buf());

        let rules = config.version_rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.spec_for(21).to_string(), "21.2.0");
    }

    #[test]
    fn test_version_rules_missing_file() {
        let mut config = test_config();
        config.version_rules_file = Some(PathBuf::from("/definitely/not/here.toml"));
        assert!(config.version_rules().is_err());
    }

    #[test]
    #[serial]
    fn test_defaults_from_env() {
        clear_env();

        let config = Config::from_env();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "text");
        assert_eq!(config.public_host, "pxy.fi");
        assert!(!config.behind_proxy);
        assert!(config.version_rules_file.is_none());
        assert!(!config.is_heartbeat_enabled());
        assert_eq!(config.heartbeat_timeout(), Duration::from_secs(10));
        assert_eq!(config.heartbeat_queue_capacity, 64);
    }

    #[test]
    #[serial]
    fn test_log_level_fallback() {
        clear_env();

        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("LOG_LEVEL", "debug");
        }
        assert_eq!(Config::from_env().log_level, "debug");

        // RUST_LOG takes priority
        unsafe {
            env::set_var("RUST_LOG", "warn");
        }
        assert_eq!(Config::from_env().log_level, "warn");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_heartbeat_from_env() {
        clear_env();

        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("HEARTBEAT_TARGET", "https://uptime.example.com/ping/");
            env::set_var("HEARTBEAT_TOKEN", "secret");
            env::set_var("HEARTBEAT_TARGET_TIMEOUT", "3");
        }

        let config = Config::from_env();
        assert!(config.is_heartbeat_enabled());
        assert_eq!(config.heartbeat_timeout(), Duration::from_secs(3));
        assert_eq!(config.heartbeat_timeout_invalid, None);

        // Invalid timeout falls back to the default and is kept for the warning
        unsafe {
            env::set_var("HEARTBEAT_TARGET_TIMEOUT", "soon");
        }
        let config = Config::from_env();
        assert_eq!(config.heartbeat_timeout_secs, 10);
        assert_eq!(config.heartbeat_timeout_invalid.as_deref(), Some("soon"));

        // Empty token disables heartbeats
        unsafe {
            env::set_var("HEARTBEAT_TOKEN", "");
        }
        assert!(!Config::from_env().is_heartbeat_enabled());

        clear_env();
    }

    #[test]
    #[serial]
    fn test_behind_proxy_from_env() {
        clear_env();

        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("BEHIND_PROXY", "TRUE");
        }
        assert!(Config::from_env().behind_proxy);

        unsafe {
            env::set_var("BEHIND_PROXY", "1");
        }
        assert!(Config::from_env().behind_proxy);

        unsafe {
            env::set_var("BEHIND_PROXY", "no");
        }
        assert!(!Config::from_env().behind_proxy);

        clear_env();
    }
}
