//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
///
/// Defaults reproduce the flagless one-shot run: production endpoint, 500 ms
/// between requests, 10 s per-request timeout, whole-row dedup, output in the
/// working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the bestseller data API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the delay (0 to this value)
    #[serde(default)]
    pub delay_jitter_ms: u64,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output CSV path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Duplicate-row detection mode
    #[serde(default)]
    pub dedup: DedupMode,
}

fn default_api_base() -> String {
    "https://data-liart.vercel.app".to_string()
}

fn default_delay_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_output() -> PathBuf {
    PathBuf::from("extracted_amazon_data.csv")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: 0,
            timeout_secs: default_timeout_secs(),
            output: default_output(),
            dedup: DedupMode::WholeRow,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("amz-bestsellers").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(base) = std::env::var("BSR_API_BASE") {
            self.api_base = base;
        }

        if let Ok(proxy) = std::env::var("BSR_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("BSR_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(output) = std::env::var("BSR_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        self
    }
}

/// Duplicate-row detection mode for the transform stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupMode {
    /// Rows are duplicates when every output field is equal (the default).
    #[default]
    WholeRow,
    /// Rows are duplicates when `asin` and `country` are equal. Opt-in;
    /// collapses legitimate price/rating variants of the same product.
    AsinCountry,
}

impl std::str::FromStr for DedupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whole-row" | "row" => Ok(DedupMode::WholeRow),
            "asin-country" | "asin" => Ok(DedupMode::AsinCountry),
            _ => Err(format!("Unknown dedup mode: {}. Use: whole-row, asin-country", s)),
        }
    }
}

impl std::fmt::Display for DedupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DedupMode::WholeRow => write!(f, "whole-row"),
            DedupMode::AsinCountry => write!(f, "asin-country"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base, "https://data-liart.vercel.app");
        assert!(config.proxy.is_none());
        assert_eq!(config.delay_ms, 500);
        assert_eq!(config.delay_jitter_ms, 0);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.output, PathBuf::from("extracted_amazon_data.csv"));
        assert_eq!(config.dedup, DedupMode::WholeRow);
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.delay_ms, 500);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_dedup_mode_parsing() {
        assert_eq!("whole-row".parse::<DedupMode>().unwrap(), DedupMode::WholeRow);
        assert_eq!("WHOLE-ROW".parse::<DedupMode>().unwrap(), DedupMode::WholeRow);
        assert_eq!("row".parse::<DedupMode>().unwrap(), DedupMode::WholeRow);
        assert_eq!("asin-country".parse::<DedupMode>().unwrap(), DedupMode::AsinCountry);
        assert_eq!("asin".parse::<DedupMode>().unwrap(), DedupMode::AsinCountry);

        let err = "invalid".parse::<DedupMode>().unwrap_err();
        assert!(err.contains("Unknown dedup mode"));
        assert!(err.contains("whole-row, asin-country"));
    }

    #[test]
    fn test_dedup_mode_display() {
        assert_eq!(DedupMode::WholeRow.to_string(), "whole-row");
        assert_eq!(DedupMode::AsinCountry.to_string(), "asin-country");
    }

    #[test]
    fn test_dedup_mode_default() {
        assert_eq!(DedupMode::default(), DedupMode::WholeRow);
    }

    #[test]
    fn test_dedup_mode_serde() {
        let json = serde_json::to_string(&DedupMode::AsinCountry).unwrap();
        assert_eq!(json, "\"asin-country\"");

        let parsed: DedupMode = serde_json::from_str("\"whole-row\"").unwrap();
        assert_eq!(parsed, DedupMode::WholeRow);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            delay_ms = 1000
            timeout_secs = 5
            dedup = "asin-country"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.delay_ms, 1000);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.dedup, DedupMode::AsinCountry);
        // Unset fields keep their defaults
        assert_eq!(config.api_base, "https://data-liart.vercel.app");
        assert_eq!(config.output, PathBuf::from("extracted_amazon_data.csv"));
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            api_base = "http://localhost:8080"
            proxy = "socks5://localhost:1080"
            delay_ms = 250
            delay_jitter_ms = 100
            timeout_secs = 30
            output = "/tmp/listings.csv"
            dedup = "whole-row"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.delay_ms, 250);
        assert_eq!(config.delay_jitter_ms, 100);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.output, PathBuf::from("/tmp/listings.csv"));
        assert_eq!(config.dedup, DedupMode::WholeRow);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            delay_ms = 750
            output = "data.csv"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.delay_ms, 750);
        assert_eq!(config.output, PathBuf::from("data.csv"));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            timeout_secs = 20
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.timeout_secs, 20);
    }

    #[test]
    fn test_config_with_env() {
        // Save original env vars
        let orig_base = std::env::var("BSR_API_BASE").ok();
        let orig_proxy = std::env::var("BSR_PROXY").ok();
        let orig_delay = std::env::var("BSR_DELAY").ok();
        let orig_output = std::env::var("BSR_OUTPUT").ok();

        // Set test env vars
        std::env::set_var("BSR_API_BASE", "http://localhost:9999");
        std::env::set_var("BSR_PROXY", "http://proxy:8080");
        std::env::set_var("BSR_DELAY", "1500");
        std::env::set_var("BSR_OUTPUT", "override.csv");

        let config = Config::new().with_env();
        assert_eq!(config.api_base, "http://localhost:9999");
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        assert_eq!(config.delay_ms, 1500);
        assert_eq!(config.output, PathBuf::from("override.csv"));

        // Restore original env vars
        match orig_base {
            Some(v) => std::env::set_var("BSR_API_BASE", v),
            None => std::env::remove_var("BSR_API_BASE"),
        }
        match orig_proxy {
            Some(v) => std::env::set_var("BSR_PROXY", v),
            None => std::env::remove_var("BSR_PROXY"),
        }
        match orig_delay {
            Some(v) => std::env::set_var("BSR_DELAY", v),
            None => std::env::remove_var("BSR_DELAY"),
        }
        match orig_output {
            Some(v) => std::env::set_var("BSR_OUTPUT", v),
            None => std::env::remove_var("BSR_OUTPUT"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            api_base: "http://localhost:8080".to_string(),
            proxy: Some("socks5://localhost:1080".to_string()),
            delay_ms: 250,
            delay_jitter_ms: 50,
            timeout_secs: 15,
            output: PathBuf::from("rows.csv"),
            dedup: DedupMode::AsinCountry,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_base, config.api_base);
        assert_eq!(parsed.proxy, config.proxy);
        assert_eq!(parsed.delay_ms, config.delay_ms);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
        assert_eq!(parsed.output, config.output);
        assert_eq!(parsed.dedup, config.dedup);
    }
}
