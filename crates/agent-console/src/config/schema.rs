//! TOML configuration schema types for the background agent console.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid TOML.
//!
//! Duration fields use human-readable strings (e.g. `"30s"`, `"1m"`) and are
//! parsed with `humantime` through the accessor methods.

use crate::config::error::ConfigError;
use cursor_agents::{DEFAULT_BASE_URL, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration.
///
/// ```toml
/// [api]
/// [tui]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Connection settings for the Background Agents API.
    pub api: ApiConfig,
    /// Interactive console behavior.
    pub tui: TuiConfig,
}

impl Config {
    /// Checks every value that cannot be validated by TOML typing alone.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.timeout()?;
        self.tui.refresh_interval()?;
        self.tui.tick_rate()?;
        self.tui.page_size()?;
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                message: format!("expected an http(s) URL, got {:?}", self.api.base_url),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// `[api]` section.
#[derive(Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// API key. Empty means "fall back to `CURSOR_API_KEY`".
    pub api_key: String,
    /// API root URL.
    pub base_url: String,
    /// Upper bound for a single request.
    pub timeout: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: "30s".to_string(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &crate::config::api_key::mask(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Parsed request timeout.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("api.timeout", &self.timeout)
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// `[tui]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Refresh the agent list periodically.
    pub auto_refresh: bool,
    /// Minimum time between automatic refreshes.
    pub refresh_interval: String,
    /// Ticker cadence. Auto-refresh is checked once per tick.
    pub tick_rate: String,
    /// Number of agents requested per list call (1-100).
    pub page_size: u32,
    /// Include expired agents in the dashboard on startup.
    pub show_expired: bool,
    /// Color palette.
    pub theme: ThemeName,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            auto_refresh: true,
            refresh_interval: "30s".to_string(),
            tick_rate: "1s".to_string(),
            page_size: MAX_PAGE_SIZE,
            show_expired: false,
            theme: ThemeName::Default,
        }
    }
}

impl TuiConfig {
    /// Parsed auto-refresh interval.
    pub fn refresh_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.refresh_interval", &self.refresh_interval)
    }

    /// Parsed tick rate.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }

    /// Page size, checked against the API limit.
    pub fn page_size(&self) -> Result<u32, ConfigError> {
        if (1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            Ok(self.page_size)
        } else {
            Err(ConfigError::InvalidValue {
                field: "tui.page_size",
                message: format!(
                    "must be between 1 and {MAX_PAGE_SIZE}, got {}",
                    self.page_size
                ),
            })
        }
    }
}

/// Palette names (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeName {
    /// Colored palette.
    #[default]
    Default,
    /// No colors, modifiers only.
    Mono,
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value).map_err(|e| ConfigError::InvalidValue {
        field,
        message: format!("{e} (expected a duration such as \"30s\")"),
    })?;
    if duration.is_zero() {
        return Err(ConfigError::InvalidValue {
            field,
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(duration)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config_all_fields() {
        let toml_str = r#"
[api]
api_key = "key_123"
base_url = "http://localhost:8080/v0"
timeout = "10s"

[tui]
auto_refresh = false
refresh_interval = "1m"
tick_rate = "500ms"
page_size = 50
show_expired = true
theme = "mono"
"#;
        let config: Config = toml::from_str(toml_str).expect("valid TOML should parse");
        assert_eq!(config.api.api_key, "key_123");
        assert_eq!(config.api.base_url, "http://localhost:8080/v0");
        assert_eq!(config.api.timeout().unwrap(), Duration::from_secs(10));
        assert!(!config.tui.auto_refresh);
        assert_eq!(
            config.tui.refresh_interval().unwrap(),
            Duration::from_secs(60)
        );
        assert_eq!(config.tui.tick_rate().unwrap(), Duration::from_millis(500));
        assert_eq!(config.tui.page_size().unwrap(), 50);
        assert!(config.tui.show_expired);
        assert_eq!(config.tui.theme, ThemeName::Mono);
        config.validate().expect("all values valid");
    }

    #[test]
    fn parse_empty_string_uses_all_defaults() {
        let config: Config = toml::from_str("").expect("empty string should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn defaults_match_interactive_client() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.cursor.com/v0");
        assert_eq!(config.api.timeout().unwrap(), Duration::from_secs(30));
        assert!(config.tui.auto_refresh);
        assert_eq!(
            config.tui.refresh_interval().unwrap(),
            Duration::from_secs(30)
        );
        assert_eq!(config.tui.tick_rate().unwrap(), Duration::from_secs(1));
        assert_eq!(config.tui.page_size, 100);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn parse_unknown_fields_are_ignored() {
        let toml_str = r#"
unknown_key = "hello"

[tui]
future_field = 42
"#;
        let config: Config = toml::from_str(toml_str).expect("unknown fields should be ignored");
        assert_eq!(config.tui.theme, ThemeName::Default);
    }

    #[test]
    fn invalid_duration_is_reported_with_field() {
        let mut config = Config::default();
        config.tui.refresh_interval = "soon".to_string();
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => {
                assert_eq!(field, "tui.refresh_interval")
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn zero_duration_is_rejected() {
        let mut config = Config::default();
        config.tui.tick_rate = "0s".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn page_size_out_of_range_is_rejected() {
        let mut config = Config::default();
        config.tui.page_size = 0;
        assert!(config.tui.page_size().is_err());
        config.tui.page_size = 101;
        assert!(config.tui.page_size().is_err());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "api.base_url"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn debug_output_masks_api_key() {
        let mut config = Config::default();
        config.api.api_key = "key_supersecretvalue".to_string();
        let debug = format!("{config:?}");
        assert!(!debug.contains("supersecret"));
    }

    #[test]
    fn theme_name_parsing() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: ThemeName,
        }
        let w: Wrapper = toml::from_str(r#"theme = "default""#).expect("should parse");
        assert_eq!(w.theme, ThemeName::Default);
        let result: Result<Wrapper, _> = toml::from_str(r#"theme = "neon""#);
        assert!(result.is_err());
    }
}
