//! API key resolution.

use crate::config::error::ConfigError;
use crate::config::schema::Config;

/// Environment variable consulted when neither the flag nor the file has a key.
pub const API_KEY_ENV: &str = "CURSOR_API_KEY";

/// Picks the API key: `--api-key` flag, then the config file, then `CURSOR_API_KEY`.
///
/// Blank values are skipped at every level.
pub fn resolve(flag: Option<&str>, config: &Config) -> Result<String, ConfigError> {
    let env = std::env::var(API_KEY_ENV).ok();
    let key = [flag, Some(config.api.api_key.as_str()), env.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(String::from);
    key.ok_or(ConfigError::MissingApiKey)
}

/// Masks all but the last four characters, for display.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    match chars.len() {
        0 => "(not set)".to_string(),
        n if n <= 8 => "*".repeat(n),
        n => {
            let tail: String = chars[n - 4..].iter().collect();
            format!("{}{}", "*".repeat(8), tail)
        }
    }
}
