use crate::dom::Document;
use crate::poll::PollConfig;
use crate::theme::Theme;
use crate::widget::{BridgeConfig, DEFAULT_SCRIPT_URL};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // Defaults applied when nothing is stored
    pub default_language: String,
    pub default_theme: Theme,

    // Page
    pub hostname: String,

    // Persistence (None = in-memory only)
    pub preferences_file: Option<PathBuf>,

    // Translation widget
    pub translate_widget: bool,
    pub widget_script_url: String,
    pub widget_poll_interval_ms: u64,
    pub widget_poll_timeout_ms: u64,

    // Contact form
    pub success_banner_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
            default_theme: Theme::Light,
            hostname: "localhost".to_string(),
            preferences_file: None,
            translate_widget: false,
            widget_script_url: DEFAULT_SCRIPT_URL.to_string(),
            widget_poll_interval_ms: 200,
            widget_poll_timeout_ms: 10_000,
            success_banner_ms: 5_000,
        }
    }
}

impl Config {
    /// Load `.env` (if present), then read the environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Build configuration from environment variables.
    ///
    /// Unset variables, and numbers that do not parse, fall back to
    /// [`Config::default`].
    ///
    /// # Returns
    /// * `Ok(Config)` with every field filled in
    /// * `Err` if the default theme or the widget switch cannot be parsed
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            default_language: std::env::var("SITE_DEFAULT_LANGUAGE")
                .unwrap_or(defaults.default_language),
            default_theme: match std::env::var("SITE_DEFAULT_THEME") {
                Ok(value) => value
                    .parse::<Theme>()
                    .context("SITE_DEFAULT_THEME must be 'light' or 'dark'")?,
                Err(_) => defaults.default_theme,
            },

            hostname: std::env::var("SITE_HOSTNAME").unwrap_or(defaults.hostname),

            preferences_file: std::env::var("SITE_PREFERENCES_FILE")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),

            translate_widget: match std::env::var("SITE_TRANSLATE_WIDGET") {
                Ok(value) => parse_bool(&value).context("Invalid SITE_TRANSLATE_WIDGET")?,
                Err(_) => defaults.translate_widget,
            },
            widget_script_url: std::env::var("SITE_WIDGET_SCRIPT_URL")
                .unwrap_or(defaults.widget_script_url),
            // Zero would mean polling without pause
            widget_poll_interval_ms: std::env::var("SITE_WIDGET_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&ms: &u64| ms > 0)
                .unwrap_or(defaults.widget_poll_interval_ms),
            widget_poll_timeout_ms: std::env::var("SITE_WIDGET_POLL_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.widget_poll_timeout_ms),

            success_banner_ms: std::env::var("SITE_SUCCESS_BANNER_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.success_banner_ms),
        })
    }

    /// Widget bridge settings: script URL and the saved-language poll
    pub fn bridge(&self) -> BridgeConfig {
        BridgeConfig {
            script_url: self.widget_script_url.clone(),
            poll: PollConfig::new(
                Duration::from_millis(self.widget_poll_interval_ms),
                Duration::from_millis(self.widget_poll_timeout_ms),
            ),
        }
    }

    /// How long the contact form's success banner stays up
    pub fn success_banner_delay(&self) -> Duration {
        Duration::from_millis(self.success_banner_ms)
    }

    /// An empty page served from the configured hostname.
    pub fn new_document(&self) -> Document {
        Document::with_hostname(&self.hostname)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("Expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 9] = [
        "SITE_DEFAULT_LANGUAGE",
        "SITE_DEFAULT_THEME",
        "SITE_HOSTNAME",
        "SITE_PREFERENCES_FILE",
        "SITE_TRANSLATE_WIDGET",
        "SITE_WIDGET_SCRIPT_URL",
        "SITE_WIDGET_POLL_INTERVAL_MS",
        "SITE_WIDGET_POLL_TIMEOUT_MS",
        "SITE_SUCCESS_BANNER_MS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool(" YES ").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(!parse_bool("").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bridge(), BridgeConfig::default());
        assert_eq!(config.success_banner_delay(), Duration::from_secs(5));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var("SITE_DEFAULT_LANGUAGE", "pa");
        std::env::set_var("SITE_DEFAULT_THEME", "dark");
        std::env::set_var("SITE_PREFERENCES_FILE", "/tmp/prefs.json");
        std::env::set_var("SITE_TRANSLATE_WIDGET", "true");
        std::env::set_var("SITE_WIDGET_POLL_INTERVAL_MS", "50");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.default_language, "pa");
        assert_eq!(config.default_theme, Theme::Dark);
        assert_eq!(config.preferences_file, Some(PathBuf::from("/tmp/prefs.json")));
        assert!(config.translate_widget);
        assert_eq!(config.bridge().poll.interval, Duration::from_millis(50));
        assert_eq!(config.bridge().poll.timeout, Duration::from_secs(10));
    }

    #[test]
    #[serial]
    fn test_unparsable_number_falls_back() {
        clear_env();
        std::env::set_var("SITE_SUCCESS_BANNER_MS", "soon");
        let config = Config::from_env().unwrap();
        clear_env();
        assert_eq!(config.success_banner_ms, 5_000);
    }

    #[test]
    #[serial]
    fn test_zero_poll_interval_falls_back() {
        clear_env();
        std::env::set_var("SITE_WIDGET_POLL_INTERVAL_MS", "0");
        std::env::set_var("SITE_WIDGET_POLL_TIMEOUT_MS", "0");
        let config = Config::from_env().unwrap();
        clear_env();
        assert_eq!(config.widget_poll_interval_ms, 200);
        assert_eq!(config.widget_poll_timeout_ms, 0);
        assert_eq!(config.bridge().poll.interval, Duration::from_millis(200));
    }

    #[test]
    #[serial]
    fn test_invalid_theme_is_error() {
        clear_env();
        std::env::set_var("SITE_DEFAULT_THEME", "sepia");
        let result = Config::from_env();
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_invalid_bool_is_error() {
        clear_env();
        std::env::set_var("SITE_TRANSLATE_WIDGET", "sometimes");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(err.to_string().contains("SITE_TRANSLATE_WIDGET"));
    }
}
