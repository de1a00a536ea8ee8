// SPDX-License-Identifier: MPL-2.0
//! User preferences stored in `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[server]` - Listing service base URL and request timeout
//! - `[display]` - Rendition widths and grid layout
//! - `[prefetch]` - Rendition cache bounds
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. `--config-dir` CLI argument or `DRIVE_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use drive_lens::app::config;
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings ignored: {key}");
//! }
//! println!("listing service: {}", config.server.base_url());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use crate::media::prefetch::PrefetchConfig;
use crate::ui::theming::ThemeMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// General application settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Listing service settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Base URL, falling back to [`DEFAULT_SERVER_URL`].
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_SERVER_URL)
    }

    /// Request timeout, clamped to the supported range.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }
}

/// Grid and lightbox settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Width requested for grid thumbnails.
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: Option<u32>,

    /// Width requested for lightbox previews.
    #[serde(default = "default_preview_width")]
    pub preview_width: Option<u32>,

    #[serde(default = "default_grid_columns")]
    pub grid_columns: Option<u32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thumbnail_width: default_thumbnail_width(),
            preview_width: default_preview_width(),
            grid_columns: default_grid_columns(),
        }
    }
}

impl DisplayConfig {
    #[must_use]
    pub fn thumbnail_width(&self) -> u32 {
        self.thumbnail_width.unwrap_or(DEFAULT_THUMBNAIL_WIDTH)
    }

    #[must_use]
    pub fn preview_width(&self) -> u32 {
        self.preview_width.unwrap_or(DEFAULT_PREVIEW_WIDTH)
    }

    #[must_use]
    pub fn grid_columns(&self) -> usize {
        self.grid_columns
            .unwrap_or(DEFAULT_GRID_COLUMNS)
            .clamp(MIN_GRID_COLUMNS, MAX_GRID_COLUMNS) as usize
    }
}

/// Rendition cache settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PrefetchSection {
    #[serde(default = "default_prefetch_enabled")]
    pub enabled: Option<bool>,

    /// Upper bound on cached bytes (megabytes).
    #[serde(default = "default_cache_mb")]
    pub cache_mb: Option<u32>,

    /// Upper bound on cached renditions.
    #[serde(default = "default_max_entries")]
    pub max_entries: Option<usize>,
}

impl Default for PrefetchSection {
    fn default() -> Self {
        Self {
            enabled: default_prefetch_enabled(),
            cache_mb: default_cache_mb(),
            max_entries: default_max_entries(),
        }
    }
}

impl PrefetchSection {
    /// Converts the section into cache limits, clamped to the supported range.
    #[must_use]
    pub fn to_prefetch_config(&self) -> PrefetchConfig {
        if !self.enabled.unwrap_or(true) {
            return PrefetchConfig::disabled();
        }
        let max_bytes = self
            .cache_mb
            .map_or(DEFAULT_PREFETCH_CACHE_BYTES, |mb| mb as usize * 1024 * 1024);
        PrefetchConfig::new(max_bytes, self.max_entries.unwrap_or(DEFAULT_MAX_ENTRIES))
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub prefetch: PrefetchSection,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_url() -> Option<String> {
    Some(DEFAULT_SERVER_URL.to_string())
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn default_thumbnail_width() -> Option<u32> {
    Some(DEFAULT_THUMBNAIL_WIDTH)
}

fn default_preview_width() -> Option<u32> {
    Some(DEFAULT_PREVIEW_WIDTH)
}

fn default_grid_columns() -> Option<u32> {
    Some(DEFAULT_GRID_COLUMNS)
}

fn default_prefetch_enabled() -> Option<bool> {
    Some(true)
}

fn default_cache_mb() -> Option<u32> {
    Some((DEFAULT_PREFETCH_CACHE_BYTES / (1024 * 1024)) as u32)
}

fn default_max_entries() -> Option<usize> {
    Some(DEFAULT_MAX_ENTRIES)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Load
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to show the user.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "using default configuration");
            (
                Config::default(),
                Some("notification-config-load-error".to_string()),
            )
        }
    }
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn full_file_loads_every_section() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            r#"
[general]
language = "fr"
theme_mode = "Light"

[server]
base_url = "https://photos.example.com"
request_timeout_secs = 12

[display]
thumbnail_width = 300
preview_width = 2048
grid_columns = 3

[prefetch]
enabled = false
cache_mb = 64
max_entries = 8
"#,
        )
        .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("failed to load config");

        let expected = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            server: ServerConfig {
                base_url: Some("https://photos.example.com".to_string()),
                request_timeout_secs: Some(12),
            },
            display: DisplayConfig {
                thumbnail_width: Some(300),
                preview_width: Some(2048),
                grid_columns: Some(3),
            },
            prefetch: PrefetchSection {
                enabled: Some(false),
                cache_mb: Some(64),
                max_entries: Some(8),
            },
        };
        assert_eq!(loaded, expected);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[server]\nbase_url = \"http://nas.local:8000\"\n",
        )
        .expect("failed to write config");

        let loaded = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(loaded.server.base_url(), "http://nas.local:8000");
        assert_eq!(
            loaded.server.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(loaded.general.theme_mode, ThemeMode::System);
        assert_eq!(loaded.display, DisplayConfig::default());
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result: std::result::Result<Config, _> =
            toml::from_str("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_with_override_reports_warning_for_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[general\n").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn timeout_and_columns_are_clamped() {
        let server = ServerConfig {
            base_url: None,
            request_timeout_secs: Some(0),
        };
        assert_eq!(
            server.request_timeout(),
            Duration::from_secs(MIN_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(server.base_url(), DEFAULT_SERVER_URL);

        let display = DisplayConfig {
            grid_columns: Some(99),
            ..DisplayConfig::default()
        };
        assert_eq!(display.grid_columns(), MAX_GRID_COLUMNS as usize);
    }

    #[test]
    fn disabled_prefetch_section_disables_cache() {
        let section = PrefetchSection {
            enabled: Some(false),
            ..PrefetchSection::default()
        };
        assert!(!section.to_prefetch_config().enabled);
        assert!(PrefetchSection::default().to_prefetch_config().enabled);
    }
}
