// SPDX-License-Identifier: MPL-2.0
//! Application directory resolution.
//!
//! # Path Resolution Order
//!
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI arguments** (`--data-dir`, `--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`DRIVE_LENS_DATA_DIR`, `DRIVE_LENS_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate, with the application name appended
//!
//! The data directory holds the favorites document; the config directory holds
//! `settings.toml`.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "DriveLens";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "DRIVE_LENS_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "DRIVE_LENS_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Records the `--data-dir` / `--config-dir` CLI arguments.
///
/// Call once at startup, before any path is resolved. Later calls are ignored.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    let data_set = CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_ok();
    let config_set = CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_ok();
    if !(data_set && config_set) {
        tracing::warn!("CLI directory overrides were already initialized");
    }
}

fn resolve(
    override_path: Option<PathBuf>,
    cli: &OnceLock<Option<PathBuf>>,
    env_var: &str,
    platform: fn() -> Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }
    if let Some(path) = cli.get().and_then(Clone::clone) {
        return Some(path);
    }
    if let Ok(env_path) = std::env::var(env_var) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }
    platform().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the application data directory (favorites storage).
///
/// Returns `None` if the platform directory cannot be determined.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory, preferring `override_path`.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_DATA_DIR, ENV_DATA_DIR, dirs::data_dir)
}

/// Returns the application config directory (`settings.toml`).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory, preferring `override_path`.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, &CLI_CONFIG_DIR, ENV_CONFIG_DIR, dirs::config_dir)
}
