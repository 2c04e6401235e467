//! Configuration file loading with precedence handling.

use crate::view::PageViewOptions;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value is outside its allowed range.
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue {
        /// Config key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An entry of the `[keybindings]` table could not be used.
    #[error("Invalid key binding {action} = {key:?}: {reason}")]
    InvalidKeyBinding {
        /// Action name as written in the config.
        action: String,
        /// Key description as written in the config.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Largest accepted scrollbar width.
const MAX_SCROLLBAR_WIDTH: u16 = 4;

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pageview/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Scrollbar width in columns.
    #[serde(default)]
    pub scrollbar_width: Option<u16>,

    /// Allow scrolling half a viewport past the last row.
    #[serde(default)]
    pub overscroll: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Directory full-page screenshots are written to.
    #[serde(default)]
    pub screenshot_dir: Option<PathBuf>,

    /// Disable colors.
    #[serde(default)]
    pub no_color: Option<bool>,

    /// Extra key bindings: action name to key description.
    ///
    /// ```toml
    /// [keybindings]
    /// quit = "ctrl+q"
    /// export_screenshot = "F5"
    /// ```
    #[serde(default)]
    pub keybindings: Option<HashMap<String, String>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Scrollbar width in columns.
    pub scrollbar_width: u16,
    /// Overscroll padding below the last row.
    pub overscroll: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Screenshot output directory.
    pub screenshot_dir: PathBuf,
    /// Colors disabled.
    pub no_color: bool,
    /// Extra key bindings, applied on top of the defaults.
    pub keybindings: HashMap<String, String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            scrollbar_width: crate::view::constants::DEFAULT_SCROLLBAR_WIDTH,
            overscroll: true,
            log_file_path: default_log_path(),
            screenshot_dir: PathBuf::from("."),
            no_color: false,
            keybindings: HashMap::new(),
        }
    }
}

impl ResolvedConfig {
    /// Page view layout options.
    pub fn page_view_options(&self) -> PageViewOptions {
        PageViewOptions {
            scrollbar_width: self.scrollbar_width,
            overscroll: self.overscroll,
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a scrollbar wider than
    /// `MAX_SCROLLBAR_WIDTH` columns.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.scrollbar_width > MAX_SCROLLBAR_WIDTH {
            return Err(ConfigError::InvalidValue {
                key: "scrollbar_width",
                reason: format!(
                    "{} exceeds the maximum of {MAX_SCROLLBAR_WIDTH}",
                    self.scrollbar_width
                ),
            });
        }
        Ok(self)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pageview/pageview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pageview").join("pageview.log")
    } else {
        PathBuf::from("pageview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pageview/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pageview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (like CLI `--config`)
/// 2. `PAGEVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/pageview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PAGEVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PAGEVIEW_SCREENSHOT_DIR`: Override screenshot directory
/// - `NO_COLOR`: Any value disables colors
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var("PAGEVIEW_SCREENSHOT_DIR") {
        config.screenshot_dir = PathBuf::from(dir);
    }

    if std::env::var_os("NO_COLOR").is_some() {
        config.no_color = true;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        scrollbar_width: config.scrollbar_width.unwrap_or(defaults.scrollbar_width),
        overscroll: config.overscroll.unwrap_or(defaults.overscroll),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        screenshot_dir: config.screenshot_dir.unwrap_or(defaults.screenshot_dir),
        no_color: config.no_color.unwrap_or(defaults.no_color),
        keybindings: config.keybindings.unwrap_or(defaults.keybindings),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    screenshot_dir_override: Option<PathBuf>,
    no_color_flag: bool,
) -> ResolvedConfig {
    if let Some(dir) = screenshot_dir_override {
        config.screenshot_dir = dir;
    }

    // The flag can only disable colors; absence keeps the file/env setting.
    if no_color_flag {
        config.no_color = true;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
