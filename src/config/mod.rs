//! Configuration module.
//!
//! Settings are resolved with the precedence defaults → config file → environment
//! → command line. See [`loader`] for the individual steps.

pub mod keybindings;
pub mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ConfigError, ConfigFile, ResolvedConfig,
};

use std::path::PathBuf;

/// Resolve the full configuration in one call.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed, or if
/// a resolved value is out of range.
pub fn resolve(
    config_path: Option<PathBuf>,
    screenshot_dir_override: Option<PathBuf>,
    no_color_flag: bool,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let config = apply_cli_overrides(
        apply_env_overrides(merge_config(file)),
        screenshot_dir_override,
        no_color_flag,
    );
    config.validate()
}
