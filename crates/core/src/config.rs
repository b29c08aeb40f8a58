//! Configuration path utilities for argfill.
//!
//! This module resolves the command registry path and expands shell
//! variables like `~` in it.

/// Default path for the command registry file
const DEFAULT_CONFIG_PATH: &str = "~/.argfill/commands.yml";

/// Resolves the command registry path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// registry path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use argfill_core::config::get_config_path;
///
/// // Use default path
/// let default_path = get_config_path(&None);
///
/// // Use custom path
/// let custom_path = get_config_path(&Some("/path/to/commands.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/commands.yml");
/// ```
#[must_use]
pub fn get_config_path(config_path_arg: &Option<String>) -> String {
    let config_path = match config_path_arg {
        Some(config_path) => config_path,
        None => DEFAULT_CONFIG_PATH,
    };

    shellexpand::tilde(config_path).to_string()
}
