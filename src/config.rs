//! User config file location and loading.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::print_error;

const CONFIG_FILE_NAME: &str = concat!(env!("CARGO_PKG_NAME"), ".toml");

/// Path to the user config file: `$HOME/.config/mvcommon.toml`
///
/// Returns `None` if the home directory cannot be determined.
pub static CONFIG_PATH: LazyLock<Option<PathBuf>> =
    LazyLock::new(|| dirs::home_dir().map(|home| home.join(".config").join(CONFIG_FILE_NAME)));

/// Read the user config file contents.
///
/// Returns `None` when there is no config file.
/// Read errors for an existing file are printed and also yield `None`.
#[must_use]
pub fn read_user_config() -> Option<String> {
    let path = CONFIG_PATH.as_deref()?;
    if !path.is_file() {
        return None;
    }
    fs::read_to_string(path)
        .map_err(|e| {
            print_error!("Error reading config file {}: {e}", path.display());
        })
        .ok()
}
