pub mod config;
pub mod prefix;
pub mod relocate;
pub mod selection;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Command;
use clap_complete::Shell;
use colored::Colorize;

pub use prefix::{DEFAULT_MIN_LENGTH, DEFAULT_STOP_WORDS, DEFAULT_TRIM, PrefixMatcher, find_common_prefix};
pub use relocate::{MoveInfo, RelocateError, plan_moves, relocate};
pub use selection::{SelectionError, parse_selection};

/// Convert `OsStr` to String with invalid Unicode handling.
#[must_use]
pub fn os_str_to_string(name: &OsStr) -> String {
    name.to_str().map_or_else(
        || name.to_string_lossy().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

/// Convert given path to string with invalid Unicode handling.
#[must_use]
pub fn path_to_string(path: &Path) -> String {
    path.to_str().map_or_else(
        || path.to_string_lossy().to_string().replace('\u{FFFD}', ""),
        std::string::ToString::to_string,
    )
}

/// Convert given path to filename string with invalid Unicode handling.
#[must_use]
pub fn path_to_filename_string(path: &Path) -> String {
    os_str_to_string(path.file_name().unwrap_or_default())
}

#[inline]
pub fn print_error(message: &str) {
    eprintln!("{}", format!("Error: {message}").red());
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        $crate::print_error(&format!($($arg)*))
    };
}

#[inline]
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        $crate::print_warning(&format!($($arg)*))
    };
}

#[inline]
pub fn print_bold(message: &str) {
    println!("{}", message.bold());
}

#[macro_export]
macro_rules! print_bold {
    ($($arg:tt)*) => {
        $crate::print_bold(&format!($($arg)*))
    };
}

/// Write the completion script for `shell` into its user completion directory.
///
/// Shells without a known per-user directory get the script on stdout instead.
pub fn generate_shell_completion(shell: Shell, mut command: Command, command_name: &str) -> Result<()> {
    let home = dirs::home_dir().context("Failed to get home directory")?;
    match shell_completion_dir(shell, &home) {
        Some(out_dir) => {
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create completion dir: {}", out_dir.display()))?;
            let path = clap_complete::generate_to(shell, &mut command, command_name, out_dir)?;
            println!("Completion file generated to: {}", path.display());
        }
        None => clap_complete::generate(shell, &mut command, command_name, &mut std::io::stdout()),
    }
    Ok(())
}

/// User-specific completion directory under `home`, if the shell has one.
fn shell_completion_dir(shell: Shell, home: &Path) -> Option<PathBuf> {
    match shell {
        Shell::Bash => Some(home.join(".bash_completion.d")),
        Shell::Fish => Some(home.join(".config/fish/completions")),
        Shell::Zsh => Some(home.join(".zsh/completions")),
        _ => None,
    }
}

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn test_path_to_filename_string() {
        assert_eq!(path_to_filename_string(Path::new("dir/Report 1.txt")), "Report 1.txt");
        assert_eq!(path_to_filename_string(Path::new("Report 1.txt")), "Report 1.txt");
        assert_eq!(path_to_filename_string(Path::new("..")), "");
    }

    #[test]
    fn test_path_to_string() {
        assert_eq!(path_to_string(Path::new("some/dir/file.txt")), "some/dir/file.txt");
    }

    #[test]
    fn test_shell_completion_dir() {
        let home = Path::new("/home/user");
        assert_eq!(
            shell_completion_dir(Shell::Zsh, home),
            Some(PathBuf::from("/home/user/.zsh/completions"))
        );
        assert_eq!(
            shell_completion_dir(Shell::Fish, home),
            Some(PathBuf::from("/home/user/.config/fish/completions"))
        );
        assert_eq!(shell_completion_dir(Shell::PowerShell, home), None);
    }

    #[test]
    fn test_reexports_match_contract() {
        let names = ["Report 234 - Draft1.txt", "Report 234 - Draft2.txt", "Report 234 - Final.txt"];
        assert_eq!(
            find_common_prefix(&names, &DEFAULT_STOP_WORDS, DEFAULT_TRIM, DEFAULT_MIN_LENGTH),
            "Report 234"
        );
        assert_eq!(parse_selection("1-3,5", 5), Ok(vec![0, 1, 2, 4]));
    }
}
