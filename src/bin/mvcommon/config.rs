use anyhow::Result;
use itertools::Itertools;
use serde::Deserialize;

use mvcommon::{DEFAULT_MIN_LENGTH, DEFAULT_STOP_WORDS, DEFAULT_TRIM, PrefixMatcher};

use crate::Args;

/// Final config combined from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    pub(crate) debug: bool,
    pub(crate) dryrun: bool,
    pub(crate) interactive: bool,
    pub(crate) min_length: usize,
    pub(crate) stop_words: Vec<String>,
    pub(crate) trim: String,
    pub(crate) verbose: bool,
}

/// Config from the user config file
#[derive(Debug, Default, Deserialize)]
struct MvCommonConfig {
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    dryrun: bool,
    #[serde(default)]
    interactive: bool,
    #[serde(default)]
    min_length: Option<i64>,
    #[serde(default)]
    stop_words: Option<Vec<String>>,
    #[serde(default)]
    trim: Option<String>,
    #[serde(default)]
    verbose: bool,
}

/// Wrapper needed for parsing the user config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    mvcommon: MvCommonConfig,
}

impl MvCommonConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    fn get_user_config() -> Self {
        mvcommon::config::read_user_config()
            .and_then(|config_string| {
                Self::from_toml_str(&config_string)
                    .map_err(|e| mvcommon::print_error!("{e}"))
                    .ok()
            })
            .unwrap_or_default()
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.mvcommon)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {e}"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            dryrun: false,
            interactive: false,
            min_length: DEFAULT_MIN_LENGTH,
            stop_words: DEFAULT_STOP_WORDS.iter().map(ToString::to_string).collect(),
            trim: DEFAULT_TRIM.to_string(),
            verbose: false,
        }
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    pub fn from_args(args: Args) -> Self {
        let user_config = MvCommonConfig::get_user_config();
        Self::from_args_and_user_config(args, user_config)
    }

    /// Command line values take precedence over the user config,
    /// which takes precedence over the built-in defaults.
    /// Stop words given on the command line replace the configured ones entirely.
    fn from_args_and_user_config(args: Args, user_config: MvCommonConfig) -> Self {
        let stop_words: Vec<String> = if args.stop_words.is_empty() {
            user_config.stop_words.map_or_else(
                || DEFAULT_STOP_WORDS.iter().map(ToString::to_string).collect(),
                |words| words.into_iter().unique().collect(),
            )
        } else {
            args.stop_words.into_iter().unique().collect()
        };

        let min_length = args
            .min_length
            .or(user_config.min_length)
            .map_or(DEFAULT_MIN_LENGTH, |length| usize::try_from(length).unwrap_or(0));

        Self {
            debug: args.debug || user_config.debug,
            dryrun: args.print || user_config.dryrun,
            interactive: args.interactive || user_config.interactive,
            min_length,
            stop_words,
            trim: args
                .trim
                .or(user_config.trim)
                .unwrap_or_else(|| DEFAULT_TRIM.to_string()),
            verbose: args.verbose || user_config.verbose,
        }
    }

    /// Create a prefix matcher from the configured matching options.
    pub fn matcher(&self) -> PrefixMatcher {
        PrefixMatcher::new(&self.stop_words, &self.trim, self.min_length)
    }
}
