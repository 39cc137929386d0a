mod config;
mod mv_common;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::mv_common::MvCommon;

#[derive(Parser)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Move files sharing a common name prefix into a folder named after it"
)]
pub(crate) struct Args {
    /// Files to move
    #[arg(value_hint = clap::ValueHint::FilePath, required_unless_present = "completion")]
    files: Vec<PathBuf>,

    /// Stop word that ends common prefix detection. Replaces the defaults.
    #[arg(short, long = "stopword", num_args = 1, action = clap::ArgAction::Append, name = "STOPWORD")]
    stop_words: Vec<String>,

    /// Characters to trim from both ends of the prefix
    #[arg(short, long, name = "CHARS")]
    trim: Option<String>,

    /// Minimum size of the common segment, negative disables the limit
    #[arg(short, long = "min", name = "LENGTH", allow_negative_numbers = true)]
    min_length: Option<i64>,

    /// Select files interactively before moving
    #[arg(short, long)]
    interactive: bool,

    /// Only print changes without moving files
    #[arg(short, long)]
    print: bool,

    /// Print debug information
    #[arg(short = 'D', long)]
    debug: bool,

    /// Generate shell completion
    #[arg(short = 'l', long, value_name = "SHELL")]
    completion: Option<Shell>,

    /// Print verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(ref shell) = args.completion {
        mvcommon::generate_shell_completion(*shell, Args::command(), env!("CARGO_BIN_NAME"))
    } else {
        MvCommon::new(args)?.run()
    }
}
