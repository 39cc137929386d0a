use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use itertools::Itertools;

use mvcommon::{PrefixMatcher, parse_selection, path_to_string, print_bold, print_error, print_warning};

use crate::Args;
use crate::config::Config;

/// Fewer files than this have no meaningful common prefix.
const MIN_FILES: usize = 2;

#[derive(Debug)]
pub struct MvCommon {
    files: Vec<PathBuf>,
    config: Config,
}

/// Files chosen for moving and the folder name derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    folder: String,
    files: Vec<PathBuf>,
}

impl MvCommon {
    pub fn new(mut args: Args) -> anyhow::Result<Self> {
        let files = std::mem::take(&mut args.files);
        let config = Config::from_args(args);
        if config.debug {
            eprintln!("Config: {config:#?}");
        }
        Self::with_config(files, config)
    }

    fn with_config(files: Vec<PathBuf>, config: Config) -> anyhow::Result<Self> {
        if files.len() < MIN_FILES {
            anyhow::bail!(
                "At least two files required, got {}\nUsage: mvcommon [OPTIONS] <FILES>...",
                files.len()
            );
        }
        Ok(Self { files, config })
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let matcher = self.config.matcher();
        let folder = Self::find_folder_name(&matcher, &self.files);
        if folder.is_empty() {
            anyhow::bail!("No common prefix found for {} files", self.files.len());
        }
        if self.config.verbose {
            println!("Common prefix for {} files: {}", self.files.len(), folder.cyan());
        }

        let selection = Selection {
            folder,
            files: self.files.clone(),
        };

        let selection = if self.config.interactive {
            let stdin = io::stdin();
            match Self::select_files(&matcher, selection, &mut stdin.lock(), &mut io::stdout())? {
                Some(selection) => selection,
                None => {
                    println!("Aborted");
                    return Ok(());
                }
            }
        } else {
            selection
        };

        if selection.files.is_empty() {
            anyhow::bail!("No files selected");
        }

        if self.config.dryrun {
            print_bold!("DRYRUN: Moving {} file(s) to {}", selection.files.len(), selection.folder);
        } else {
            print_bold!("Moving {} file(s) to {}", selection.files.len(), selection.folder);
        }

        let moves = mvcommon::relocate(Path::new(&selection.folder), &selection.files, self.config.dryrun)?;
        if !self.config.dryrun {
            println!("{}", format!("Moved {} file(s)", moves.len()).green());
        }

        Ok(())
    }

    /// Match on the full paths as given.
    fn find_folder_name(matcher: &PrefixMatcher, files: &[PathBuf]) -> String {
        let names: Vec<String> = files.iter().map(|file| path_to_string(file)).collect();
        matcher.find(&names)
    }

    /// Let the user narrow down the files to move.
    ///
    /// Each valid selection re-runs prefix matching on the chosen subset.
    /// Returns `None` if the user quits or the input ends.
    fn select_files<R: BufRead, W: Write>(
        matcher: &PrefixMatcher,
        mut selection: Selection,
        reader: &mut R,
        writer: &mut W,
    ) -> anyhow::Result<Option<Selection>> {
        loop {
            writeln!(writer)?;
            for (index, file) in selection.files.iter().enumerate() {
                writeln!(writer, "{:>3}. {}", index + 1, path_to_string(file))?;
            }
            writeln!(writer, "Folder: {}", selection.folder.cyan().bold())?;
            write!(
                writer,
                "{}",
                "Enter file numbers to include (e.g. 1,2,3 or 1-3,5), 'a' to accept, 'q' to quit: ".magenta()
            )?;
            writer.flush()?;

            let mut input = String::new();
            if reader.read_line(&mut input)? == 0 {
                return Ok(None);
            }

            match input.trim() {
                "a" => return Ok(Some(selection)),
                "q" => return Ok(None),
                input => match parse_selection(input, selection.files.len()) {
                    Ok(indices) => {
                        let files: Vec<PathBuf> = indices
                            .into_iter()
                            .unique()
                            .map(|index| selection.files[index].clone())
                            .collect();
                        if files.len() < MIN_FILES {
                            print_warning!(
                                "Select at least {MIN_FILES} files to find a new prefix, keeping {}",
                                selection.folder
                            );
                        } else {
                            let folder = Self::find_folder_name(matcher, &files);
                            if folder.is_empty() {
                                print_warning!("No common prefix for selected files, keeping {}", selection.folder);
                            } else {
                                selection.folder = folder;
                            }
                        }
                        selection.files = files;
                    }
                    Err(error) => print_error!("Invalid input: {error}"),
                },
            }
        }
    }
}

#[cfg(test)]
mod mv_common_tests {
    use super::*;

    use std::fs;
    use std::io::Cursor;

    use tempfile::tempdir;

    fn selection(files: &[&str]) -> Selection {
        let files: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
        let folder = MvCommon::find_folder_name(&PrefixMatcher::default(), &files);
        Selection { folder, files }
    }

    fn run_selection(initial: Selection, input: &str) -> Option<Selection> {
        let mut reader = Cursor::new(input.as_bytes());
        let mut output = Vec::new();
        MvCommon::select_files(&PrefixMatcher::default(), initial, &mut reader, &mut output)
            .expect("selection should not fail")
    }

    #[test]
    fn requires_at_least_two_files() {
        let result = MvCommon::with_config(vec![PathBuf::from("a.txt")], Config::default());
        assert!(result.is_err());
    }

    #[test]
    fn folder_name_uses_full_path() {
        let files = [PathBuf::from("dir/Report 1.txt"), PathBuf::from("dir/Report 2.txt")];
        assert_eq!(
            MvCommon::find_folder_name(&PrefixMatcher::default(), &files),
            "dir/Report"
        );
    }

    #[test]
    fn accept_keeps_all_files() {
        let initial = selection(&["Report 1.txt", "Report 2.txt", "Other.txt"]);
        let result = run_selection(initial.clone(), "a\n");
        assert_eq!(result, Some(initial));
    }

    #[test]
    fn quit_aborts() {
        let initial = selection(&["Report 1.txt", "Report 2.txt"]);
        assert_eq!(run_selection(initial, "q\n"), None);
    }

    #[test]
    fn end_of_input_aborts() {
        let initial = selection(&["Report 1.txt", "Report 2.txt"]);
        assert_eq!(run_selection(initial, ""), None);
    }

    #[test]
    fn selection_refines_folder_name() {
        let initial = selection(&["Artist - Album 1.mp3", "Artist - Album 2.mp3", "Band - Live.mp3"]);
        assert_eq!(initial.folder, ".mp3");

        let result = run_selection(initial, "1-2\na\n").expect("should select files");

        assert_eq!(result.folder, "Artist");
        assert_eq!(
            result.files,
            vec![PathBuf::from("Artist - Album 1.mp3"), PathBuf::from("Artist - Album 2.mp3")]
        );
    }

    #[test]
    fn invalid_input_prompts_again() {
        let initial = selection(&["Report 1.txt", "Report 2.txt", "Report 3.txt"]);
        let result = run_selection(initial, "9\n3-1\n2,3\na\n").expect("should select files");
        assert_eq!(
            result.files,
            vec![PathBuf::from("Report 2.txt"), PathBuf::from("Report 3.txt")]
        );
    }

    #[test]
    fn duplicate_indices_select_file_once() {
        let initial = selection(&["Report 1.txt", "Report 2.txt", "Report 3.txt"]);
        let result = run_selection(initial, "1-2,2\na\n").expect("should select files");
        assert_eq!(
            result.files,
            vec![PathBuf::from("Report 1.txt"), PathBuf::from("Report 2.txt")]
        );
    }

    #[test]
    fn selection_without_common_prefix_keeps_folder() {
        let initial = Selection {
            folder: "Reports".to_string(),
            files: vec![PathBuf::from("ab"), PathBuf::from("cd"), PathBuf::from("ef")],
        };
        let result = run_selection(initial, "1-2\na\n").expect("should select files");
        assert_eq!(result.folder, "Reports");
        assert_eq!(result.files, vec![PathBuf::from("ab"), PathBuf::from("cd")]);
    }

    #[test]
    fn single_file_selection_keeps_folder() {
        let initial = selection(&["Report 1.txt", "Report 2.txt", "Report 3.txt"]);
        assert_eq!(initial.folder, "Report");

        let result = run_selection(initial, "1\na\n").expect("should select files");

        assert_eq!(result.folder, "Report");
        assert_eq!(result.files, vec![PathBuf::from("Report 1.txt")]);
    }

    #[test]
    fn run_dryrun_does_not_move_files() {
        let dir = tempdir().expect("should create temp dir");
        let files = vec![dir.path().join("Report 1.txt"), dir.path().join("Report 2.txt")];
        for file in &files {
            fs::write(file, "test").expect("should write file");
        }
        let config = Config {
            dryrun: true,
            ..Config::default()
        };

        MvCommon::with_config(files.clone(), config)
            .expect("should create")
            .run()
            .expect("dryrun should succeed");

        assert!(files.iter().all(|file| file.exists()));
        assert!(!dir.path().join("Report").exists());
    }

    #[test]
    fn run_moves_files_into_common_folder() {
        let dir = tempdir().expect("should create temp dir");
        let files = vec![dir.path().join("Report 1.txt"), dir.path().join("Report 2.txt")];
        for file in &files {
            fs::write(file, "test").expect("should write file");
        }

        MvCommon::with_config(files.clone(), Config::default())
            .expect("should create")
            .run()
            .expect("run should succeed");

        let folder = dir.path().join("Report");
        assert!(folder.join("Report 1.txt").exists());
        assert!(folder.join("Report 2.txt").exists());
        assert!(files.iter().all(|file| !file.exists()));
    }

    #[test]
    fn run_fails_without_common_prefix() {
        let config = Config::default();
        let result = MvCommon::with_config(vec![PathBuf::from("abc"), PathBuf::from("xyz")], config)
            .expect("should create")
            .run();
        assert!(result.is_err());
    }
}
