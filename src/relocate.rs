//! Moving files into a common folder.

use std::collections::HashSet;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use thiserror::Error;

use crate::{path_to_filename_string, path_to_string, print_bold};

/// Filesystem failure while relocating files.
/// Files moved before the failure are left in place.
#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("failed to create folder {}: {source}", path.display())]
    CreateFolder {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to move file {} to {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not get file name for path: {}", path.display())]
    MissingFileName { path: PathBuf },
    #[error("more than one file would be moved to {}", path.display())]
    DuplicateTarget { path: PathBuf },
    #[error("target file already exists: {}", path.display())]
    TargetExists { path: PathBuf },
}

/// A single planned or completed file move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveInfo {
    pub source: PathBuf,
    pub target: PathBuf,
}

impl MoveInfo {
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }
}

impl fmt::Display for MoveInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            path_to_string(&self.source),
            "->".green(),
            path_to_string(&self.target)
        )
    }
}

/// Compute the destination for each file: `folder/<file name>`.
/// Directory components of the source path are discarded.
///
/// # Errors
/// Returns `RelocateError::MissingFileName` if a path has no final component,
/// `RelocateError::DuplicateTarget` if two files share a file name,
/// and `RelocateError::TargetExists` if a destination is already taken.
pub fn plan_moves<P: AsRef<Path>>(folder: &Path, files: &[P]) -> Result<Vec<MoveInfo>, RelocateError> {
    let mut targets = HashSet::with_capacity(files.len());
    files
        .iter()
        .map(|file| {
            let file = file.as_ref();
            let file_name = file.file_name().ok_or_else(|| RelocateError::MissingFileName {
                path: file.to_path_buf(),
            })?;
            let target = folder.join(file_name);
            if !targets.insert(target.clone()) {
                return Err(RelocateError::DuplicateTarget { path: target });
            }
            if target.exists() {
                return Err(RelocateError::TargetExists { path: target });
            }
            Ok(MoveInfo::new(file.to_path_buf(), target))
        })
        .collect()
}

/// Move files into `folder`, creating it and any missing parents first.
///
/// In preview mode nothing is touched on disk,
/// the planned folder and moves are only printed.
/// Moves happen one at a time in input order and stop at the first failure.
///
/// # Errors
/// Returns a `RelocateError` for the first filesystem operation that fails.
pub fn relocate<P: AsRef<Path>>(folder: &Path, files: &[P], preview: bool) -> Result<Vec<MoveInfo>, RelocateError> {
    let moves = plan_moves(folder, files)?;

    if preview {
        print_bold!("DRYRUN: Would create folder: {}", path_to_string(folder));
        for info in &moves {
            println!("  Would move {info}");
        }
        return Ok(moves);
    }

    if !folder.is_dir() {
        std::fs::create_dir_all(folder).map_err(|source| RelocateError::CreateFolder {
            path: folder.to_path_buf(),
            source,
        })?;
        println!("Created folder: {}", path_to_string(folder).cyan());
    }

    for info in &moves {
        std::fs::rename(&info.source, &info.target).map_err(|source| RelocateError::Move {
            from: info.source.clone(),
            to: info.target.clone(),
            source,
        })?;
        println!(
            "  Moved {} {} {}",
            path_to_filename_string(&info.source),
            "->".green(),
            path_to_string(folder)
        );
    }

    Ok(moves)
}
