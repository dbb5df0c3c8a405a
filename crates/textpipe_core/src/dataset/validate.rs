//! Raw/meta pairing validation.
//!
//! # Responsibility
//! - Check that a dataset directory holds `{i}_raw.txt` + `{i}_meta.json`
//!   for every `i` in `1..=N` with no gaps.
//!
//! # Invariants
//! - Fails rather than returning a boolean.
//! - Numbering must be 1-based and contiguous.

use log::{error, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Suffix matched by the raw-text file family (`*raw.txt`).
pub const RAW_FILE_SUFFIX: &str = "raw.txt";
/// Suffix matched by the metadata file family (`*.json`).
pub const META_FILE_SUFFIX: &str = ".json";

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Structural dataset failure. All variants are fatal for a run.
#[derive(Debug)]
pub enum DatasetError {
    /// Path does not resolve to an existing directory.
    NotADirectory(PathBuf),
    /// Neither raw nor meta files were found.
    EmptyDirectory(PathBuf),
    /// Matched file count is odd, so files cannot be paired.
    InconsistentDataset { path: PathBuf, file_count: usize },
    /// One file of an expected pair is missing.
    MissingPair { article_id: u32, file_name: String },
    /// Directory listing could not be read.
    Io(io::Error),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADirectory(path) => write!(f, "not a directory: {}", path.display()),
            Self::EmptyDirectory(path) => {
                write!(f, "dataset directory has no articles: {}", path.display())
            }
            Self::InconsistentDataset { path, file_count } => write!(
                f,
                "inconsistent dataset at {}: {file_count} matched files cannot form raw/meta pairs",
                path.display()
            ),
            Self::MissingPair {
                article_id,
                file_name,
            } => write!(
                f,
                "expected pair for article {article_id} missing: `{file_name}` not found"
            ),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Expected raw-text file name for one article.
pub fn raw_file_name(article_id: u32) -> String {
    format!("{article_id}_raw.txt")
}

/// Expected metadata file name for one article.
pub fn meta_file_name(article_id: u32) -> String {
    format!("{article_id}_meta.json")
}

/// Validates the dataset directory layout.
///
/// # Errors
/// - [`DatasetError::NotADirectory`] when `path` is not an existing directory.
/// - [`DatasetError::EmptyDirectory`] when no raw or meta files match.
/// - [`DatasetError::InconsistentDataset`] when the matched count is odd.
/// - [`DatasetError::MissingPair`] for the first id in `1..=N/2` lacking a file.
/// - [`DatasetError::Io`] when the listing cannot be read.
pub fn validate_dataset(path: impl AsRef<Path>) -> DatasetResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=dataset_validate module=dataset status=start path={}",
        path.display()
    );

    match check_layout(path) {
        Ok(pairs) => {
            info!(
                "event=dataset_validate module=dataset status=ok pairs={} duration_ms={}",
                pairs,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=dataset_validate module=dataset status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn check_layout(path: &Path) -> DatasetResult<u32> {
    if !path.is_dir() {
        return Err(DatasetError::NotADirectory(path.to_path_buf()));
    }

    let file_names = matched_file_names(path)?;
    if file_names.is_empty() {
        return Err(DatasetError::EmptyDirectory(path.to_path_buf()));
    }
    if file_names.len() % 2 != 0 {
        return Err(DatasetError::InconsistentDataset {
            path: path.to_path_buf(),
            file_count: file_names.len(),
        });
    }

    let pairs = u32::try_from(file_names.len() / 2).map_err(|_| {
        DatasetError::InconsistentDataset {
            path: path.to_path_buf(),
            file_count: file_names.len(),
        }
    })?;
    for article_id in 1..=pairs {
        for file_name in [raw_file_name(article_id), meta_file_name(article_id)] {
            if !file_names.contains(file_name.as_str()) {
                return Err(DatasetError::MissingPair {
                    article_id,
                    file_name,
                });
            }
        }
    }

    Ok(pairs)
}

fn matched_file_names(path: &Path) -> DatasetResult<HashSet<String>> {
    let mut names = HashSet::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        // Follows symlinks so linked datasets validate like copied ones.
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if name.ends_with(RAW_FILE_SUFFIX) || name.ends_with(META_FILE_SUFFIX) {
            names.insert(name);
        }
    }
    Ok(names)
}
