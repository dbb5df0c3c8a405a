//! Corpus manager and article handles.
//!
//! # Responsibility
//! - Discover article ids from `*_raw.txt` file names.
//! - Expose an ordered, read-only id -> article mapping.
//!
//! # Invariants
//! - The id is the first run of digits in the file name.
//! - Duplicate ids overwrite earlier entries; validation prevents them upstream.
//! - Iteration order is ascending by id.

use log::{debug, error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const RAW_FILE_PATTERN_SUFFIX: &str = "_raw.txt";

static ARTICLE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("valid article id regex"));

/// Positive article identifier assigned by the dataset.
pub type ArticleId = u32;

pub type CorpusResult<T> = Result<T, CorpusError>;

/// Corpus scan failure.
#[derive(Debug)]
pub enum CorpusError {
    /// Raw file name contains no digits.
    MissingArticleId(String),
    /// Digit run is zero or does not fit an id.
    InvalidArticleId(String),
    Io(io::Error),
}

impl Display for CorpusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingArticleId(name) => {
                write!(f, "raw file `{name}` has no article id in its name")
            }
            Self::InvalidArticleId(name) => {
                write!(f, "raw file `{name}` has an invalid article id")
            }
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CorpusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CorpusError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Handle for one discovered article.
///
/// Content access goes through an `ArticleStore`; the handle only carries
/// identity and the raw file it was discovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    id: ArticleId,
    raw_path: PathBuf,
}

impl Article {
    pub fn new(id: ArticleId, raw_path: impl Into<PathBuf>) -> Self {
        Self {
            id,
            raw_path: raw_path.into(),
        }
    }

    pub fn id(&self) -> ArticleId {
        self.id
    }

    /// Raw file the scan discovered this article at.
    ///
    /// Informational only (diagnostics); reads always go through the store.
    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }
}

/// Registry of articles discovered in one dataset directory.
#[derive(Debug)]
pub struct CorpusManager {
    root: PathBuf,
    storage: BTreeMap<ArticleId, Article>,
}

impl CorpusManager {
    /// Scans `root` and registers every raw-text article.
    ///
    /// # Errors
    /// - [`CorpusError::MissingArticleId`] for a raw file name without digits.
    /// - [`CorpusError::InvalidArticleId`] for a zero or overflowing id.
    /// - [`CorpusError::Io`] when the directory cannot be listed.
    pub fn new(root: impl Into<PathBuf>) -> CorpusResult<Self> {
        let root = root.into();
        let storage = match scan_dataset(&root) {
            Ok(storage) => storage,
            Err(err) => {
                error!(
                    "event=corpus_scan module=corpus status=error path={} error={}",
                    root.display(),
                    err
                );
                return Err(err);
            }
        };
        info!(
            "event=corpus_scan module=corpus status=ok path={} articles={}",
            root.display(),
            storage.len()
        );
        Ok(Self { root, storage })
    }

    /// Dataset directory this corpus was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read-only view of the id -> article mapping.
    pub fn get_articles(&self) -> &BTreeMap<ArticleId, Article> {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

fn scan_dataset(root: &Path) -> CorpusResult<BTreeMap<ArticleId, Article>> {
    let mut storage = BTreeMap::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !name.ends_with(RAW_FILE_PATTERN_SUFFIX) {
            continue;
        }

        let id = parse_article_id(&name)?;
        if storage.insert(id, Article::new(id, entry.path())).is_some() {
            debug!("event=corpus_scan module=corpus status=duplicate article_id={id} file={name}");
        }
    }
    Ok(storage)
}

/// Extracts the article id from the first digit run in `file_name`.
pub(crate) fn parse_article_id(file_name: &str) -> CorpusResult<ArticleId> {
    let digits = ARTICLE_ID_RE
        .find(file_name)
        .ok_or_else(|| CorpusError::MissingArticleId(file_name.to_string()))?;
    match digits.as_str().parse::<ArticleId>() {
        Ok(0) | Err(_) => Err(CorpusError::InvalidArticleId(file_name.to_string())),
        Ok(id) => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_article_id, CorpusError};

    #[test]
    fn parses_leading_digit_run() {
        assert_eq!(parse_article_id("12_raw.txt").expect("id should parse"), 12);
    }

    #[test]
    fn uses_first_digit_run_only() {
        assert_eq!(parse_article_id("a3_b7_raw.txt").expect("id should parse"), 3);
    }

    #[test]
    fn rejects_names_without_digits() {
        let err = parse_article_id("draft_raw.txt").expect_err("no digits must fail");
        assert!(matches!(err, CorpusError::MissingArticleId(name) if name == "draft_raw.txt"));
    }

    #[test]
    fn rejects_zero_and_overflow() {
        assert!(matches!(
            parse_article_id("0_raw.txt"),
            Err(CorpusError::InvalidArticleId(_))
        ));
        assert!(matches!(
            parse_article_id("99999999999999_raw.txt"),
            Err(CorpusError::InvalidArticleId(_))
        ));
    }
}
