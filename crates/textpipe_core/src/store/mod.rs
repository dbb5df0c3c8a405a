//! Article content access contracts.
//!
//! # Responsibility
//! - Define the read-raw / write-artifact boundary used by the pipeline.
//! - Provide a filesystem implementation over the dataset directory.
//!
//! # Invariants
//! - The pipeline never opens article files directly; it goes through
//!   [`ArticleStore`].
//! - Artifact writes for distinct article ids never target the same path.

mod fs_store;

pub use fs_store::FsArticleStore;

use crate::corpus::ArticleId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type StoreResult<T> = Result<T, StoreError>;

/// Named derived output persisted for an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Lowercased cleaned text.
    Cleaned,
    /// Space-joined `word<lemma>(tags)` token renderings.
    SingleTagged,
}

impl ArtifactKind {
    /// Stable artifact name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned",
            Self::SingleTagged => "single_tagged",
        }
    }
}

impl Display for ArtifactKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Article content read/write failure.
#[derive(Debug)]
pub enum StoreError {
    Read {
        article_id: ArticleId,
        path: PathBuf,
        source: io::Error,
    },
    Write {
        article_id: ArticleId,
        kind: ArtifactKind,
        path: PathBuf,
        source: io::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read {
                article_id,
                path,
                source,
            } => write!(
                f,
                "failed to read raw text for article {article_id} at {}: {source}",
                path.display()
            ),
            Self::Write {
                article_id,
                kind,
                path,
                source,
            } => write!(
                f,
                "failed to write `{kind}` artifact for article {article_id} at {}: {source}",
                path.display()
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Content boundary for article text and derived artifacts.
pub trait ArticleStore {
    fn read_raw_text(&self, id: ArticleId) -> StoreResult<String>;
    fn write_artifact(&self, id: ArticleId, kind: ArtifactKind, text: &str) -> StoreResult<()>;
}

impl<S: ArticleStore + ?Sized> ArticleStore for &S {
    fn read_raw_text(&self, id: ArticleId) -> StoreResult<String> {
        (**self).read_raw_text(id)
    }

    fn write_artifact(&self, id: ArticleId, kind: ArtifactKind, text: &str) -> StoreResult<()> {
        (**self).write_artifact(id, kind, text)
    }
}
