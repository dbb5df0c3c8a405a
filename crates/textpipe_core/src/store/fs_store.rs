//! Filesystem-backed article store.
//!
//! Reads `{root}/{id}_raw.txt` and writes `{root}/{id}_{kind}.txt`.

use super::{ArticleStore, ArtifactKind, StoreError, StoreResult};
use crate::corpus::ArticleId;
use crate::dataset::raw_file_name;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Article store rooted at a dataset directory.
#[derive(Debug, Clone)]
pub struct FsArticleStore {
    root: PathBuf,
}

impl FsArticleStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the raw text file for `id`.
    pub fn raw_path(&self, id: ArticleId) -> PathBuf {
        self.root.join(raw_file_name(id))
    }

    /// Path an artifact of `kind` for `id` is written to.
    pub fn artifact_path(&self, id: ArticleId, kind: ArtifactKind) -> PathBuf {
        self.root.join(format!("{id}_{}.txt", kind.as_str()))
    }
}

impl ArticleStore for FsArticleStore {
    fn read_raw_text(&self, id: ArticleId) -> StoreResult<String> {
        let path = self.raw_path(id);
        fs::read_to_string(&path).map_err(|source| StoreError::Read {
            article_id: id,
            path,
            source,
        })
    }

    fn write_artifact(&self, id: ArticleId, kind: ArtifactKind, text: &str) -> StoreResult<()> {
        let path = self.artifact_path(id, kind);
        fs::write(&path, text).map_err(|source| StoreError::Write {
            article_id: id,
            kind,
            path: path.clone(),
            source,
        })?;
        debug!(
            "event=artifact_write module=store status=ok article_id={id} kind={kind} bytes={}",
            text.len()
        );
        Ok(())
    }
}
