//! Corpus discovery over a validated dataset directory.
//!
//! # Responsibility
//! - Scan raw-text files once and register one article handle per id.
//!
//! # Invariants
//! - The corpus is built once and read-only afterwards.
//! - Scanning assumes `validate_dataset` already succeeded.

mod manager;

pub use manager::{Article, ArticleId, CorpusError, CorpusManager, CorpusResult};
