//! Core corpus processing for textpipe.
//! Validates article datasets and turns raw article text into cleaned,
//! morphologically tagged token streams.

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod store;

pub use analysis::{
    parse_analyzer_output, AnalyzedWord, AnalyzerError, AnalyzerResult, MorphologicalAnalyzer,
    MystemAnalyzer, WordAnalysis,
};
pub use config::{AnalyzerConfig, ConfigError, PipelineConfig, DEFAULT_CONFIG_FILE_NAME};
pub use corpus::{Article, ArticleId, CorpusError, CorpusManager};
pub use dataset::{validate_dataset, DatasetError, DatasetResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::token::{MorphologicalToken, TokenError};
pub use pipeline::{
    build_tokens, clean_text, ArticleOutcome, ArticleSummary, PipelineError, PipelineResult,
    RunReport, TextProcessingPipeline,
};
pub use store::{ArticleStore, ArtifactKind, FsArticleStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
