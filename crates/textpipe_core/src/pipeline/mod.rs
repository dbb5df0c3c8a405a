//! Per-article text processing pipeline.
//!
//! # Responsibility
//! - Clean raw article text into a normalized word stream.
//! - Persist derived artifacts and fold analyzer output into tokens.
//!
//! # Invariants
//! - Articles are processed sequentially in corpus order.
//! - One article's failure is recorded and never stops the run.

mod clean;
mod runner;

pub use clean::clean_text;
pub use runner::{
    build_tokens, ArticleOutcome, ArticleSummary, PipelineError, PipelineResult, RunReport,
    TextProcessingPipeline,
};
