//! Pipeline orchestration over a corpus.
//!
//! # Responsibility
//! - Drive read -> clean -> persist -> analyze -> tokenize per article.
//! - Capture each article's outcome behind its own failure boundary.
//!
//! # Invariants
//! - The `cleaned` artifact holds the lowercased cleaned text.
//! - The analyzer receives the case-preserved cleaned text.
//! - Tokens keep analyzer word order.

use super::clean::clean_text;
use crate::analysis::{AnalyzedWord, AnalyzerError, MorphologicalAnalyzer};
use crate::corpus::{Article, ArticleId, CorpusManager};
use crate::model::token::MorphologicalToken;
use crate::store::{ArticleStore, ArtifactKind, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Failure processing one article.
#[derive(Debug)]
pub enum PipelineError {
    Store(StoreError),
    Analyzer(AnalyzerError),
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Analyzer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Analyzer(err) => Some(err),
        }
    }
}

impl From<StoreError> for PipelineError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<AnalyzerError> for PipelineError {
    fn from(value: AnalyzerError) -> Self {
        Self::Analyzer(value)
    }
}

/// Counts for one successfully processed article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArticleSummary {
    /// Words in the cleaned text.
    pub cleaned_words: usize,
    /// Tokens built from analyzer output; never exceeds `cleaned_words`
    /// for a word-preserving analyzer.
    pub tokens: usize,
}

/// Result of processing one article.
#[derive(Debug)]
pub struct ArticleOutcome {
    pub article_id: ArticleId,
    pub result: PipelineResult<ArticleSummary>,
}

/// Per-article outcomes of one run, in corpus order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<ArticleOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.result.is_ok())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Returns whether every article processed without error.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}

/// Sequential pipeline over one corpus.
pub struct TextProcessingPipeline<'corpus, S: ArticleStore, A: MorphologicalAnalyzer> {
    corpus: &'corpus CorpusManager,
    store: S,
    analyzer: A,
    persist_tagged: bool,
}

impl<'corpus, S: ArticleStore, A: MorphologicalAnalyzer> TextProcessingPipeline<'corpus, S, A> {
    pub fn new(corpus: &'corpus CorpusManager, store: S, analyzer: A) -> Self {
        Self {
            corpus,
            store,
            analyzer,
            persist_tagged: false,
        }
    }

    /// Also persists the `single_tagged` artifact for each article.
    pub fn with_tagged_artifact(mut self, enabled: bool) -> Self {
        self.persist_tagged = enabled;
        self
    }

    /// Processes every article and reports per-article outcomes.
    pub fn run(&mut self) -> RunReport {
        let started_at = Instant::now();
        info!(
            "event=pipeline_run module=pipeline status=start articles={}",
            self.corpus.len()
        );

        let corpus = self.corpus;
        let mut report = RunReport::default();
        for article in corpus.get_articles().values() {
            let result = self.process_article(article).map(|(cleaned_words, tokens)| {
                ArticleSummary {
                    cleaned_words,
                    tokens: tokens.len(),
                }
            });
            match &result {
                Ok(summary) => info!(
                    "event=article_process module=pipeline status=ok article_id={} words={} tokens={}",
                    article.id(),
                    summary.cleaned_words,
                    summary.tokens
                ),
                Err(err) => error!(
                    "event=article_process module=pipeline status=error article_id={} raw_path={} error={}",
                    article.id(),
                    article.raw_path().display(),
                    err
                ),
            }
            report.outcomes.push(ArticleOutcome {
                article_id: article.id(),
                result,
            });
        }

        let status = if report.is_clean() { "ok" } else { "partial" };
        info!(
            "event=pipeline_run module=pipeline status={} succeeded={} failed={} duration_ms={}",
            status,
            report.succeeded(),
            report.failed(),
            started_at.elapsed().as_millis()
        );
        report
    }

    /// Processes one article; returns its cleaned word count and tokens.
    ///
    /// # Errors
    /// - [`PipelineError::Store`] when raw text cannot be read or an artifact
    ///   cannot be written.
    /// - [`PipelineError::Analyzer`] when analysis fails.
    pub fn process_article(
        &mut self,
        article: &Article,
    ) -> PipelineResult<(usize, Vec<MorphologicalToken>)> {
        let id = article.id();
        let raw_text = self.store.read_raw_text(id)?;
        let cleaned = clean_text(&raw_text);
        self.store
            .write_artifact(id, ArtifactKind::Cleaned, &cleaned.to_lowercase())?;

        let cleaned_words = cleaned.split_whitespace().count();
        let tokens = self.analyze_tokens(&cleaned)?;
        if tokens.len() > cleaned_words {
            warn!(
                "event=article_process module=pipeline status=warn article_id={id} words={cleaned_words} tokens={}",
                tokens.len()
            );
        }

        if self.persist_tagged {
            let tagged = tokens
                .iter()
                .map(MorphologicalToken::single_tagged)
                .collect::<Vec<_>>()
                .join(" ");
            self.store
                .write_artifact(id, ArtifactKind::SingleTagged, &tagged)?;
        }

        Ok((cleaned_words, tokens))
    }

    /// Runs the analyzer over `cleaned_text` and builds tokens.
    pub fn analyze_tokens(
        &mut self,
        cleaned_text: &str,
    ) -> PipelineResult<Vec<MorphologicalToken>> {
        let records = self.analyzer.analyze(cleaned_text)?;
        Ok(build_tokens(&records))
    }
}

/// Folds analyzer records into tokens.
///
/// Whitespace records and records without an informative first analysis
/// produce no token.
pub fn build_tokens(records: &[AnalyzedWord]) -> Vec<MorphologicalToken> {
    records
        .iter()
        .filter(|record| !record.text.trim().is_empty())
        .filter_map(|record| {
            let analysis = record
                .primary_analysis()
                .filter(|analysis| analysis.is_informative())?;
            MorphologicalToken::new(
                record.text.as_str(),
                analysis.lex.clone(),
                analysis.gr.clone(),
            )
            .ok()
        })
        .collect()
}
