//! Morphological analyzer boundary.
//!
//! # Responsibility
//! - Define the record shape returned by an analyzer.
//! - Define the analyzer capability trait the pipeline drives.
//! - Provide a subprocess-backed analyzer speaking mystem's JSON output.
//!
//! # Invariants
//! - Records are returned in original word order.
//! - Analyzer sessions are used from one thread at a time (`&mut self`).

mod mystem;

pub use mystem::{parse_analyzer_output, MystemAnalyzer, DEFAULT_ANALYZER_BINARY};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::process::ExitStatus;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// One analysis candidate for a word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnalysis {
    /// Lemma (dictionary form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lex: Option<String>,
    /// Opaque grammar tag string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gr: Option<String>,
}

impl WordAnalysis {
    /// Returns whether this candidate carries any lemma or tag data.
    pub fn is_informative(&self) -> bool {
        self.lex.is_some() || self.gr.is_some()
    }
}

/// One analyzer output record, covering a word or an inter-word gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedWord {
    pub text: String,
    /// `None` when the analyzer emitted no `analysis` field at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Vec<WordAnalysis>>,
}

impl AnalyzedWord {
    /// Record without any analysis field.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            analysis: None,
        }
    }

    /// Record with a single analysis candidate.
    pub fn analyzed(text: impl Into<String>, lex: Option<&str>, gr: Option<&str>) -> Self {
        Self {
            text: text.into(),
            analysis: Some(vec![WordAnalysis {
                lex: lex.map(str::to_owned),
                gr: gr.map(str::to_owned),
            }]),
        }
    }

    /// First analysis candidate, if the record has one.
    pub fn primary_analysis(&self) -> Option<&WordAnalysis> {
        self.analysis.as_ref().and_then(|candidates| candidates.first())
    }
}

/// Analyzer invocation failure.
#[derive(Debug)]
pub enum AnalyzerError {
    /// Analyzer process could not be started.
    Spawn { binary: String, source: io::Error },
    /// Pipe I/O with a running analyzer failed.
    Io(io::Error),
    /// Analyzer exited unsuccessfully.
    ProcessFailed { status: ExitStatus, stderr: String },
    /// Output line is not a JSON record array.
    Malformed { line: usize, message: String },
}

impl Display for AnalyzerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn { binary, source } => {
                write!(f, "failed to start analyzer `{binary}`: {source}")
            }
            Self::Io(err) => write!(f, "analyzer i/o failed: {err}"),
            Self::ProcessFailed { status, stderr } => {
                write!(f, "analyzer exited with {status}: {stderr}")
            }
            Self::Malformed { line, message } => {
                write!(f, "malformed analyzer output at line {line}: {message}")
            }
        }
    }
}

impl Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Spawn { source, .. } => Some(source),
            Self::Io(err) => Some(err),
            Self::ProcessFailed { .. } | Self::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for AnalyzerError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Capability interface over an external morphological analyzer.
pub trait MorphologicalAnalyzer {
    /// Analyzes `text` and returns per-word records in original order.
    fn analyze(&mut self, text: &str) -> AnalyzerResult<Vec<AnalyzedWord>>;
}

impl<A: MorphologicalAnalyzer + ?Sized> MorphologicalAnalyzer for &mut A {
    fn analyze(&mut self, text: &str) -> AnalyzerResult<Vec<AnalyzedWord>> {
        (**self).analyze(text)
    }
}
