//! Subprocess-backed analyzer using mystem's JSON output.
//!
//! Each call spawns the configured binary, feeds the text on stdin and
//! parses one JSON record array per output line.

use super::{AnalyzedWord, AnalyzerError, AnalyzerResult, MorphologicalAnalyzer};
use log::{debug, error};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

/// Binary looked up on `PATH` when no explicit path is configured.
pub const DEFAULT_ANALYZER_BINARY: &str = "mystem";

// -i: grammar info, -c: keep inter-word text, -d: disambiguate by context.
const BASE_ARGS: &[&str] = &["--format", "json", "-i", "-c", "-d"];

/// Analyzer that shells out to a mystem-compatible binary.
#[derive(Debug, Clone)]
pub struct MystemAnalyzer {
    binary: PathBuf,
    extra_args: Vec<String>,
}

impl MystemAnalyzer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            extra_args: Vec::new(),
        }
    }

    /// Appends arguments after the JSON output flags.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    fn binary_label(&self) -> String {
        self.binary.display().to_string()
    }
}

impl Default for MystemAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_ANALYZER_BINARY)
    }
}

impl MorphologicalAnalyzer for MystemAnalyzer {
    fn analyze(&mut self, text: &str) -> AnalyzerResult<Vec<AnalyzedWord>> {
        let started_at = Instant::now();
        let mut child = Command::new(&self.binary)
            .args(BASE_ARGS)
            .args(&self.extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| AnalyzerError::Spawn {
                binary: self.binary_label(),
                source,
            })?;

        // Writer runs on its own thread so a full stdout pipe cannot block input.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = text.to_owned();
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output()?;
        let written = match writer.map(|writer| writer.join()) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err(std::io::Error::other("analyzer stdin writer panicked")),
            None => Ok(()),
        };

        // Exit status first: an early exit also breaks the stdin pipe.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!(
                "event=analyzer_invoke module=analysis status=error binary={} exit={}",
                self.binary_label(),
                output.status
            );
            return Err(AnalyzerError::ProcessFailed {
                status: output.status,
                stderr,
            });
        }
        written?;

        let words = parse_analyzer_output(&String::from_utf8_lossy(&output.stdout))?;
        debug!(
            "event=analyzer_invoke module=analysis status=ok records={} duration_ms={}",
            words.len(),
            started_at.elapsed().as_millis()
        );
        Ok(words)
    }
}

/// Parses analyzer stdout: one JSON array of records per non-blank line.
///
/// # Errors
/// - [`AnalyzerError::Malformed`] with the 1-based line number on bad JSON.
pub fn parse_analyzer_output(output: &str) -> AnalyzerResult<Vec<AnalyzedWord>> {
    let mut words = Vec::new();
    for (index, line) in output.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let records: Vec<AnalyzedWord> =
            serde_json::from_str(line).map_err(|err| AnalyzerError::Malformed {
                line: index + 1,
                message: err.to_string(),
            })?;
        words.extend(records);
    }
    Ok(words)
}
