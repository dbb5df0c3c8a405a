use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use textpipe_core::{
    validate_dataset, AnalyzedWord, AnalyzerError, AnalyzerResult, ArticleId, ArticleStore,
    ArtifactKind, CorpusManager, FsArticleStore, MorphologicalAnalyzer, PipelineError,
    StoreError, StoreResult, TextProcessingPipeline,
};

/// Splits on spaces; `ыыы` is unanalyzable, `сбой` makes the call fail.
#[derive(Default)]
struct StubAnalyzer {
    calls: Vec<String>,
}

impl MorphologicalAnalyzer for StubAnalyzer {
    fn analyze(&mut self, text: &str) -> AnalyzerResult<Vec<AnalyzedWord>> {
        self.calls.push(text.to_string());
        if text.to_lowercase().contains("сбой") {
            return Err(AnalyzerError::Malformed {
                line: 1,
                message: "stub failure".to_string(),
            });
        }

        let mut records = Vec::new();
        for (index, word) in text.split(' ').filter(|w| !w.is_empty()).enumerate() {
            if index > 0 {
                records.push(AnalyzedWord::bare(" "));
            }
            if word == "ыыы" {
                records.push(AnalyzedWord::bare(word));
            } else {
                records.push(AnalyzedWord::analyzed(
                    word,
                    Some(word.to_lowercase().as_str()),
                    Some("S"),
                ));
            }
        }
        records.push(AnalyzedWord::bare("\n"));
        Ok(records)
    }
}

#[derive(Default)]
struct MemoryStore {
    raw: HashMap<ArticleId, String>,
    artifacts: RefCell<HashMap<(ArticleId, ArtifactKind), String>>,
}

impl MemoryStore {
    fn with_raw(texts: &[(ArticleId, &str)]) -> Self {
        Self {
            raw: texts
                .iter()
                .map(|(id, text)| (*id, text.to_string()))
                .collect(),
            artifacts: RefCell::default(),
        }
    }

    fn artifact(&self, id: ArticleId, kind: ArtifactKind) -> Option<String> {
        self.artifacts.borrow().get(&(id, kind)).cloned()
    }
}

impl ArticleStore for MemoryStore {
    fn read_raw_text(&self, id: ArticleId) -> StoreResult<String> {
        self.raw.get(&id).cloned().ok_or_else(|| StoreError::Read {
            article_id: id,
            path: format!("memory/{id}").into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no raw text"),
        })
    }

    fn write_artifact(&self, id: ArticleId, kind: ArtifactKind, text: &str) -> StoreResult<()> {
        self.artifacts
            .borrow_mut()
            .insert((id, kind), text.to_string());
        Ok(())
    }
}

fn corpus_dir(ids: &[ArticleId]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for id in ids {
        fs::write(dir.path().join(format!("{id}_raw.txt")), "").unwrap();
        fs::write(dir.path().join(format!("{id}_meta.json")), "{}").unwrap();
    }
    dir
}

fn write_raw(dir: &Path, id: ArticleId, text: &str) {
    fs::write(dir.join(format!("{id}_raw.txt")), text).unwrap();
}

#[test]
fn run_persists_lowercased_cleaned_text_and_counts_tokens() {
    let dir = corpus_dir(&[1]);
    let corpus = CorpusManager::new(dir.path()).unwrap();
    let store = MemoryStore::with_raw(&[(1, "При-\nмер Текста, 2024!\nыыы")]);

    let report = TextProcessingPipeline::new(&corpus, &store, StubAnalyzer::default()).run();

    assert!(report.is_clean());
    assert_eq!(
        store.artifact(1, ArtifactKind::Cleaned).as_deref(),
        Some("пример текста ыыы")
    );
    let summary = report.outcomes[0].result.as_ref().unwrap();
    assert_eq!(summary.cleaned_words, 3);
    assert_eq!(summary.tokens, 2);
    assert!(store.artifact(1, ArtifactKind::SingleTagged).is_none());
}

#[test]
fn analyzer_receives_case_preserved_cleaned_text() {
    let dir = corpus_dir(&[1]);
    let corpus = CorpusManager::new(dir.path()).unwrap();
    let store = MemoryStore::with_raw(&[(1, "Москва —\nстолица.")]);
    let mut analyzer = StubAnalyzer::default();

    let mut pipeline = TextProcessingPipeline::new(&corpus, &store, &mut analyzer);
    let article = &corpus.get_articles()[&1];
    let (_, tokens) = pipeline.process_article(article).unwrap();
    drop(pipeline);

    assert_eq!(analyzer.calls, vec!["Москва столица".to_string()]);
    let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface_text()).collect();
    assert_eq!(surfaces, vec!["Москва", "столица"]);
    assert_eq!(tokens[0].cleaned_surface(), "москва");
    assert_eq!(tokens[0].tagged_form(), (Some("москва"), Some("S")));
}

#[test]
fn article_without_words_yields_empty_artifact_and_no_tokens() {
    let dir = corpus_dir(&[1]);
    let corpus = CorpusManager::new(dir.path()).unwrap();
    let store = MemoryStore::with_raw(&[(1, "2024 — 42!\n")]);

    let report = TextProcessingPipeline::new(&corpus, &store, StubAnalyzer::default()).run();

    assert!(report.is_clean());
    assert_eq!(store.artifact(1, ArtifactKind::Cleaned).as_deref(), Some(""));
    let summary = report.outcomes[0].result.as_ref().unwrap();
    assert_eq!(summary.cleaned_words, 0);
    assert_eq!(summary.tokens, 0);
}

#[test]
fn failing_article_does_not_stop_the_run() {
    let dir = corpus_dir(&[1, 2, 3]);
    let corpus = CorpusManager::new(dir.path()).unwrap();
    let store = MemoryStore::with_raw(&[(1, "первый текст"), (2, "полный сбой")]);

    let report = TextProcessingPipeline::new(&corpus, &store, StubAnalyzer::default()).run();

    let ids: Vec<ArticleId> = report.outcomes.iter().map(|o| o.article_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 2);
    assert!(!report.is_clean());
    assert!(matches!(
        report.outcomes[1].result,
        Err(PipelineError::Analyzer(_))
    ));
    assert!(matches!(
        report.outcomes[2].result,
        Err(PipelineError::Store(StoreError::Read { article_id: 3, .. }))
    ));
    // Cleaning ran before the analyzer failed.
    assert_eq!(
        store.artifact(2, ArtifactKind::Cleaned).as_deref(),
        Some("полный сбой")
    );
}

#[test]
fn token_count_never_exceeds_cleaned_word_count() {
    let dir = corpus_dir(&[1, 2]);
    let corpus = CorpusManager::new(dir.path()).unwrap();
    let store = MemoryStore::with_raw(&[
        (1, "ыыы ыыы слово"),
        (2, "Северо-Запад и юго-восток\nстраны"),
    ]);

    let report = TextProcessingPipeline::new(&corpus, &store, StubAnalyzer::default()).run();

    for outcome in &report.outcomes {
        let summary = outcome.result.as_ref().unwrap();
        assert!(summary.tokens <= summary.cleaned_words);
    }
}

#[test]
fn tagged_artifact_is_written_when_enabled() {
    let dir = corpus_dir(&[1]);
    let corpus = CorpusManager::new(dir.path()).unwrap();
    let store = MemoryStore::with_raw(&[(1, "Красная ыыы площадь")]);

    let report = TextProcessingPipeline::new(&corpus, &store, StubAnalyzer::default())
        .with_tagged_artifact(true)
        .run();

    assert!(report.is_clean());
    assert_eq!(
        store.artifact(1, ArtifactKind::SingleTagged).as_deref(),
        Some("красная<красная>(S) площадь<площадь>(S)")
    );
}

#[test]
fn filesystem_store_round_trip_through_pipeline() {
    let dir = corpus_dir(&[1, 2]);
    write_raw(dir.path(), 1, "Пер-\nвая статья.");
    write_raw(dir.path(), 2, "Вторая\r\nстатья!");
    validate_dataset(dir.path()).unwrap();

    let corpus = CorpusManager::new(dir.path()).unwrap();
    let store = FsArticleStore::new(dir.path());
    let report = TextProcessingPipeline::new(&corpus, &store, StubAnalyzer::default())
        .with_tagged_artifact(true)
        .run();

    assert!(report.is_clean());
    assert_eq!(
        fs::read_to_string(dir.path().join("1_cleaned.txt")).unwrap(),
        "первая статья"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("2_cleaned.txt")).unwrap(),
        "вторая статья"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("2_single_tagged.txt")).unwrap(),
        "вторая<вторая>(S) статья<статья>(S)"
    );
    // Artifacts do not break the pairing layout.
    validate_dataset(dir.path()).unwrap();
}
