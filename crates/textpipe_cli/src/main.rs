//! Pipeline entry point.
//!
//! # Responsibility
//! - Load config, start logging, validate the dataset and run the pipeline.
//! - Exit non-zero when validation fails or any article failed.

use std::process::ExitCode;
use textpipe_core::{
    init_logging, validate_dataset, CorpusManager, FsArticleStore, MystemAnalyzer,
    PipelineConfig, TextProcessingPipeline, DEFAULT_CONFIG_FILE_NAME,
};

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(message) => {
            log::error!("event=cli_run module=cli status=error error={message}");
            eprintln!("textpipe: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool, String> {
    let cwd = std::env::current_dir().map_err(|err| err.to_string())?;
    let config = PipelineConfig::load_or_default(cwd.join(DEFAULT_CONFIG_FILE_NAME))
        .map_err(|err| err.to_string())?
        .resolve_paths(&cwd);

    init_logging(config.effective_log_level(), &config.log_dir)?;

    validate_dataset(&config.assets_path).map_err(|err| err.to_string())?;
    let corpus = CorpusManager::new(config.assets_path.clone()).map_err(|err| err.to_string())?;

    let store = FsArticleStore::new(corpus.root().to_path_buf());
    let analyzer = MystemAnalyzer::new(config.analyzer.binary.clone())
        .with_args(config.analyzer.args.iter().cloned());
    let report = TextProcessingPipeline::new(&corpus, store, analyzer)
        .with_tagged_artifact(config.persist_tagged)
        .run();

    for outcome in &report.outcomes {
        if let Err(err) = &outcome.result {
            eprintln!("article {}: {err}", outcome.article_id);
        }
    }
    println!(
        "textpipe processed={} failed={}",
        report.succeeded(),
        report.failed()
    );
    Ok(report.is_clean())
}
