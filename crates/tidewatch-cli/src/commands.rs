//! Command implementations.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use tidewatch_domain::EntityExtractor;
use tidewatch_mail::{FileMailbox, FileSender};
use tidewatch_processor::{Processor, ScanWorker};

use crate::config::AppConfig;
use crate::extractor::AnyExtractor;

fn build_processor(
    config: &AppConfig,
) -> anyhow::Result<Processor<AnyExtractor, FileMailbox, FileSender>> {
    let extractor = AnyExtractor::from_config(config)?;
    let fetcher = FileMailbox::new(&config.spool_dir);
    let sender = FileSender::new(&config.outbox_dir);

    Processor::new(extractor, fetcher, sender, config.processor.clone())
        .context("failed to assemble processor")
}

/// One processing pass with the outer attempt loop.
pub async fn execute_run(config: &AppConfig) -> anyhow::Result<()> {
    let processor = build_processor(config)?;
    let summary = processor
        .run_with_retry()
        .await
        .context("processing failed")?;

    info!(
        messages = summary.messages,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run complete"
    );
    Ok(())
}

/// Scheduled scanning until interrupted.
pub async fn execute_watch(config: &AppConfig) -> anyhow::Result<()> {
    let processor = build_processor(config)?;
    let worker = ScanWorker::new(processor);
    worker.run().await.context("scan worker failed")?;
    Ok(())
}

/// Analyze one local PDF and print findings to stdout.
pub async fn execute_analyze(config: &AppConfig, file: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("cannot read {}", file.display()))?;
    let text = tidewatch_pdf::extract_text(&bytes)
        .with_context(|| format!("cannot extract text from {}", file.display()))?;

    info!(file = %file.display(), chars = text.len(), "extracted document text");

    let extractor = AnyExtractor::from_config(config)?;
    let analysis = extractor
        .extract_from_text(&text, &config.entities)
        .await
        .context("analysis failed")?;

    for finding in analysis.results.findings() {
        println!("{}", finding.entity);
        println!("  {}", finding.info.replace('\n', "\n  "));
        println!();
    }
    println!(
        "{} of {} entities with findings",
        analysis.results.found_count(),
        analysis.results.len()
    );

    Ok(())
}
