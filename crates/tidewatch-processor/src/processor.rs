//! Processing orchestrator
//!
//! One `run_once` pass drains the mailbox, analyzes every publication PDF
//! referenced by the accepted messages, and mails the rendered report.
//! `run_with_retry` wraps a pass in a fixed-delay attempt loop and raises the
//! operator failure notification when every attempt fails.

use tokio::time::sleep;
use tracing::{error, info, warn};

use tidewatch_domain::{
    DocumentReport, EntityExtractor, MailFetcher, MailSender,
};
use tidewatch_mail::report::{failure_subject, render_failure_notice, render_report, report_subject};

use crate::config::ProcessorConfig;
use crate::error::ProcessError;

/// Outcome summary of a successful processing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Gazette messages accepted from the mailbox
    pub messages: usize,
    /// Documents analyzed successfully
    pub succeeded: usize,
    /// Documents that produced an inline error entry
    pub failed: usize,
}

impl RunSummary {
    /// Total documents this pass looked at.
    pub fn documents(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Drives mailbox scanning, document analysis, and report delivery.
pub struct Processor<E, F, S> {
    extractor: E,
    fetcher: F,
    sender: S,
    config: ProcessorConfig,
}

impl<E, F, S> Processor<E, F, S>
where
    E: EntityExtractor,
    F: MailFetcher,
    S: MailSender,
{
    /// Create a processor. Fails when the configuration is invalid.
    pub fn new(
        extractor: E,
        fetcher: F,
        sender: S,
        config: ProcessorConfig,
    ) -> Result<Self, ProcessError> {
        config.validate()?;
        Ok(Self {
            extractor,
            fetcher,
            sender,
            config,
        })
    }

    /// One full pass: fetch, analyze, report. A document that fails analysis
    /// becomes an inline error entry; only mailbox and delivery failures
    /// abort the pass. An empty mailbox is a successful no-op.
    pub async fn run_once(&self) -> Result<RunSummary, ProcessError> {
        let messages = self.fetcher.fetch_messages().await?;
        if messages.is_empty() {
            info!("no gazette messages, nothing to report");
            return Ok(RunSummary {
                messages: 0,
                succeeded: 0,
                failed: 0,
            });
        }

        info!(count = messages.len(), "processing gazette messages");
        let mut reports = Vec::new();

        for message in &messages {
            for url in &message.pdf_urls {
                info!(source = url.as_str(), "analyzing publication");

                let report = match self
                    .extractor
                    .extract_from_source(url, &self.config.entities)
                    .await
                {
                    Ok(analysis) => {
                        info!(
                            source = url.as_str(),
                            found = analysis.results.found_count(),
                            "analysis complete"
                        );
                        DocumentReport::succeeded(url, message, analysis)
                    }
                    Err(e) => {
                        warn!(source = url.as_str(), error = %e, "analysis failed");
                        DocumentReport::failed(url, message, e.to_string())
                    }
                };

                reports.push(report);
            }
        }

        let summary = RunSummary {
            messages: messages.len(),
            succeeded: reports.iter().filter(|r| !r.is_error()).count(),
            failed: reports.iter().filter(|r| r.is_error()).count(),
        };

        if reports.is_empty() {
            info!("no publications analyzed, skipping report");
            return Ok(summary);
        }

        let html = render_report(&reports);
        self.sender.send_report(&report_subject(), &html).await?;
        info!(
            documents = summary.documents(),
            succeeded = summary.succeeded,
            failed = summary.failed,
            "report sent"
        );

        Ok(summary)
    }

    /// Attempt `run_once` up to the configured attempt budget, with a fixed
    /// delay between attempts. When every attempt fails, a failure
    /// notification is sent to the operator and the last error surfaces.
    pub async fn run_with_retry(&self) -> Result<RunSummary, ProcessError> {
        let mut last_err: Option<ProcessError> = None;

        for attempt in 1..=self.config.max_attempts {
            info!(attempt, max = self.config.max_attempts, "processing attempt");

            match self.run_once().await {
                Ok(summary) => {
                    info!(attempt, "processing succeeded");
                    return Ok(summary);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "processing attempt failed");
                    last_err = Some(e);
                    if attempt < self.config.max_attempts {
                        sleep(self.config.attempt_delay()).await;
                    }
                }
            }
        }

        // last_err is always set here since max_attempts >= 1 is validated.
        let last = last_err.unwrap_or(ProcessError::Config("no attempts made".to_string()));

        error!(attempts = self.config.max_attempts, "all processing attempts failed");
        let notice = render_failure_notice(&last.to_string());
        if let Err(e) = self.sender.send_failure_notice(failure_subject(), &notice).await {
            error!(error = %e, "failed to deliver failure notification");
        }

        Err(ProcessError::AttemptsExhausted {
            attempts: self.config.max_attempts,
            last: Box::new(last),
        })
    }

    /// The configuration this processor runs with.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }
}
