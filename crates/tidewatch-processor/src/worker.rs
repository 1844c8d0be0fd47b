//! Background worker for continuous mailbox scanning

use tokio::time::interval;
use tracing::{error, info};

use tidewatch_domain::{EntityExtractor, MailFetcher, MailSender};

use crate::error::ProcessError;
use crate::processor::Processor;

/// Runs the processor on a fixed schedule until shutdown.
///
/// Each tick performs one `run_with_retry` pass; a failed pass is logged and
/// the worker keeps going, since the next newsletter arrives on its own
/// schedule regardless.
pub struct ScanWorker<E, F, S> {
    processor: Processor<E, F, S>,
}

impl<E, F, S> ScanWorker<E, F, S>
where
    E: EntityExtractor,
    F: MailFetcher,
    S: MailSender,
{
    /// Create a worker around a configured processor.
    pub fn new(processor: Processor<E, F, S>) -> Self {
        Self { processor }
    }

    /// Run indefinitely at the configured scan interval, until Ctrl+C.
    pub async fn run(&self) -> Result<(), ProcessError> {
        let scan_interval = self.processor.config().scan_interval();
        let mut ticker = interval(scan_interval);

        info!(interval_secs = scan_interval.as_secs(), "scan worker started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match self.processor.run_with_retry().await {
                        Ok(summary) => {
                            info!(
                                messages = summary.messages,
                                documents = summary.documents(),
                                "scan cycle complete"
                            );
                        }
                        Err(e) => {
                            error!(error = %e, "scan cycle failed");
                        }
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("shutdown signal received, stopping scan worker");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Run a fixed number of cycles. A cycle failure stops the run.
    pub async fn run_cycles(&self, cycles: usize) -> Result<(), ProcessError> {
        let mut ticker = interval(self.processor.config().scan_interval());

        info!(cycles, "scan worker started for fixed cycle count");

        for cycle in 0..cycles {
            ticker.tick().await;
            let summary = self.processor.run_with_retry().await?;
            info!(
                cycle = cycle + 1,
                cycles,
                documents = summary.documents(),
                "scan cycle complete"
            );
        }

        Ok(())
    }
}
