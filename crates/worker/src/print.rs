//! Print worker: READY jobs → the physical printer.
//!
//! State machine: `ready → printing → {done, error}`. Both generated and
//! uploaded jobs land here; the worker only cares about `payload.files`.

use std::path::Path;
use std::time::Duration;

use printq_core::payload::files_from_payload;
use printq_core::print::Printer;
use printq_core::sources::SOURCE_PRINT_WORKER;
use printq_db::models::print_job::PrintJob;
use printq_db::models::status::JobStatus;
use printq_db::repositories::{PrintJobRepo, StatusEventRepo};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::report::ErrorReporter;

/// Long-lived print worker. Same loop shape as the generation worker,
/// without the idle heartbeat.
pub struct PrintWorker<P> {
    pool: PgPool,
    printer: P,
    reporter: ErrorReporter,
    poll_interval: Duration,
}

impl<P: Printer> PrintWorker<P> {
    pub fn new(pool: PgPool, printer: P, reporter: ErrorReporter, poll_interval: Duration) -> Self {
        Self {
            pool,
            printer,
            reporter,
            poll_interval,
        }
    }

    /// Run the polling loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);

        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Print worker started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Print worker shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    loop {
                        match self.poll_once().await {
                            Ok(true) => continue,
                            Ok(false) => break,
                            Err(e) => {
                                tracing::error!(error = %e, "Poll cycle failed");
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Claim and process at most one job. Returns whether one was claimed.
    pub async fn poll_once(&self) -> Result<bool, sqlx::Error> {
        let Some(job) = PrintJobRepo::claim_next_ready(&self.pool).await? else {
            return Ok(false);
        };

        tracing::info!(job_id = job.id, "Print job claimed");
        StatusEventRepo::try_record(
            &self.pool,
            job.id,
            Some(JobStatus::Ready),
            JobStatus::Printing,
            SOURCE_PRINT_WORKER,
        )
        .await;

        self.process(&job).await;
        Ok(true)
    }

    /// Run one claimed job to DONE/ERROR.
    async fn process(&self, job: &PrintJob) {
        let files = files_from_payload(&job.payload);
        if files.is_empty() {
            self.fail(job, "READY job has no payload.files to print")
                .await;
            return;
        }

        tracing::info!(job_id = job.id, count = files.len(), "Printing job files");

        match self.print_all(&files).await {
            Ok(printed) => {
                let patch = serde_json::json!({
                    "printed_files": printed,
                    "printed_at": chrono::Utc::now().to_rfc3339(),
                });
                if let Err(e) = PrintJobRepo::mark_printed(&self.pool, job.id, &patch).await {
                    tracing::error!(job_id = job.id, error = %e, "Failed to persist DONE transition");
                    return;
                }
                StatusEventRepo::try_record(
                    &self.pool,
                    job.id,
                    Some(JobStatus::Printing),
                    JobStatus::Done,
                    SOURCE_PRINT_WORKER,
                )
                .await;
                tracing::info!(job_id = job.id, files = printed.len(), "Print job done");
            }
            Err(message) => self.fail(job, &message).await,
        }
    }

    /// Print files strictly in order, stopping at the first failure.
    ///
    /// Files before the failing one have already gone to the printer. No
    /// per-file status is persisted, so the error message names the failing
    /// file and how many preceded it; that is all the operator has to
    /// infer partial completion.
    async fn print_all(&self, files: &[String]) -> Result<Vec<String>, String> {
        let mut printed: Vec<String> = Vec::new();
        for path in files {
            let pdf = Path::new(path);
            if !tokio::fs::try_exists(pdf).await.unwrap_or(false) {
                return Err(format!(
                    "PDF does not exist: {path} ({} of {} files already printed)",
                    printed.len(),
                    files.len(),
                ));
            }
            tracing::info!(file = %pdf.display(), "Printing PDF");
            if let Err(e) = self.printer.print(pdf).await {
                return Err(format!(
                    "Printing {path} failed ({} of {} files already printed): {e}",
                    printed.len(),
                    files.len(),
                ));
            }
            printed.push(path.clone());
        }
        Ok(printed)
    }

    /// ERROR path: persist the failure, record the transition, and forward
    /// it to the error-reporting sink.
    async fn fail(&self, job: &PrintJob, message: &str) {
        if let Err(e) = PrintJobRepo::mark_error(&self.pool, job.id, message).await {
            tracing::error!(job_id = job.id, error = %e, "Failed to persist ERROR transition");
            return;
        }
        StatusEventRepo::try_record(
            &self.pool,
            job.id,
            Some(JobStatus::Printing),
            JobStatus::Error,
            SOURCE_PRINT_WORKER,
        )
        .await;
        tracing::error!(job_id = job.id, error = message, "Print job failed");
        self.reporter
            .report(SOURCE_PRINT_WORKER, job.id, message)
            .await;
    }
}
