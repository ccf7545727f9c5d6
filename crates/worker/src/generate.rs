//! Generation worker: PENDING shipping-docs jobs → rendered PDFs.
//!
//! State machine: `pending → generating → {ready, done, error}`. `done` is
//! the no-orders case; `ready` hands the job to the print worker. `error`
//! is terminal; there is no automatic retry.

use std::time::{Duration, Instant};

use printq_core::generate::{DocumentGenerator, GenerateOutcome};
use printq_core::payload::GenerateRequest;
use printq_core::sources::SOURCE_GENERATE_WORKER;
use printq_db::models::print_job::PrintJob;
use printq_db::models::status::JobStatus;
use printq_db::repositories::{PrintJobRepo, StatusEventRepo};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::report::ErrorReporter;

/// Long-lived generation worker.
///
/// A single-threaded polling loop: one job is processed fully before the
/// next claim. Multiple instances may run concurrently; the claim protocol
/// guarantees each job goes to exactly one of them.
pub struct GenerateWorker<G> {
    pool: PgPool,
    generator: G,
    reporter: ErrorReporter,
    poll_interval: Duration,
    heartbeat_interval: Option<Duration>,
}

impl<G: DocumentGenerator> GenerateWorker<G> {
    pub fn new(
        pool: PgPool,
        generator: G,
        reporter: ErrorReporter,
        poll_interval: Duration,
        heartbeat_interval: Option<Duration>,
    ) -> Self {
        Self {
            pool,
            generator,
            reporter,
            poll_interval,
            heartbeat_interval,
        }
    }

    /// Run the polling loop until the cancellation token is triggered.
    ///
    /// Cancellation is only observed between polls: a job claimed before
    /// shutdown runs to completion. There is no per-job cancellation.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        let mut last_heartbeat = Instant::now();

        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            heartbeat_secs = self.heartbeat_interval.map(|d| d.as_secs()),
            "Generation worker started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Generation worker shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match self.drain_backlog().await {
                        Ok(0) => {
                            if let Some(interval) = self.heartbeat_interval {
                                if last_heartbeat.elapsed() >= interval {
                                    tracing::info!(
                                        poll_secs = self.poll_interval.as_secs(),
                                        "No pending generation jobs",
                                    );
                                    last_heartbeat = Instant::now();
                                }
                            }
                        }
                        Ok(_) => last_heartbeat = Instant::now(),
                        Err(e) => {
                            // The claim failed before any job changed state;
                            // the backlog is untouched and retried next tick.
                            tracing::error!(error = %e, "Poll cycle failed");
                        }
                    }
                }
            }
        }
    }

    /// Claim and process jobs until the backlog is empty. Returns how many
    /// jobs were processed this cycle.
    async fn drain_backlog(&self) -> Result<usize, sqlx::Error> {
        let mut processed = 0;
        while self.poll_once().await? {
            processed += 1;
        }
        Ok(processed)
    }

    /// Claim and process at most one job. Returns whether one was claimed.
    pub async fn poll_once(&self) -> Result<bool, sqlx::Error> {
        let Some(job) = PrintJobRepo::claim_next_generation(&self.pool).await? else {
            return Ok(false);
        };

        tracing::info!(job_id = job.id, "Generation job claimed");
        StatusEventRepo::try_record(
            &self.pool,
            job.id,
            Some(JobStatus::Pending),
            JobStatus::Generating,
            SOURCE_GENERATE_WORKER,
        )
        .await;

        self.process(&job).await;
        Ok(true)
    }

    /// Run one claimed job to READY/DONE/ERROR. Every failure is recovered
    /// at this boundary: the job goes to ERROR and the loop moves on.
    async fn process(&self, job: &PrintJob) {
        let request = match GenerateRequest::from_payload(&job.payload) {
            Ok(request) => request,
            Err(e) => {
                self.fail(job, &e.to_string()).await;
                return;
            }
        };

        tracing::info!(
            job_id = job.id,
            what = request.what.as_str(),
            date = %request.date,
            "Generating documents",
        );

        match self.generator.generate(&request).await {
            Ok(GenerateOutcome::Rendered(artifacts)) => {
                let patch = serde_json::json!({
                    "orders_count": artifacts.orders_count,
                    "files": artifacts.files(),
                });
                if let Err(e) = PrintJobRepo::mark_ready(&self.pool, job.id, &patch).await {
                    tracing::error!(job_id = job.id, error = %e, "Failed to persist READY transition");
                    return;
                }
                StatusEventRepo::try_record(
                    &self.pool,
                    job.id,
                    Some(JobStatus::Generating),
                    JobStatus::Ready,
                    SOURCE_GENERATE_WORKER,
                )
                .await;
                tracing::info!(
                    job_id = job.id,
                    orders = artifacts.orders_count,
                    "Generation job ready for printing",
                );
            }
            Ok(GenerateOutcome::NoOrders { note }) => {
                let patch = serde_json::json!({
                    "orders_count": 0,
                    "files": [],
                    "note": note,
                });
                if let Err(e) = PrintJobRepo::mark_done_no_orders(&self.pool, job.id, &patch).await
                {
                    tracing::error!(job_id = job.id, error = %e, "Failed to persist DONE transition");
                    return;
                }
                StatusEventRepo::try_record(
                    &self.pool,
                    job.id,
                    Some(JobStatus::Generating),
                    JobStatus::Done,
                    SOURCE_GENERATE_WORKER,
                )
                .await;
                tracing::info!(job_id = job.id, "No orders for the requested date");
            }
            Err(e) => self.fail(job, &e.to_string()).await,
        }
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
            Some(JobStatus::Generating),
            JobStatus::Error,
            SOURCE_GENERATE_WORKER,
        )
        .await;
        tracing::error!(job_id = job.id, error = message, "Generation job failed");
        self.reporter
            .report(SOURCE_GENERATE_WORKER, job.id, message)
            .await;
    }
}
