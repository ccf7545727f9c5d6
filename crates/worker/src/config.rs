//! Worker configuration loaded from environment variables.
//!
//! No global config state: the struct is built once in `main` and handed
//! to the worker loop at construction.

use std::time::Duration;

/// Configuration shared by both worker binaries.
///
/// All fields have defaults suitable for local development; override via
/// environment variables in production.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// How long to sleep between polls when the backlog is empty.
    pub poll_interval: Duration,
    /// How often the generation worker logs an idle heartbeat.
    /// `None` disables heartbeat logging.
    pub heartbeat_interval: Option<Duration>,
    /// Base URL of the PDF renderer service.
    pub renderer_url: String,
    /// Path to the SumatraPDF executable used for printing.
    pub sumatra_path: String,
    /// Exact name of the target printer.
    pub printer_name: String,
    /// Optional webhook receiving job-failure reports.
    pub error_webhook_url: Option<String>,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `POLL_SECONDS`             | `2`                     |
    /// | `WORKER_HEARTBEAT_SECONDS` | `60` (`0` disables)     |
    /// | `RENDERER_URL`             | `http://localhost:8700` |
    /// | `SUMATRA_PATH`             | (empty)                 |
    /// | `PRINTER_NAME`             | (empty)                 |
    /// | `ERROR_WEBHOOK_URL`        | unset                   |
    pub fn from_env() -> Self {
        let poll_seconds: u64 = std::env::var("POLL_SECONDS")
            .unwrap_or_else(|_| "2".into())
            .parse()
            .expect("POLL_SECONDS must be a valid u64");

        let heartbeat_seconds: u64 = std::env::var("WORKER_HEARTBEAT_SECONDS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("WORKER_HEARTBEAT_SECONDS must be a valid u64");

        let renderer_url =
            std::env::var("RENDERER_URL").unwrap_or_else(|_| "http://localhost:8700".into());

        let sumatra_path = std::env::var("SUMATRA_PATH").unwrap_or_default();
        let printer_name = std::env::var("PRINTER_NAME").unwrap_or_default();

        let error_webhook_url = std::env::var("ERROR_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            poll_interval: Duration::from_secs(poll_seconds),
            heartbeat_interval: (heartbeat_seconds > 0)
                .then(|| Duration::from_secs(heartbeat_seconds)),
            renderer_url,
            sumatra_path,
            printer_name,
            error_webhook_url,
        }
    }
}
