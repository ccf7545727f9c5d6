//! Failure forwarding to an external error-reporting sink.
//!
//! Same philosophy as the audit trail: reporting is best-effort and must
//! never affect the job or the worker loop. With no webhook URL configured
//! the reporter is a no-op.

use std::time::Duration;

use printq_core::types::DbId;

/// HTTP request timeout for a single report delivery.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Delivers job-failure reports to an optional webhook endpoint.
pub struct ErrorReporter {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl ErrorReporter {
    pub fn new(webhook_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            webhook_url,
        }
    }

    /// Reporter that drops everything. For tests and minimal deployments.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Forward a job failure, swallowing any delivery error.
    pub async fn report(&self, service: &str, job_id: DbId, error: &str) {
        let Some(url) = &self.webhook_url else {
            return;
        };

        let payload = serde_json::json!({
            "service": service,
            "job_id": job_id,
            "error": error,
            "occurred_at": chrono::Utc::now(),
        });

        match self.client.post(url).json(&payload).send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(
                    job_id,
                    status = response.status().as_u16(),
                    "Error report rejected by webhook",
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(job_id, error = %e, "Failed to deliver error report");
            }
        }
    }
}
