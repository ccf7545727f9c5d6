//! Repository for the `print_job_status_events` audit table.
//!
//! Append-only. Writes are best-effort: a failed insert is logged and
//! swallowed, so the audit trail can never undo or block the job
//! transition it describes. The job row and its events live in separate
//! commit scopes on purpose; never wrap both in one transaction.

use printq_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::JobStatus;
use crate::models::status_event::StatusEvent;

/// Column list for `print_job_status_events` queries.
const COLUMNS: &str = "id, job_id, from_status, to_status, occurred_at, source";

/// Provides append and read operations for status events.
pub struct StatusEventRepo;

impl StatusEventRepo {
    /// Record a status transition, swallowing any insert failure.
    ///
    /// `from_status = None` marks job creation. `source` names the
    /// component making the transition (see `printq_core::sources`).
    pub async fn try_record(
        pool: &PgPool,
        job_id: DbId,
        from_status: Option<JobStatus>,
        to_status: JobStatus,
        source: &str,
    ) {
        let result = sqlx::query(
            "INSERT INTO print_job_status_events (job_id, from_status, to_status, source) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(job_id)
        .bind(from_status)
        .bind(to_status)
        .bind(source)
        .execute(pool)
        .await;

        if let Err(e) = result {
            tracing::warn!(
                job_id,
                from_status = from_status.map(JobStatus::as_str),
                to_status = to_status.as_str(),
                error = %e,
                "Failed to record status event",
            );
        }
    }

    /// Oldest-first audit trail for one job.
    pub async fn list_for_job(pool: &PgPool, job_id: DbId) -> Result<Vec<StatusEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM print_job_status_events \
             WHERE job_id = $1 \
             ORDER BY occurred_at ASC, id ASC"
        );
        sqlx::query_as::<_, StatusEvent>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }
}
