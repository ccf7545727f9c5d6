//! Status-transition audit records.

use printq_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::status::JobStatus;

/// A row from the `print_job_status_events` table.
///
/// Append-only: one row per status change, used to compute per-stage
/// dwell times in dashboards. `from_status = NULL` marks job creation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusEvent {
    pub id: DbId,
    pub job_id: DbId,
    pub from_status: Option<JobStatus>,
    pub to_status: JobStatus,
    pub occurred_at: Timestamp,
    pub source: Option<String>,
}
