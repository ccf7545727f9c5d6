//! Print job entity model and DTOs.

use printq_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{JobStatus, JobType};

/// A row from the `print_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PrintJob {
    pub id: DbId,
    pub job_type: JobType,
    pub status: JobStatus,
    /// Open JSON map; see `printq_core::payload` for the typed views.
    pub payload: serde_json::Value,
    /// Legacy single-file reference, set for uploads.
    pub file_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub printed_at: Option<Timestamp>,
    pub error_msg: Option<String>,
}

/// Fields for inserting a new job.
#[derive(Debug, Clone)]
pub struct CreatePrintJob {
    pub job_type: JobType,
    /// `pending` for generation jobs; `ready` for uploads, which skip the
    /// generation stage entirely.
    pub status: JobStatus,
    pub payload: serde_json::Value,
    pub file_path: Option<String>,
}

/// Query parameters for `GET /api/v1/jobs`.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
