//! Repository for the `print_jobs` table.
//!
//! Every status transition is a single UPDATE statement, i.e. one commit
//! boundary per transition. Status events are recorded separately by the
//! caller (see [`super::StatusEventRepo::try_record`]) so an audit-log
//! failure can never roll back or block a job mutation.

use printq_core::types::DbId;
use sqlx::PgPool;

use crate::models::print_job::{CreatePrintJob, JobListQuery, PrintJob};
use crate::models::status::{JobStatus, JobType};

/// Column list for `print_jobs` queries.
const COLUMNS: &str = "\
    id, job_type, status, payload, file_path, \
    created_at, updated_at, printed_at, error_msg";

/// Maximum page size for job listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for job listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD and claim operations for print jobs.
pub struct PrintJobRepo;

impl PrintJobRepo {
    /// Insert a new job. Returns immediately with the job row.
    pub async fn create(pool: &PgPool, input: &CreatePrintJob) -> Result<PrintJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO print_jobs (job_type, status, payload, file_path) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PrintJob>(&query)
            .bind(input.job_type)
            .bind(input.status)
            .bind(&input.payload)
            .bind(&input.file_path)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PrintJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM print_jobs WHERE id = $1");
        sqlx::query_as::<_, PrintJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the oldest PENDING generation job, moving it to
    /// GENERATING.
    ///
    /// `SELECT FOR UPDATE SKIP LOCKED` hands each eligible row to exactly
    /// one claimant among concurrently polling workers: rows locked by an
    /// in-flight claim are skipped rather than waited on. A claimant that
    /// dies before the statement commits leaves the row PENDING and
    /// eligible for the next poll; that is the whole crash-recovery story
    /// for unclaimed work.
    pub async fn claim_next_generation(pool: &PgPool) -> Result<Option<PrintJob>, sqlx::Error> {
        let query = format!(
            "UPDATE print_jobs \
             SET status = $1, updated_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM print_jobs \
                 WHERE status = $2 AND job_type = $3 \
                 ORDER BY created_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PrintJob>(&query)
            .bind(JobStatus::Generating)
            .bind(JobStatus::Pending)
            .bind(JobType::ShippingDocs)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim the oldest READY job of any type, moving it to
    /// PRINTING. Same locking semantics as [`Self::claim_next_generation`].
    pub async fn claim_next_ready(pool: &PgPool) -> Result<Option<PrintJob>, sqlx::Error> {
        let query = format!(
            "UPDATE print_jobs \
             SET status = $1, updated_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM print_jobs \
                 WHERE status = $2 \
                 ORDER BY created_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PrintJob>(&query)
            .bind(JobStatus::Printing)
            .bind(JobStatus::Ready)
            .fetch_optional(pool)
            .await
    }

    /// Generation succeeded: merge the result patch (`orders_count`,
    /// `files`) into the payload and hand the job to the print stage.
    pub async fn mark_ready(
        pool: &PgPool,
        job_id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE print_jobs \
             SET status = $2, payload = payload || $3, error_msg = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Ready)
        .bind(patch)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// No orders exist for the requested date: terminal, not an error.
    /// The patch carries `{orders_count: 0, files: [], note}`.
    pub async fn mark_done_no_orders(
        pool: &PgPool,
        job_id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE print_jobs \
             SET status = $2, payload = payload || $3, error_msg = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Done)
        .bind(patch)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Every file printed: terminal. The patch carries `{printed_files,
    /// printed_at}`; the `printed_at` column is stamped as well.
    pub async fn mark_printed(
        pool: &PgPool,
        job_id: DbId,
        patch: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE print_jobs \
             SET status = $2, payload = payload || $3, printed_at = NOW(), \
                 error_msg = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Done)
        .bind(patch)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// The job failed: record the failure description, leave the payload
    /// untouched. Terminal; there is no automatic retry.
    pub async fn mark_error(
        pool: &PgPool,
        job_id: DbId,
        message: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE print_jobs \
             SET status = $2, error_msg = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(JobStatus::Error)
        .bind(message)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// List jobs newest-first with optional status/type filters and
    /// pagination.
    pub async fn list(pool: &PgPool, params: &JobListQuery) -> Result<Vec<PrintJob>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build the WHERE clause and track the next bind parameter index.
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx: u32 = 1;

        if params.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }

        if params.job_type.is_some() {
            conditions.push(format!("job_type = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM print_jobs \
             {where_clause} \
             ORDER BY created_at DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, PrintJob>(&query);

        if let Some(status) = params.status {
            q = q.bind(status);
        }
        if let Some(job_type) = params.job_type {
            q = q.bind(job_type);
        }

        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }
}
