//! Handlers for the `/jobs` resource.
//!
//! The API never does the work itself: generation is a potentially long
//! process, so endpoints only enqueue jobs and return immediately. A worker
//! claims the job and moves it through its lifecycle; clients poll the job
//! projection for the outcome.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use printq_core::error::CoreError;
use printq_core::payload::{DocKind, GenerateRequest};
use printq_core::sources::SOURCE_API;
use printq_core::types::DbId;
use printq_db::models::print_job::{CreatePrintJob, JobListQuery};
use printq_db::models::status::{JobStatus, JobType};
use printq_db::repositories::{PrintJobRepo, StatusEventRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/jobs/generate`.
#[derive(Debug, Deserialize)]
pub struct EnqueueGenerate {
    pub what: DocKind,
    /// Target date. Defaults to today in the configured timezone offset.
    pub day: Option<NaiveDate>,
    /// Sale to print; required when `what` is `egreso`.
    pub venta_id: Option<String>,
}

/// Response body for the submission endpoints.
#[derive(Debug, Serialize)]
pub struct EnqueuedJob {
    pub id: DbId,
    pub status: JobStatus,
    pub job_type: JobType,
}

// ---------------------------------------------------------------------------
// Enqueue generation
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs/generate
///
/// Create a PENDING generation job. Returns 201 with `{id, status,
/// job_type}`; the generation worker will claim it and leave it READY
/// (or DONE when the date has no orders) with `payload.files` set.
pub async fn enqueue_generate(
    State(state): State<AppState>,
    Json(input): Json<EnqueueGenerate>,
) -> AppResult<impl IntoResponse> {
    if input.what == DocKind::Egreso && input.venta_id.is_none() {
        return Err(AppError::BadRequest(
            "venta_id is required when what is 'egreso'".into(),
        ));
    }

    let request = GenerateRequest {
        what: input.what,
        date: input.day.unwrap_or_else(|| state.config.today()),
        venta_id: input.venta_id,
    };

    let job = PrintJobRepo::create(
        &state.pool,
        &CreatePrintJob {
            job_type: JobType::ShippingDocs,
            status: JobStatus::Pending,
            payload: request.to_payload(),
            file_path: None,
        },
    )
    .await?;

    StatusEventRepo::try_record(&state.pool, job.id, None, job.status, SOURCE_API).await;

    tracing::info!(
        job_id = job.id,
        what = request.what.as_str(),
        date = %request.date,
        "Generation job enqueued",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: EnqueuedJob {
                id: job.id,
                status: job.status,
                job_type: job.job_type,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// Enqueue upload
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs/upload
///
/// Accept a single multipart `file` part (must be a PDF), persist it under
/// the upload directory with a generated name, and create a READY upload
/// job pointing at it. The print worker takes it from there.
pub async fn enqueue_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut stored: Option<(String, String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();

        if !is_pdf(&original_name, &content_type) {
            return Err(AppError::BadRequest("Only PDF files are accepted".into()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let upload_dir = std::path::Path::new(&state.config.upload_dir);
        tokio::fs::create_dir_all(upload_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        // Never trust the client's file name on disk.
        let safe_name = format!("{}.pdf", uuid::Uuid::new_v4().simple());
        let dest = upload_dir.join(safe_name);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        stored = Some((
            dest.to_string_lossy().into_owned(),
            original_name,
            content_type,
        ));
        break;
    }

    let Some((path, original_name, content_type)) = stored else {
        return Err(AppError::BadRequest(
            "No file received in multipart upload".into(),
        ));
    };

    let job = PrintJobRepo::create(
        &state.pool,
        &CreatePrintJob {
            job_type: JobType::Upload,
            status: JobStatus::Ready,
            payload: serde_json::json!({
                "original_name": original_name,
                "content_type": content_type,
                "files": [path],
            }),
            file_path: Some(path),
        },
    )
    .await?;

    StatusEventRepo::try_record(&state.pool, job.id, None, job.status, SOURCE_API).await;

    tracing::info!(job_id = job.id, "Upload job enqueued");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: EnqueuedJob {
                id: job.id,
                status: job.status,
                job_type: job.job_type,
            },
        }),
    ))
}

/// A file counts as a PDF if either its name or its declared content type
/// says so.
fn is_pdf(name: &str, content_type: &str) -> bool {
    name.to_lowercase().ends_with(".pdf") || content_type == "application/pdf"
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}
///
/// Full job projection including payload, timestamps, and `error_msg`,
/// the only place failures surface to callers.
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = PrintJobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PrintJob",
            id: job_id,
        }))?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// List jobs newest-first. Supports optional `status`, `job_type`,
/// `limit`, and `offset` query parameters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let jobs = PrintJobRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}
