//! Route definitions for the `/jobs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /                -> list_jobs
/// POST   /generate        -> enqueue_generate
/// POST   /upload          -> enqueue_upload
/// GET    /{id}            -> get_job
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list_jobs))
        .route("/generate", post(jobs::enqueue_generate))
        .route("/upload", post(jobs::enqueue_upload))
        .route("/{id}", get(jobs::get_job))
}
