pub mod health;
pub mod jobs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /jobs                 list jobs (GET)
/// /jobs/generate        enqueue PDF generation (POST)
/// /jobs/upload          enqueue an uploaded PDF (POST, multipart)
/// /jobs/{id}            full job projection (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/jobs", jobs::router())
}
