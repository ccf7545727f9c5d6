//! Status-event source labels.
//!
//! Written to `print_job_status_events.source` so dashboards can attribute
//! each transition to the component that made it.

/// Transition made by the submission API.
pub const SOURCE_API: &str = "api";

/// Transition made by the generation worker.
pub const SOURCE_GENERATE_WORKER: &str = "generate_worker";

/// Transition made by the print worker.
pub const SOURCE_PRINT_WORKER: &str = "print_worker";
