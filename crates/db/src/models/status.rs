//! Job status and type enums mapping to the `print_job_status` and
//! `print_job_type` PostgreSQL enum types.
//!
//! The Rust variant order mirrors the enum label order in the migration;
//! the wire names are pinned by tests below.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a print job.
///
/// `pending → generating → ready → printing → done`, with `error` reachable
/// from either in-progress status and `done` also reachable directly from
/// `generating` (the no-orders case). Upload jobs enter at `ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "print_job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Generating,
    Ready,
    Printing,
    Done,
    Error,
}

impl JobStatus {
    /// Database/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Generating => "generating",
            JobStatus::Ready => "ready",
            JobStatus::Printing => "printing",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        }
    }
}

/// Kind of work a job represents. Fixed at creation, never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "print_job_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// Generate shipping/guide PDFs from spreadsheet data, then print them.
    ShippingDocs,
    /// Print a PDF uploaded by the user; skips the generation stage.
    Upload,
}

impl JobType {
    /// Database/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::ShippingDocs => "shipping_docs",
            JobType::Upload => "upload",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_migration() {
        assert_eq!(JobStatus::Pending.as_str(), "pending");
        assert_eq!(JobStatus::Generating.as_str(), "generating");
        assert_eq!(JobStatus::Ready.as_str(), "ready");
        assert_eq!(JobStatus::Printing.as_str(), "printing");
        assert_eq!(JobStatus::Done.as_str(), "done");
        assert_eq!(JobStatus::Error.as_str(), "error");
    }

    #[test]
    fn type_labels_match_migration() {
        assert_eq!(JobType::ShippingDocs.as_str(), "shipping_docs");
        assert_eq!(JobType::Upload.as_str(), "upload");
    }

    #[test]
    fn serde_names_match_database_labels() {
        let json = serde_json::to_value(JobStatus::Generating).unwrap();
        assert_eq!(json, serde_json::json!("generating"));
        let json = serde_json::to_value(JobType::ShippingDocs).unwrap();
        assert_eq!(json, serde_json::json!("shipping_docs"));

        let status: JobStatus = serde_json::from_value(serde_json::json!("ready")).unwrap();
        assert_eq!(status, JobStatus::Ready);
    }
}
