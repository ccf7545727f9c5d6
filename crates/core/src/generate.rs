//! Document-generation collaborator seam.
//!
//! PDF rendering itself (spreadsheet ingestion, layout) lives behind this
//! trait; the generation worker only cares about the three-way outcome:
//! rendered artifacts, the distinguished "no orders for this date" result,
//! or a failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::payload::GenerateRequest;
use crate::types::BoxError;

/// Files produced by a successful render, plus the order count for the day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedArtifacts {
    pub shipping_list_path: Option<String>,
    pub guides_path: Option<String>,
    pub orders_count: i64,
}

impl GeneratedArtifacts {
    /// Ordered list of produced files: shipping list first, then guides.
    /// This is the order the print worker will feed them to the printer.
    pub fn files(&self) -> Vec<String> {
        let mut files = Vec::new();
        if let Some(path) = &self.shipping_list_path {
            files.push(path.clone());
        }
        if let Some(path) = &self.guides_path {
            files.push(path.clone());
        }
        files
    }
}

/// Outcome of a generation call that did not fail.
#[derive(Debug, Clone)]
pub enum GenerateOutcome {
    /// Documents were rendered.
    Rendered(GeneratedArtifacts),
    /// No orders exist for the requested date. A valid empty result,
    /// not an error: the job terminates as DONE with the note attached.
    NoOrders { note: String },
}

/// Produces shipping/guide PDFs for a generation request.
#[async_trait]
pub trait DocumentGenerator: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, BoxError>;
}
