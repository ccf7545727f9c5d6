//! Printing collaborator seam.
//!
//! The physical print path (OS print utility, spooler) lives behind this
//! trait. A call returns only once the utility has accepted the file;
//! the print worker treats any error as fatal for the current job.

use std::path::Path;

use async_trait::async_trait;

use crate::types::BoxError;

/// Sends a single PDF to the printer.
#[async_trait]
pub trait Printer: Send + Sync {
    async fn print(&self, file: &Path) -> Result<(), BoxError>;
}
