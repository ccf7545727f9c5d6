//! SumatraPDF-backed printer.
//!
//! Invokes the SumatraPDF executable in silent print mode from the command
//! line. The call returns once Sumatra has handed the file to the print
//! spooler; a non-zero exit carries the captured stdout/stderr.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use printq_core::print::Printer;
use printq_core::types::BoxError;
use tokio::process::Command;

/// Upper bound for one print invocation. Sumatra normally returns within
/// seconds; a hung spooler should not wedge the worker forever.
const PRINT_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from the print subprocess.
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("SumatraPDF not found at: {0}")]
    ExecutableMissing(String),

    #[error("PDF not found: {0}")]
    FileMissing(String),

    #[error("Failed to launch SumatraPDF: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Printing timed out after {0:?}")]
    Timeout(Duration),

    #[error("SumatraPDF exited with code {code}: stdout={stdout} stderr={stderr}")]
    Failed {
        code: i32,
        stdout: String,
        stderr: String,
    },
}

/// Prints PDFs through a SumatraPDF executable.
pub struct SumatraPrinter {
    exe_path: PathBuf,
    printer_name: String,
}

impl SumatraPrinter {
    pub fn new(exe_path: impl Into<PathBuf>, printer_name: impl Into<String>) -> Self {
        Self {
            exe_path: exe_path.into(),
            printer_name: printer_name.into(),
        }
    }

    async fn print_pdf(&self, pdf: &Path) -> Result<(), PrintError> {
        if !tokio::fs::try_exists(&self.exe_path).await.unwrap_or(false) {
            return Err(PrintError::ExecutableMissing(
                self.exe_path.display().to_string(),
            ));
        }
        if !tokio::fs::try_exists(pdf).await.unwrap_or(false) {
            return Err(PrintError::FileMissing(pdf.display().to_string()));
        }

        tracing::info!(
            file = %pdf.display(),
            printer = %self.printer_name,
            "Launching SumatraPDF",
        );

        let mut cmd = Command::new(&self.exe_path);
        cmd.arg("-print-to")
            .arg(&self.printer_name)
            .arg("-silent")
            .arg(pdf)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // On timeout the future is dropped, which kills the child because
        // of `kill_on_drop(true)`.
        let output = tokio::time::timeout(PRINT_TIMEOUT, cmd.output())
            .await
            .map_err(|_| PrintError::Timeout(PRINT_TIMEOUT))??;

        if !output.status.success() {
            return Err(PrintError::Failed {
                code: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        tracing::info!(file = %pdf.display(), "Print completed");
        Ok(())
    }
}

#[async_trait]
impl Printer for SumatraPrinter {
    async fn print(&self, file: &Path) -> Result<(), BoxError> {
        self.print_pdf(file).await.map_err(Into::into)
    }
}
