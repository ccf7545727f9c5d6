//! Shared stubs and fixtures for worker integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use printq_core::generate::{DocumentGenerator, GenerateOutcome, GeneratedArtifacts};
use printq_core::payload::GenerateRequest;
use printq_core::print::Printer;
use printq_core::types::BoxError;
use printq_db::models::print_job::CreatePrintJob;
use printq_db::models::status::{JobStatus, JobType};
use serde_json::json;

// ---------------------------------------------------------------------------
// Generator stub
// ---------------------------------------------------------------------------

/// What a stubbed generation call should produce.
pub enum GenerateScript {
    Rendered(GeneratedArtifacts),
    NoOrders(String),
    Fail(String),
}

/// Scripted stand-in for the renderer service. Records every request it
/// receives; the log handle survives moving the stub into a worker.
pub struct StubGenerator {
    script: GenerateScript,
    calls: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl StubGenerator {
    pub fn new(script: GenerateScript) -> Self {
        Self {
            script,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_log(&self) -> Arc<Mutex<Vec<GenerateRequest>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DocumentGenerator for StubGenerator {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, BoxError> {
        self.calls.lock().unwrap().push(request.clone());
        match &self.script {
            GenerateScript::Rendered(artifacts) => Ok(GenerateOutcome::Rendered(artifacts.clone())),
            GenerateScript::NoOrders(note) => Ok(GenerateOutcome::NoOrders { note: note.clone() }),
            GenerateScript::Fail(message) => Err(message.clone().into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Printer stub
// ---------------------------------------------------------------------------

/// Records printed files; optionally rejects one specific path.
pub struct RecordingPrinter {
    printed: Arc<Mutex<Vec<PathBuf>>>,
    fail_on: Option<PathBuf>,
}

impl RecordingPrinter {
    pub fn new() -> Self {
        Self {
            printed: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
        }
    }

    pub fn failing_on(path: impl Into<PathBuf>) -> Self {
        Self {
            printed: Arc::new(Mutex::new(Vec::new())),
            fail_on: Some(path.into()),
        }
    }

    pub fn printed(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        Arc::clone(&self.printed)
    }
}

#[async_trait]
impl Printer for RecordingPrinter {
    async fn print(&self, file: &Path) -> Result<(), BoxError> {
        if self.fail_on.as_deref() == Some(file) {
            return Err(format!("printer rejected {}", file.display()).into());
        }
        self.printed.lock().unwrap().push(file.to_path_buf());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Job fixtures
// ---------------------------------------------------------------------------

pub fn pending_generation_job(payload: serde_json::Value) -> CreatePrintJob {
    CreatePrintJob {
        job_type: JobType::ShippingDocs,
        status: JobStatus::Pending,
        payload,
        file_path: None,
    }
}

pub fn ready_job_with_files(files: Vec<String>) -> CreatePrintJob {
    CreatePrintJob {
        job_type: JobType::ShippingDocs,
        status: JobStatus::Ready,
        payload: json!({
            "what": "guides",
            "date": "2024-03-01",
            "orders_count": files.len(),
            "files": files,
        }),
        file_path: None,
    }
}

pub fn ready_upload_job(file: &str) -> CreatePrintJob {
    CreatePrintJob {
        job_type: JobType::Upload,
        status: JobStatus::Ready,
        payload: json!({
            "original_name": "invoice.pdf",
            "content_type": "application/pdf",
            "files": [file],
        }),
        file_path: Some(file.to_owned()),
    }
}

/// Write a minimal PDF-looking file and return its path as a string.
pub fn touch_pdf(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.4\n").unwrap();
    path.to_string_lossy().into_owned()
}
