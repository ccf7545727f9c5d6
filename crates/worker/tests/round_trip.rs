//! End-to-end lifecycle tests: submission through generation and printing.

mod common;

use std::time::Duration;

use common::{
    pending_generation_job, ready_upload_job, touch_pdf, GenerateScript, RecordingPrinter,
    StubGenerator,
};
use printq_core::generate::GeneratedArtifacts;
use printq_core::sources::SOURCE_API;
use printq_db::models::status::JobStatus;
use printq_db::repositories::{PrintJobRepo, StatusEventRepo};
use printq_worker::generate::GenerateWorker;
use printq_worker::print::PrintWorker;
use printq_worker::report::ErrorReporter;
use serde_json::json;
use sqlx::PgPool;
use tempfile::tempdir;

#[sqlx::test(migrations = "../../migrations")]
async fn guides_job_travels_from_pending_to_done(pool: PgPool) {
    let dir = tempdir().unwrap();
    let guides = touch_pdf(dir.path(), "guides_20240301.pdf");

    // Submission: what the API does for POST /jobs/generate.
    let job = PrintJobRepo::create(
        &pool,
        &pending_generation_job(json!({"what": "guides", "date": "2024-03-01"})),
    )
    .await
    .unwrap();
    StatusEventRepo::try_record(&pool, job.id, None, JobStatus::Pending, SOURCE_API).await;

    // Generation stage.
    let generator = StubGenerator::new(GenerateScript::Rendered(GeneratedArtifacts {
        shipping_list_path: None,
        guides_path: Some(guides.clone()),
        orders_count: 3,
    }));
    let generate_worker = GenerateWorker::new(
        pool.clone(),
        generator,
        ErrorReporter::disabled(),
        Duration::from_millis(10),
        None,
    );
    assert!(generate_worker.poll_once().await.unwrap());

    let ready = PrintJobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(ready.status, JobStatus::Ready);
    assert_eq!(
        ready.payload,
        json!({
            "what": "guides",
            "date": "2024-03-01",
            "orders_count": 3,
            "files": [guides],
        })
    );

    // Print stage.
    let printer = RecordingPrinter::new();
    let printed = printer.printed();
    let print_worker = PrintWorker::new(
        pool.clone(),
        printer,
        ErrorReporter::disabled(),
        Duration::from_millis(10),
    );
    assert!(print_worker.poll_once().await.unwrap());

    let done = PrintJobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(done.status, JobStatus::Done);
    assert_eq!(done.payload["printed_files"], json!([guides]));
    assert!(done.printed_at.is_some());
    assert_eq!(printed.lock().unwrap().len(), 1);

    // Complete audit trail, in order, one event per transition.
    let events = StatusEventRepo::list_for_job(&pool, job.id).await.unwrap();
    let transitions: Vec<_> = events.iter().map(|e| (e.from_status, e.to_status)).collect();
    assert_eq!(
        transitions,
        vec![
            (None, JobStatus::Pending),
            (Some(JobStatus::Pending), JobStatus::Generating),
            (Some(JobStatus::Generating), JobStatus::Ready),
            (Some(JobStatus::Ready), JobStatus::Printing),
            (Some(JobStatus::Printing), JobStatus::Done),
        ]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn uploaded_pdf_skips_generation_and_prints(pool: PgPool) {
    let dir = tempdir().unwrap();
    let upload = touch_pdf(dir.path(), "a1b2c3.pdf");

    // Submission: what the API does for POST /jobs/upload.
    let job = PrintJobRepo::create(&pool, &ready_upload_job(&upload)).await.unwrap();
    StatusEventRepo::try_record(&pool, job.id, None, JobStatus::Ready, SOURCE_API).await;
    assert_eq!(job.file_path.as_deref(), Some(upload.as_str()));

    let printer = RecordingPrinter::new();
    let print_worker = PrintWorker::new(
        pool.clone(),
        printer,
        ErrorReporter::disabled(),
        Duration::from_millis(10),
    );
    assert!(print_worker.poll_once().await.unwrap());

    let done = PrintJobRepo::find_by_id(&pool, job.id).await.unwrap().unwrap();
    assert_eq!(done.status, JobStatus::Done);
    assert_eq!(done.payload["printed_files"], json!([upload]));

    let events = StatusEventRepo::list_for_job(&pool, job.id).await.unwrap();
    let transitions: Vec<_> = events.iter().map(|e| (e.from_status, e.to_status)).collect();
    assert_eq!(
        transitions,
        vec![
            (None, JobStatus::Ready),
            (Some(JobStatus::Ready), JobStatus::Printing),
            (Some(JobStatus::Printing), JobStatus::Done),
        ]
    );
}
