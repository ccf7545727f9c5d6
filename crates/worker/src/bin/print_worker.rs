use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use printq_worker::config::WorkerConfig;
use printq_worker::print::PrintWorker;
use printq_worker::printer::SumatraPrinter;
use printq_worker::report::ErrorReporter;
use printq_worker::shutdown::shutdown_signal;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "printq_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();
    tracing::info!(printer = %config.printer_name, "Loaded worker configuration");

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = printq_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    printq_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    printq_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let printer = SumatraPrinter::new(config.sumatra_path.clone(), config.printer_name.clone());
    let reporter = ErrorReporter::new(config.error_webhook_url.clone());
    let worker = PrintWorker::new(pool, printer, reporter, config.poll_interval);

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    worker.run(cancel).await;
    tracing::info!("Print worker stopped");
}
