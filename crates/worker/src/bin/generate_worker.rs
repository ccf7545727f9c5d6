use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use printq_renderer::RendererClient;
use printq_worker::config::WorkerConfig;
use printq_worker::generate::GenerateWorker;
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
    tracing::info!(renderer_url = %config.renderer_url, "Loaded worker configuration");

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

    let generator = RendererClient::new(config.renderer_url.clone());
    let reporter = ErrorReporter::new(config.error_webhook_url.clone());
    let worker = GenerateWorker::new(
        pool,
        generator,
        reporter,
        config.poll_interval,
        config.heartbeat_interval,
    );

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    worker.run(cancel).await;
    tracing::info!("Generation worker stopped");
}
