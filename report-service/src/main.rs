use report_service::config::ReportConfig;
use report_service::services::init_metrics;
use report_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics()?;

    let config = ReportConfig::load()?;

    init_tracing(
        "report-service",
        &config.common.log_level,
        config.telemetry.otlp_endpoint.as_deref(),
    )?;

    tracing::info!(
        image_path = %config.assets.image_path.display(),
        otlp = config.telemetry.otlp_endpoint.is_some(),
        "Starting report-service"
    );

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
