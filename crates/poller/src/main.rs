use homework_common::config::AppConfig;
use homework_notifier::TelegramBot;
use homework_poller::client::{PracticumClient, http_client};
use homework_poller::poller::HomeworkPoller;
use homework_poller::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    telemetry::init(&telemetry::log_file_from_env())?;

    tracing::info!("Homework bot starting...");

    // Missing credentials are fatal here, before the loop starts
    let config = AppConfig::from_env()?;

    let http = http_client(config.request_timeout)?;
    let api = PracticumClient::from_config(http.clone(), &config);
    let bot = TelegramBot::from_config(http, &config);

    let start = chrono::Utc::now().timestamp();
    let mut poller = HomeworkPoller::new(api, bot, config.retry_period, start);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    let handle = tokio::spawn(async move { poller.run(shutdown_rx).await });

    tokio::signal::ctrl_c().await?;
    tracing::info!("Received shutdown signal, stopping gracefully...");
    shutdown_tx.send(true).ok();
    handle.await?;

    tracing::info!("Homework bot stopped.");
    Ok(())
}
