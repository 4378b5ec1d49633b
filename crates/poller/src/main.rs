use relay_common::config::AppConfig;
use relay_common::logging::{self, LogSettings};
use relay_notifier::TelegramNotifier;
use relay_poller::{HomeworkPoller, ReviewClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first so the error log location is known
    let config = AppConfig::from_env();
    let log_settings = config.as_ref().map(LogSettings::from).unwrap_or_default();
    logging::init_tracing(&log_settings)?;

    tracing::info!("ReviewRelay starting...");

    let poller = match HomeworkPoller::bootstrap(config, |config| {
        (
            ReviewClient::from_config(config),
            TelegramNotifier::from_config(config),
        )
    }) {
        Ok(poller) => poller,
        // `bootstrap` has already logged the critical record.
        Err(_) => std::process::exit(1),
    };

    // Run with graceful shutdown on Ctrl+C
    tokio::select! {
        result = poller.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Poller exited with error");
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping gracefully...");
        }
    }

    tracing::info!("ReviewRelay stopped.");
    Ok(())
}
