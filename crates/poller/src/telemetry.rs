use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const DEFAULT_FILTER: &str =
    "homework_poller=debug,homework_notifier=debug,homework_common=info";
pub const DEFAULT_LOG_FILE: &str = "program.log";

/// Log file path from `LOG_FILE`, falling back to `program.log`.
pub fn log_file_from_env() -> PathBuf {
    std::env::var("LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE))
}

/// Build a subscriber that logs to stdout and appends plain lines to `log_file`.
pub fn subscriber(
    log_file: &Path,
    filter: EnvFilter,
) -> std::io::Result<impl Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file))))
}

/// Install the global subscriber. `RUST_LOG` overrides [`DEFAULT_FILTER`].
pub fn init(log_file: &Path) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    subscriber(log_file, filter)?.try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layer_writes_plain_lines() {
        let path = std::env::temp_dir().join(format!("homework-bot-{}.log", std::process::id()));
        let subscriber = subscriber(&path, EnvFilter::new("info")).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(cursor = 42, "Homework poller started");
            tracing::debug!("filtered out");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(contents.contains("INFO"));
        assert!(contents.contains("Homework poller started"));
        assert!(contents.contains("cursor=42"));
        assert!(contents.contains("homework_poller::telemetry"));
        assert!(!contents.contains("filtered out"));
        assert!(!contents.contains('\u{1b}'));
    }
}
