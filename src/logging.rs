//! Tracing setup.  Logs go to a daily-rolled file; the terminal belongs to
//! the UI.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "MODEL_CHAT_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.  Keep the returned guard alive until exit
/// so buffered lines are flushed.
///
/// When the log directory cannot be used, tracing still gets a subscriber
/// but nothing is written.
pub fn init(log_dir: &Path) -> Option<WorkerGuard> {
    let appender = fs::create_dir_all(log_dir)
        .map_err(|err| err.to_string())
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("model-chat")
                .filename_suffix("log")
                .build(log_dir)
                .map_err(|err| err.to_string())
        });

    match appender {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .with(env_filter())
                .init();
            tracing::info!(dir = %log_dir.display(), "Logging initialized");
            Some(guard)
        }
        Err(_) => {
            // Prefer no logs over writing into the terminal the UI draws on.
            tracing_subscriber::registry().with(env_filter()).init();
            None
        }
    }
}
