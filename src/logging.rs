//! Tracing setup.
//!
//! A full-screen program cannot log to the terminal it draws on, so all
//! diagnostics go to a daily-rolling file under the user cache directory
//! (`tgrep/logs/tgrep.log.YYYY-MM-DD`). Verbosity is controlled with the
//! `TGREP_LOG` environment variable, e.g. `TGREP_LOG=tgrep=debug`.

use std::panic;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TGREP_LOG";
const DEFAULT_FILTER: &str = "tgrep=info";

/// Install the global subscriber. The returned guard must be held for the
/// lifetime of the process or buffered log lines are dropped on exit.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;

    let appender = tracing_appender::rolling::daily(&dir, "tgrep.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    install_panic_hook();
    Some(guard)
}

fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("tgrep").join("logs"))
}

/// Panics in raw mode are invisible on screen; record them in the log
/// before the default hook runs.
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        tracing::error!(target: "tgrep", "panic: {info}");
        default_hook(info);
    }));
}
