//! Tracing setup for the helpcenter binary.
//!
//! The TUI owns the terminal, so a TUI session writes to
//! `<state>/logs/helpcenter-<UTC timestamp>.log`. One-shot commands log to
//! stderr.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use helpcenter::config::Config;

/// Keeps the file writer alive for the whole session
pub struct LoggingHandle {
    /// Flushes buffered lines when dropped
    pub _guard: Option<WorkerGuard>,
    pub log_file_path: Option<PathBuf>,
}

fn log_file_name(timestamp: DateTime<Utc>) -> String {
    format!("helpcenter-{}.log", timestamp.format("%Y%m%dT%H%M%SZ"))
}

fn logs_to_file(config: &Config, is_tui_mode: bool) -> bool {
    is_tui_mode && config.logging.to_file
}

/// `RUST_LOG` wins over `--debug`, which wins over `logging.level`
fn env_filter(config: &Config, debug_override: bool) -> EnvFilter {
    let level = if debug_override {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let filter = env_filter(config, debug_override);

    if !logs_to_file(config, is_tui_mode) {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install stderr logger")?;
        return Ok(LoggingHandle {
            _guard: None,
            log_file_path: None,
        });
    }

    let logs_dir = config.logs_path();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory {}", logs_dir.display()))?;

    let file_name = log_file_name(Utc::now());
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, &file_name));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .try_init()
        .context("Failed to install file logger")?;

    Ok(LoggingHandle {
        _guard: Some(guard),
        log_file_path: Some(logs_dir.join(file_name)),
    })
}

/// Print the session log path if anything was written to it
pub fn report_log_file(log_file_path: Option<&Path>) {
    let non_empty = log_file_path
        .and_then(|path| path.metadata().ok())
        .is_some_and(|meta| meta.len() > 0);
    if let (true, Some(path)) = (non_empty, log_file_path) {
        eprintln!("Session log: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.state = dir.path().to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_log_file_name_is_utc_timestamped() {
        let timestamp = Utc.with_ymd_and_hms(2026, 3, 1, 8, 5, 9).unwrap();
        assert_eq!(log_file_name(timestamp), "helpcenter-20260301T080509Z.log");
    }

    #[test]
    fn test_only_tui_sessions_log_to_file() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(&dir);
        assert!(!logs_to_file(&config, false));
        assert!(logs_to_file(&config, true));

        config.logging.to_file = false;
        assert!(!logs_to_file(&config, true));
    }

    #[test]
    fn test_logs_live_under_state_dir() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        assert_eq!(config.logs_path(), dir.path().join("logs"));
    }

    #[test]
    fn test_report_log_file_ignores_missing_file() {
        let dir = TempDir::new().unwrap();
        report_log_file(Some(&dir.path().join("missing.log")));
        report_log_file(None);
    }
}
