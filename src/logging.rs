//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The terminal belongs to the UI, so events go to a log file through a
//! non-blocking `tracing-appender` writer. `RUST_LOG` overrides the
//! configured level.

use crate::error::{MapError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `country_map=debug`.
    pub level: String,
    pub file: PathBuf,
}

/// Filter from `RUST_LOG` when set, otherwise from `level`.
fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(level),
    }
}

fn parse_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| MapError::Logging(format!("bad filter '{level}': {e}")))
}

fn split_path(file: &Path) -> Result<(PathBuf, PathBuf)> {
    let name = file
        .file_name()
        .ok_or_else(|| MapError::Logging(format!("log path {} has no file name", file.display())))?;
    let dir = file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir.to_path_buf(), PathBuf::from(name)))
}

/// Install the global subscriber. Keep the returned guard alive for the whole
/// run or buffered events are lost.
pub fn init_logging(config: &LogConfig) -> Result<WorkerGuard> {
    let (dir, name) = split_path(&config.file)?;
    fs::create_dir_all(&dir).map_err(|source| MapError::FileWrite {
        path: dir.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, &name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = build_filter(&config.level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|e| MapError::Logging(e.to_string()))?;

    tracing::info!(file = %config.file.display(), "logging initialised");
    Ok(guard)
}
