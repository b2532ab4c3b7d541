//! File logging bootstrap.
//!
//! The terminal UI owns stdout, so log records go to a rotating file under the data
//! directory. Initialisation happens at most once per process and never panics.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

/// Environment variable that overrides the configured level with a full filter string
pub const LOG_ENV_VAR: &str = "NOTEBAR_LOG";

const LOG_FILE_BASENAME: &str = "notebar";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Start file logging in `<data_dir>/logs`.
///
/// `level` comes from the config file; a `NOTEBAR_LOG` filter string wins over it.
/// Calling again with the same directory is a no-op; a different directory is an error.
pub fn init_logging(level: &str, data_dir: &Path) -> Result<PathBuf> {
    let log_dir = data_dir.join("logs");

    if let Some(state) = LOGGING_STATE.get() {
        if state.log_dir != log_dir {
            bail!(
                "logging already initialized at {}; refusing to switch to {}",
                state.log_dir.display(),
                log_dir.display()
            );
        }
        return Ok(log_dir);
    }

    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(filter) if !filter.trim().is_empty() => filter,
        _ => normalize_level(level)?.to_string(),
    };

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let logger = Logger::try_with_str(&filter)
            .map_err(|err| anyhow!("invalid log filter `{}`: {}", filter, err))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| anyhow!("failed to start logger: {}", err))?;

        info!(
            "event=app_start version={} filter={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            filter,
            log_dir.display()
        );

        Ok(LoggingState {
            log_dir: log_dir.clone(),
            _logger: logger,
        })
    })?;

    Ok(state.log_dir.clone())
}

/// Map a configured level name onto the canonical one.
pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => bail!(
            "unsupported log level `{}`; expected trace|debug|info|warn|error",
            other
        ),
    }
}
