//! Logging for the Tonecraft terminal application.
//!
//! Always writes to `<log_dir>/tonecraft.log`. With `--verbose` the same
//! records are echoed, colored, to stderr; stdout belongs to the screens.

use crate::error::TonecraftError;

use common::ErrorLocation;

use std::io::stderr;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

pub const LOG_FILE_NAME: &str = "tonecraft.log";

const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize the logger.
///
/// Safe to call more than once: later calls log a warning and return Ok.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file (created if missing)
/// * `echo_to_stderr` - Also write colored records to stderr
///
/// # Errors
///
/// Returns an error if the directory or log file cannot be created, or if
/// another global logger is already installed.
pub fn initialize(log_dir: &Path, echo_to_stderr: bool) -> Result<(), TonecraftError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir, echo_to_stderr);
        if result.is_ok() {
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
        }
    });

    result
}

#[track_caller]
fn initialize_internal(log_dir: &Path, echo_to_stderr: bool) -> Result<(), TonecraftError> {
    std::fs::create_dir_all(log_dir).map_err(|e| TonecraftError::Tonecraft {
        message: format!("Failed to create log directory {}: {e}", log_dir.display()),
        location: ErrorLocation::from(std::panic::Location::caller()),
    })?;

    let log_file_path = log_dir.join(LOG_FILE_NAME);

    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(
            fern::log_file(&log_file_path).map_err(|e| TonecraftError::Tonecraft {
                message: format!("Failed to create log file: {e}"),
                location: ErrorLocation::from(std::panic::Location::caller()),
            })?,
        );

    let mut base_dispatch = Dispatch::new().level(LOG_LEVEL).chain(file_dispatch);

    if echo_to_stderr {
        let color_configuration = ColoredLevelConfig::new()
            .debug(Blue)
            .info(Green)
            .warn(Yellow)
            .error(Red)
            .trace(Magenta);

        let stderr_dispatch = Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{date} - {level}] {message}",
                    date = format_rfc3339(SystemTime::now()),
                    level = color_configuration.color(record.level()),
                    message = message,
                ))
            })
            .chain(stderr());

        base_dispatch = base_dispatch.chain(stderr_dispatch);
    }

    base_dispatch.apply().map_err(|e| TonecraftError::Tonecraft {
        message: format!("Failed to initialize logger: {e}"),
        location: ErrorLocation::from(std::panic::Location::caller()),
    })?;

    Ok(())
}
