use std::fmt;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use super::error::AppError;
use super::file_handler;

/// Installs the global `tracing` subscriber.
///
/// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise. With a log
/// file they go to that file instead, at `info` by default.
///
/// # Arguments
/// * `log_file` - The `--log-file` path, if one was given.
///
/// # Errors
/// Returns `AppError::Io` if the log file cannot be opened and
/// `AppError::Logger` if a global subscriber is already installed.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), AppError> {
    let default_filter = if log_file.is_some() { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match log_file {
        Some(path) => {
            let file = file_handler::init_log_writer(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| AppError::Logger(e.to_string()))
}

/// Writes a progress message for the user to stderr.
pub fn log_verbose_message_args(args: fmt::Arguments<'_>) {
    eprintln!("{}", args);
}

/// Writes an error message for the user to stderr and records it in the log.
pub fn log_verbose_error_args(args: fmt::Arguments<'_>) {
    tracing::error!("{}", args);
    eprintln!("ERROR: {}", args);
}
