//! Main application orchestrator.
//!
//! Installs logging, then dispatches the subcommand:
//! - `bump` validates both revisions, compares them and prints the next
//!   version on stdout, with the change summary on stderr under `--explain`.
//! - `signatures` prints the public signatures of one artifact on stdout.

use std::io::{self, Write};
use std::path::Path;

use pyapi_semver::compare_artifacts;

use super::cli::{Cli, Command};
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing;
use super::{verbose_eprintln, verbose_println};

/// Runs the application for already parsed command-line arguments.
///
/// # Arguments
/// * `cli` - The `Cli` struct containing parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` for invalid paths, logging setup failures, and any
/// load, traversal or version error raised by the library.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;
    logger::init_tracing(cli.log_file.as_deref())?;

    match cli.command {
        Command::Bump {
            old_version,
            old_path,
            new_path,
            explain,
        } => run_bump(&old_version, &old_path, &new_path, explain, quiet_mode),
        Command::Signatures { path } => run_signatures(&path, quiet_mode),
    }
}

/// Compares two revisions and prints the next version.
///
/// # Arguments
/// * `old_version` - The version string of the old revision, parsed strictly.
/// * `old_path` - The old revision's module file or package directory.
/// * `new_path` - The new revision's module file or package directory.
/// * `explain` - Also writes the change summary to stderr if true.
/// * `quiet_mode` - Suppresses progress output if true.
///
/// # Errors
/// Returns `AppError::InvalidPath` for a bad locator, `AppError::Semver` if
/// loading, exploring or bumping fails, and `AppError::Io` if stdout or stderr
/// cannot be written.
fn run_bump(
    old_version: &str,
    old_path: &Path,
    new_path: &Path,
    explain: bool,
    quiet_mode: bool,
) -> Result<(), AppError> {
    file_handler::validate_artifact_path(old_path, quiet_mode)?;
    file_handler::validate_artifact_path(new_path, quiet_mode)?;

    verbose_println!(
        quiet_mode,
        "Comparing {} against {} (old version {}) ...",
        new_path.display(),
        old_path.display(),
        old_version
    );
    let comparison = match compare_artifacts(old_version, old_path, new_path) {
        Ok(comparison) => comparison,
        Err(e) => {
            verbose_eprintln!(quiet_mode, "Comparison failed: {}", e);
            return Err(e.into());
        }
    };
    verbose_println!(
        quiet_mode,
        "   => {} old and {} new signature(s), {} bump.",
        comparison.old_signatures.len(),
        comparison.new_signatures.len(),
        comparison.report.bump
    );

    if explain {
        processing::write_change_summary(&comparison.report, &mut io::stderr().lock())?;
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", comparison.new_version)?;
    stdout.flush()?;
    Ok(())
}

/// Prints the public signatures of one artifact, one per line.
///
/// # Arguments
/// * `path` - The module file or package directory to explore.
/// * `quiet_mode` - Suppresses progress output if true.
///
/// # Errors
/// Returns `AppError` if the path is invalid, exploration fails, or stdout
/// cannot be written.
fn run_signatures(path: &Path, quiet_mode: bool) -> Result<(), AppError> {
    let signatures = processing::explore_artifact(path, quiet_mode)?;
    let mut stdout = io::stdout().lock();
    processing::write_signatures(&signatures, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
