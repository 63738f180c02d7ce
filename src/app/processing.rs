//! Per-artifact steps of the command-line front end: exploring one revision
//! and summarising the comparison of two.

use std::io::{self, Write};
use std::path::Path;

use pyapi_semver::explore_signatures;
use pyapi_semver::path::SignatureSet;
use pyapi_semver::version::ChangeReport;

use super::error::AppError;
use super::file_handler;
use super::verbose_println;

/// Validates and explores one artifact.
///
/// # Arguments
/// * `artifact_path` - The module file or package directory to explore.
/// * `quiet_mode` - Suppresses progress output if true.
///
/// # Returns
/// The artifact's public signatures, or an `AppError` if the path is invalid
/// or the library fails to load or explore it.
pub fn explore_artifact(artifact_path: &Path, quiet_mode: bool) -> Result<SignatureSet, AppError> {
    file_handler::validate_artifact_path(artifact_path, quiet_mode)?;
    verbose_println!(quiet_mode, "Exploring {} ...", artifact_path.display());
    let signatures = explore_signatures(artifact_path)?;
    verbose_println!(
        quiet_mode,
        "   => Found {} public signature(s).",
        signatures.len()
    );
    Ok(signatures)
}

/// Writes one signature per line, in sorted order.
///
/// # Errors
/// Returns an `io::Error` if `writer` fails.
pub fn write_signatures(signatures: &SignatureSet, writer: &mut dyn Write) -> io::Result<()> {
    for signature in signatures.iter() {
        writeln!(writer, "{}", signature)?;
    }
    Ok(())
}

/// Lists what drove the bump decision: the bump kind, then the removed and
/// added signatures.
///
/// # Arguments
/// * `report` - The `ChangeReport` of a comparison.
/// * `writer` - Destination, stderr for `--explain`.
///
/// # Errors
/// Returns an `io::Error` if `writer` fails.
pub fn write_change_summary(report: &ChangeReport, writer: &mut dyn Write) -> io::Result<()> {
    writeln!(writer, "Bump: {}", report.bump)?;
    writeln!(writer, "Removed ({}):", report.removed.len())?;
    for signature in &report.removed {
        writeln!(writer, "  - {}", signature)?;
    }
    writeln!(writer, "Added ({}):", report.added.len())?;
    for signature in &report.added {
        writeln!(writer, "  + {}", signature)?;
    }
    Ok(())
}
