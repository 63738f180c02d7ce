//! Entry points: explore one artifact, or compute the next version of an
//! artifact from its old and new revisions.

use std::path::Path;

use tracing::info;

use crate::ast_loader::PythonModel;
use crate::error::SemverError;
use crate::path::{Explorer, ExplorerConfig, SignatureSet};
use crate::version::{ChangeReport, CompatibilityClassifier, VersionTriple};

/// Result of comparing two revisions of an artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub old_version: VersionTriple,
    pub new_version: VersionTriple,
    pub report: ChangeReport,
    pub old_signatures: SignatureSet,
    pub new_signatures: SignatureSet,
}

/// Loads the artifact at `locator` and explores its public API with the
/// default configuration.
pub fn explore_signatures(locator: impl AsRef<Path>) -> Result<SignatureSet, SemverError> {
    explore_signatures_with(locator, &ExplorerConfig::default())
}

/// Like [`explore_signatures`], with an explicit configuration.
pub fn explore_signatures_with(
    locator: impl AsRef<Path>,
    config: &ExplorerConfig,
) -> Result<SignatureSet, SemverError> {
    let model = PythonModel::load(locator.as_ref())?;
    let signatures = Explorer::new(config.clone()).explore(&model, model.root())?;
    Ok(signatures)
}

/// Explores both revisions, parses `old_version` and classifies the change.
///
/// # Errors
/// `SemverError::Load` if either artifact cannot be loaded,
/// `SemverError::Traversal` if exploring one fails, and
/// `SemverError::Parse` if `old_version` is malformed or the bump would
/// overflow a component. Artifacts are explored before the version is parsed.
pub fn compare_artifacts(
    old_version: &str,
    old_locator: impl AsRef<Path>,
    new_locator: impl AsRef<Path>,
) -> Result<Comparison, SemverError> {
    let old_signatures = explore_signatures(old_locator)?;
    let new_signatures = explore_signatures(new_locator)?;
    let old_version: VersionTriple = old_version.parse()?;

    let report = CompatibilityClassifier::report(&old_signatures, &new_signatures);
    let new_version = old_version.bump(report.bump)?;
    info!(
        bump = %report.bump,
        from = %old_version,
        to = %new_version,
        removed = report.removed.len(),
        added = report.added.len(),
        "computed next version"
    );

    Ok(Comparison {
        old_version,
        new_version,
        report,
        old_signatures,
        new_signatures,
    })
}

/// The next version string for an artifact whose old revision was
/// `old_version`.
pub fn compute_next_version(
    old_version: &str,
    old_locator: impl AsRef<Path>,
    new_locator: impl AsRef<Path>,
) -> Result<String, SemverError> {
    let comparison = compare_artifacts(old_version, old_locator, new_locator)?;
    Ok(comparison.new_version.to_string())
}
