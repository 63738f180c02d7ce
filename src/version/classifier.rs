use tracing::debug;

use super::error::ParseError;
use super::triple::{Bump, VersionTriple};
use crate::path::SignatureSet;

/// Outcome of comparing two API revisions, with the signatures behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeReport {
    pub bump: Bump,
    /// Old signatures missing from the new revision, sorted.
    pub removed: Vec<String>,
    /// New signatures absent from the old revision, sorted.
    pub added: Vec<String>,
}

/// Derives a version bump from two signature sets.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompatibilityClassifier;

impl CompatibilityClassifier {
    /// Removal of anything dominates; otherwise additions make a minor bump
    /// and identical sets a patch bump.
    pub fn classify(old: &SignatureSet, new: &SignatureSet) -> Bump {
        if !old.is_subset(new) {
            Bump::Major
        } else if new.is_strict_superset(old) {
            Bump::Minor
        } else {
            Bump::Patch
        }
    }

    pub fn next_version(
        old: &SignatureSet,
        new: &SignatureSet,
        version: &VersionTriple,
    ) -> Result<VersionTriple, ParseError> {
        let bump = Self::classify(old, new);
        let next = version.bump(bump)?;
        debug!(%bump, from = %version, to = %next, "classified API change");
        Ok(next)
    }

    pub fn report(old: &SignatureSet, new: &SignatureSet) -> ChangeReport {
        ChangeReport {
            bump: Self::classify(old, new),
            removed: old.removed_from(new),
            added: old.added_in(new),
        }
    }
}
