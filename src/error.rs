use thiserror::Error;

use crate::ast_loader::LoadError;
use crate::path::TraversalError;
use crate::version::ParseError;

/// Every failure the entry points can report, kept distinct so callers can
/// match on the condition rather than on a message.
#[derive(Error, Debug)]
pub enum SemverError {
    /// An artifact could not be found, read or parsed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The old version string is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Exploration met an inconsistent object model.
    #[error(transparent)]
    Traversal(#[from] TraversalError),
}
