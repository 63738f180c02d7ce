use crate::ast_loader::LoadError;
use thiserror::Error;

// Error type for API-surface exploration.
#[derive(Error, Debug)]
pub enum TraversalError {
    /// A member listed in a value's directory could not be looked up.
    #[error("Member '{name}' is listed on '{owner}' but could not be resolved")]
    UnresolvedMember { owner: String, name: String },

    /// Discovering the nested modules of a package failed.
    #[error("Failed to load nested modules of '{module}': {source}")]
    SubmoduleLoad {
        module: String,
        #[source]
        source: LoadError,
    },
}
