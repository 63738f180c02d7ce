use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for artifact loading operations.
/// Covers every way a Python module or package can fail to become an
/// object model: missing paths, unreadable files and syntax errors.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The locator does not point at an existing file or directory.
    #[error("Artifact not found: '{0}'")]
    NotFound(String),

    /// Error when reading a file.
    #[error("Failed to read file '{0}': {1}")]
    ReadFile(String, std::io::Error),

    /// Error when listing the contents of a package directory.
    #[error("Failed to list package directory '{0}': {1}")]
    ReadDir(String, std::io::Error),

    /// Error when parsing the AST.
    #[error("Failed to parse AST from '{0}': {1}")]
    ParseAst(String, rustpython_parser::ParseError),

    /// The locator has no usable module name (e.g. a filesystem root).
    #[error("Could not determine module name from '{0}'")]
    ModuleName(String),
}
