//! Semantic-version bumps from the public API surface of Python modules.
//!
//! An artifact (module or package) is loaded into an object model, explored
//! breadth first into a set of canonical path signatures, and two such sets
//! are compared to decide between a major, minor or patch bump.

pub mod ast_loader;
pub mod bump;
pub mod error;
pub mod object_model;
pub mod path;
pub mod version;

pub use bump::{
    compare_artifacts, compute_next_version, explore_signatures, explore_signatures_with,
    Comparison,
};
pub use error::SemverError;
