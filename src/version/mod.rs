// bump selection
mod classifier;
// error module
mod error;
// version values
mod triple;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the version modules.
//─────────────────────────────────────────────────────────────────────────────
pub use classifier::{ChangeReport, CompatibilityClassifier};
pub use error::ParseError;
pub use triple::{Bump, VersionTriple};
