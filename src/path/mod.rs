// node chains
mod chain;
// exploration settings
pub mod config;
// error module
mod error;
// explorer module
mod explorer;
// canonical output
mod signature;
// node variants
mod symbol;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports from the path modules.
//─────────────────────────────────────────────────────────────────────────────
pub use chain::{ChainArena, PathChain};
pub use config::{ExclusionRegistry, ExplorerConfig};
pub use error::TraversalError;
pub use explorer::Explorer;
pub use signature::SignatureSet;
pub use symbol::{Expansion, SymbolNode};
