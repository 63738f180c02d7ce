use thiserror::Error;

use super::triple::Bump;

// Error type for version string parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The string is not three dot-separated components.
    #[error("Version '{0}' is not of the form MAJOR.MINOR.PATCH")]
    Format(String),

    /// One component is not a canonical non-negative integer.
    #[error(
        "Version component '{component}' in '{input}' is not a non-negative integer without leading zeros"
    )]
    Component { input: String, component: String },

    /// A bump would carry a component past `u64::MAX`.
    #[error("Version '{version}' cannot take a {bump} bump without overflowing")]
    Overflow { version: String, bump: Bump },
}
