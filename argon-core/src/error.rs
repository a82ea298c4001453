//! Error types for the argon parsing core.

use thiserror::Error;

/// Failures raised while scanning named options or looking them up.
///
/// Every fatal condition is a variant here; exhaustion of positional
/// arguments is deliberately not an error (see [`crate::ArgCursor::pop`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A token began with the option prefix but carried no `=` delimiter
    #[error("Invalid option '{0}'")]
    InvalidOptionSyntax(String),

    /// A key was not declared in the registry's schema
    #[error("Unknown option '{0}'")]
    UnknownOption(String),

    /// An option was matched a second time in the same scan pass
    #[error("Option '{0}' set twice")]
    DuplicateOption(String),
}

/// Result type alias for argon operations
pub type Result<T> = std::result::Result<T, ArgError>;
