//! Core argument-parsing primitives for the argon toolkit.
//!
//! This crate provides the foundation a command dispatcher is built on: a
//! registry of pre-declared `-key=value` options scanned off the front of
//! an argument vector, a lenient string-to-typed-value conversion layer,
//! and a cursor for consuming the remaining positional tokens in order.

mod convert;
mod cursor;
mod error;
mod registry;

// Re-export core types
pub use convert::FromToken;
pub use cursor::{ArgCursor, UsageHook};
pub use error::{ArgError, Result};
pub use registry::{OptionRegistry, OptionSpec};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
