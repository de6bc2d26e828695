//! Unified error types for package assembly.
//!
//! Every failure carries a machine-checkable [`ErrorKind`] and, where it applies,
//! the part path or ZIP entry it originated from.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, ErrorKind, Result};
