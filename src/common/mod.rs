//! Common types and utilities shared by the package layers.
//!
//! Holds the crate-wide error type, XML escaping, random tokens and the shared
//! buffer pool used while rendering parts.

// Submodule declarations
pub mod error;
pub mod id;
pub mod metadata;
pub mod pool;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};
pub use metadata::Metadata;
pub use pool::{BufferPool, PooledBuffer};
