/// Open Packaging Conventions (OPC) layer.
///
/// This module provides the package-level building blocks of an Office Open XML
/// document writer:
///
/// - Relationship graph with stable rIds and deduplicating indices
/// - Part abstraction
/// - Content type registry
/// - ZIP-based physical packaging
///
/// # Performance Features
///
/// - Uses `phf` for compile-time relationship type lookups
/// - Uses `itoa` for allocation-light rId formatting
/// - Uses `aho-corasick` for single-pass XML escaping
/// - Uses hash maps for O(1) lookups

pub mod constants;
pub mod content_types;
pub mod error;
pub mod merge;
pub mod part;
pub mod phys_pkg;
pub mod rel;
pub mod reltype;

// Re-export commonly used types
pub use content_types::ContentTypes;
pub use error::ValidationError;
pub use part::Part;
pub use phys_pkg::{CompressionProfile, PhysPkgWriter};
pub use rel::{IdMapping, Relationship, RelationshipScope, Relationships, TargetMode};
pub use reltype::RelationshipKind;
