//! Office Open XML (OOXML) package writing.
//!
//! The module is organized into two layers:
//!
//! 1. **OPC Layer** (`opc`): package-level concerns shared by every OOXML
//!    format: parts, content types, the relationship graph and the ZIP writer
//! 2. **WordprocessingML** (`docx`): the document model, the part generators
//!    and the package writer
pub mod docx;
pub mod opc;

// Re-export commonly used types from OPC layer
pub use opc::{ContentTypes, Part, RelationshipKind, Relationships};
