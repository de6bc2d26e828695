//! Loquat - A Rust library for writing Word (.docx) packages
//!
//! This library assembles DOCX packages from an in-memory document model. The
//! package is a ZIP container of XML parts bound together by a relationship
//! graph, plus the raw media those parts reference.
//!
//! # Features
//!
//! - **Relationship store**: stable `rIdN` ids, lookups by kind and target,
//!   deduplication of repeated targets and merging of independent graphs
//! - **Part generators**: content types, manifests, body, styles, numbering,
//!   core and extended properties
//! - **Parallel assembly**: parts render concurrently while the ZIP stream is
//!   appended strictly in package order
//! - **YAML configuration**: compression, strategy and numbering options
//!
//! # Example
//!
//! ```no_run
//! use loquat::ooxml::docx::{Document, ListStyle, PackageWriter, WriteOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new();
//! doc.add_heading("Release notes", 1)?;
//! doc.add_paragraph("This release adds parallel package assembly.");
//! doc.add_list_item("Faster writes", ListStyle::Bullet, 0)?;
//! doc.add_hyperlink("Project page", "https://example.com");
//!
//! let file = std::fs::File::create("notes.docx")?;
//! PackageWriter::new(WriteOptions::default()).write(&doc, file)?;
//! # Ok(())
//! # }
//! ```

/// Shared error type, metadata, XML escaping and buffer pooling
pub mod common;

/// OOXML (Office Open XML) package writing
///
/// The `opc` layer knows about parts, relationships and ZIP entries; the
/// `docx` layer builds WordprocessingML on top of it.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, ErrorKind, Metadata, Result};
pub use ooxml::docx::{Document, PackageWriter, WriteOptions};
