//! WordprocessingML (.docx) document model and package writer.
//!
//! Build a [`Document`], then hand it to a [`PackageWriter`]:
//!
//! ```rust,no_run
//! use loquat::ooxml::docx::{Document, PackageWriter, WriteOptions};
//!
//! let mut doc = Document::new();
//! doc.add_heading("Hello", 1)?;
//! doc.add_paragraph("Written by loquat.");
//!
//! let mut writer = PackageWriter::new(WriteOptions::default());
//! let bytes = writer.write_to_bytes(&doc)?;
//! std::fs::write("hello.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod document;
pub mod media;
pub mod numbering;
pub mod paragraph;
pub mod snapshot;
pub mod styles;
pub mod writer;

pub use document::Document;
pub use media::{ImageFormat, MediaResource};
pub use numbering::{ListStyle, NumberingCatalog};
pub use paragraph::{Alignment, Paragraph, Picture, Run};
pub use snapshot::{DocumentSnapshot, Element, ElementKind};
pub use styles::{Style, StyleSheet, StyleType};
pub use writer::{NumberingPolicy, PackageWriter, WriteOptions, WriteStrategy, WriterState};
