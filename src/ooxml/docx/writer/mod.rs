//! DOCX package writer.
//!
//! [`PackageWriter`] drives the part generators in [`parts`] and appends their
//! output, followed by the media payloads, to a ZIP stream.

mod options;
mod package;
pub mod parts;

pub use options::{NumberingPolicy, WriteOptions, WriteStrategy};
pub use package::{PackageWriter, WriterState};
