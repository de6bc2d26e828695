//! Physical package writer.
//!
//! Thin wrapper over [`zip::ZipWriter`] that applies one compression profile to
//! every entry, refuses duplicate entry names and attributes each failure to the
//! entry being written.

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::{Seek, Write};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// ZIP compression applied to every entry of a package.
///
/// Profiles only trade size for speed; the logical content of the package is
/// identical whichever one is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressionProfile {
    /// Entries are stored without compression
    Fast,
    /// Deflate at the library's default level
    #[default]
    Balanced,
    /// Deflate at the highest level
    Compact,
}

impl CompressionProfile {
    /// ZIP entry options for this profile.
    pub fn file_options(self) -> SimpleFileOptions {
        match self {
            CompressionProfile::Fast => {
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
            },
            CompressionProfile::Balanced => {
                SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
            },
            CompressionProfile::Compact => SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .compression_level(Some(9)),
        }
    }
}

/// Streaming ZIP writer for one package.
pub struct PhysPkgWriter<W: Write + Seek> {
    /// The underlying ZIP archive writer
    archive: ZipWriter<W>,
    options: SimpleFileOptions,
    /// Entry names already written, in order
    written: Vec<String>,
    seen: HashSet<String>,
}

impl<W: Write + Seek> PhysPkgWriter<W> {
    /// Start a package on `sink`.
    pub fn new(sink: W, profile: CompressionProfile) -> Self {
        Self {
            archive: ZipWriter::new(sink),
            options: profile.file_options(),
            written: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Append one entry.
    ///
    /// # Errors
    ///
    /// An I/O-class error naming `name` if the entry was already written or the
    /// sink rejects the data. Nothing is written for a duplicate name.
    pub fn write(&mut self, name: &str, blob: &[u8]) -> Result<()> {
        if self.seen.contains(name) {
            return Err(Error::Zip {
                entry: name.to_string(),
                reason: "duplicate entry name".to_string(),
            });
        }

        self.archive
            .start_file(name, self.options)
            .map_err(|e| Error::zip(name, e))?;
        self.archive
            .write_all(blob)
            .map_err(|e| Error::io(name, e))?;

        self.seen.insert(name.to_string());
        self.written.push(name.to_string());
        Ok(())
    }

    /// Entry names written so far, in order.
    pub fn entries(&self) -> &[String] {
        &self.written
    }

    /// Check if an entry name has already been written.
    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Write the central directory and hand the sink back.
    pub fn finish(self) -> Result<W> {
        let last = self.written.last().cloned().unwrap_or_default();
        self.archive.finish().map_err(|e| Error::zip(last, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn read_entry(bytes: &[u8], name: &str) -> Vec<u8> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = Vec::new();
        file.read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new(Cursor::new(Vec::new()), CompressionProfile::Balanced);
        writer.write("test.txt", b"Hello, World!").unwrap();
        let zip_data = writer.finish().unwrap().into_inner();

        assert_eq!(read_entry(&zip_data, "test.txt"), b"Hello, World!");
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let mut writer = PhysPkgWriter::new(Cursor::new(Vec::new()), CompressionProfile::Fast);
        writer.write("[Content_Types].xml", b"<Types/>").unwrap();
        writer.write("_rels/.rels", b"<Relationships/>").unwrap();
        writer.write("word/document.xml", b"<document/>").unwrap();
        assert_eq!(writer.entries(), ["[Content_Types].xml", "_rels/.rels", "word/document.xml"]);

        let zip_data = writer.finish().unwrap().into_inner();
        let mut archive = zip::ZipArchive::new(Cursor::new(zip_data)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["[Content_Types].xml", "_rels/.rels", "word/document.xml"]);
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let mut writer = PhysPkgWriter::new(Cursor::new(Vec::new()), CompressionProfile::Balanced);
        writer.write("word/media/a.png", b"one").unwrap();
        let err = writer.write("word/media/a.png", b"two").unwrap_err();
        assert_eq!(err.kind(), crate::common::ErrorKind::Io);
        assert_eq!(err.entry(), Some("word/media/a.png"));

        let zip_data = writer.finish().unwrap().into_inner();
        assert_eq!(read_entry(&zip_data, "word/media/a.png"), b"one");
    }

    #[test]
    fn test_profiles_store_same_content() {
        let payload = "<w:p>repeated text</w:p>".repeat(200);
        let mut sizes = Vec::new();
        for profile in [CompressionProfile::Fast, CompressionProfile::Balanced, CompressionProfile::Compact] {
            let mut writer = PhysPkgWriter::new(Cursor::new(Vec::new()), profile);
            writer.write("word/document.xml", payload.as_bytes()).unwrap();
            let zip_data = writer.finish().unwrap().into_inner();
            assert_eq!(read_entry(&zip_data, "word/document.xml"), payload.as_bytes());
            sizes.push(zip_data.len());
        }
        // Stored output is the largest
        assert!(sizes[0] > sizes[1]);
        assert!(sizes[0] > sizes[2]);
    }
}
