//! Package assembly.
//!
//! [`PackageWriter`] turns a [`DocumentSnapshot`] into a complete DOCX archive.
//! Parts are rendered either one at a time or concurrently on the rayon pool,
//! but the ZIP stream itself only ever sees one append at a time and always in
//! the same order:
//!
//! ```text
//! [Content_Types].xml
//! _rels/.rels
//! word/_rels/document.xml.rels
//! word/document.xml
//! docProps/core.xml
//! docProps/app.xml
//! word/numbering.xml
//! word/styles.xml
//! word/settings.xml ... word/theme/theme1.xml   (auxiliary parts only)
//! word/media/<name>                             (zero or more)
//! ```

use super::options::{WriteOptions, WriteStrategy};
use super::parts::{
    AppPropertiesPart, ContentTypesPart, CorePropertiesPart, DocumentPart,
    DocumentRelationshipsPart, FontTablePart, NumberingPart, PackageRelationshipsPart,
    SettingsPart, StylesPart, ThemePart, WebSettingsPart,
};
use crate::common::{Error, Result};
use crate::ooxml::docx::media::MediaResource;
use crate::ooxml::docx::snapshot::DocumentSnapshot;
use crate::ooxml::opc::{PhysPkgWriter, RelationshipKind, ValidationError};
use crate::ooxml::opc::part::Part;
use rayon::prelude::*;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, info, warn};

/// Entry name used for errors raised while copying a finished package to a
/// caller's stream.
const STREAM_ENTRY: &str = "<package>";

/// Lifecycle of a [`PackageWriter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WriterState {
    /// Nothing written yet
    #[default]
    Idle,
    /// A `write` call is in progress
    Assembling,
    /// The last `write` produced a complete package
    Finalized,
    /// The last `write` failed
    Failed,
}

/// Writes document snapshots as DOCX packages.
///
/// A writer may be reused; every call to [`write`](Self::write) starts over
/// from [`WriterState::Assembling`].
#[derive(Debug, Clone, Default)]
pub struct PackageWriter {
    options: WriteOptions,
    state: WriterState,
}

type BoxedPart<'a> = Box<dyn Part + 'a>;

impl PackageWriter {
    pub fn new(options: WriteOptions) -> Self {
        Self {
            options,
            state: WriterState::Idle,
        }
    }

    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    pub fn state(&self) -> WriterState {
        self.state
    }

    /// Write `doc` as a package into `sink` and hand the sink back.
    ///
    /// When relationship validation is enabled, a graph that fails
    /// [`Relationships::validate`](crate::ooxml::opc::Relationships::validate)
    /// is reported before anything reaches the sink. Once the ZIP stream is
    /// open it is always finished, even when a part or media entry fails.
    ///
    /// # Errors
    ///
    /// * [`Error::Config`] for invalid options or a thread pool that cannot start
    /// * [`Error::Validation`] for an inconsistent relationship graph, or a
    ///   body that uses numbering without a numbering relationship
    /// * [`Error::Serialization`] naming the first part that failed to render,
    ///   in part order
    /// * [`Error::Io`] / [`Error::Zip`] naming the entry the sink rejected
    /// * [`Error::Aggregate`] when several media entries failed
    pub fn write<W: Write + Seek>(&mut self, doc: &dyn DocumentSnapshot, sink: W) -> Result<W> {
        self.state = WriterState::Assembling;
        let result = self.assemble(doc, sink);
        self.state = match result {
            Ok(_) => WriterState::Finalized,
            Err(_) => WriterState::Failed,
        };
        result
    }

    /// Write `doc` into an in-memory buffer.
    pub fn write_to_bytes(&mut self, doc: &dyn DocumentSnapshot) -> Result<Vec<u8>> {
        Ok(self.write(doc, Cursor::new(Vec::new()))?.into_inner())
    }

    /// Write `doc` to a stream that cannot seek.
    ///
    /// The package is built in memory first, then copied to `out`. Returns the
    /// number of bytes written.
    pub fn write_to_stream<W: Write>(&mut self, doc: &dyn DocumentSnapshot, mut out: W) -> Result<u64> {
        let bytes = self.write_to_bytes(doc)?;
        if let Err(e) = out.write_all(&bytes).and_then(|()| out.flush()) {
            self.state = WriterState::Failed;
            return Err(Error::io(STREAM_ENTRY, e));
        }
        Ok(bytes.len() as u64)
    }

    fn assemble<W: Write + Seek>(&self, doc: &dyn DocumentSnapshot, sink: W) -> Result<W> {
        self.options.validate()?;
        if self.options.validate_relationships {
            let rels = doc.relationships();
            rels.validate()?;
            if doc.uses_numbering() && rels.count_by_kind(RelationshipKind::Numbering) == 0 {
                let missing = RelationshipKind::Numbering.to_string();
                return Err(ValidationError::MissingRelationship(missing).into());
            }
        }

        let parts = self.build_parts(doc);
        let mut pkg = PhysPkgWriter::new(sink, self.options.compression);

        let outcome = self
            .write_parts(&parts, &mut pkg)
            .and_then(|()| write_media(doc.media(), &mut pkg));
        let finished = pkg.finish();

        match (outcome, finished) {
            (Ok(()), Ok(sink)) => {
                info!(
                    parts = parts.len(),
                    media = doc.media().len(),
                    strategy = ?self.options.strategy,
                    "package written"
                );
                Ok(sink)
            },
            (Ok(()), Err(e)) => Err(e),
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(finish_err)) => {
                warn!(error = %finish_err, "failed to finish package after an earlier error");
                Err(e)
            },
        }
    }

    /// Parts in package order. Content types come first and are told about
    /// every other entry so they only declare overrides that exist.
    fn build_parts<'a>(&self, doc: &'a dyn DocumentSnapshot) -> Vec<BoxedPart<'a>> {
        let mut parts: Vec<BoxedPart<'a>> = vec![
            Box::new(PackageRelationshipsPart::new(doc)),
            Box::new(DocumentRelationshipsPart::new(doc)),
            Box::new(DocumentPart::new(doc)),
            Box::new(CorePropertiesPart::new(doc)),
            Box::new(AppPropertiesPart::new(doc)),
            Box::new(NumberingPart::new(doc, self.options.numbering)),
            Box::new(StylesPart::new(doc)),
        ];
        if self.options.auxiliary_parts {
            parts.push(Box::new(SettingsPart));
            parts.push(Box::new(WebSettingsPart));
            parts.push(Box::new(FontTablePart));
            parts.push(Box::new(ThemePart));
        }

        let entries: Vec<String> = parts
            .iter()
            .map(|part| part.partname().to_string())
            .chain(doc.media().iter().map(MediaResource::entry_name))
            .collect();
        parts.insert(0, Box::new(ContentTypesPart::new(doc, entries)));
        parts
    }

    fn write_parts<W: Write + Seek>(
        &self,
        parts: &[BoxedPart<'_>],
        pkg: &mut PhysPkgWriter<W>,
    ) -> Result<()> {
        match self.options.strategy {
            WriteStrategy::Sequential => {
                for part in parts {
                    let blob = serialize(part.as_ref())?;
                    append(pkg, part.partname(), &blob)?;
                }
            },
            WriteStrategy::Parallel => {
                let blobs = self.serialize_parallel(parts)?;
                for (part, blob) in parts.iter().zip(blobs) {
                    append(pkg, part.partname(), &blob)?;
                }
            },
        }
        Ok(())
    }

    /// Render every part concurrently.
    ///
    /// All parts run to completion; the first failure in part order is
    /// reported.
    fn serialize_parallel(&self, parts: &[BoxedPart<'_>]) -> Result<Vec<Vec<u8>>> {
        let dispatch = || {
            parts
                .par_iter()
                .map(|part| serialize(part.as_ref()))
                .collect::<Vec<_>>()
        };

        let outcomes = match self.options.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| Error::Config(format!("Failed to start writer threads: {}", e)))?
                .install(dispatch),
            None => dispatch(),
        };

        outcomes.into_iter().collect()
    }
}

fn serialize(part: &dyn Part) -> Result<Vec<u8>> {
    part.to_bytes()
        .map_err(|e| Error::serialization(part.partname(), e))
}

fn append<W: Write + Seek>(pkg: &mut PhysPkgWriter<W>, entry: &str, blob: &[u8]) -> Result<()> {
    pkg.write(entry, blob)?;
    debug!(entry, bytes = blob.len(), "wrote package entry");
    Ok(())
}

/// Append every media payload, collecting failures instead of stopping at
/// the first one.
fn write_media<W: Write + Seek>(media: &[MediaResource], pkg: &mut PhysPkgWriter<W>) -> Result<()> {
    let mut errors = Vec::new();
    for resource in media {
        let entry = resource.entry_name();
        if let Err(e) = append(pkg, &entry, resource.data()) {
            errors.push(e);
        }
    }
    match Error::aggregate(errors) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
