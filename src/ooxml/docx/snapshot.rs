//! Read-only view of a document, as consumed by the package writer.
//!
//! The writer never owns or mutates document content. It borrows a
//! [`DocumentSnapshot`] for the duration of one write, and part generators
//! render from it concurrently, hence the `Sync` bounds.

use crate::common::{Metadata, Result};
use crate::ooxml::docx::media::MediaResource;
use crate::ooxml::docx::styles::StyleSheet;
use crate::ooxml::opc::{ContentTypes, Relationships};
use std::fmt::Debug;

/// Type tag of a body element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A plain paragraph (text, hyperlinks, pictures)
    Paragraph,
    /// A paragraph carrying a `HeadingN` or `Title` style
    Heading,
    /// A paragraph attached to a numbering definition
    ListItem,
    /// A paragraph holding only a page break
    PageBreak,
    /// Any other block, such as a table supplied by the caller
    Other,
}

impl ElementKind {
    /// Check if the element renders as a `<w:p>` paragraph.
    pub fn is_paragraph(self) -> bool {
        matches!(self, ElementKind::Paragraph | ElementKind::Heading | ElementKind::ListItem)
    }
}

/// A block-level element of the document body.
pub trait Element: Send + Sync + Debug {
    /// Type tag of this element.
    fn kind(&self) -> ElementKind;

    /// WordprocessingML markup for this element.
    ///
    /// Relationship ids referenced by the markup must already exist in the
    /// snapshot's relationship store.
    fn to_xml(&self) -> Result<String>;

    /// Visible text, used for document statistics.
    fn plain_text(&self) -> String;

    /// Check if the markup references a numbering definition.
    fn uses_numbering(&self) -> bool {
        false
    }
}

/// Everything the package writer needs to know about a document.
pub trait DocumentSnapshot: Sync {
    /// Body elements in document order.
    fn elements(&self) -> &[Box<dyn Element>];

    /// Relationship store of the package.
    fn relationships(&self) -> &Relationships;

    /// Style definitions for `word/styles.xml`.
    fn styles(&self) -> &StyleSheet;

    /// Core and extended properties.
    fn metadata(&self) -> &Metadata;

    /// Content type registry for `[Content_Types].xml`.
    fn content_types(&self) -> &ContentTypes;

    /// Binary resources stored under `word/media/`.
    fn media(&self) -> &[MediaResource];

    /// Check if any body element references numbering.
    fn uses_numbering(&self) -> bool {
        self.elements().iter().any(|e| e.uses_numbering())
    }
}
