//! In-memory document model.
//!
//! [`Document`] owns the body elements together with everything the package
//! writer needs: the relationship store, styles, metadata, content types and
//! media. Adding content that points at another part goes through the
//! relationship store, so ids in the body always resolve.

use crate::common::{Error, Metadata, Result};
use crate::ooxml::docx::media::{MediaResource, pixel_size};
use crate::ooxml::docx::numbering::ListStyle;
use crate::ooxml::docx::paragraph::{EMU_PER_INCH, EMU_PER_PIXEL, Paragraph, Picture, Run};
use crate::ooxml::docx::snapshot::{DocumentSnapshot, Element};
use crate::ooxml::docx::styles::StyleSheet;
use crate::ooxml::opc::constants::partname;
use crate::ooxml::opc::{ContentTypes, RelationshipKind, RelationshipScope, Relationships};
use bytes::Bytes;

/// Target of the numbering relationship, relative to `word/`.
const NUMBERING_TARGET: &str = "numbering.xml";

/// A word-processing document under construction.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::docx::{Document, ListStyle};
///
/// let mut doc = Document::new();
/// doc.add_heading("Report", 1).unwrap();
/// doc.add_paragraph("Quarterly numbers follow.");
/// doc.add_hyperlink("Source", "https://example.com");
/// doc.add_list_item("Revenue", ListStyle::Bullet, 0).unwrap();
/// assert_eq!(doc.len(), 4);
/// ```
#[derive(Debug)]
pub struct Document {
    elements: Vec<Box<dyn Element>>,
    relationships: Relationships,
    styles: StyleSheet,
    metadata: Metadata,
    content_types: ContentTypes,
    media: Vec<MediaResource>,
    /// Next `wp:docPr` id for drawings
    next_drawing_id: u32,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with the default relationships, styles and metadata.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            relationships: Relationships::with_defaults(),
            styles: StyleSheet::defaults(),
            metadata: Metadata::new(),
            content_types: ContentTypes::docx(),
            media: Vec::new(),
            next_drawing_id: 1,
        }
    }

    /// Append any body element.
    ///
    /// An element that uses numbering registers the numbering relationship.
    pub fn push<E: Element + 'static>(&mut self, element: E) -> &mut Self {
        if element.uses_numbering() {
            self.relationships
                .get_or_add(RelationshipScope::Document, RelationshipKind::Numbering, NUMBERING_TARGET);
        }
        self.elements.push(Box::new(element));
        self
    }

    /// Append a paragraph holding `text`.
    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Paragraph::with_text(text))
    }

    /// Append a heading. Level 0 is the document title, 1 to 6 map to the
    /// `HeadingN` styles.
    pub fn add_heading(&mut self, text: impl Into<String>, level: u8) -> Result<&mut Self> {
        let style = match level {
            0 => "Title".to_string(),
            1..=6 => format!("Heading{}", level),
            _ => {
                return Err(Error::InvalidContent(format!(
                    "heading level must be between 0 and 6, got {}",
                    level
                )));
            },
        };
        let mut p = Paragraph::with_text(text);
        p.set_style(style);
        Ok(self.push(p))
    }

    /// Append a paragraph holding only a page break.
    pub fn add_page_break(&mut self) -> &mut Self {
        let mut p = Paragraph::new();
        p.add_page_break();
        self.push(p)
    }

    /// Append a list item of the given style at `level` (zero-based).
    ///
    /// The first list item registers the numbering relationship, see
    /// [`push`](Self::push).
    pub fn add_list_item(&mut self, text: impl Into<String>, style: ListStyle, level: u8) -> Result<&mut Self> {
        if level > style.max_level() {
            return Err(Error::InvalidContent(format!(
                "{:?} lists have no level {}",
                style, level
            )));
        }
        let mut p = Paragraph::with_text(text);
        p.set_style("ListParagraph").set_numbering(style.num_id(), level);
        Ok(self.push(p))
    }

    /// Create a hyperlink run, reusing the relationship of an earlier link to
    /// the same URL.
    pub fn hyperlink(&mut self, text: impl Into<String>, url: &str) -> Run {
        let r_id = self.relationships.get_or_create_hyperlink(url).id().to_string();
        Run::Hyperlink {
            r_id,
            text: text.into(),
        }
    }

    /// Append a paragraph holding a single hyperlink. Returns its relationship id.
    pub fn add_hyperlink(&mut self, text: impl Into<String>, url: &str) -> String {
        let r_id = self.relationships.get_or_create_hyperlink(url).id().to_string();
        let mut p = Paragraph::new();
        p.add_run(Run::Hyperlink {
            r_id: r_id.clone(),
            text: text.into(),
        });
        self.push(p);
        r_id
    }

    /// Create a picture run for `file_name`, storing the image under
    /// `word/media/file_name`.
    ///
    /// Adding the same name with the same bytes again shares the stored
    /// image. Different bytes under a taken name are rejected; use
    /// [`unique_picture`](Self::unique_picture) for those.
    pub fn picture(&mut self, file_name: &str, data: impl Into<Bytes>) -> Result<Run> {
        self.stored_picture(file_name, data.into()).map(|(_, run)| run)
    }

    fn stored_picture(&mut self, file_name: &str, data: Bytes) -> Result<(String, Run)> {
        if let Some(existing) = self.media.iter().find(|m| m.file_name() == file_name)
            && *existing.data() != data
        {
            return Err(Error::InvalidContent(format!(
                "media name {:?} is already used by a different image",
                file_name
            )));
        }

        let resource = MediaResource::new(file_name, data)?;
        let r_id = self.relationships.add_image(file_name).id().to_string();
        let run = self.register_picture(r_id.clone(), resource);
        Ok((r_id, run))
    }

    /// Create a picture run stored under a collision-free name derived from
    /// `file_name`.
    pub fn unique_picture(&mut self, file_name: &str, data: impl Into<Bytes>) -> Result<Run> {
        self.stored_unique_picture(file_name, data.into()).map(|(_, run)| run)
    }

    fn stored_unique_picture(&mut self, file_name: &str, data: Bytes) -> Result<(String, Run)> {
        // Validate before touching the store
        MediaResource::new(file_name, Bytes::new())?;

        let rel = self.relationships.add_unique_image(file_name);
        let r_id = rel.id().to_string();
        let stored = rel.target().trim_start_matches("media/").to_string();
        let resource = MediaResource::new(stored, data)?;
        let run = self.register_picture(r_id.clone(), resource);
        Ok((r_id, run))
    }

    /// Append a paragraph holding a picture. Returns its relationship id.
    pub fn add_image(&mut self, file_name: &str, data: impl Into<Bytes>) -> Result<String> {
        let (r_id, run) = self.stored_picture(file_name, data.into())?;
        self.push_picture(run);
        Ok(r_id)
    }

    /// Append a paragraph holding a picture under a collision-free name.
    /// Returns its relationship id.
    pub fn add_unique_image(&mut self, file_name: &str, data: impl Into<Bytes>) -> Result<String> {
        let (r_id, run) = self.stored_unique_picture(file_name, data.into())?;
        self.push_picture(run);
        Ok(r_id)
    }

    fn push_picture(&mut self, run: Run) {
        let mut p = Paragraph::new();
        p.add_run(run);
        self.push(p);
    }

    fn register_picture(&mut self, r_id: String, resource: MediaResource) -> Run {
        let (cx, cy) = match pixel_size(resource.data()) {
            Some((w, h)) if w > 0 && h > 0 => (w as i64 * EMU_PER_PIXEL, h as i64 * EMU_PER_PIXEL),
            _ => (EMU_PER_INCH, EMU_PER_INCH),
        };
        let picture = Picture {
            r_id,
            id: self.next_drawing_id,
            name: resource.file_name().to_string(),
            description: format!("Image: {}", resource.file_name()),
            cx,
            cy,
        };
        self.next_drawing_id += 1;

        let ext = resource.extension();
        if self.content_types.default_for(&ext).is_none() {
            self.content_types.add_default(&ext, resource.content_type());
        }
        if !self.media.iter().any(|m| m.file_name() == resource.file_name()) {
            self.media.push(resource);
        }
        Run::Picture(picture)
    }

    pub fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// Mutable access to the relationship store, e.g. to merge in the
    /// relationships of another fragment.
    pub fn relationships_mut(&mut self) -> &mut Relationships {
        &mut self.relationships
    }

    pub fn styles_mut(&mut self) -> &mut StyleSheet {
        &mut self.styles
    }

    pub fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    pub fn media(&self) -> &[MediaResource] {
        &self.media
    }

    /// ZIP entry name of a media file stored by this document.
    pub fn media_entry(file_name: &str) -> String {
        format!("{}{}", partname::MEDIA_DIR, file_name)
    }
}

impl DocumentSnapshot for Document {
    fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    fn media(&self) -> &[MediaResource] {
        &self.media
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::snapshot::ElementKind;

    const PNG_4X2: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
        0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x02, 0x08, 0x06, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn test_new_document_defaults() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.relationships().package_relationships().count(), 3);
        assert_eq!(doc.relationships().document_relationships().count(), 5);
        assert!(doc.styles.contains("Normal"));
        assert_eq!(doc.metadata.revision.as_deref(), Some("1"));
    }

    #[test]
    fn test_headings() {
        let mut doc = Document::new();
        doc.add_heading("Title", 0).unwrap();
        doc.add_heading("Section", 3).unwrap();
        assert!(doc.add_heading("Too deep", 7).is_err());

        assert_eq!(doc.len(), 2);
        assert!(doc.elements().iter().all(|e| e.kind() == ElementKind::Heading));
        assert!(doc.elements()[1].to_xml().unwrap().contains(r#"<w:pStyle w:val="Heading3"/>"#));
    }

    #[test]
    fn test_hyperlinks_share_relationship() {
        let mut doc = Document::new();
        let a = doc.add_hyperlink("one", "https://example.com");
        let b = doc.add_hyperlink("two", "https://example.com");
        assert_eq!(a, b);
        assert_eq!(doc.relationships().hyperlinks().len(), 1);
        assert!(doc.relationships().get(&a).unwrap().is_external());
    }

    #[test]
    fn test_list_items_register_numbering_once() {
        let mut doc = Document::new();
        doc.add_list_item("a", ListStyle::Bullet, 0).unwrap();
        doc.add_list_item("b", ListStyle::Decimal, 3).unwrap();
        assert!(doc.add_list_item("c", ListStyle::Roman, 1).is_err());

        assert_eq!(doc.relationships().count_by_kind(RelationshipKind::Numbering), 1);
        assert!(doc.uses_numbering());
        assert!(doc.elements()[1].to_xml().unwrap().contains(r#"<w:numId w:val="2"/>"#));
    }

    #[test]
    fn test_pushed_list_paragraph_registers_numbering() {
        let mut doc = Document::new();
        doc.push(Paragraph::with_text("plain"));
        assert_eq!(doc.relationships().count_by_kind(RelationshipKind::Numbering), 0);

        let mut item = Paragraph::with_text("item");
        item.set_numbering(ListStyle::Decimal.num_id(), 0);
        doc.push(item.clone()).push(item);

        let numbering = doc.relationships().by_kind(RelationshipKind::Numbering);
        assert_eq!(numbering.len(), 1);
        assert_eq!(numbering[0].target(), "numbering.xml");
        assert_eq!(
            doc.relationships().scope_of(numbering[0].id()),
            Some(RelationshipScope::Document)
        );
    }

    #[test]
    fn test_images() {
        let mut doc = Document::new();
        let r_id = doc.add_image("logo.png", PNG_4X2.to_vec()).unwrap();
        let again = doc.add_image("logo.png", PNG_4X2.to_vec()).unwrap();
        assert_eq!(r_id, again);
        assert_eq!(doc.media().len(), 1);
        assert!(doc.add_image("logo.png", vec![1, 2, 3]).is_err());
        assert!(doc.add_image("logo.exe", vec![1, 2, 3]).is_err());

        let xml = doc.elements()[0].to_xml().unwrap();
        assert!(xml.contains(&format!(r#"r:embed="{}""#, r_id)));
        assert!(xml.contains(r#"<wp:extent cx="38100" cy="19050"/>"#));
        assert!(xml.contains(r#"<wp:docPr id="1""#));
        assert!(doc.elements()[1].to_xml().unwrap().contains(r#"<wp:docPr id="2""#));
    }

    #[test]
    fn test_unique_images() {
        let mut doc = Document::new();
        let first = doc.add_unique_image("chart.png", PNG_4X2.to_vec()).unwrap();
        let second = doc.add_unique_image("chart.png", vec![0x89, b'P', b'N', b'G']).unwrap();
        assert_ne!(first, second);
        assert_eq!(doc.media().len(), 2);
        assert_ne!(doc.media()[0].file_name(), doc.media()[1].file_name());

        for media in doc.media() {
            let target = format!("media/{}", media.file_name());
            assert!(doc.relationships().get_by_target(&target).is_some());
        }
    }

    #[test]
    fn test_image_registers_content_type() {
        let mut doc = Document::new();
        doc.add_image("diagram.svg", b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>".to_vec())
            .unwrap();
        assert_eq!(
            doc.content_types().default_for("svg"),
            Some(crate::ooxml::opc::constants::content_type::SVG)
        );
        assert_eq!(Document::media_entry("diagram.svg"), "word/media/diagram.svg");
    }
}
