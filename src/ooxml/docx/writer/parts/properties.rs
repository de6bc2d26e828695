//! Core (`docProps/core.xml`) and extended (`docProps/app.xml`) properties.

use crate::common::metadata::{DEFAULT_APPLICATION, format_w3cdtf};
use crate::common::xml::write_escaped;
use crate::common::{PooledBuffer, Result};
use crate::ooxml::docx::snapshot::DocumentSnapshot;
use crate::ooxml::opc::constants::{namespace, partname};
use crate::ooxml::opc::part::{Part, XML_DECLARATION, render_pooled};
use std::fmt::Write as _;

/// Characters per estimated line.
const CHARS_PER_LINE: usize = 80;

/// Write `<tag>value</tag>` when the value is present.
fn write_optional(buf: &mut PooledBuffer<'_>, tag: &str, value: Option<&str>) -> std::fmt::Result {
    if let Some(value) = value {
        write!(buf, "<{}>", tag)?;
        write_escaped(buf, value)?;
        write!(buf, "</{}>", tag)?;
    }
    Ok(())
}

/// Core properties from the snapshot metadata.
pub struct CorePropertiesPart<'a> {
    doc: &'a dyn DocumentSnapshot,
}

impl<'a> CorePropertiesPart<'a> {
    pub fn new(doc: &'a dyn DocumentSnapshot) -> Self {
        Self { doc }
    }
}

impl Part for CorePropertiesPart<'_> {
    fn partname(&self) -> &str {
        partname::CORE_PROPERTIES
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let meta = self.doc.metadata();
        render_pooled(|buf| {
            buf.push_str(XML_DECLARATION);
            buf.push_str("\n");
            write!(
                buf,
                r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}" xmlns:dcterms="{}" xmlns:dcmitype="{}" xmlns:xsi="{}">"#,
                namespace::OPC_CORE_PROPERTIES,
                namespace::DC_ELEMENTS,
                namespace::DC_TERMS,
                namespace::DC_MITYPE,
                namespace::XSI,
            )?;

            write_optional(buf, "dc:title", meta.title.as_deref())?;
            write_optional(buf, "dc:subject", meta.subject.as_deref())?;
            write_optional(buf, "dc:creator", meta.creator.as_deref())?;
            write_optional(buf, "cp:keywords", meta.keywords.as_deref())?;
            write_optional(buf, "dc:description", meta.description.as_deref())?;
            write_optional(buf, "cp:lastModifiedBy", meta.last_modified_by.as_deref())?;
            write_optional(buf, "cp:revision", meta.revision.as_deref())?;
            write!(
                buf,
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
                format_w3cdtf(meta.created)
            )?;
            write!(
                buf,
                r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
                format_w3cdtf(meta.modified)
            )?;
            write_optional(buf, "cp:category", meta.category.as_deref())?;
            write_optional(buf, "cp:contentStatus", meta.content_status.as_deref())?;
            write_optional(buf, "dc:language", meta.language.as_deref())?;
            write_optional(buf, "cp:version", meta.version.as_deref())?;

            buf.push_str("</cp:coreProperties>");
            Ok(())
        })
    }
}

/// Text statistics recorded in the extended properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentStatistics {
    pub pages: usize,
    pub lines: usize,
    pub paragraphs: usize,
    pub words: usize,
    /// Characters excluding whitespace
    pub characters: usize,
    /// Characters excluding line breaks
    pub characters_with_spaces: usize,
}

impl DocumentStatistics {
    /// Count over the snapshot's body elements.
    ///
    /// Pages are not laid out, so the page count is always 1 and lines are
    /// estimated at 80 characters each. Word recomputes both on open.
    pub fn collect(doc: &dyn DocumentSnapshot) -> Self {
        let mut stats = Self {
            pages: 1,
            ..Self::default()
        };

        for element in doc.elements() {
            let text = element.plain_text();
            let text = text.trim();

            if element.kind().is_paragraph() {
                stats.paragraphs += 1;
                stats.lines += 1 + text.chars().count() / CHARS_PER_LINE;
            }
            stats.words += count_words(text);
            stats.characters += text.chars().filter(|c| !c.is_whitespace()).count();
            stats.characters_with_spaces += text.chars().filter(|c| !matches!(c, '\n' | '\r')).count();
        }

        stats.lines = stats.lines.max(1);
        stats
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '\'' | '-' | '_')
}

fn count_words(text: &str) -> usize {
    text.split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .count()
}

/// Extended (application) properties.
pub struct AppPropertiesPart<'a> {
    doc: &'a dyn DocumentSnapshot,
}

impl<'a> AppPropertiesPart<'a> {
    pub fn new(doc: &'a dyn DocumentSnapshot) -> Self {
        Self { doc }
    }
}

impl Part for AppPropertiesPart<'_> {
    fn partname(&self) -> &str {
        partname::APP_PROPERTIES
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let meta = self.doc.metadata();
        let stats = DocumentStatistics::collect(self.doc);
        let application = meta.application.as_deref().unwrap_or(DEFAULT_APPLICATION);

        render_pooled(|buf| {
            buf.push_str(XML_DECLARATION);
            buf.push_str("\n");
            write!(
                buf,
                r#"<Properties xmlns="{}" xmlns:vt="{}">"#,
                namespace::OFC_EXTENDED_PROPERTIES,
                namespace::OFC_DOC_PROPS_VTYPES,
            )?;

            write_optional(buf, "Application", Some(application))?;
            buf.push_str("<DocSecurity>0</DocSecurity>");
            write!(buf, "<Lines>{}</Lines>", stats.lines)?;
            write!(buf, "<Paragraphs>{}</Paragraphs>", stats.paragraphs)?;
            write!(buf, "<Words>{}</Words>", stats.words)?;
            write!(buf, "<Characters>{}</Characters>", stats.characters)?;
            write!(
                buf,
                "<CharactersWithSpaces>{}</CharactersWithSpaces>",
                stats.characters_with_spaces
            )?;
            write!(buf, "<Pages>{}</Pages>", stats.pages)?;
            write_optional(buf, "Company", meta.company.as_deref())?;
            write_optional(buf, "Manager", meta.manager.as_deref())?;
            buf.push_str("<LinksUpToDate>false</LinksUpToDate>");
            buf.push_str("<ScaleCrop>false</ScaleCrop>");
            buf.push_str("<SharedDoc>false</SharedDoc>");
            buf.push_str("<HyperlinksChanged>false</HyperlinksChanged>");

            buf.push_str("</Properties>");
            Ok(())
        })
    }
}
