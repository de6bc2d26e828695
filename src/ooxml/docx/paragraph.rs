//! Paragraph element and its runs.
//!
//! Runs referencing other parts (hyperlinks, pictures) only carry the
//! relationship id; the id is obtained from the document's relationship store
//! when the run is created, see [`Document`](super::Document).

use crate::common::xml::write_escaped;
use crate::common::Result;
use crate::ooxml::docx::snapshot::{Element, ElementKind};
use std::fmt::{self, Write};

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// English Metric Units per pixel at 96 DPI.
pub const EMU_PER_PIXEL: i64 = 9_525;

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
        }
    }
}

/// An inline picture anchored in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Relationship id of the image part
    pub r_id: String,
    /// Drawing object id, unique within the document
    pub id: u32,
    pub name: String,
    pub description: String,
    /// Width in EMUs
    pub cx: i64,
    /// Height in EMUs
    pub cy: i64,
}

impl Picture {
    fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{}" cy="{}"/><wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
            self.cx, self.cy
        )?;
        write!(out, r#"<wp:docPr id="{}" name=""#, self.id)?;
        write_escaped(out, &self.name)?;
        out.write_str(r#"" descr=""#)?;
        write_escaped(out, &self.description)?;
        out.write_str(r#""/>"#)?;
        out.write_str(r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#)?;
        out.write_str(r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic>"#)?;
        out.write_str(r#"<pic:nvPicPr><pic:cNvPr id="0" name=""#)?;
        write_escaped(out, &self.name)?;
        out.write_str(r#""/><pic:cNvPicPr/></pic:nvPicPr>"#)?;
        out.write_str(r#"<pic:blipFill><a:blip r:embed=""#)?;
        write_escaped(out, &self.r_id)?;
        out.write_str(r#""/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#)?;
        write!(
            out,
            r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{}" cy="{}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
            self.cx, self.cy
        )?;
        out.write_str("</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>")
    }
}

/// A run-level child of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Run {
    /// Formatted text
    Text { text: String, bold: bool, italic: bool },
    /// Text linking to an external target
    Hyperlink { r_id: String, text: String },
    /// Inline picture
    Picture(Picture),
    /// Line break inside the paragraph
    LineBreak,
    /// Hard page break
    PageBreak,
}

impl Run {
    /// Plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        Run::Text {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self {
            Run::Text { text, bold, italic } => {
                out.write_str("<w:r>")?;
                if *bold || *italic {
                    out.write_str("<w:rPr>")?;
                    if *bold {
                        out.write_str("<w:b/>")?;
                    }
                    if *italic {
                        out.write_str("<w:i/>")?;
                    }
                    out.write_str("</w:rPr>")?;
                }
                write_text(out, text)?;
                out.write_str("</w:r>")
            },
            Run::Hyperlink { r_id, text } => {
                out.write_str(r#"<w:hyperlink r:id=""#)?;
                write_escaped(out, r_id)?;
                out.write_str(r#"" w:history="1"><w:r><w:rPr><w:rStyle w:val="Hyperlink"/></w:rPr>"#)?;
                write_text(out, text)?;
                out.write_str("</w:r></w:hyperlink>")
            },
            Run::Picture(picture) => {
                out.write_str("<w:r>")?;
                picture.write_xml(out)?;
                out.write_str("</w:r>")
            },
            Run::LineBreak => out.write_str("<w:r><w:br/></w:r>"),
            Run::PageBreak => out.write_str(r#"<w:r><w:br w:type="page"/></w:r>"#),
        }
    }

    fn text_content(&self) -> Option<&str> {
        match self {
            Run::Text { text, .. } | Run::Hyperlink { text, .. } => Some(text),
            _ => None,
        }
    }
}

fn write_text<W: Write + ?Sized>(out: &mut W, text: &str) -> fmt::Result {
    out.write_str(r#"<w:t xml:space="preserve">"#)?;
    write_escaped(out, text)?;
    out.write_str("</w:t>")
}

/// A `<w:p>` body element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    style: Option<String>,
    /// Concrete numbering id and level
    numbering: Option<(u32, u8)>,
    alignment: Option<Alignment>,
    runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph holding a single plain text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.runs.push(Run::text(text));
        self
    }

    pub fn add_bold_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.runs.push(Run::Text {
            text: text.into(),
            bold: true,
            italic: false,
        });
        self
    }

    pub fn add_italic_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.runs.push(Run::Text {
            text: text.into(),
            bold: false,
            italic: true,
        });
        self
    }

    pub fn add_line_break(&mut self) -> &mut Self {
        self.runs.push(Run::LineBreak);
        self
    }

    pub fn add_page_break(&mut self) -> &mut Self {
        self.runs.push(Run::PageBreak);
        self
    }

    pub fn add_run(&mut self, run: Run) -> &mut Self {
        self.runs.push(run);
        self
    }

    pub fn set_style(&mut self, style_id: impl Into<String>) -> &mut Self {
        self.style = Some(style_id.into());
        self
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = Some(alignment);
        self
    }

    /// Attach the paragraph to concrete numbering `num_id` at `level`.
    pub fn set_numbering(&mut self, num_id: u32, level: u8) -> &mut Self {
        self.numbering = Some((num_id, level));
        self
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn numbering(&self) -> Option<(u32, u8)> {
        self.numbering
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Concatenated text of all text and hyperlink runs.
    pub fn text(&self) -> String {
        self.runs.iter().filter_map(Run::text_content).collect()
    }

    pub fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str("<w:p>")?;
        if self.style.is_some() || self.numbering.is_some() || self.alignment.is_some() {
            out.write_str("<w:pPr>")?;
            if let Some(style) = &self.style {
                out.write_str(r#"<w:pStyle w:val=""#)?;
                write_escaped(out, style)?;
                out.write_str(r#""/>"#)?;
            }
            if let Some((num_id, level)) = self.numbering {
                write!(
                    out,
                    r#"<w:numPr><w:ilvl w:val="{}"/><w:numId w:val="{}"/></w:numPr>"#,
                    level, num_id
                )?;
            }
            if let Some(alignment) = self.alignment {
                write!(out, r#"<w:jc w:val="{}"/>"#, alignment.as_str())?;
            }
            out.write_str("</w:pPr>")?;
        }
        for run in &self.runs {
            run.write_xml(out)?;
        }
        out.write_str("</w:p>")
    }
}

impl Element for Paragraph {
    fn kind(&self) -> ElementKind {
        if self.numbering.is_some() {
            return ElementKind::ListItem;
        }
        if let Some(style) = &self.style
            && (style.starts_with("Heading") || style == "Title")
        {
            return ElementKind::Heading;
        }
        if !self.runs.is_empty() && self.runs.iter().all(|r| *r == Run::PageBreak) {
            return ElementKind::PageBreak;
        }
        ElementKind::Paragraph
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(64 + self.runs.len() * 48);
        self.write_xml(&mut xml)?;
        Ok(xml)
    }

    fn plain_text(&self) -> String {
        self.text()
    }

    fn uses_numbering(&self) -> bool {
        self.numbering.is_some()
    }
}
