//! Style definitions for `word/styles.xml`.
//!
//! [`StyleSheet::defaults`] carries the built-in paragraph, character and
//! table styles that body elements refer to by id (`Normal`, `Heading1`,
//! `ListParagraph`, `Hyperlink`, ...).

use crate::common::xml::write_escaped;
use crate::ooxml::opc::constants::namespace;
use std::fmt::{self, Write};

/// Kind of a style definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleType {
    Paragraph,
    Character,
    Table,
}

impl StyleType {
    fn as_str(self) -> &'static str {
        match self {
            StyleType::Paragraph => "paragraph",
            StyleType::Character => "character",
            StyleType::Table => "table",
        }
    }
}

/// A single style definition.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::docx::styles::{Style, StyleType};
///
/// let style = Style::new("Note", "Note", StyleType::Paragraph)
///     .based_on("Normal")
///     .font("Consolas")
///     .size(20)
///     .spacing(Some(120), Some(120));
/// assert_eq!(style.id(), "Note");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    id: String,
    name: String,
    style_type: StyleType,
    is_default: bool,
    is_quick_style: bool,
    based_on: Option<String>,
    next: Option<String>,
    /// Outline level for headings (0 = level 1)
    outline_level: Option<u8>,
    keep_next: bool,
    keep_lines: bool,
    alignment: Option<String>,
    /// Space before paragraph in twips
    space_before: Option<u32>,
    /// Space after paragraph in twips
    space_after: Option<u32>,
    /// Line spacing in 240ths of a line (`auto` rule)
    line_spacing: Option<u32>,
    indent_left: Option<u32>,
    indent_right: Option<u32>,
    font: Option<String>,
    /// Font size in half-points (22 = 11pt)
    size: Option<u32>,
    bold: bool,
    italic: bool,
    underline: bool,
    /// RGB hex color, e.g. `2F5496`
    color: Option<String>,
}

impl Style {
    pub fn new(id: impl Into<String>, name: impl Into<String>, style_type: StyleType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            style_type,
            is_default: false,
            is_quick_style: false,
            based_on: None,
            next: None,
            outline_level: None,
            keep_next: false,
            keep_lines: false,
            alignment: None,
            space_before: None,
            space_after: None,
            line_spacing: None,
            indent_left: None,
            indent_right: None,
            font: None,
            size: None,
            bold: false,
            italic: false,
            underline: false,
            color: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style_type(&self) -> StyleType {
        self.style_type
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn default_style(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn quick_style(mut self) -> Self {
        self.is_quick_style = true;
        self
    }

    pub fn based_on(mut self, id: impl Into<String>) -> Self {
        self.based_on = Some(id.into());
        self
    }

    pub fn next(mut self, id: impl Into<String>) -> Self {
        self.next = Some(id.into());
        self
    }

    pub fn outline_level(mut self, level: u8) -> Self {
        self.outline_level = Some(level);
        self
    }

    /// Keep with the next paragraph and keep lines together.
    pub fn keep_together(mut self) -> Self {
        self.keep_next = true;
        self.keep_lines = true;
        self
    }

    pub fn alignment(mut self, jc: impl Into<String>) -> Self {
        self.alignment = Some(jc.into());
        self
    }

    pub fn spacing(mut self, before: Option<u32>, after: Option<u32>) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn line_spacing(mut self, line: u32) -> Self {
        self.line_spacing = Some(line);
        self
    }

    pub fn indent(mut self, left: Option<u32>, right: Option<u32>) -> Self {
        self.indent_left = left;
        self.indent_right = right;
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn color(mut self, rgb: impl Into<String>) -> Self {
        self.color = Some(rgb.into());
        self
    }

    fn has_paragraph_props(&self) -> bool {
        self.keep_next
            || self.keep_lines
            || self.outline_level.is_some()
            || self.alignment.is_some()
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.line_spacing.is_some()
            || self.indent_left.is_some()
            || self.indent_right.is_some()
    }

    fn has_run_props(&self) -> bool {
        self.font.is_some()
            || self.size.is_some()
            || self.bold
            || self.italic
            || self.underline
            || self.color.is_some()
    }

    /// Render the `<w:style>` element.
    pub fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, r#"<w:style w:type="{}""#, self.style_type.as_str())?;
        if self.is_default {
            out.write_str(r#" w:default="1""#)?;
        }
        out.write_str(r#" w:styleId=""#)?;
        write_escaped(out, &self.id)?;
        out.write_str(r#""><w:name w:val=""#)?;
        write_escaped(out, &self.name)?;
        out.write_str(r#""/>"#)?;

        if let Some(based_on) = &self.based_on {
            out.write_str(r#"<w:basedOn w:val=""#)?;
            write_escaped(out, based_on)?;
            out.write_str(r#""/>"#)?;
        }
        if let Some(next) = &self.next {
            out.write_str(r#"<w:next w:val=""#)?;
            write_escaped(out, next)?;
            out.write_str(r#""/>"#)?;
        }
        if self.is_quick_style {
            out.write_str("<w:qFormat/>")?;
        }

        if self.style_type != StyleType::Character && self.has_paragraph_props() {
            out.write_str("<w:pPr>")?;
            if self.keep_next {
                out.write_str("<w:keepNext/>")?;
            }
            if self.keep_lines {
                out.write_str("<w:keepLines/>")?;
            }
            if self.space_before.is_some() || self.space_after.is_some() || self.line_spacing.is_some() {
                out.write_str("<w:spacing")?;
                if let Some(before) = self.space_before {
                    write!(out, r#" w:before="{}""#, before)?;
                }
                if let Some(after) = self.space_after {
                    write!(out, r#" w:after="{}""#, after)?;
                }
                if let Some(line) = self.line_spacing {
                    write!(out, r#" w:line="{}" w:lineRule="auto""#, line)?;
                }
                out.write_str("/>")?;
            }
            if self.indent_left.is_some() || self.indent_right.is_some() {
                out.write_str("<w:ind")?;
                if let Some(left) = self.indent_left {
                    write!(out, r#" w:left="{}""#, left)?;
                }
                if let Some(right) = self.indent_right {
                    write!(out, r#" w:right="{}""#, right)?;
                }
                out.write_str("/>")?;
            }
            if let Some(jc) = &self.alignment {
                out.write_str(r#"<w:jc w:val=""#)?;
                write_escaped(out, jc)?;
                out.write_str(r#""/>"#)?;
            }
            if let Some(level) = self.outline_level {
                write!(out, r#"<w:outlineLvl w:val="{}"/>"#, level)?;
            }
            out.write_str("</w:pPr>")?;
        }

        if self.has_run_props() {
            out.write_str("<w:rPr>")?;
            if let Some(font) = &self.font {
                out.write_str(r#"<w:rFonts w:ascii=""#)?;
                write_escaped(out, font)?;
                out.write_str(r#"" w:hAnsi=""#)?;
                write_escaped(out, font)?;
                out.write_str(r#"" w:cs=""#)?;
                write_escaped(out, font)?;
                out.write_str(r#""/>"#)?;
            }
            if self.bold {
                out.write_str("<w:b/>")?;
            }
            if self.italic {
                out.write_str("<w:i/>")?;
            }
            if let Some(color) = &self.color {
                out.write_str(r#"<w:color w:val=""#)?;
                write_escaped(out, color)?;
                out.write_str(r#""/>"#)?;
            }
            if let Some(size) = self.size {
                write!(out, r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, size, size)?;
            }
            if self.underline {
                out.write_str(r#"<w:u w:val="single"/>"#)?;
            }
            out.write_str("</w:rPr>")?;
        }

        out.write_str("</w:style>")
    }
}

/// Ordered set of style definitions, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    styles: Vec<Style>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in styles: Normal, Heading 1 to 6, Title, Subtitle, Quote,
    /// Caption, List Paragraph, the default paragraph font, Emphasis, Strong,
    /// Hyperlink and the normal table style.
    pub fn defaults() -> Self {
        use StyleType::*;

        let heading = |level: u8, size: u32, color: &str, before: u32| {
            Style::new(format!("Heading{}", level), format!("heading {}", level), Paragraph)
                .based_on("Normal")
                .next("Normal")
                .quick_style()
                .outline_level(level - 1)
                .keep_together()
                .spacing(Some(before), Some(0))
                .font("Calibri Light")
                .size(size)
                .color(color)
        };
        let derived = |id: &str, name: &str| {
            Style::new(id, name, Paragraph)
                .based_on("Normal")
                .next("Normal")
                .quick_style()
        };

        let mut sheet = Self::new();
        sheet.add(
            Style::new("Normal", "Normal", Paragraph)
                .default_style()
                .quick_style()
                .spacing(None, Some(200))
                .line_spacing(276)
                .font("Calibri")
                .size(22),
        );
        sheet.add(heading(1, 32, "2F5496", 240));
        sheet.add(heading(2, 26, "2F5496", 200));
        sheet.add(heading(3, 24, "1F3763", 200));
        sheet.add(heading(4, 22, "2F5496", 200).italic());
        sheet.add(heading(5, 22, "2F5496", 200));
        sheet.add(heading(6, 20, "1F3763", 200));
        sheet.add(
            derived("Title", "Title")
                .spacing(Some(0), Some(0))
                .alignment("center")
                .font("Calibri Light")
                .size(56)
                .color("2F5496"),
        );
        sheet.add(
            derived("Subtitle", "Subtitle")
                .spacing(Some(0), Some(200))
                .alignment("center")
                .font("Calibri")
                .size(30)
                .color("595959")
                .italic(),
        );
        sheet.add(
            derived("Quote", "Quote")
                .spacing(Some(200), Some(200))
                .indent(Some(720), Some(720))
                .alignment("center")
                .color("404040")
                .italic(),
        );
        sheet.add(
            derived("Caption", "Caption")
                .spacing(Some(120), Some(120))
                .size(18)
                .color("404040"),
        );
        sheet.add(derived("ListParagraph", "List Paragraph").indent(Some(720), None));
        sheet.add(
            Style::new("DefaultParagraphFont", "Default Paragraph Font", Character).default_style(),
        );
        sheet.add(Style::new("Emphasis", "Emphasis", Character).italic());
        sheet.add(Style::new("Strong", "Strong", Character).bold());
        sheet.add(
            Style::new("Hyperlink", "Hyperlink", Character)
                .based_on("DefaultParagraphFont")
                .color("0563C1")
                .underline(),
        );
        sheet.add(Style::new("TableNormal", "Normal Table", Table).default_style());
        sheet
    }

    /// Add a style, replacing any style with the same id in place.
    pub fn add(&mut self, style: Style) {
        match self.styles.iter_mut().find(|s| s.id == style.id) {
            Some(existing) => *existing = style,
            None => self.styles.push(style),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Render `word/styles.xml`.
    pub fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#)?;
        out.write_char('\n')?;
        write!(
            out,
            r#"<w:styles xmlns:w="{}" xmlns:r="{}">"#,
            namespace::WML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;

        out.write_str("<w:docDefaults><w:rPrDefault><w:rPr>")?;
        out.write_str(r#"<w:rFonts w:ascii="Calibri" w:eastAsia="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/>"#)?;
        out.write_str(r#"<w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US" w:eastAsia="en-US" w:bidi="ar-SA"/>"#)?;
        out.write_str("</w:rPr></w:rPrDefault>")?;
        out.write_str(r#"<w:pPrDefault><w:pPr><w:spacing w:after="200" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#)?;
        out.write_str("</w:docDefaults>")?;

        for style in &self.styles {
            style.write_xml(out)?;
        }

        out.write_str("</w:styles>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let sheet = StyleSheet::defaults();
        for id in ["Normal", "Heading1", "Heading6", "Title", "ListParagraph", "Hyperlink", "TableNormal"] {
            assert!(sheet.contains(id), "missing {}", id);
        }
        assert!(sheet.get("Normal").unwrap().is_default());
        assert_eq!(sheet.get("Hyperlink").unwrap().style_type(), StyleType::Character);
    }

    #[test]
    fn test_add_replaces_by_id() {
        let mut sheet = StyleSheet::defaults();
        let before = sheet.len();
        sheet.add(Style::new("Normal", "Body", StyleType::Paragraph).size(24));
        assert_eq!(sheet.len(), before);
        assert_eq!(sheet.get("Normal").unwrap().name(), "Body");
        assert_eq!(sheet.iter().next().unwrap().id(), "Normal");
    }

    #[test]
    fn test_style_xml() {
        let mut xml = String::new();
        StyleSheet::defaults().get("Heading1").unwrap().write_xml(&mut xml).unwrap();
        assert!(xml.starts_with(r#"<w:style w:type="paragraph" w:styleId="Heading1">"#));
        assert!(xml.contains(r#"<w:basedOn w:val="Normal"/>"#));
        assert!(xml.contains("<w:keepNext/><w:keepLines/>"));
        assert!(xml.contains(r#"<w:spacing w:before="240" w:after="0"/>"#));
        assert!(xml.contains(r#"<w:outlineLvl w:val="0"/>"#));
        assert!(xml.contains(r#"<w:sz w:val="32"/>"#));
    }

    #[test]
    fn test_character_style_has_no_paragraph_props() {
        let style = Style::new("Loud", "Loud", StyleType::Character).alignment("center").bold();
        let mut xml = String::new();
        style.write_xml(&mut xml).unwrap();
        assert!(!xml.contains("<w:pPr>"));
        assert!(xml.contains("<w:b/>"));
    }

    #[test]
    fn test_xml_escaping() {
        let style = Style::new("A&B", "Name<>", StyleType::Paragraph).based_on("\"q\"");
        let mut xml = String::new();
        style.write_xml(&mut xml).unwrap();
        assert!(xml.contains("A&amp;B"));
        assert!(xml.contains("Name&lt;&gt;"));
        assert!(xml.contains("&quot;q&quot;"));
    }

    #[test]
    fn test_sheet_xml() {
        let mut xml = String::new();
        StyleSheet::defaults().write_xml(&mut xml).unwrap();
        assert!(xml.contains("<w:docDefaults>"));
        assert!(xml.contains(r#"w:styleId="ListParagraph""#));
        assert!(xml.ends_with("</w:styles>"));
    }
}
