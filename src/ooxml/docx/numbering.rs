//! Numbering definitions for bulleted and numbered lists.
//!
//! A document references a concrete numbering (`w:numId`), which points at an
//! abstract numbering holding the per-level formats. The default catalog
//! provides five list styles, one concrete numbering each.

use crate::common::xml::write_escaped;
use crate::ooxml::opc::constants::namespace;
use std::fmt::{self, Write};

/// List style offered by the default catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListStyle {
    /// Bullets: •, ○, ▪, ▫
    #[default]
    Bullet,
    /// 1. / 1.1 / a. / i.
    Decimal,
    /// 1. / 1.1 / 1.1.1
    Legal,
    /// I. II. III.
    Roman,
    /// ➤, ✓, ★
    Symbols,
}

impl ListStyle {
    /// Concrete numbering id this style renders with.
    pub fn num_id(self) -> u32 {
        match self {
            ListStyle::Bullet => 1,
            ListStyle::Decimal => 2,
            ListStyle::Legal => 3,
            ListStyle::Roman => 4,
            ListStyle::Symbols => 5,
        }
    }

    /// Deepest level (zero-based) the catalog defines for this style.
    pub fn max_level(self) -> u8 {
        match self {
            ListStyle::Bullet | ListStyle::Decimal => 3,
            ListStyle::Legal | ListStyle::Symbols => 2,
            ListStyle::Roman => 0,
        }
    }
}

/// Number format of one list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    Bullet,
    Decimal,
    LowerLetter,
    LowerRoman,
    UpperRoman,
}

impl NumberFormat {
    fn as_str(self) -> &'static str {
        match self {
            NumberFormat::Bullet => "bullet",
            NumberFormat::Decimal => "decimal",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperRoman => "upperRoman",
        }
    }
}

/// One level of an abstract numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub level: u8,
    pub start: u32,
    pub format: NumberFormat,
    /// Level text such as `%1.` or the bullet character
    pub text: String,
    /// Bullet font
    pub font: Option<String>,
    pub legal: bool,
    /// Left indent in twips
    pub indent_left: u32,
    /// Hanging indent in twips
    pub indent_hanging: u32,
}

impl Level {
    fn bullet(level: u8, symbol: &str, font: &str, indent_left: u32) -> Self {
        Self {
            level,
            start: 1,
            format: NumberFormat::Bullet,
            text: symbol.to_string(),
            font: Some(font.to_string()),
            legal: false,
            indent_left,
            indent_hanging: 360,
        }
    }

    fn numbered(level: u8, format: NumberFormat, text: &str, indent_left: u32, indent_hanging: u32) -> Self {
        Self {
            level,
            start: 1,
            format,
            text: text.to_string(),
            font: None,
            legal: false,
            indent_left,
            indent_hanging,
        }
    }

    fn legal(mut self) -> Self {
        self.legal = true;
        self
    }

    fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, r#"<w:lvl w:ilvl="{}">"#, self.level)?;
        write!(out, r#"<w:start w:val="{}"/>"#, self.start)?;
        write!(out, r#"<w:numFmt w:val="{}"/>"#, self.format.as_str())?;
        if self.legal {
            out.write_str("<w:isLgl/>")?;
        }
        out.write_str(r#"<w:suff w:val="tab"/>"#)?;
        out.write_str(r#"<w:lvlText w:val=""#)?;
        write_escaped(out, &self.text)?;
        out.write_str(r#""/>"#)?;
        out.write_str(r#"<w:lvlJc w:val="left"/>"#)?;
        write!(
            out,
            r#"<w:pPr><w:ind w:left="{}" w:hanging="{}"/></w:pPr>"#,
            self.indent_left, self.indent_hanging
        )?;
        if let Some(font) = &self.font {
            out.write_str(r#"<w:rPr><w:rFonts w:ascii=""#)?;
            write_escaped(out, font)?;
            out.write_str(r#"" w:hAnsi=""#)?;
            write_escaped(out, font)?;
            out.write_str(r#"" w:hint="default"/></w:rPr>"#)?;
        }
        out.write_str("</w:lvl>")
    }
}

/// An abstract numbering definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractNum {
    pub id: u32,
    pub name: String,
    pub levels: Vec<Level>,
}

impl AbstractNum {
    fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, r#"<w:abstractNum w:abstractNumId="{}">"#, self.id)?;
        let multi = if self.levels.len() > 1 { "multilevel" } else { "singleLevel" };
        write!(out, r#"<w:multiLevelType w:val="{}"/>"#, multi)?;
        out.write_str(r#"<w:name w:val=""#)?;
        write_escaped(out, &self.name)?;
        out.write_str(r#""/>"#)?;
        for level in &self.levels {
            level.write_xml(out)?;
        }
        out.write_str("</w:abstractNum>")
    }
}

/// A concrete numbering instance referenced from paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Num {
    pub id: u32,
    pub abstract_id: u32,
}

/// Full set of numbering definitions of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingCatalog {
    abstract_nums: Vec<AbstractNum>,
    nums: Vec<Num>,
}

impl NumberingCatalog {
    /// A catalog with no definitions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catalog backing [`ListStyle`]: five abstract numberings and
    /// concrete nums 1 to 5 pointing at abstract 0 to 4.
    pub fn defaults() -> Self {
        use NumberFormat::*;

        let abstract_nums = vec![
            AbstractNum {
                id: 0,
                name: "Standard Bullet List".to_string(),
                levels: vec![
                    Level::bullet(0, "•", "Symbol", 720),
                    Level::bullet(1, "○", "Symbol", 1440),
                    Level::bullet(2, "▪", "Symbol", 2160),
                    Level::bullet(3, "▫", "Symbol", 2880),
                ],
            },
            AbstractNum {
                id: 1,
                name: "Decimal Numbering".to_string(),
                levels: vec![
                    Level::numbered(0, Decimal, "%1.", 720, 360),
                    Level::numbered(1, Decimal, "%1.%2", 1440, 540),
                    Level::numbered(2, LowerLetter, "%3.", 2160, 360),
                    Level::numbered(3, LowerRoman, "%4.", 2880, 360),
                ],
            },
            AbstractNum {
                id: 2,
                name: "Legal Style".to_string(),
                levels: vec![
                    Level::numbered(0, Decimal, "%1.", 360, 360).legal(),
                    Level::numbered(1, Decimal, "%1.%2", 720, 432).legal(),
                    Level::numbered(2, Decimal, "%1.%2.%3", 1080, 504).legal(),
                ],
            },
            AbstractNum {
                id: 3,
                name: "Roman Numerals".to_string(),
                levels: vec![Level::numbered(0, UpperRoman, "%1.", 720, 360)],
            },
            AbstractNum {
                id: 4,
                name: "Custom Symbols".to_string(),
                levels: vec![
                    Level::bullet(0, "➤", "Wingdings", 720),
                    Level::bullet(1, "✓", "Wingdings", 1440),
                    Level::bullet(2, "★", "Wingdings", 2160),
                ],
            },
        ];
        let nums = (0..5).map(|i| Num { id: i + 1, abstract_id: i }).collect();

        Self { abstract_nums, nums }
    }

    pub fn is_empty(&self) -> bool {
        self.abstract_nums.is_empty() && self.nums.is_empty()
    }

    pub fn abstract_nums(&self) -> &[AbstractNum] {
        &self.abstract_nums
    }

    pub fn nums(&self) -> &[Num] {
        &self.nums
    }

    /// Look up a concrete numbering by id.
    pub fn num(&self, id: u32) -> Option<&Num> {
        self.nums.iter().find(|n| n.id == id)
    }

    /// Render `word/numbering.xml`. An empty catalog renders as an empty root.
    pub fn write_xml<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#)?;
        out.write_char('\n')?;
        if self.is_empty() {
            return write!(out, r#"<w:numbering xmlns:w="{}"/>"#, namespace::WML_MAIN);
        }

        write!(
            out,
            r#"<w:numbering xmlns:w="{}" xmlns:r="{}">"#,
            namespace::WML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;
        for abstract_num in &self.abstract_nums {
            abstract_num.write_xml(out)?;
        }
        for num in &self.nums {
            write!(
                out,
                r#"<w:num w:numId="{}"><w:abstractNumId w:val="{}"/></w:num>"#,
                num.id, num.abstract_id
            )?;
        }
        out.write_str("</w:numbering>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_shape() {
        let catalog = NumberingCatalog::defaults();
        assert_eq!(catalog.abstract_nums().len(), 5);
        assert_eq!(catalog.nums().len(), 5);
        for style in [ListStyle::Bullet, ListStyle::Decimal, ListStyle::Legal, ListStyle::Roman, ListStyle::Symbols] {
            let num = catalog.num(style.num_id()).unwrap();
            let abs = &catalog.abstract_nums()[num.abstract_id as usize];
            assert_eq!(abs.levels.len() as u8, style.max_level() + 1);
        }
    }

    #[test]
    fn test_full_xml() {
        let mut xml = String::new();
        NumberingCatalog::defaults().write_xml(&mut xml).unwrap();
        assert!(xml.contains(r#"<w:abstractNum w:abstractNumId="0">"#));
        assert!(xml.contains(r#"<w:multiLevelType w:val="singleLevel"/>"#));
        assert!(xml.contains(r#"<w:num w:numId="5"><w:abstractNumId w:val="4"/></w:num>"#));
        assert!(xml.contains(r#"<w:lvlText w:val="%1.%2.%3"/>"#));
        assert!(xml.contains("<w:isLgl/>"));
        assert!(xml.contains(r#"w:ascii="Wingdings""#));
        assert!(xml.ends_with("</w:numbering>"));
    }

    #[test]
    fn test_empty_xml() {
        let mut xml = String::new();
        NumberingCatalog::empty().write_xml(&mut xml).unwrap();
        assert!(xml.ends_with(
            r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#
        ));
    }
}
