//! Content type registry for `[Content_Types].xml`.
//!
//! Maps file extensions (Default elements) and individual part names (Override
//! elements) to content types. Entries keep their insertion order so the
//! rendered XML is stable from one write to the next.

use crate::common::xml::write_escaped;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use std::fmt;

/// Default and Override content type mappings of a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    /// Default content types by extension
    defaults: Vec<(String, String)>,
    /// Override content types by partname (with leading slash)
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry for a WordprocessingML package.
    ///
    /// Covers relationship and XML parts, the common raster image formats and
    /// overrides for every fixed part of the package.
    pub fn docx() -> Self {
        let mut types = Self::new();
        types.add_default("rels", ct::OPC_RELATIONSHIPS);
        types.add_default("xml", ct::XML);
        types.add_default("png", ct::PNG);
        types.add_default("jpeg", ct::JPEG);
        types.add_default("jpg", ct::JPEG);
        types.add_default("gif", ct::GIF);
        types.add_default("bmp", ct::BMP);
        types.add_default("tiff", ct::TIFF);
        types.add_default("tif", ct::TIFF);

        types.add_override("/word/document.xml", ct::WML_DOCUMENT_MAIN);
        types.add_override("/word/numbering.xml", ct::WML_NUMBERING);
        types.add_override("/word/styles.xml", ct::WML_STYLES);
        types.add_override("/word/settings.xml", ct::WML_SETTINGS);
        types.add_override("/word/webSettings.xml", ct::WML_WEB_SETTINGS);
        types.add_override("/word/fontTable.xml", ct::WML_FONT_TABLE);
        types.add_override("/word/theme/theme1.xml", ct::OFC_THEME);
        types.add_override("/docProps/core.xml", ct::OPC_CORE_PROPERTIES);
        types.add_override("/docProps/app.xml", ct::OFC_EXTENDED_PROPERTIES);
        types
    }

    /// Map an extension to a content type, replacing any previous mapping.
    ///
    /// The extension is matched case-insensitively and stored lowercase.
    pub fn add_default(&mut self, extension: &str, content_type: &str) {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        upsert(&mut self.defaults, extension, content_type);
    }

    /// Map a single part to a content type, replacing any previous mapping.
    pub fn add_override(&mut self, partname: &str, content_type: &str) {
        let partname = if partname.starts_with('/') {
            partname.to_string()
        } else {
            format!("/{}", partname)
        };
        upsert(&mut self.overrides, partname, content_type);
    }

    /// Content type registered for an extension.
    pub fn default_for(&self, extension: &str) -> Option<&str> {
        let extension = extension.trim_start_matches('.');
        self.defaults
            .iter()
            .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
            .map(|(_, ct)| ct.as_str())
    }

    /// Content type of a part, preferring an override over the extension default.
    pub fn content_type_for(&self, partname: &str) -> Option<&str> {
        let trimmed = partname.trim_start_matches('/');
        if let Some((_, ct)) = self
            .overrides
            .iter()
            .find(|(name, _)| name.trim_start_matches('/') == trimmed)
        {
            return Some(ct.as_str());
        }
        let ext = trimmed.rsplit_once('.').map(|(_, ext)| ext)?;
        self.default_for(ext)
    }

    /// Keep only the overrides whose partname (without leading slash)
    /// satisfies `keep`.
    pub fn retain_overrides<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.overrides
            .retain(|(partname, _)| keep(partname.trim_start_matches('/')));
    }

    /// Default mappings in insertion order.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Override mappings in insertion order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render `[Content_Types].xml`.
    pub fn write_xml<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        out.write_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#)?;
        out.write_char('\n')?;
        write!(out, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES)?;

        for (ext, content_type) in &self.defaults {
            out.write_str(r#"<Default Extension=""#)?;
            write_escaped(out, ext)?;
            out.write_str(r#"" ContentType=""#)?;
            write_escaped(out, content_type)?;
            out.write_str(r#""/>"#)?;
        }

        for (partname, content_type) in &self.overrides {
            out.write_str(r#"<Override PartName=""#)?;
            write_escaped(out, partname)?;
            out.write_str(r#"" ContentType=""#)?;
            write_escaped(out, content_type)?;
            out.write_str(r#""/>"#)?;
        }

        out.write_str("</Types>")
    }
}

fn upsert(entries: &mut Vec<(String, String)>, key: String, value: &str) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => entries.push((key, value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_docx_registry() {
        let types = ContentTypes::docx();
        assert_eq!(types.default_for("png"), Some(ct::PNG));
        assert_eq!(types.default_for("JPG"), Some(ct::JPEG));
        assert_eq!(types.content_type_for("word/document.xml"), Some(ct::WML_DOCUMENT_MAIN));
        assert_eq!(types.content_type_for("/word/media/logo.png"), Some(ct::PNG));
        assert_eq!(types.content_type_for("word/media/clip.svg"), None);
    }

    #[test]
    fn test_add_default_replaces() {
        let mut types = ContentTypes::new();
        types.add_default(".SVG", "image/svg");
        types.add_default("svg", ct::SVG);
        assert_eq!(types.defaults().count(), 1);
        assert_eq!(types.default_for("svg"), Some(ct::SVG));
    }

    #[test]
    fn test_retain_overrides() {
        let mut types = ContentTypes::docx();
        types.retain_overrides(|name| name.starts_with("docProps/"));
        let names: Vec<&str> = types.overrides().map(|(name, _)| name).collect();
        assert_eq!(names, ["/docProps/core.xml", "/docProps/app.xml"]);
        assert_eq!(types.defaults().count(), 9);
    }

    #[test]
    fn test_content_types_xml() {
        let mut types = ContentTypes::new();
        types.add_default("png", "image/png");
        types.add_override("word/document.xml", ct::WML_DOCUMENT_MAIN);

        let mut xml = String::new();
        types.write_xml(&mut xml).unwrap();

        assert!(xml.contains(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#));
        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Override PartName="/word/document.xml""#));
        assert!(xml.ends_with("</Types>"));
    }
}
