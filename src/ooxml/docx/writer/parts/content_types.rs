use crate::common::Result;
use crate::ooxml::docx::snapshot::DocumentSnapshot;
use crate::ooxml::opc::constants::partname;
use crate::ooxml::opc::part::{Part, render_pooled};
use std::collections::HashSet;

/// `[Content_Types].xml`.
///
/// Starts from the snapshot's registry, adds an extension default for any
/// media type the registry does not cover and drops overrides for parts that
/// are not in the package.
pub struct ContentTypesPart<'a> {
    doc: &'a dyn DocumentSnapshot,
    entries: HashSet<String>,
}

impl<'a> ContentTypesPart<'a> {
    /// `entries` lists every entry name the package will contain.
    pub fn new<I, S>(doc: &'a dyn DocumentSnapshot, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            doc,
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }
}

impl Part for ContentTypesPart<'_> {
    fn partname(&self) -> &str {
        partname::CONTENT_TYPES
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut types = self.doc.content_types().clone();
        for media in self.doc.media() {
            let entry = media.entry_name();
            if types.content_type_for(&entry).is_none() {
                types.add_default(&media.extension(), media.content_type());
            }
        }
        types.retain_overrides(|name| self.entries.contains(name));

        render_pooled(|buf| {
            types.write_xml(buf)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::{Document, MediaResource};
    use crate::ooxml::opc::constants::content_type as ct;

    #[test]
    fn test_overrides_follow_entries() {
        let doc = Document::new();
        let part = ContentTypesPart::new(&doc, ["word/document.xml", "word/styles.xml"]);
        let xml = String::from_utf8(part.to_bytes().unwrap()).unwrap();

        assert!(xml.contains(r#"<Override PartName="/word/document.xml""#));
        assert!(xml.contains(r#"<Override PartName="/word/styles.xml""#));
        assert!(!xml.contains("/word/settings.xml"));
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert_eq!(part.partname(), "[Content_Types].xml");
    }

    #[derive(Default)]
    struct MediaOnly {
        doc: Document,
        media: Vec<MediaResource>,
    }

    impl DocumentSnapshot for MediaOnly {
        fn elements(&self) -> &[Box<dyn crate::ooxml::docx::Element>] {
            self.doc.elements()
        }
        fn relationships(&self) -> &crate::ooxml::opc::Relationships {
            self.doc.relationships()
        }
        fn styles(&self) -> &crate::ooxml::docx::StyleSheet {
            DocumentSnapshot::styles(&self.doc)
        }
        fn metadata(&self) -> &crate::common::Metadata {
            DocumentSnapshot::metadata(&self.doc)
        }
        fn content_types(&self) -> &crate::ooxml::opc::ContentTypes {
            self.doc.content_types()
        }
        fn media(&self) -> &[MediaResource] {
            &self.media
        }
    }

    #[test]
    fn test_missing_media_defaults_are_added() {
        let snapshot = MediaOnly {
            media: vec![MediaResource::new("clip.svg", b"<svg/>".to_vec()).unwrap()],
            ..Default::default()
        };
        let xml = String::from_utf8(ContentTypesPart::new(&snapshot, ["word/media/clip.svg"]).to_bytes().unwrap())
            .unwrap();
        assert!(xml.contains(&format!(r#"<Default Extension="svg" ContentType="{}"/>"#, ct::SVG)));
    }
}
