use crate::common::Result;
use crate::ooxml::docx::snapshot::DocumentSnapshot;
use crate::ooxml::opc::constants::{namespace, partname};
use crate::ooxml::opc::part::{Part, XML_DECLARATION, render_pooled};
use std::fmt::Write as _;

/// A4 portrait page with one-inch margins.
const SECTION_PROPERTIES: &str = concat!(
    "<w:sectPr>",
    r#"<w:pgSz w:w="11900" w:h="16840"/>"#,
    r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
    "</w:sectPr>"
);

/// Main document body, `word/document.xml`.
pub struct DocumentPart<'a> {
    doc: &'a dyn DocumentSnapshot,
}

impl<'a> DocumentPart<'a> {
    pub fn new(doc: &'a dyn DocumentSnapshot) -> Self {
        Self { doc }
    }
}

impl Part for DocumentPart<'_> {
    fn partname(&self) -> &str {
        partname::DOCUMENT
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_pooled(|buf| {
            buf.push_str(XML_DECLARATION);
            buf.push_str("\n");
            write!(
                buf,
                r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:pic="{}" xmlns:m="{}">"#,
                namespace::WML_MAIN,
                namespace::OFC_RELATIONSHIPS,
                namespace::DML_WORDPROCESSING_DRAWING,
                namespace::DML_MAIN,
                namespace::DML_PICTURE,
                namespace::OFC_MATH,
            )?;
            buf.push_str("<w:body>");

            for element in self.doc.elements() {
                buf.push_str(&element.to_xml()?);
            }

            buf.push_str(SECTION_PROPERTIES);
            buf.push_str("</w:body></w:document>");
            Ok(())
        })
    }
}
