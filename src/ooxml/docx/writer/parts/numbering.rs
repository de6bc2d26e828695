use crate::common::Result;
use crate::ooxml::docx::numbering::NumberingCatalog;
use crate::ooxml::docx::snapshot::DocumentSnapshot;
use crate::ooxml::docx::writer::NumberingPolicy;
use crate::ooxml::opc::constants::partname;
use crate::ooxml::opc::part::{Part, render_pooled};

/// Numbering definitions, `word/numbering.xml`.
pub struct NumberingPart<'a> {
    doc: &'a dyn DocumentSnapshot,
    policy: NumberingPolicy,
}

impl<'a> NumberingPart<'a> {
    pub fn new(doc: &'a dyn DocumentSnapshot, policy: NumberingPolicy) -> Self {
        Self { doc, policy }
    }

    /// Catalog this part renders under its policy.
    pub fn catalog(&self) -> NumberingCatalog {
        match self.policy {
            NumberingPolicy::Full => NumberingCatalog::defaults(),
            NumberingPolicy::Minimal if self.doc.uses_numbering() => NumberingCatalog::defaults(),
            NumberingPolicy::Minimal => NumberingCatalog::empty(),
        }
    }
}

impl Part for NumberingPart<'_> {
    fn partname(&self) -> &str {
        partname::NUMBERING
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let catalog = self.catalog();
        render_pooled(|buf| {
            catalog.write_xml(buf)?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::{Document, ListStyle};

    fn render(doc: &Document, policy: NumberingPolicy) -> String {
        String::from_utf8(NumberingPart::new(doc, policy).to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_minimal_without_lists() {
        let mut doc = Document::new();
        doc.add_paragraph("no lists here");
        let xml = render(&doc, NumberingPolicy::Minimal);
        assert!(xml.ends_with("/>"));
        assert!(!xml.contains("<w:abstractNum"));
    }

    #[test]
    fn test_minimal_with_lists_keeps_catalog() {
        let mut doc = Document::new();
        doc.add_list_item("item", ListStyle::Legal, 0).unwrap();
        let xml = render(&doc, NumberingPolicy::Minimal);
        assert!(xml.contains(r#"<w:num w:numId="3">"#));
    }

    #[test]
    fn test_full_always_writes_catalog() {
        let doc = Document::new();
        let xml = render(&doc, NumberingPolicy::Full);
        assert_eq!(xml.matches("<w:abstractNum ").count(), 5);
        assert_eq!(xml.matches("<w:num ").count(), 5);
    }
}
