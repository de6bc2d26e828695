use crate::common::Result;
use crate::ooxml::docx::snapshot::DocumentSnapshot;
use crate::ooxml::opc::RelationshipScope;
use crate::ooxml::opc::constants::partname;
use crate::ooxml::opc::part::{Part, render_pooled};

fn render_manifest(doc: &dyn DocumentSnapshot, scope: RelationshipScope) -> Result<Vec<u8>> {
    render_pooled(|buf| {
        doc.relationships().write_manifest(scope, buf)?;
        Ok(())
    })
}

/// Root relationships manifest, `_rels/.rels`.
pub struct PackageRelationshipsPart<'a> {
    doc: &'a dyn DocumentSnapshot,
}

impl<'a> PackageRelationshipsPart<'a> {
    pub fn new(doc: &'a dyn DocumentSnapshot) -> Self {
        Self { doc }
    }
}

impl Part for PackageRelationshipsPart<'_> {
    fn partname(&self) -> &str {
        partname::PACKAGE_RELS
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_manifest(self.doc, RelationshipScope::Package)
    }
}

/// Main document relationships manifest, `word/_rels/document.xml.rels`.
pub struct DocumentRelationshipsPart<'a> {
    doc: &'a dyn DocumentSnapshot,
}

impl<'a> DocumentRelationshipsPart<'a> {
    pub fn new(doc: &'a dyn DocumentSnapshot) -> Self {
        Self { doc }
    }
}

impl Part for DocumentRelationshipsPart<'_> {
    fn partname(&self) -> &str {
        partname::DOCUMENT_RELS
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_manifest(self.doc, RelationshipScope::Document)
    }
}
