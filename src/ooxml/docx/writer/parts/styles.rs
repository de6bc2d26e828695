use crate::common::Result;
use crate::ooxml::docx::snapshot::DocumentSnapshot;
use crate::ooxml::opc::constants::partname;
use crate::ooxml::opc::part::{Part, render_pooled};

/// Style definitions, `word/styles.xml`.
pub struct StylesPart<'a> {
    doc: &'a dyn DocumentSnapshot,
}

impl<'a> StylesPart<'a> {
    pub fn new(doc: &'a dyn DocumentSnapshot) -> Self {
        Self { doc }
    }
}

impl Part for StylesPart<'_> {
    fn partname(&self) -> &str {
        partname::STYLES
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_pooled(|buf| {
            self.doc.styles().write_xml(buf)?;
            Ok(())
        })
    }
}
