//! Merging one relationship store into another.
//!
//! Used when two documents or fragments are composed into one package: the
//! incoming relationships are re-keyed into the receiver's id space, and
//! resources the receiver already references are shared instead of duplicated.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::rel::{IdMapping, Relationships};
use tracing::debug;

impl Relationships {
    /// Import every relationship of `other`.
    ///
    /// Source relationships are visited in manifest order, package partition
    /// first. One that matches an existing relationship (same target key, or
    /// same external URL) maps to the existing id; any other is copied under a
    /// newly allocated id into the same partition it had in `other`.
    ///
    /// Returns the mapping from `other`'s ids to ids in `self`, so callers can
    /// rewrite `r:id` references in the merged content.
    ///
    /// # Errors
    ///
    /// Fails with [`ValidationError`](super::ValidationError) if `other` has a
    /// relationship listed in neither partition (or otherwise inconsistent
    /// partitions). The check runs before anything is copied, so `self` is left
    /// untouched on error.
    pub fn merge(&mut self, other: &Relationships) -> Result<IdMapping> {
        other.check_partitions()?;

        let mut mapping = IdMapping::with_capacity(other.len());
        let mut reused = 0usize;
        for (scope, rel) in other.iter() {
            let new_id = match self.find_duplicate(rel) {
                Some(existing) => {
                    reused += 1;
                    existing.to_string()
                },
                None => self.insert_copy(scope, rel),
            };
            mapping.insert(rel.id().to_string(), new_id);
        }

        debug!(
            incoming = other.len(),
            reused,
            total = self.len(),
            "merged relationships"
        );
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use crate::ooxml::opc::{RelationshipKind, RelationshipScope, Relationships, TargetMode};
    use proptest::prelude::*;

    fn summary(rels: &Relationships) -> Vec<(RelationshipScope, RelationshipKind, String, TargetMode)> {
        rels.iter()
            .map(|(scope, rel)| (scope, rel.kind(), rel.target().to_string(), rel.target_mode()))
            .collect()
    }

    #[test]
    fn test_merge_into_empty_is_isomorphic() {
        let mut source = Relationships::with_defaults();
        source.get_or_create_hyperlink("https://example.com");
        source.add_image("logo.png");
        // Punch a hole in the source id space
        let header = source.add_header("header1.xml").id().to_string();
        source.remove(&header);
        source.add_footer("footer1.xml");

        let mut target = Relationships::new();
        let mapping = target.merge(&source).unwrap();

        assert_eq!(summary(&target), summary(&source));
        assert_eq!(mapping.len(), source.len());

        // Ids are renumbered densely from rId1 in manifest order
        let ids: Vec<String> = target.iter().map(|(_, rel)| rel.id().to_string()).collect();
        let expected: Vec<String> = (1..=source.len()).map(|n| format!("rId{}", n)).collect();
        assert_eq!(ids, expected);
        assert!(target.validate().is_ok());
    }

    #[test]
    fn test_merge_dedups_shared_resources() {
        let mut a = Relationships::with_defaults();
        let link_a = a.get_or_create_hyperlink("https://example.com").id().to_string();

        let mut b = Relationships::with_defaults();
        let link_b = b.get_or_create_hyperlink("https://example.com").id().to_string();
        b.get_or_create_hyperlink("https://example.org");
        b.add_image("chart.png");

        let before = a.len();
        let mapping = a.merge(&b).unwrap();

        // Defaults and the shared link are reused, two resources are new
        assert_eq!(a.len(), before + 2);
        assert_eq!(mapping[&link_b], link_a);
        assert_eq!(mapping.len(), b.len());
        assert_eq!(a.hyperlinks().len(), 2);
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_merge_preserves_partitions() {
        let mut source = Relationships::new();
        let pkg = source
            .add_package_relationship(RelationshipKind::Thumbnail, "docProps/thumbnail.jpeg", TargetMode::Internal)
            .id()
            .to_string();
        let doc = source.add_header("header1.xml").id().to_string();

        let mut target = Relationships::with_defaults();
        let mapping = target.merge(&source).unwrap();

        assert_eq!(target.scope_of(&mapping[&pkg]), Some(RelationshipScope::Package));
        assert_eq!(target.scope_of(&mapping[&doc]), Some(RelationshipScope::Document));
        assert_eq!(mapping[&pkg], "rId9");
        assert_eq!(mapping[&doc], "rId10");
    }

    /// (document, kind index, target, external)
    type Entry = (bool, usize, u8, bool);

    fn store(entries: &[Entry]) -> Relationships {
        let mut rels = Relationships::new();
        for &(document, kind, target, external) in entries {
            let scope = if document { RelationshipScope::Document } else { RelationshipScope::Package };
            if external {
                // External targets are shared by URL alone, whatever the kind.
                let url = format!("https://example.com/{}", target);
                rels.add(scope, RelationshipKind::Hyperlink, url, TargetMode::External);
            } else {
                let kind = RelationshipKind::ALL[kind];
                rels.add(scope, kind, format!("part{}.xml", target), TargetMode::Internal);
            }
        }
        rels
    }

    fn entries() -> impl Strategy<Value = Vec<Entry>> {
        prop::collection::vec(
            (any::<bool>(), 0..RelationshipKind::ALL.len(), 0u8..12, any::<bool>()),
            0..24,
        )
    }

    fn contains(rels: &Relationships, kind: RelationshipKind, target: &str, mode: TargetMode) -> bool {
        rels.iter()
            .any(|(_, rel)| rel.kind() == kind && rel.target() == target && rel.target_mode() == mode)
    }

    proptest! {
        #[test]
        fn prop_merge_never_loses_resources(a in entries(), b in entries()) {
            let receiver = store(&a);
            let mut merged = receiver.clone();
            let before = summary(&receiver);
            let source = store(&b);
            let mapping = merged.merge(&source).unwrap();

            for (_, kind, target, mode) in before.iter().chain(summary(&source).iter()) {
                prop_assert!(contains(&merged, *kind, target, *mode), "lost {:?} {}", kind, target);
            }
            for (_, rel) in source.iter() {
                let mapped = merged.get(&mapping[rel.id()]).unwrap();
                prop_assert_eq!(mapped.kind(), rel.kind());
                prop_assert_eq!(mapped.target(), rel.target());
            }
            // The receiver's own relationships keep their ids and partitions.
            for (scope, rel) in receiver.iter() {
                prop_assert_eq!(merged.get(rel.id()), Some(rel));
                prop_assert_eq!(merged.scope_of(rel.id()), Some(scope));
            }
            prop_assert!(merged.validate().is_ok());
        }

        #[test]
        fn prop_merge_into_empty_renumbers(b in entries()) {
            let source = store(&b);
            let mut target = Relationships::new();
            target.merge(&source).unwrap();

            prop_assert_eq!(summary(&target), summary(&source));
            let ids: Vec<String> = target.iter().map(|(_, rel)| rel.id().to_string()).collect();
            let expected: Vec<String> = (1..=source.len()).map(|n| format!("rId{}", n)).collect();
            prop_assert_eq!(ids, expected);
        }
    }
}
