//! Relationship graph for a WordprocessingML package.
//!
//! A single [`Relationships`] store owns every relationship of a package. It keeps
//! the package-level and document-level entries in two ordered partitions (they
//! are rendered to `_rels/.rels` and `word/_rels/document.xml.rels`) and maintains
//! lookup indices by id, kind, target key and external target.

use crate::common::id::random_hex_token;
use crate::common::xml::write_escaped;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::{Result, ValidationError};
use crate::ooxml::opc::reltype::RelationshipKind;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::str::FromStr;

/// Whether a relationship points into the package or outside of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetMode {
    /// Target is a part inside the package (default)
    #[default]
    Internal,
    /// Target is an external URI, e.g. a hyperlink
    External,
}

impl TargetMode {
    /// Attribute value as written to the manifest.
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetMode::Internal => "Internal",
            TargetMode::External => "External",
        }
    }
}

impl FromStr for TargetMode {
    type Err = ValidationError;

    /// An absent attribute (empty string) means `Internal`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" | "Internal" => Ok(TargetMode::Internal),
            "External" => Ok(TargetMode::External),
            other => Err(ValidationError::UnrecognizedTargetMode(other.to_string())),
        }
    }
}

impl fmt::Display for TargetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which manifest a relationship is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipScope {
    /// Root manifest, `_rels/.rels`
    Package,
    /// Main document manifest, `word/_rels/document.xml.rels`
    Document,
}

/// A single relationship from a source to a target.
///
/// Identified by an rId that is unique within its store. Relationships are
/// immutable once created; merging copies them under a new id instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    id: String,

    /// Relationship type
    kind: RelationshipKind,

    /// Target reference, either a part path or an external URL
    target: String,

    /// Internal or external target
    target_mode: TargetMode,

    /// Deduplication key derived from kind, target and mode
    target_key: String,
}

impl Relationship {
    fn new(id: String, kind: RelationshipKind, target: String, target_mode: TargetMode) -> Self {
        let target_key = target_key(kind, &target, target_mode);
        Self {
            id,
            kind,
            target,
            target_mode,
            target_key,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the relationship kind.
    #[inline]
    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    /// Get the target reference.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Get the target mode.
    #[inline]
    pub fn target_mode(&self) -> TargetMode {
        self.target_mode
    }

    /// Get the deduplication key.
    #[inline]
    pub fn target_key(&self) -> &str {
        &self.target_key
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.target_mode == TargetMode::External
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(ValidationError::EmptyField {
                id: String::new(),
                field: "id",
            });
        }
        if self.target.is_empty() {
            return Err(ValidationError::EmptyField {
                id: self.id.clone(),
                field: "target",
            });
        }
        Ok(())
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Relationship{{ID: {}, Type: {}, Target: {}, Mode: {}}}",
            self.id, self.kind, self.target, self.target_mode
        )
    }
}

/// Compute the deduplication key of a relationship.
///
/// External targets are keyed by the URL alone, so one URL gets one relationship
/// whatever its kind. Internal targets are keyed by kind and path.
pub fn target_key(kind: RelationshipKind, target: &str, mode: TargetMode) -> String {
    match mode {
        TargetMode::External => target.to_string(),
        TargetMode::Internal => {
            let uri = kind.uri();
            let mut key = String::with_capacity(uri.len() + 1 + target.len());
            key.push_str(uri);
            key.push('/');
            key.push_str(target.trim_start_matches('/'));
            key
        },
    }
}

/// Mapping from source ids to receiver ids produced by a merge.
pub type IdMapping = HashMap<String, String>;

/// Collection of relationships for one package.
///
/// The id counter is part of the value: cloning a store clones its counter,
/// and two stores never share allocation state. Ids are allocated sequentially
/// and never reused, even after [`remove`](Self::remove).
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Primary index: rId to relationship
    items: HashMap<String, Relationship>,

    /// rIds per kind, in insertion order
    by_kind: HashMap<RelationshipKind, SmallVec<[String; 4]>>,

    /// Target key to rId
    by_target_key: HashMap<String, String>,

    /// External URL to rId
    external: HashMap<String, String>,

    /// Package-level partition, in insertion order
    package: Vec<String>,

    /// Document-level partition, in insertion order
    document: Vec<String>,

    /// Next numeric suffix to hand out
    next_id: u32,
}

impl Relationships {
    /// Create an empty relationships collection.
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            by_kind: HashMap::new(),
            by_target_key: HashMap::new(),
            external: HashMap::new(),
            package: Vec::new(),
            document: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a collection seeded with the relationships every document carries.
    ///
    /// Package level: main document, core and extended properties. Document
    /// level: styles, settings, web settings, font table and theme.
    pub fn with_defaults() -> Self {
        use RelationshipKind::*;

        let mut rels = Self::new();
        rels.add_package_relationship(OfficeDocument, "word/document.xml", TargetMode::Internal);
        rels.add_package_relationship(CoreProperties, "docProps/core.xml", TargetMode::Internal);
        rels.add_package_relationship(ExtendedProperties, "docProps/app.xml", TargetMode::Internal);

        rels.add_document_relationship(Styles, "styles.xml", TargetMode::Internal);
        rels.add_document_relationship(Settings, "settings.xml", TargetMode::Internal);
        rels.add_document_relationship(WebSettings, "webSettings.xml", TargetMode::Internal);
        rels.add_document_relationship(FontTable, "fontTable.xml", TargetMode::Internal);
        rels.add_document_relationship(Theme, "theme/theme1.xml", TargetMode::Internal);
        rels
    }

    fn allocate_id(&mut self) -> String {
        let mut buf = itoa::Buffer::new();
        let digits = buf.format(self.next_id);
        let mut id = String::with_capacity(3 + digits.len());
        id.push_str("rId");
        id.push_str(digits);
        self.next_id += 1;
        id
    }

    /// Id of an existing relationship equivalent to `(kind, target, mode)`.
    fn find_equivalent(&self, key: &str, target: &str, mode: TargetMode) -> Option<String> {
        let id = self.by_target_key.get(key).or_else(|| match mode {
            TargetMode::External => self.external.get(target),
            TargetMode::Internal => None,
        })?;
        self.items.contains_key(id).then(|| id.clone())
    }

    /// Insert a relationship that is known to be new, updating every index.
    fn insert(&mut self, scope: RelationshipScope, rel: Relationship) -> &Relationship {
        let id = rel.id.clone();

        self.by_kind.entry(rel.kind).or_default().push(id.clone());
        self.by_target_key
            .insert(rel.target_key.clone(), id.clone());
        if rel.is_external() {
            self.external.insert(rel.target.clone(), id.clone());
        }
        match scope {
            RelationshipScope::Package => self.package.push(id.clone()),
            RelationshipScope::Document => self.document.push(id.clone()),
        }

        match self.items.entry(id) {
            Entry::Occupied(mut slot) => {
                slot.insert(rel);
                slot.into_mut()
            },
            Entry::Vacant(slot) => slot.insert(rel),
        }
    }

    /// Add a relationship to the given partition.
    ///
    /// If an equivalent relationship (same target key, or same external URL)
    /// already exists it is returned unchanged and no id is consumed.
    pub fn add(
        &mut self,
        scope: RelationshipScope,
        kind: RelationshipKind,
        target: impl Into<String>,
        mode: TargetMode,
    ) -> &Relationship {
        let target = target.into();
        let key = target_key(kind, &target, mode);

        if let Some(id) = self.find_equivalent(&key, &target, mode) {
            return &self.items[&id];
        }

        let id = self.allocate_id();
        let rel = Relationship {
            id,
            kind,
            target,
            target_mode: mode,
            target_key: key,
        };
        self.insert(scope, rel)
    }

    /// Add a package-level relationship (`_rels/.rels`).
    pub fn add_package_relationship(
        &mut self,
        kind: RelationshipKind,
        target: impl Into<String>,
        mode: TargetMode,
    ) -> &Relationship {
        self.add(RelationshipScope::Package, kind, target, mode)
    }

    /// Add a document-level relationship (`word/_rels/document.xml.rels`).
    pub fn add_document_relationship(
        &mut self,
        kind: RelationshipKind,
        target: impl Into<String>,
        mode: TargetMode,
    ) -> &Relationship {
        self.add(RelationshipScope::Document, kind, target, mode)
    }

    /// Get or add an internal relationship.
    ///
    /// Used when a feature needs a part exactly once, e.g. the numbering part
    /// the first time a list item is added.
    pub fn get_or_add(
        &mut self,
        scope: RelationshipScope,
        kind: RelationshipKind,
        target: &str,
    ) -> &Relationship {
        self.add(scope, kind, target, TargetMode::Internal)
    }

    /// Add an image relationship targeting `media/<filename>`.
    ///
    /// Returns the existing relationship when that target is already referenced.
    pub fn add_image(&mut self, filename: &str) -> &Relationship {
        self.add_document_relationship(RelationshipKind::Image, media_target(filename), TargetMode::Internal)
    }

    /// Add an image relationship that never shares a target with an existing one.
    ///
    /// On collision the file stem gets a random 8-character suffix,
    /// `media/<stem>_<token><ext>`, so two calls with the same name always yield
    /// two relationships with distinct targets.
    pub fn add_unique_image(&mut self, filename: &str) -> &Relationship {
        let mut target = media_target(filename);
        if self.has_image(&target) {
            let (stem, ext) = split_extension(filename);
            loop {
                target = format!("media/{}_{}{}", stem, random_hex_token(8), ext);
                if !self.has_image(&target) {
                    break;
                }
            }
        }
        self.add_document_relationship(RelationshipKind::Image, target, TargetMode::Internal)
    }

    /// Return the hyperlink relationship for `url`, creating it on first use.
    ///
    /// Idempotent: repeated calls with the same URL return the same id.
    pub fn get_or_create_hyperlink(&mut self, url: &str) -> &Relationship {
        self.add_document_relationship(RelationshipKind::Hyperlink, url, TargetMode::External)
    }

    /// Add a header part relationship.
    pub fn add_header(&mut self, header_file: &str) -> &Relationship {
        self.add_document_relationship(RelationshipKind::Header, header_file, TargetMode::Internal)
    }

    /// Add a footer part relationship.
    pub fn add_footer(&mut self, footer_file: &str) -> &Relationship {
        self.add_document_relationship(RelationshipKind::Footer, footer_file, TargetMode::Internal)
    }

    /// Add a chart part relationship.
    pub fn add_chart(&mut self, chart_file: &str) -> &Relationship {
        self.add_document_relationship(RelationshipKind::Chart, chart_file, TargetMode::Internal)
    }

    /// Add a custom XML part relationship.
    pub fn add_custom_xml(&mut self, xml_file: &str) -> &Relationship {
        self.add_document_relationship(RelationshipKind::CustomXml, xml_file, TargetMode::Internal)
    }

    /// Get a relationship by its rId.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.get(id)
    }

    /// Check if a relationship with the given rId exists.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// All relationships of a kind, in insertion order.
    pub fn by_kind(&self, kind: RelationshipKind) -> Vec<&Relationship> {
        self.by_kind
            .get(&kind)
            .map(|ids| ids.iter().filter_map(|id| self.items.get(id)).collect())
            .unwrap_or_default()
    }

    /// Number of relationships of a kind.
    pub fn count_by_kind(&self, kind: RelationshipKind) -> usize {
        self.by_kind.get(&kind).map_or(0, |ids| ids.len())
    }

    fn has_image(&self, target: &str) -> bool {
        let key = target_key(RelationshipKind::Image, target, TargetMode::Internal);
        self.find_equivalent(&key, target, TargetMode::Internal).is_some()
    }

    fn find_id_by_target(&self, target: &str) -> Option<String> {
        if let Some(id) = self.by_target_key.get(target) {
            return Some(id.clone());
        }
        self.package
            .iter()
            .chain(&self.document)
            .find(|id| self.items.get(*id).is_some_and(|rel| rel.target == target))
            .cloned()
    }

    /// Find a relationship by target.
    ///
    /// Tries the target key index first (external URLs), then falls back to a
    /// scan over both partitions in manifest order.
    pub fn get_by_target(&self, target: &str) -> Option<&Relationship> {
        let id = self.find_id_by_target(target)?;
        self.items.get(&id)
    }

    /// Find an external relationship by URL.
    pub fn get_external(&self, url: &str) -> Option<&Relationship> {
        self.external.get(url).and_then(|id| self.items.get(id))
    }

    /// All image relationships.
    pub fn images(&self) -> Vec<&Relationship> {
        self.by_kind(RelationshipKind::Image)
    }

    /// All hyperlink relationships.
    pub fn hyperlinks(&self) -> Vec<&Relationship> {
        self.by_kind(RelationshipKind::Hyperlink)
    }

    /// All header relationships.
    pub fn headers(&self) -> Vec<&Relationship> {
        self.by_kind(RelationshipKind::Header)
    }

    /// All footer relationships.
    pub fn footers(&self) -> Vec<&Relationship> {
        self.by_kind(RelationshipKind::Footer)
    }

    /// Remove a relationship by rId.
    ///
    /// Updates every index and both partitions. Returns whether anything was
    /// removed. The id is retired and never handed out again.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(rel) = self.items.remove(id) else {
            return false;
        };

        if self.by_target_key.get(&rel.target_key).is_some_and(|v| v == id) {
            self.by_target_key.remove(&rel.target_key);
        }
        if rel.is_external() && self.external.get(&rel.target).is_some_and(|v| v == id) {
            self.external.remove(&rel.target);
        }
        if let Some(ids) = self.by_kind.get_mut(&rel.kind) {
            ids.retain(|x| x != id);
            if ids.is_empty() {
                self.by_kind.remove(&rel.kind);
            }
        }
        self.package.retain(|x| x != id);
        self.document.retain(|x| x != id);
        true
    }

    /// Remove every relationship and reset the id counter.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Total number of relationships.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Numeric suffix the next new relationship will receive.
    #[inline]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Which partition a relationship is listed in.
    pub fn scope_of(&self, id: &str) -> Option<RelationshipScope> {
        if self.package.iter().any(|x| x == id) {
            Some(RelationshipScope::Package)
        } else if self.document.iter().any(|x| x == id) {
            Some(RelationshipScope::Document)
        } else {
            None
        }
    }

    fn partition(&self, scope: RelationshipScope) -> &[String] {
        match scope {
            RelationshipScope::Package => &self.package,
            RelationshipScope::Document => &self.document,
        }
    }

    /// Relationships of one partition, in manifest order.
    pub fn scoped(&self, scope: RelationshipScope) -> impl Iterator<Item = &Relationship> {
        self.partition(scope)
            .iter()
            .filter_map(|id| self.items.get(id))
    }

    /// Package-level relationships, in manifest order.
    pub fn package_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.scoped(RelationshipScope::Package)
    }

    /// Document-level relationships, in manifest order.
    pub fn document_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.scoped(RelationshipScope::Document)
    }

    /// Every relationship with its partition, package partition first.
    pub fn iter(&self) -> impl Iterator<Item = (RelationshipScope, &Relationship)> {
        self.package_relationships()
            .map(|rel| (RelationshipScope::Package, rel))
            .chain(
                self.document_relationships()
                    .map(|rel| (RelationshipScope::Document, rel)),
            )
    }

    /// Check that the partitions and the id index agree.
    ///
    /// Every partition entry must exist in the id index, and every indexed
    /// relationship must be listed in exactly one partition.
    pub(crate) fn check_partitions(&self) -> Result<()> {
        let mut seen: HashMap<&str, RelationshipScope> = HashMap::with_capacity(self.items.len());
        for scope in [RelationshipScope::Package, RelationshipScope::Document] {
            for id in self.partition(scope) {
                if !self.items.contains_key(id) {
                    return Err(ValidationError::DanglingPartitionEntry(id.clone()));
                }
                match seen.insert(id.as_str(), scope) {
                    Some(prev) if prev == scope => {
                        return Err(ValidationError::DuplicateId(id.clone()));
                    },
                    Some(_) => return Err(ValidationError::PartitionConflict(id.clone())),
                    None => {},
                }
            }
        }

        if let Some(orphan) = self
            .items
            .keys()
            .filter(|id| !seen.contains_key(id.as_str()))
            .min()
        {
            return Err(ValidationError::OrphanedRelationship(orphan.clone()));
        }
        Ok(())
    }

    /// Validate the collection before serialization.
    ///
    /// Checks global id uniqueness, partition consistency and that every
    /// relationship has a non-empty id and target. Problems are reported,
    /// never repaired.
    pub fn validate(&self) -> Result<()> {
        self.check_partitions()?;
        for (_, rel) in self.iter() {
            rel.validate()?;
        }
        for (id, rel) in &self.items {
            if id != &rel.id {
                return Err(ValidationError::DuplicateId(rel.id.clone()));
            }
        }
        Ok(())
    }

    /// Render one partition as a relationships manifest.
    pub fn write_manifest<W: fmt::Write + ?Sized>(
        &self,
        scope: RelationshipScope,
        out: &mut W,
    ) -> fmt::Result {
        out.write_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#)?;
        out.write_char('\n')?;
        write!(out, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS)?;

        for rel in self.scoped(scope) {
            out.write_str(r#"<Relationship Id=""#)?;
            write_escaped(out, &rel.id)?;
            out.write_str(r#"" Type=""#)?;
            write_escaped(out, rel.kind.uri())?;
            out.write_str(r#"" Target=""#)?;
            write_escaped(out, &rel.target)?;
            out.write_char('"')?;
            if rel.is_external() {
                out.write_str(r#" TargetMode="External""#)?;
            }
            out.write_str("/>")?;
        }

        out.write_str("</Relationships>")
    }

    /// Render one partition to a string.
    pub fn manifest_xml(&self, scope: RelationshipScope) -> String {
        let mut xml = String::with_capacity(256 + self.partition(scope).len() * 160);
        // Writing into a String never fails
        let _ = self.write_manifest(scope, &mut xml);
        xml
    }

    /// Root manifest (`_rels/.rels`).
    pub fn package_manifest_xml(&self) -> String {
        self.manifest_xml(RelationshipScope::Package)
    }

    /// Main document manifest (`word/_rels/document.xml.rels`).
    pub fn document_manifest_xml(&self) -> String {
        self.manifest_xml(RelationshipScope::Document)
    }

    /// Existing relationship equivalent to `rel`, by target key or external URL.
    pub(super) fn find_duplicate(&self, rel: &Relationship) -> Option<&str> {
        let id = self.by_target_key.get(&rel.target_key).or_else(|| {
            rel.is_external()
                .then(|| self.external.get(&rel.target))
                .flatten()
        })?;
        self.items.get(id).map(|existing| existing.id())
    }

    /// Copy `rel` into this store under a freshly allocated id.
    pub(super) fn insert_copy(&mut self, scope: RelationshipScope, rel: &Relationship) -> String {
        let id = self.allocate_id();
        let copy = Relationship::new(id, rel.kind, rel.target.clone(), rel.target_mode);
        self.insert(scope, copy).id.clone()
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new()
    }
}

fn media_target(filename: &str) -> String {
    let mut target = String::with_capacity(6 + filename.len());
    target.push_str("media/");
    target.push_str(filename);
    target
}

/// Split `name.ext` into `("name", ".ext")`. Dotfiles keep their name.
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(pos) if pos > 0 => filename.split_at(pos),
        _ => (filename, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_target_mode_parse() {
        assert_eq!("External".parse::<TargetMode>().unwrap(), TargetMode::External);
        assert_eq!("Internal".parse::<TargetMode>().unwrap(), TargetMode::Internal);
        assert_eq!("".parse::<TargetMode>().unwrap(), TargetMode::Internal);
        assert_eq!(
            "external".parse::<TargetMode>(),
            Err(ValidationError::UnrecognizedTargetMode("external".to_string()))
        );
    }

    #[test]
    fn test_sequential_ids() {
        let mut rels = Relationships::new();
        let a = rels.add_header("header1.xml").id().to_string();
        let b = rels.add_footer("footer1.xml").id().to_string();
        assert_eq!(a, "rId1");
        assert_eq!(b, "rId2");
        assert_eq!(rels.next_id(), 3);
    }

    #[test]
    fn test_ids_never_reused_after_remove() {
        let mut rels = Relationships::new();
        let first = rels.add_header("header1.xml").id().to_string();
        assert!(rels.remove(&first));
        let second = rels.add_header("header2.xml").id().to_string();
        assert_eq!(second, "rId2");
        assert!(rels.get(&first).is_none());
    }

    #[test]
    fn test_defaults() {
        let rels = Relationships::with_defaults();
        assert_eq!(rels.len(), 8);
        assert_eq!(rels.package_relationships().count(), 3);
        assert_eq!(rels.document_relationships().count(), 5);

        let doc = rels.package_relationships().next().unwrap();
        assert_eq!(doc.id(), "rId1");
        assert_eq!(doc.kind(), RelationshipKind::OfficeDocument);
        assert_eq!(doc.target(), "word/document.xml");
        assert!(rels.validate().is_ok());
    }

    #[test]
    fn test_target_key() {
        assert_eq!(
            target_key(RelationshipKind::Hyperlink, "https://example.com", TargetMode::External),
            "https://example.com"
        );
        assert_eq!(
            target_key(RelationshipKind::Image, "media/a.png", TargetMode::Internal),
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image/media/a.png"
        );
    }

    #[test]
    fn test_hyperlink_idempotent() {
        let mut rels = Relationships::with_defaults();
        let a = rels.get_or_create_hyperlink("https://example.com").id().to_string();
        let b = rels.get_or_create_hyperlink("https://example.com").id().to_string();
        assert_eq!(a, b);
        assert_eq!(rels.hyperlinks().len(), 1);
        assert!(rels.get_external("https://example.com").unwrap().is_external());

        let c = rels.get_or_create_hyperlink("https://example.org").id().to_string();
        assert_ne!(a, c);
    }

    #[test]
    fn test_add_image_dedup() {
        let mut rels = Relationships::new();
        let a = rels.add_image("logo.png").id().to_string();
        let b = rels.add_image("logo.png").id().to_string();
        assert_eq!(a, b);
        assert_eq!(rels.get(&a).unwrap().target(), "media/logo.png");
        assert_eq!(rels.images().len(), 1);
    }

    #[test]
    fn test_add_image_ignores_other_kinds_on_same_target() {
        let mut rels = Relationships::new();
        let custom = rels
            .add_document_relationship(RelationshipKind::CustomXml, "media/x.png", TargetMode::Internal)
            .id()
            .to_string();
        let image = rels.add_image("x.png").id().to_string();
        assert_ne!(custom, image);
        assert_eq!(rels.get(&image).unwrap().kind(), RelationshipKind::Image);
        assert_eq!(rels.images().len(), 1);

        // The target is not taken by an image, so no suffix is needed.
        let mut rels = Relationships::new();
        rels.add_document_relationship(RelationshipKind::CustomXml, "media/y.png", TargetMode::Internal);
        assert_eq!(rels.add_unique_image("y.png").target(), "media/y.png");
    }

    #[test]
    fn test_add_unique_image_collision() {
        let mut rels = Relationships::new();
        let first = rels.add_unique_image("logo.png").target().to_string();
        let second = rels.add_unique_image("logo.png").target().to_string();
        assert_eq!(first, "media/logo.png");
        assert_ne!(first, second);
        assert!(second.starts_with("media/logo_"));
        assert!(second.ends_with(".png"));
        // media/logo_ + 8 hex + .png
        assert_eq!(second.len(), "media/logo_".len() + 8 + ".png".len());
        assert_eq!(rels.images().len(), 2);
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("logo.png"), ("logo", ".png"));
        assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".hidden"), (".hidden", ""));
    }

    #[test]
    fn test_get_by_target_scan() {
        let mut rels = Relationships::with_defaults();
        assert_eq!(rels.get_by_target("styles.xml").unwrap().kind(), RelationshipKind::Styles);
        rels.get_or_create_hyperlink("https://example.com");
        assert_eq!(
            rels.get_by_target("https://example.com").unwrap().kind(),
            RelationshipKind::Hyperlink
        );
        assert!(rels.get_by_target("missing.xml").is_none());
    }

    #[test]
    fn test_remove_updates_all_indices() {
        let mut rels = Relationships::with_defaults();
        let id = rels.get_or_create_hyperlink("https://example.com").id().to_string();
        assert!(rels.remove(&id));
        assert!(!rels.remove(&id));
        assert!(rels.get_external("https://example.com").is_none());
        assert!(rels.get_by_target("https://example.com").is_none());
        assert_eq!(rels.count_by_kind(RelationshipKind::Hyperlink), 0);
        assert_eq!(rels.scope_of(&id), None);
        assert!(rels.check_partitions().is_ok());

        // A new link to the same URL gets a fresh id
        let again = rels.get_or_create_hyperlink("https://example.com").id().to_string();
        assert_ne!(again, id);
    }

    #[test]
    fn test_clear_resets_counter() {
        let mut rels = Relationships::with_defaults();
        rels.clear();
        assert!(rels.is_empty());
        assert_eq!(rels.add_header("header1.xml").id(), "rId1");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Relationships::with_defaults();
        let copy = original.clone();
        original.get_or_create_hyperlink("https://example.com");

        assert_eq!(copy.len(), 8);
        assert_eq!(copy.next_id(), 9);
        assert_eq!(original.len(), 9);
        assert_eq!(copy.document_manifest_xml(), Relationships::with_defaults().document_manifest_xml());
    }

    #[test]
    fn test_validate_empty_target() {
        let mut rels = Relationships::new();
        rels.add_header("");
        assert_eq!(
            rels.validate(),
            Err(ValidationError::EmptyField {
                id: "rId1".to_string(),
                field: "target"
            })
        );
    }

    #[test]
    fn test_check_partitions_detects_corruption() {
        let mut rels = Relationships::with_defaults();
        rels.document.retain(|id| id != "rId4");
        assert_eq!(
            rels.validate(),
            Err(ValidationError::OrphanedRelationship("rId4".to_string()))
        );

        let mut rels = Relationships::with_defaults();
        rels.package.push("rId4".to_string());
        assert_eq!(
            rels.validate(),
            Err(ValidationError::PartitionConflict("rId4".to_string()))
        );

        let mut rels = Relationships::with_defaults();
        rels.document.push("rId99".to_string());
        assert_eq!(
            rels.validate(),
            Err(ValidationError::DanglingPartitionEntry("rId99".to_string()))
        );
    }

    #[test]
    fn test_merge_rejects_orphans_without_mutation() {
        let mut source = Relationships::with_defaults();
        source.document.retain(|id| id != "rId5");

        let mut target = Relationships::new();
        target.add_header("header1.xml");
        let before = target.document_manifest_xml();

        assert_eq!(
            target.merge(&source),
            Err(ValidationError::OrphanedRelationship("rId5".to_string()))
        );
        assert_eq!(target.document_manifest_xml(), before);
        assert_eq!(target.next_id(), 2);
    }

    #[test]
    fn test_manifest_external_mode_and_escaping() {
        let mut rels = Relationships::new();
        rels.get_or_create_hyperlink("https://example.com/?a=1&b=2");
        rels.add_image("logo.png");
        let xml = rels.document_manifest_xml();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(xml.contains(r#"Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>"#));
        assert!(xml.contains(r#"Target="media/logo.png"/>"#));
        assert!(xml.ends_with("</Relationships>"));
        assert_eq!(xml.matches("TargetMode=").count(), 1);
        assert_eq!(
            rels.package_manifest_xml(),
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "\n",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"></Relationships>"#
            )
        );
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add {
            document: bool,
            kind: usize,
            target: u8,
            external: bool,
        },
        Remove(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (any::<bool>(), 0..RelationshipKind::ALL.len(), 0u8..12, any::<bool>()).prop_map(
                |(document, kind, target, external)| Op::Add {
                    document,
                    kind,
                    target,
                    external
                }
            ),
            (0usize..32).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_ids_unique_and_indices_consistent(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut rels = Relationships::new();
            let mut ever_issued: HashSet<String> = HashSet::new();

            for op in ops {
                match op {
                    Op::Add { document, kind, target, external } => {
                        let scope = if document { RelationshipScope::Document } else { RelationshipScope::Package };
                        let mode = if external { TargetMode::External } else { TargetMode::Internal };
                        let before = rels.len();
                        let id = rels
                            .add(scope, RelationshipKind::ALL[kind], format!("t{}", target), mode)
                            .id()
                            .to_string();
                        if rels.len() > before {
                            // Freshly allocated ids are never recycled
                            prop_assert!(ever_issued.insert(id));
                        } else {
                            prop_assert!(ever_issued.contains(&id));
                        }
                    },
                    Op::Remove(n) => {
                        let id = format!("rId{}", n);
                        let existed = rels.contains(&id);
                        prop_assert_eq!(rels.remove(&id), existed);
                    },
                }

                prop_assert!(rels.check_partitions().is_ok());
                prop_assert_eq!(rels.package.len() + rels.document.len(), rels.len());
                let kinds: usize = RelationshipKind::ALL.iter().map(|k| rels.count_by_kind(*k)).sum();
                prop_assert_eq!(kinds, rels.len());
                for (_, rel) in rels.iter() {
                    prop_assert_eq!(rels.by_target_key.get(rel.target_key()), Some(&rel.id));
                }
            }
        }
    }
}
