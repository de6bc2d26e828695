//! Relationship type URIs.
//!
//! The set of relationship kinds is fixed by the package schema, so it is a
//! closed enum rather than a free-form string. Each kind maps to exactly one
//! type URI and back; lookups from URI use a compile-time perfect hash.

use phf::phf_map;
use std::fmt;

// Keeps the officeDocument prefix in one place while staying const
macro_rules! concat_ofc {
    ($name:literal) => {
        concat!(
            "http://schemas.openxmlformats.org/officeDocument/2006/relationships/",
            $name
        )
    };
}

/// Kind of relationship between a source and its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RelationshipKind {
    // Document relationships
    OfficeDocument,
    Styles,
    Numbering,
    Settings,
    WebSettings,
    FontTable,
    Theme,
    Footnotes,
    Endnotes,
    Comments,
    Header,
    Footer,
    Image,
    Hyperlink,
    Chart,
    DiagramData,
    CustomXml,
    CustomXmlProps,
    // Package relationships
    CoreProperties,
    ExtendedProperties,
    CustomProperties,
    Thumbnail,
    DigitalSignature,
}

static KIND_BY_URI: phf::Map<&'static str, RelationshipKind> = phf_map! {
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" => RelationshipKind::OfficeDocument,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" => RelationshipKind::Styles,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" => RelationshipKind::Numbering,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings" => RelationshipKind::Settings,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/webSettings" => RelationshipKind::WebSettings,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/fontTable" => RelationshipKind::FontTable,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" => RelationshipKind::Theme,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footnotes" => RelationshipKind::Footnotes,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/endnotes" => RelationshipKind::Endnotes,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments" => RelationshipKind::Comments,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" => RelationshipKind::Header,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer" => RelationshipKind::Footer,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" => RelationshipKind::Image,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" => RelationshipKind::Hyperlink,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart" => RelationshipKind::Chart,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramData" => RelationshipKind::DiagramData,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/customXml" => RelationshipKind::CustomXml,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/customXmlProps" => RelationshipKind::CustomXmlProps,
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" => RelationshipKind::CoreProperties,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" => RelationshipKind::ExtendedProperties,
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/custom-properties" => RelationshipKind::CustomProperties,
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/thumbnail" => RelationshipKind::Thumbnail,
    "http://schemas.openxmlformats.org/package/2006/relationships/digital-signature/signature" => RelationshipKind::DigitalSignature,
};

impl RelationshipKind {
    /// All kinds, in declaration order.
    pub const ALL: [RelationshipKind; 23] = [
        Self::OfficeDocument,
        Self::Styles,
        Self::Numbering,
        Self::Settings,
        Self::WebSettings,
        Self::FontTable,
        Self::Theme,
        Self::Footnotes,
        Self::Endnotes,
        Self::Comments,
        Self::Header,
        Self::Footer,
        Self::Image,
        Self::Hyperlink,
        Self::Chart,
        Self::DiagramData,
        Self::CustomXml,
        Self::CustomXmlProps,
        Self::CoreProperties,
        Self::ExtendedProperties,
        Self::CustomProperties,
        Self::Thumbnail,
        Self::DigitalSignature,
    ];

    /// The relationship type URI written to the `Type` attribute.
    pub const fn uri(self) -> &'static str {
        match self {
            Self::OfficeDocument => concat_ofc!("officeDocument"),
            Self::Styles => concat_ofc!("styles"),
            Self::Numbering => concat_ofc!("numbering"),
            Self::Settings => concat_ofc!("settings"),
            Self::WebSettings => concat_ofc!("webSettings"),
            Self::FontTable => concat_ofc!("fontTable"),
            Self::Theme => concat_ofc!("theme"),
            Self::Footnotes => concat_ofc!("footnotes"),
            Self::Endnotes => concat_ofc!("endnotes"),
            Self::Comments => concat_ofc!("comments"),
            Self::Header => concat_ofc!("header"),
            Self::Footer => concat_ofc!("footer"),
            Self::Image => concat_ofc!("image"),
            Self::Hyperlink => concat_ofc!("hyperlink"),
            Self::Chart => concat_ofc!("chart"),
            Self::DiagramData => concat_ofc!("diagramData"),
            Self::CustomXml => concat_ofc!("customXml"),
            Self::CustomXmlProps => concat_ofc!("customXmlProps"),
            Self::CoreProperties => {
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
            },
            Self::ExtendedProperties => concat_ofc!("extended-properties"),
            Self::CustomProperties => concat_ofc!("custom-properties"),
            Self::Thumbnail => {
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/thumbnail"
            },
            Self::DigitalSignature => {
                "http://schemas.openxmlformats.org/package/2006/relationships/digital-signature/signature"
            },
        }
    }

    /// Look a kind up by its type URI.
    pub fn from_uri(uri: &str) -> Option<Self> {
        KIND_BY_URI.get(uri).copied()
    }

    /// Short name, the last path segment of the URI.
    pub fn short_name(self) -> &'static str {
        let uri = self.uri();
        uri.rsplit('/').next().unwrap_or(uri)
    }

    /// Whether this kind belongs in the root package manifest by default.
    pub fn is_package_level(self) -> bool {
        matches!(
            self,
            Self::OfficeDocument
                | Self::CoreProperties
                | Self::ExtendedProperties
                | Self::CustomProperties
                | Self::Thumbnail
                | Self::DigitalSignature
        )
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFC: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/";

    #[test]
    fn test_uri_round_trip_for_all_kinds() {
        for kind in RelationshipKind::ALL {
            assert_eq!(RelationshipKind::from_uri(kind.uri()), Some(kind));
        }
        assert_eq!(KIND_BY_URI.len(), RelationshipKind::ALL.len());
    }

    #[test]
    fn test_office_prefix() {
        assert!(RelationshipKind::Styles.uri().starts_with(OFC));
        assert!(!RelationshipKind::CoreProperties.uri().starts_with(OFC));
    }

    #[test]
    fn test_unknown_uri() {
        assert_eq!(RelationshipKind::from_uri("http://example.com/custom"), None);
        assert_eq!(RelationshipKind::from_uri(""), None);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(RelationshipKind::WebSettings.short_name(), "webSettings");
        assert_eq!(RelationshipKind::CoreProperties.to_string(), "core-properties");
        assert_eq!(RelationshipKind::DigitalSignature.short_name(), "signature");
    }
}
