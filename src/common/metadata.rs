/// Document metadata written to the package property parts.
///
/// Core fields end up in `docProps/core.xml`, the organisational ones
/// (company, manager, application) in `docProps/app.xml`.
use serde::{Deserialize, Serialize};
use crate::common::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};

/// Application name recorded in extended properties when none is set.
pub const DEFAULT_APPLICATION: &str = "loquat";

/// Unified document metadata structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document author/creator
    pub creator: Option<String>,
    /// Keywords associated with the document
    pub keywords: Option<String>,
    /// Document description/comments
    pub description: Option<String>,
    /// Last person to modify the document
    pub last_modified_by: Option<String>,
    /// Revision number
    pub revision: Option<String>,
    /// Creation date
    pub created: Option<DateTime<Utc>>,
    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
    /// Document category
    pub category: Option<String>,
    /// Content status (draft, final, etc.)
    pub content_status: Option<String>,
    /// Document language tag, e.g. `en-US`
    pub language: Option<String>,
    /// Document version string
    pub version: Option<String>,
    /// Company/organization
    pub company: Option<String>,
    /// Manager name
    pub manager: Option<String>,
    /// Application that created the document
    pub application: Option<String>,
}

impl Metadata {
    /// Metadata for a freshly created document.
    ///
    /// Sets the creator, revision `1`, language `en-US` and stamps both
    /// timestamps with the current time.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            creator: Some(DEFAULT_APPLICATION.to_string()),
            revision: Some("1".to_string()),
            language: Some("en-US".to_string()),
            created: Some(now),
            modified: Some(now),
            ..Default::default()
        }
    }

    /// Check if the metadata contains any actual data.
    pub fn has_data(&self) -> bool {
        self.title.is_some()
            || self.subject.is_some()
            || self.creator.is_some()
            || self.keywords.is_some()
            || self.description.is_some()
            || self.last_modified_by.is_some()
            || self.revision.is_some()
            || self.created.is_some()
            || self.modified.is_some()
            || self.category.is_some()
            || self.content_status.is_some()
            || self.language.is_some()
            || self.version.is_some()
            || self.company.is_some()
            || self.manager.is_some()
            || self.application.is_some()
    }

    /// Load metadata from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse metadata YAML: {}", e)))
    }
}

/// Format a timestamp as W3CDTF (`2024-01-15T10:30:00Z`).
///
/// A missing timestamp is rendered as the current time.
pub fn format_w3cdtf(t: Option<DateTime<Utc>>) -> String {
    t.unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metadata_has_data() {
        let empty_metadata = Metadata::default();
        assert!(!empty_metadata.has_data());

        let metadata_with_title = Metadata {
            title: Some("Test Document".to_string()),
            ..Default::default()
        };
        assert!(metadata_with_title.has_data());
    }

    #[test]
    fn test_new_defaults() {
        let md = Metadata::new();
        assert_eq!(md.creator.as_deref(), Some(DEFAULT_APPLICATION));
        assert_eq!(md.revision.as_deref(), Some("1"));
        assert_eq!(md.language.as_deref(), Some("en-US"));
        assert!(md.created.is_some());
        assert_eq!(md.created, md.modified);
    }

    #[test]
    fn test_format_w3cdtf() {
        let t = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_w3cdtf(Some(t)), "2024-01-15T10:30:00Z");
        assert!(format_w3cdtf(None).ends_with('Z'));
    }

    #[test]
    fn test_from_yaml() {
        let md = Metadata::from_yaml_str("title: Quarterly Report\ncompany: Acme\n").unwrap();
        assert_eq!(md.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(md.company.as_deref(), Some("Acme"));
        assert!(md.creator.is_none());
    }
}
