//! Package writer configuration.

use crate::common::{Error, Result};
use crate::ooxml::opc::CompressionProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How part serialization is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteStrategy {
    /// Serialize and append one part at a time
    Sequential,
    /// Serialize every part concurrently, then append them in order
    #[default]
    Parallel,
}

/// When the default numbering catalog is written to `word/numbering.xml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingPolicy {
    /// Always write the full catalog
    Full,
    /// Write an empty numbering root unless some element uses a list
    #[default]
    Minimal,
}

/// Options for [`PackageWriter`](super::PackageWriter).
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```rust
/// use loquat::ooxml::docx::{WriteOptions, WriteStrategy};
///
/// let opts = WriteOptions::from_yaml_str("strategy: sequential\ncompression: compact\n").unwrap();
/// assert_eq!(opts.strategy, WriteStrategy::Sequential);
/// assert!(opts.validate_relationships);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriteOptions {
    /// ZIP compression applied to every entry
    pub compression: CompressionProfile,
    /// Part serialization schedule
    pub strategy: WriteStrategy,
    /// Numbering materialization
    pub numbering: NumberingPolicy,
    /// Run `Relationships::validate` before writing anything
    pub validate_relationships: bool,
    /// Also write settings, web settings, font table and theme parts
    pub auxiliary_parts: bool,
    /// Worker threads for the parallel strategy; `None` uses the global pool
    pub threads: Option<usize>,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: CompressionProfile::Balanced,
            strategy: WriteStrategy::Parallel,
            numbering: NumberingPolicy::Minimal,
            validate_relationships: true,
            auxiliary_parts: false,
            threads: None,
        }
    }
}

impl WriteOptions {
    /// Favor speed over size: entries are stored uncompressed.
    pub fn fast() -> Self {
        Self {
            compression: CompressionProfile::Fast,
            ..Self::default()
        }
    }

    /// Favor size over speed: maximum deflate level, minimal numbering.
    pub fn compact() -> Self {
        Self {
            compression: CompressionProfile::Compact,
            numbering: NumberingPolicy::Minimal,
            ..Self::default()
        }
    }

    /// Check option values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(Error::Config("threads must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Parse options from YAML. Missing keys keep their defaults and unknown
    /// keys are rejected.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let opts: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse write options: {}", e)))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read options from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize options to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize write options: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use std::io::Write;

    #[test]
    fn test_presets() {
        let default = WriteOptions::default();
        assert_eq!(default.compression, CompressionProfile::Balanced);
        assert_eq!(default.strategy, WriteStrategy::Parallel);
        assert_eq!(default.numbering, NumberingPolicy::Minimal);
        assert!(default.validate_relationships);
        assert!(!default.auxiliary_parts);

        assert_eq!(WriteOptions::fast().compression, CompressionProfile::Fast);
        assert_eq!(WriteOptions::compact().compression, CompressionProfile::Compact);
    }

    #[test]
    fn test_yaml_partial() {
        let opts = WriteOptions::from_yaml_str("numbering: full\nthreads: 2\n").unwrap();
        assert_eq!(opts.numbering, NumberingPolicy::Full);
        assert_eq!(opts.threads, Some(2));
        assert_eq!(opts.compression, CompressionProfile::Balanced);
    }

    #[test]
    fn test_yaml_rejects_unknown_and_invalid() {
        let err = WriteOptions::from_yaml_str("pretty_print: true\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = WriteOptions::from_yaml_str("threads: 0\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        assert!(WriteOptions::from_yaml_str("strategy: eager\n").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let opts = WriteOptions {
            strategy: WriteStrategy::Sequential,
            auxiliary_parts: true,
            ..WriteOptions::compact()
        };
        let yaml = opts.to_yaml_string().unwrap();
        assert_eq!(WriteOptions::from_yaml_str(&yaml).unwrap(), opts);
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "compression: fast").unwrap();
        let opts = WriteOptions::from_yaml_file(file.path()).unwrap();
        assert_eq!(opts.compression, CompressionProfile::Fast);

        let err = WriteOptions::from_yaml_file("/nonexistent/loquat.yaml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
