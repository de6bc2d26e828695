//! Unified error types for loquat.
//!
//! Relationship-graph problems surface as [`ValidationError`]; everything that
//! happens while a package is being assembled is wrapped with the part path or
//! entry name so callers can tell which piece of the archive failed.
use crate::ooxml::opc::error::ValidationError;
use std::fmt;
use thiserror::Error;

/// Coarse classification of an [`Error`].
///
/// Lets callers branch on the failure class without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The relationship graph or document content is inconsistent
    Validation,
    /// A part could not render its XML
    Serialization,
    /// Writing to the sink or the ZIP container failed
    Io,
    /// Several independent failures were collected
    Aggregate,
    /// Invalid writer configuration
    Config,
}

/// Main error type for loquat operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Relationship graph validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A part failed to serialize
    #[error("Failed to serialize part '{part}': {source}")]
    Serialization {
        part: String,
        #[source]
        source: Box<Error>,
    },

    /// Sink write failure for a specific entry
    #[error("IO error while writing '{entry}': {source}")]
    Io {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    /// ZIP container error for a specific entry
    #[error("ZIP error while writing '{entry}': {reason}")]
    Zip { entry: String, reason: String },

    /// Multiple independent failures (media writes)
    #[error("{} errors occurred: {}", .0.len(), join_messages(.0))]
    Aggregate(Vec<Error>),

    /// Element content could not be rendered
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Writer options could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Formatting into an XML buffer failed
    #[error("Format error: {0}")]
    Fmt(#[from] fmt::Error),
}

fn join_messages(errors: &[Error]) -> String {
    let mut out = String::new();
    for (i, err) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(&err.to_string());
    }
    out
}

impl Error {
    /// Wrap an error raised while rendering `part`.
    pub fn serialization(part: impl Into<String>, source: Error) -> Self {
        Error::Serialization {
            part: part.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an I/O error raised while writing `entry`.
    pub fn io(entry: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            entry: entry.into(),
            source,
        }
    }

    /// Wrap a ZIP error raised while writing `entry`.
    ///
    /// Plain I/O failures inside the ZIP layer are unwrapped so the sink's
    /// error reaches the caller as [`Error::Io`].
    pub fn zip(entry: impl Into<String>, err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(source) => Error::Io {
                entry: entry.into(),
                source,
            },
            other => Error::Zip {
                entry: entry.into(),
                reason: other.to_string(),
            },
        }
    }

    /// Collapse a list of failures: one error is returned as-is, more become
    /// [`Error::Aggregate`]. Returns `None` for an empty list.
    pub fn aggregate(mut errors: Vec<Error>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Error::Aggregate(errors)),
        }
    }

    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) | Error::InvalidContent(_) => ErrorKind::Validation,
            Error::Serialization { .. } | Error::Fmt(_) => ErrorKind::Serialization,
            Error::Io { .. } | Error::Zip { .. } => ErrorKind::Io,
            Error::Aggregate(_) => ErrorKind::Aggregate,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// Part path or ZIP entry this error is attributed to, if any.
    pub fn entry(&self) -> Option<&str> {
        match self {
            Error::Serialization { part, .. } => Some(part),
            Error::Io { entry, .. } | Error::Zip { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// Collected errors for [`Error::Aggregate`], or a one-element view otherwise.
    pub fn errors(&self) -> &[Error] {
        match self {
            Error::Aggregate(list) => list,
            other => std::slice::from_ref(other),
        }
    }
}

/// Result type for loquat operations.
pub type Result<T> = std::result::Result<T, Error>;
