/// Error types for relationship graph validation
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate relationship ID: {0}")]
    DuplicateId(String),

    #[error("Relationship {id}: {field} is required")]
    EmptyField { id: String, field: &'static str },

    #[error("Unrecognized target mode: {0}")]
    UnrecognizedTargetMode(String),

    #[error("Relationship {0} belongs to neither the package nor the document partition")]
    OrphanedRelationship(String),

    #[error("Relationship {0} is listed in a partition but missing from the id index")]
    DanglingPartitionEntry(String),

    #[error("Relationship {0} is listed in both partitions")]
    PartitionConflict(String),

    #[error("Content requires a {0} relationship but none is registered")]
    MissingRelationship(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
