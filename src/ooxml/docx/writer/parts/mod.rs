//! Part generators.
//!
//! Each generator renders exactly one package entry from the borrowed
//! document snapshot. None of them reads another generator's output, which
//! is what allows the orchestrator to run them concurrently.

mod auxiliary;
mod content_types;
mod document;
mod numbering;
mod properties;
mod relationships;
mod styles;

pub use auxiliary::{FontTablePart, SettingsPart, ThemePart, WebSettingsPart};
pub use content_types::ContentTypesPart;
pub use document::DocumentPart;
pub use numbering::NumberingPart;
pub use properties::{AppPropertiesPart, CorePropertiesPart, DocumentStatistics};
pub use relationships::{DocumentRelationshipsPart, PackageRelationshipsPart};
pub use styles::StylesPart;
