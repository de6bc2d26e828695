//! XML text helpers used by every part generator.

mod escape;

pub use escape::{escape_xml, write_escaped};
