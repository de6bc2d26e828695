//! Package part abstraction.
//!
//! A part is one named entry of the package. It renders itself on demand from
//! borrowed state and caches nothing, so the same part value can be serialized
//! any number of times and from any thread.

use crate::common::pool::{BufferPool, PooledBuffer};
use crate::common::{Error, Result};
use std::io::Write;

/// Trait representing a part in an OPC package.
pub trait Part: Send + Sync {
    /// ZIP entry name of this part, e.g. `word/document.xml`.
    fn partname(&self) -> &str;

    /// Render the complete part content.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Stream the part content to `out`, returning the number of bytes written.
    fn write_to(&self, out: &mut dyn Write) -> Result<u64> {
        let bytes = self.to_bytes()?;
        out.write_all(&bytes)
            .map_err(|e| Error::io(self.partname(), e))?;
        Ok(bytes.len() as u64)
    }
}

/// Render XML into a buffer from the shared pool and copy the result out.
///
/// The buffer goes back to the pool when this returns, so the closure must not
/// stash references to it.
pub fn render_pooled<F>(render: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut PooledBuffer<'_>) -> Result<()>,
{
    let mut buf = BufferPool::shared().checkout();
    render(&mut buf)?;
    Ok(buf.to_vec())
}

/// XML declaration shared by every part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    struct StaticPart;

    impl Part for StaticPart {
        fn partname(&self) -> &str {
            "word/static.xml"
        }

        fn to_bytes(&self) -> Result<Vec<u8>> {
            render_pooled(|buf| {
                buf.push_str(XML_DECLARATION);
                write!(buf as &mut dyn std::fmt::Write, "<root n=\"{}\"/>", 1)?;
                Ok(())
            })
        }
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_to_streams_bytes() {
        let mut out = Vec::new();
        let n = StaticPart.write_to(&mut out).unwrap();
        assert_eq!(n as usize, out.len());
        assert!(out.ends_with(b"<root n=\"1\"/>"));
    }

    #[test]
    fn test_write_to_reports_partname() {
        let err = StaticPart.write_to(&mut FailingSink).unwrap_err();
        assert_eq!(err.entry(), Some("word/static.xml"));
    }

    #[test]
    fn test_render_is_repeatable() {
        assert_eq!(StaticPart.to_bytes().unwrap(), StaticPart.to_bytes().unwrap());
    }
}
