use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use std::fmt;

// Built once, shared by every thread
static XML_ESCAPER: Lazy<Option<AhoCorasick>> =
    Lazy::new(|| AhoCorasick::new(["&", "<", ">", "\"", "'"]).ok());

const REPLACEMENTS: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Escape XML special characters.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with the five predefined entities, so the
/// result is safe both as element text and as an attribute value.
///
/// # Examples
///
/// ```
/// use loquat::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a String never fails
    let _ = write_escaped(&mut out, s);
    out
}

/// Write `s` to `out`, escaping XML special characters on the way.
///
/// Unescaped runs between matches are forwarded as slices, so no intermediate
/// string is allocated.
pub fn write_escaped<W: fmt::Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    let Some(ac) = XML_ESCAPER.as_ref() else {
        return write_escaped_slow(out, s);
    };

    let mut last = 0;
    for mat in ac.find_iter(s) {
        out.write_str(&s[last..mat.start()])?;
        out.write_str(REPLACEMENTS[mat.pattern().as_usize()])?;
        last = mat.end();
    }
    out.write_str(&s[last..])
}

fn write_escaped_slow<W: fmt::Write + ?Sized>(out: &mut W, s: &str) -> fmt::Result {
    for ch in s.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' => out.write_str("&quot;")?,
            '\'' => out.write_str("&apos;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}
