//! Parts targeted by the default document relationships: settings, web
//! settings, font table and theme. Their content does not depend on the
//! document body.

use crate::common::Result;
use crate::ooxml::opc::constants::{namespace, partname};
use crate::ooxml::opc::part::{Part, XML_DECLARATION, render_pooled};
use std::fmt::Write as _;

/// Office theme colors: dk1, lt1, dk2, lt2, accent1..6, hlink, folHlink.
const THEME_COLORS: [(&str, &str); 12] = [
    ("dk1", "000000"),
    ("lt1", "FFFFFF"),
    ("dk2", "44546A"),
    ("lt2", "E7E6E6"),
    ("accent1", "4472C4"),
    ("accent2", "ED7D31"),
    ("accent3", "A5A5A5"),
    ("accent4", "FFC000"),
    ("accent5", "5B9BD5"),
    ("accent6", "70AD47"),
    ("hlink", "0563C1"),
    ("folHlink", "954F72"),
];

/// Fonts declared in the font table: name, panose, family, pitch.
const FONTS: [(&str, &str, &str, &str); 3] = [
    ("Calibri", "020F0502020204030204", "swiss", "variable"),
    ("Calibri Light", "020F0302020204030204", "swiss", "variable"),
    ("Times New Roman", "02020603050405020304", "roman", "variable"),
];

/// Document settings, `word/settings.xml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsPart;

impl Part for SettingsPart {
    fn partname(&self) -> &str {
        partname::SETTINGS
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_pooled(|buf| {
            buf.push_str(XML_DECLARATION);
            buf.push_str("\n");
            write!(buf, r#"<w:settings xmlns:w="{}">"#, namespace::WML_MAIN)?;
            buf.push_str(r#"<w:zoom w:percent="100"/>"#);
            buf.push_str(r#"<w:proofState w:spelling="clean" w:grammar="clean"/>"#);
            buf.push_str(r#"<w:defaultTabStop w:val="720"/>"#);
            buf.push_str(r#"<w:characterSpacingControl w:val="doNotCompress"/>"#);
            buf.push_str("<w:compat>");
            buf.push_str(r#"<w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/>"#);
            buf.push_str("</w:compat>");
            buf.push_str(r#"<w:themeFontLang w:val="en-US"/>"#);
            buf.push_str("</w:settings>");
            Ok(())
        })
    }
}

/// Web settings, `word/webSettings.xml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSettingsPart;

impl Part for WebSettingsPart {
    fn partname(&self) -> &str {
        partname::WEB_SETTINGS
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_pooled(|buf| {
            buf.push_str(XML_DECLARATION);
            buf.push_str("\n");
            write!(buf, r#"<w:webSettings xmlns:w="{}">"#, namespace::WML_MAIN)?;
            buf.push_str("<w:optimizeForBrowser/><w:allowPNG/>");
            buf.push_str("</w:webSettings>");
            Ok(())
        })
    }
}

/// Font table, `word/fontTable.xml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontTablePart;

impl Part for FontTablePart {
    fn partname(&self) -> &str {
        partname::FONT_TABLE
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_pooled(|buf| {
            buf.push_str(XML_DECLARATION);
            buf.push_str("\n");
            write!(buf, r#"<w:fonts xmlns:w="{}">"#, namespace::WML_MAIN)?;
            for (name, panose, family, pitch) in FONTS {
                write!(
                    buf,
                    r#"<w:font w:name="{}"><w:panose1 w:val="{}"/><w:charset w:val="00"/><w:family w:val="{}"/><w:pitch w:val="{}"/></w:font>"#,
                    name, panose, family, pitch
                )?;
            }
            buf.push_str("</w:fonts>");
            Ok(())
        })
    }
}

/// Office theme, `word/theme/theme1.xml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThemePart;

impl Part for ThemePart {
    fn partname(&self) -> &str {
        partname::THEME
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        render_pooled(|buf| {
            buf.push_str(XML_DECLARATION);
            buf.push_str("\n");
            write!(buf, r#"<a:theme xmlns:a="{}" name="Office Theme">"#, namespace::DML_MAIN)?;
            buf.push_str("<a:themeElements>");

            buf.push_str(r#"<a:clrScheme name="Office">"#);
            for (slot, rgb) in THEME_COLORS {
                write!(buf, r#"<a:{0}><a:srgbClr val="{1}"/></a:{0}>"#, slot, rgb)?;
            }
            buf.push_str("</a:clrScheme>");

            buf.push_str(r#"<a:fontScheme name="Office">"#);
            buf.push_str(r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#);
            buf.push_str(r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#);
            buf.push_str("</a:fontScheme>");

            buf.push_str(r#"<a:fmtScheme name="Office">"#);
            let fill = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
            buf.push_str("<a:fillStyleLst>");
            for _ in 0..3 {
                buf.push_str(fill);
            }
            buf.push_str("</a:fillStyleLst><a:lnStyleLst>");
            for width in [6350, 12700, 19050] {
                write!(
                    buf,
                    r#"<a:ln w="{}" cap="flat" cmpd="sng" algn="ctr">{}<a:prstDash val="solid"/></a:ln>"#,
                    width, fill
                )?;
            }
            buf.push_str("</a:lnStyleLst><a:effectStyleLst>");
            for _ in 0..3 {
                buf.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
            }
            buf.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
            for _ in 0..3 {
                buf.push_str(fill);
            }
            buf.push_str("</a:bgFillStyleLst></a:fmtScheme>");

            buf.push_str("</a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(part: &dyn Part) -> String {
        String::from_utf8(part.to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_partnames() {
        assert_eq!(SettingsPart.partname(), "word/settings.xml");
        assert_eq!(WebSettingsPart.partname(), "word/webSettings.xml");
        assert_eq!(FontTablePart.partname(), "word/fontTable.xml");
        assert_eq!(ThemePart.partname(), "word/theme/theme1.xml");
    }

    #[test]
    fn test_content() {
        assert!(render(&SettingsPart).contains(r#"<w:defaultTabStop w:val="720"/>"#));
        assert!(render(&WebSettingsPart).ends_with("</w:webSettings>"));
        assert_eq!(render(&FontTablePart).matches("<w:font ").count(), FONTS.len());

        let theme = render(&ThemePart);
        assert!(theme.contains(r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1>"#));
        assert_eq!(theme.matches("<a:effectStyle>").count(), 3);
        assert!(theme.ends_with("</a:theme>"));
    }
}
