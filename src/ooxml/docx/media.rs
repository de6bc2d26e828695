//! Binary media stored in the package.

use crate::common::{Error, Result};
use crate::ooxml::opc::constants::{content_type as ct, partname};
use bytes::Bytes;
use phf::phf_map;

/// Content types of the image formats a document can embed, by extension.
static CONTENT_TYPE_BY_EXTENSION: phf::Map<&'static str, &'static str> = phf_map! {
    "png" => ct::PNG,
    "jpg" => ct::JPEG,
    "jpeg" => ct::JPEG,
    "gif" => ct::GIF,
    "bmp" => ct::BMP,
    "tif" => ct::TIFF,
    "tiff" => ct::TIFF,
    "svg" => ct::SVG,
};

/// Image format, detected from a file signature or an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    Svg,
}

impl ImageFormat {
    /// Detect image format from byte signature.
    pub fn detect_from_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }
        if data.starts_with(b"BM") {
            return Some(Self::Bmp);
        }
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A]) {
            return Some(Self::Tiff);
        }

        let head = &data[..data.len().min(256)];
        let head = String::from_utf8_lossy(head);
        let head = head.trim_start();
        if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
            return Some(Self::Svg);
        }
        None
    }

    /// Format for a file extension, with or without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Svg => "svg",
        }
    }

    /// MIME content type.
    pub fn content_type(self) -> &'static str {
        CONTENT_TYPE_BY_EXTENSION
            .get(self.extension())
            .copied()
            .unwrap_or(ct::PNG)
    }
}

/// Content type registered for a file extension.
pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.trim_start_matches('.').to_ascii_lowercase();
    CONTENT_TYPE_BY_EXTENSION.get(ext.as_str()).copied()
}

/// Pixel dimensions read from a PNG, GIF or BMP header.
///
/// Other formats, and truncated headers, yield `None`.
pub fn pixel_size(data: &[u8]) -> Option<(u32, u32)> {
    match ImageFormat::detect_from_bytes(data)? {
        ImageFormat::Png if data.len() >= 24 => {
            let w = u32::from_be_bytes(data[16..20].try_into().ok()?);
            let h = u32::from_be_bytes(data[20..24].try_into().ok()?);
            Some((w, h))
        },
        ImageFormat::Gif if data.len() >= 10 => {
            let w = u16::from_le_bytes([data[6], data[7]]);
            let h = u16::from_le_bytes([data[8], data[9]]);
            Some((w as u32, h as u32))
        },
        ImageFormat::Bmp if data.len() >= 26 => {
            let w = i32::from_le_bytes(data[18..22].try_into().ok()?);
            let h = i32::from_le_bytes(data[22..26].try_into().ok()?);
            Some((w.unsigned_abs(), h.unsigned_abs()))
        },
        _ => None,
    }
}

/// An immutable binary resource written verbatim under `word/media/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResource {
    file_name: String,
    content_type: String,
    data: Bytes,
}

impl MediaResource {
    /// Create a resource, taking the content type from the file extension.
    ///
    /// # Errors
    ///
    /// Fails if the name is empty, contains a path separator, or has no
    /// recognized image extension.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Result<Self> {
        let file_name = file_name.into();
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        let content_type = content_type_for_extension(ext).ok_or_else(|| {
            Error::InvalidContent(format!("unsupported media extension: {:?}", file_name))
        })?;
        Self::with_content_type(file_name, content_type, data)
    }

    /// Create a resource with an explicit content type.
    pub fn with_content_type(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        if file_name.is_empty() || file_name.contains(['/', '\\']) {
            return Err(Error::InvalidContent(format!(
                "invalid media file name: {:?}",
                file_name
            )));
        }
        Ok(Self {
            file_name,
            content_type: content_type.into(),
            data: data.into(),
        })
    }

    /// Directory of the resource inside the package.
    pub fn target_dir(&self) -> &'static str {
        partname::MEDIA_DIR
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// File extension, lowercased.
    pub fn extension(&self) -> String {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default()
    }

    /// ZIP entry name, e.g. `word/media/logo.png`.
    pub fn entry_name(&self) -> String {
        format!("{}{}", self.target_dir(), self.file_name)
    }
}
