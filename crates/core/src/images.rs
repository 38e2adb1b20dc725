//! Rules for receipt image uploads.
//!
//! Uploads are sniffed from their leading bytes rather than trusting the
//! browser-supplied content type.

use image::ImageFormat;
use uuid::Uuid;

use crate::error::CoreError;

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

/// Default upload size limit (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Name used when the uploaded filename has nothing usable left after sanitizing.
const FALLBACK_NAME: &str = "image";

/// Image formats accepted for receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    WebP,
    Gif,
}

impl ImageKind {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::WebP => Some(Self::WebP),
            ImageFormat::Gif => Some(Self::Gif),
            _ => None,
        }
    }
}

/// Check size and sniff the format of an uploaded image.
pub fn validate_image(bytes: &[u8], max_bytes: usize) -> Result<ImageKind, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("Uploaded image is empty".into()));
    }
    if bytes.len() > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded image is {} bytes; the limit is {max_bytes} bytes",
            bytes.len()
        )));
    }
    image::guess_format(bytes)
        .ok()
        .and_then(ImageKind::from_format)
        .ok_or_else(|| {
            CoreError::Validation(
                "Unsupported image format. Upload a PNG, JPEG, WebP or GIF file".into(),
            )
        })
}

/// Build a unique storage object name from the uploaded filename.
///
/// The result is `{id}-{sanitized}`, where `sanitized` keeps ASCII
/// alphanumerics, `.`, `-` and `_` from the final path component.
pub fn object_name(original_filename: &str, id: Uuid) -> String {
    let base = original_filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitized = sanitized.trim_matches(|c| c == '.' || c == '_');
    let name = if sanitized.is_empty() {
        FALLBACK_NAME
    } else {
        sanitized
    };
    format!("{id}-{name}")
}
