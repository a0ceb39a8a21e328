//! Still image encoding, data URLs and file-like captures.

use crate::capture::{Frame, MediaError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageError, ImageFormat, RgbImage};
use std::io::Cursor;

/// MIME type produced when the requested one cannot be encoded.
pub const FALLBACK_MIME_TYPE: &str = "image/png";

/// Encoded still image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Encoded bytes.
    pub data: Vec<u8>,
    /// MIME type actually produced.
    pub mime_type: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl EncodedImage {
    /// Renders the image as a `data:<mime>;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

/// A captured image with a file name, like a browser `File`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotFile {
    /// File name (no extension).
    pub name: String,
    /// MIME type of the contents.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl ScreenshotFile {
    /// Decodes a base64 data URL into a named file.
    pub fn from_data_url(url: &str, name: impl Into<String>) -> Result<Self, MediaError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| MediaError::InvalidDataUrl("missing data: scheme".into()))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| MediaError::InvalidDataUrl("missing payload separator".into()))?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| MediaError::InvalidDataUrl("only base64 payloads are supported".into()))?;
        if mime_type.is_empty() {
            return Err(MediaError::InvalidDataUrl("missing MIME type".into()));
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| MediaError::InvalidDataUrl(e.to_string()))?;

        Ok(Self {
            name: name.into(),
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// File size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Result of a still capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screenshot {
    /// `data:` URL of the encoded image.
    DataUrl(String),
    /// Named file holding the encoded image.
    File(ScreenshotFile),
}

impl Screenshot {
    /// Returns the data URL, if this capture is one.
    pub fn as_data_url(&self) -> Option<&str> {
        match self {
            Screenshot::DataUrl(url) => Some(url),
            Screenshot::File(_) => None,
        }
    }

    /// Returns the file, if this capture is one.
    pub fn as_file(&self) -> Option<&ScreenshotFile> {
        match self {
            Screenshot::DataUrl(_) => None,
            Screenshot::File(file) => Some(file),
        }
    }
}

fn write_image(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), format)?;
    Ok(buffer)
}

/// Encodes a frame to `mime_type`.
///
/// Unknown or unwritable types fall back to PNG, and the returned
/// [`EncodedImage::mime_type`] names the format actually written.
pub fn encode_frame(frame: Frame, mime_type: &str) -> Result<EncodedImage, MediaError> {
    let (width, height) = (frame.width(), frame.height());
    let rgb = RgbImage::from_raw(width, height, frame.into_pixels()).ok_or_else(|| {
        MediaError::Encoding(format!("pixel buffer does not match {width}x{height}"))
    })?;
    let image = DynamicImage::ImageRgb8(rgb);

    let requested = ImageFormat::from_mime_type(mime_type).filter(ImageFormat::writing_enabled);
    let encoded = match requested {
        Some(format) => match write_image(&image, format) {
            Ok(data) => Some((data, format)),
            Err(ImageError::Unsupported(e)) => {
                tracing::warn!(mime_type, error = %e, "Encoder rejected image, falling back to PNG");
                None
            }
            Err(e) => return Err(MediaError::Encoding(e.to_string())),
        },
        None => {
            tracing::warn!(mime_type, "Unsupported image type, falling back to PNG");
            None
        }
    };

    let (data, format) = match encoded {
        Some(done) => done,
        None => (
            write_image(&image, ImageFormat::Png).map_err(|e| MediaError::Encoding(e.to_string()))?,
            ImageFormat::Png,
        ),
    };

    tracing::debug!(
        width,
        height,
        bytes = data.len(),
        mime_type = format.to_mime_type(),
        "Encoded still image"
    );

    Ok(EncodedImage {
        data,
        mime_type: format.to_mime_type().to_string(),
        width,
        height,
    })
}
