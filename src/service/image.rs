//! Image decoding and downsizing before upload to the vision model

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader, imageops::FilterType};
use thiserror::Error;

/// Longest side sent to the vision model
pub const MAX_DIMENSION: u32 = 1024;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImageDecodeError {
    #[error("unrecognized image format")]
    UnknownFormat,

    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("image processing task failed: {0}")]
    Task(String),
}

/// Image bytes ready for an `inline_data` part
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    /// Upper-case format name of the upload, e.g. "PNG"
    pub format_name: String,
    pub width: u32,
    pub height: u32,
}

impl PreparedImage {
    /// Stand-in description for text-only analysis when the vision call fails
    pub fn synthetic_description(&self) -> String {
        format!(
            "Product appears to be {} image format, size ({}, {}).",
            self.format_name, self.width, self.height
        )
    }
}

/// Decode, shrink to fit [`MAX_DIMENSION`], and re-encode
///
/// The original format is kept when it can be encoded; everything else is
/// sent as JPEG.
pub fn prepare_image(bytes: &[u8]) -> Result<PreparedImage, ImageDecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or(ImageDecodeError::UnknownFormat)?;
    let img = reader.decode().map_err(ImageDecodeError::Decode)?;
    let img = resize_if_large(img, MAX_DIMENSION);

    let (bytes, encoded_as) = match encode(&img, format) {
        Ok(bytes) => (bytes, format),
        Err(e) => {
            tracing::debug!(format = ?format, error = %e, "Cannot re-encode in source format, using JPEG");
            let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
            let bytes = encode(&rgb, ImageFormat::Jpeg).map_err(ImageDecodeError::Encode)?;
            (bytes, ImageFormat::Jpeg)
        }
    };

    Ok(PreparedImage {
        bytes,
        mime_type: encoded_as.to_mime_type().to_string(),
        format_name: format!("{:?}", format).to_uppercase(),
        width: img.width(),
        height: img.height(),
    })
}

fn resize_if_large(img: DynamicImage, max_dim: u32) -> DynamicImage {
    if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        img
    }
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}
