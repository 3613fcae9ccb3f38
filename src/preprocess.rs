// Caller-side image preparation before upload: fix the EXIF orientation,
// shrink wide images and re-encode as a compact JPEG. The annotation
// client does none of this itself.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode JPEG: {0}")]
    Encode(String),
}

/// How an image is prepared for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareOptions {
    /// Images wider than this are scaled down proportionally.
    pub max_width: Option<u32>,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            max_width: Some(1440),
            quality: 30,
        }
    }
}

/// Decode `bytes`, apply orientation and size limits, and return JPEG data.
pub fn prepare_jpeg(bytes: &[u8], options: &PrepareOptions) -> Result<Vec<u8>, PreprocessError> {
    let image = decode_oriented(bytes)?;

    let image = match options.max_width {
        Some(max_width) if max_width > 0 && image.width() > max_width => {
            let height = scaled_height(image.width(), image.height(), max_width);
            image.resize_exact(max_width, height, FilterType::Triangle)
        }
        _ => image,
    };

    // JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, options.quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;

    tracing::debug!(
        width = rgb.width(),
        height = rgb.height(),
        size = out.len(),
        "Prepared image for upload"
    );
    Ok(out)
}

fn decode_oriented(bytes: &[u8]) -> Result<DynamicImage, PreprocessError> {
    let decode_err = |e: image::ImageError| PreprocessError::Decode(e.to_string());

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PreprocessError::Decode(e.to_string()))?;
    let mut decoder = reader.into_decoder().map_err(decode_err)?;
    let orientation = decoder.orientation().map_err(decode_err)?;
    let mut image = DynamicImage::from_decoder(decoder).map_err(decode_err)?;
    image.apply_orientation(orientation);
    Ok(image)
}

fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (height as u64 * target_width as u64) / width as u64;
    scaled.max(1) as u32
}
