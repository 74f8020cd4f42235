//! Image decoding with format detection.

use std::io::Cursor;

use image::ImageReader;

use crate::error::{LoadError, LoadResult};
use crate::types::RasterImage;

/// Decodes raw bytes into raster images.
///
/// The format is sniffed from the byte content, never from the reference the
/// bytes came from, so a PNG served under a `.jpg` name still decodes.
#[derive(Debug, Default)]
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode an in-memory byte buffer into a [`RasterImage`] carrying the
    /// image's native, unscaled pixel dimensions.
    pub fn decode(&self, bytes: &[u8]) -> LoadResult<RasterImage> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| LoadError::Decode {
                message: format!("cannot sniff image format: {e}"),
            })?;
        if reader.format().is_none() {
            return Err(LoadError::Decode {
                message: "unrecognized image encoding".to_string(),
            });
        }
        let data = reader.decode().map_err(|e| LoadError::Decode {
            message: e.to_string(),
        })?;
        Ok(RasterImage::new(data))
    }
}
