//! Raster image reader implementation using the image library.
//!
//! Any format the `image` crate can sniff from the byte stream (PNG, JPEG,
//! BMP, TGA, ...) is accepted. Every decoded image is widened to RGBA8 so the
//! pipelines only ever deal with one pixel layout.

use image::RgbaImage;
use tracing::debug;

use crate::image_pipeline::common::error::{MapError, Result};
use crate::image_pipeline::source::reader::SourceImageReader;

/// Reader that decodes with `image::load_from_memory`.
pub struct ImageCrateReader;

impl SourceImageReader for ImageCrateReader {
    /// Decodes `data` into an RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// * `MapError::AssetLoad` - the bytes are not a decodable image
    fn read_image(&self, data: &[u8]) -> Result<RgbaImage> {
        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| MapError::AssetLoad(e.to_string()))?;

        debug!(
            "Decoded image: {}x{} ({:?})",
            decoded.width(),
            decoded.height(),
            decoded.color()
        );

        Ok(decoded.into_rgba8())
    }
}
