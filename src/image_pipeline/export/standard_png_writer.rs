use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder, RgbaImage};
use tracing::debug;

use crate::image_pipeline::common::error::{MapError, Result};
use crate::image_pipeline::export::types::PngCompression;
use crate::image_pipeline::export::writer::MapWriter;

/// Writes maps as 8-bit RGB PNGs.
///
/// Alpha is always 255 in generated maps, so it is dropped. No colour space
/// chunk is written; normal and MRA data is linear.
pub struct StandardPngWriter;

impl MapWriter for StandardPngWriter {
    fn write_map(&self, map: &RgbaImage, output: &mut dyn Write, compression: PngCompression) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", map.width(), map.height());

        let rgb: Vec<u8> = map.pixels().flat_map(|p| [p[0], p[1], p[2]]).collect();

        let compression = match compression {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Balanced => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        };

        let mut buffer = Vec::new();
        PngEncoder::new_with_quality(&mut buffer, compression, FilterType::Adaptive)
            .write_image(&rgb, map.width(), map.height(), ColorType::Rgb8)
            .map_err(|e| MapError::Encode(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_round_trip_is_lossless() {
        let map = RgbaImage::from_fn(5, 4, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 200, 255]));

        for compression in [PngCompression::Fast, PngCompression::Balanced, PngCompression::Best] {
            let mut bytes = Vec::new();
            StandardPngWriter.write_map(&map, &mut bytes, compression).unwrap();

            let decoded = image::load_from_memory(&bytes).unwrap();
            assert_eq!(decoded.color(), ColorType::Rgb8);
            assert_eq!(decoded.into_rgba8().as_raw(), map.as_raw());
        }
    }
}
