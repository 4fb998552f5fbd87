use image::RgbaImage;

use crate::image_pipeline::common::error::Result;

pub trait SourceImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RgbaImage>;
}
