use std::io::Write;

use image::RgbaImage;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::export::types::PngCompression;

pub trait MapWriter {
    fn write_map(&self, map: &RgbaImage, output: &mut dyn Write, compression: PngCompression) -> Result<()>;
}
