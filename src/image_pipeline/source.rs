//! Source image module
//!
//! This module decodes user-supplied raster files and exposes the luminance
//! view the normal map generator samples from.

mod reader;
mod image_reader;
pub mod types;

pub use reader::SourceImageReader;
pub use image_reader::ImageCrateReader;
pub use types::{LuminanceField, SourceImage};
