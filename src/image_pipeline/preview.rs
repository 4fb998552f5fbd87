//! Thumbnail previews of pipeline buffers

use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Size of a preview `target_width` pixels wide that keeps the aspect ratio
/// of a `width` x `height` buffer. The height is floored and never below 1.
pub fn preview_size(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    let target_width = target_width.max(1);
    if width == 0 || height == 0 {
        return (target_width, 1);
    }
    let aspect = width as f64 / height as f64;
    let target_height = ((target_width as f64 / aspect).floor() as u32).max(1);
    (target_width, target_height)
}

/// Scaled copy of `buffer` at exactly `target_width` x `target_height`.
pub fn render_preview(buffer: &RgbaImage, target_width: u32, target_height: u32) -> RgbaImage {
    imageops::resize(buffer, target_width.max(1), target_height.max(1), FilterType::Triangle)
}

/// Thumbnails of the source and both generated maps
#[derive(Debug, Clone)]
pub struct Previews {
    pub source: RgbaImage,
    pub normal: RgbaImage,
    pub material: RgbaImage,
}
