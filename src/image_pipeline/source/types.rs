//! Source image types

use image::RgbaImage;

/// Rec. 601 luma weights applied to the R, G and B channels.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Decoded source image, the single ground-truth input of both pipelines
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn luminance(&self) -> LuminanceField<'_> {
        LuminanceField::new(&self.pixels)
    }
}

/// Read-only luminance view over an RGBA8 buffer.
///
/// Values are computed per lookup and lie in `[0, 255]`. Nothing is cached,
/// so the view always reflects the buffer it borrows.
#[derive(Debug, Clone, Copy)]
pub struct LuminanceField<'a> {
    pixels: &'a RgbaImage,
}

impl<'a> LuminanceField<'a> {
    pub fn new(pixels: &'a RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Luminance at `(x, y)` with clamped edge addressing.
    ///
    /// Out-of-range coordinates snap to the nearest row/column; they are
    /// never wrapped or mirrored. Must not be called on an empty buffer.
    pub fn sample(&self, x: i64, y: i64) -> f32 {
        let x = x.clamp(0, self.width() as i64 - 1) as u32;
        let y = y.clamp(0, self.height() as i64 - 1) as u32;
        let [r, g, b, _] = self.pixels.get_pixel(x, y).0;
        r as f32 * LUMA_WEIGHTS[0] + g as f32 * LUMA_WEIGHTS[1] + b as f32 * LUMA_WEIGHTS[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_luminance_weights() {
        let mut pixels = RgbaImage::new(3, 1);
        pixels.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        pixels.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        pixels.put_pixel(2, 0, Rgba([0, 0, 255, 0]));
        let field = LuminanceField::new(&pixels);

        assert!((field.sample(0, 0) - 76.245).abs() < 1e-3);
        assert!((field.sample(1, 0) - 149.685).abs() < 1e-3);
        assert!((field.sample(2, 0) - 29.07).abs() < 1e-3);
    }

    #[test]
    fn test_sample_clamps_to_edges() {
        let mut pixels = RgbaImage::new(2, 2);
        pixels.put_pixel(0, 0, Rgba([10, 10, 10, 255]));
        pixels.put_pixel(1, 0, Rgba([20, 20, 20, 255]));
        pixels.put_pixel(0, 1, Rgba([30, 30, 30, 255]));
        pixels.put_pixel(1, 1, Rgba([40, 40, 40, 255]));
        let field = LuminanceField::new(&pixels);

        assert_eq!(field.sample(-5, -5), field.sample(0, 0));
        assert_eq!(field.sample(7, -1), field.sample(1, 0));
        assert_eq!(field.sample(-1, 3), field.sample(0, 1));
        assert_eq!(field.sample(2, 2), field.sample(1, 1));
    }
}
