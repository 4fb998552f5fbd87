use glam::Vec3;
use image::{Rgba, RgbaImage};
use tracing::{debug, instrument};

use crate::image_pipeline::normal::types::NormalMapConfig;
use crate::image_pipeline::source::LuminanceField;

/// Builds a tangent-space normal map from `source`.
///
/// The caller must pass a strictly positive strength
/// (see [`NormalMapConfig::sanitized`]). Every output pixel is written, so
/// the result fully replaces any previous buffer.
#[instrument(skip_all, fields(width = source.width(), height = source.height(), strength = config.strength))]
pub fn generate_normal_map(source: &LuminanceField<'_>, config: &NormalMapConfig) -> RgbaImage {
    debug_assert!(config.strength > 0.0, "strength must be positive");

    let width = source.width();
    let height = source.height();
    let z = 255.0 / config.strength;

    let normal_map = RgbaImage::from_fn(width, height, |x, y| {
        let (x, y) = (x as i64, y as i64);
        let n = source.sample(x, y - 1);
        let s = source.sample(x, y + 1);
        let e = source.sample(x + 1, y);
        let w = source.sample(x - 1, y);
        let ne = source.sample(x + 1, y - 1);
        let nw = source.sample(x - 1, y - 1);
        let se = source.sample(x + 1, y + 1);
        let sw = source.sample(x - 1, y + 1);

        let dx = (ne + 2.0 * e + se) - (nw + 2.0 * w + sw);
        let dy = (sw + 2.0 * s + se) - (nw + 2.0 * n + ne);
        let v = Vec3::new(dx, dy, z).normalize();

        let mut r = encode_component(v.x);
        let mut g = encode_component(v.y);
        let b = encode_component(v.z);

        if config.invert_r {
            r = 255 - r;
        }
        if config.invert_g {
            g = 255 - g;
        }

        Rgba([r, g, b, 255])
    });

    debug!("Normal map generated");
    normal_map
}

/// Maps a unit component from `[-1, 1]` onto `[0, 255]`.
///
/// Ties round to even, matching an 8-bit clamped store.
fn encode_component(value: f32) -> u8 {
    ((value * 0.5 + 0.5) * 255.0).round_ties_even().clamp(0.0, 255.0) as u8
}
