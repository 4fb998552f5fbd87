use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use tracing::{debug, instrument};

use crate::image_pipeline::material::types::{MaterialChannel, MaterialChannelInput};

/// Packs three channel inputs into one `width` x `height` RGBA buffer.
///
/// Output pixels are `(metallic, roughness, ao, 255)`. Image maps are
/// bilinearly resampled to the target size and only their red channel is
/// read; constants become `round(value * 255)`.
#[instrument(skip(metallic, roughness, ao))]
pub fn pack_material_map(
    width: u32,
    height: u32,
    metallic: &MaterialChannelInput,
    roughness: &MaterialChannelInput,
    ao: &MaterialChannelInput,
) -> RgbaImage {
    let channels = [
        (MaterialChannel::Metallic, ChannelSource::new(metallic, width, height)),
        (MaterialChannel::Roughness, ChannelSource::new(roughness, width, height)),
        (MaterialChannel::Ao, ChannelSource::new(ao, width, height)),
    ];

    let packed = RgbaImage::from_fn(width, height, |x, y| {
        let mut pixel = Rgba([0, 0, 0, 255]);
        for (channel, source) in &channels {
            pixel[channel.packed_index()] = source.intensity(x, y);
        }
        pixel
    });

    debug!("Material map packed");
    packed
}

/// A channel input prepared for per-pixel reads at the target size.
enum ChannelSource<'a> {
    Uniform(u8),
    Map(Cow<'a, RgbaImage>),
}

impl<'a> ChannelSource<'a> {
    fn new(input: &'a MaterialChannelInput, width: u32, height: u32) -> Self {
        match input {
            MaterialChannelInput::Constant(value) => Self::Uniform(scalar_to_intensity(*value)),
            MaterialChannelInput::ImageMap(map) if map.dimensions() == (width, height) => {
                Self::Map(Cow::Borrowed(map))
            }
            MaterialChannelInput::ImageMap(map) => {
                debug!(
                    "Resampling channel map {}x{} -> {}x{}",
                    map.width(),
                    map.height(),
                    width,
                    height
                );
                Self::Map(Cow::Owned(imageops::resize(
                    map,
                    width,
                    height,
                    FilterType::Triangle,
                )))
            }
        }
    }

    fn intensity(&self, x: u32, y: u32) -> u8 {
        match self {
            Self::Uniform(value) => *value,
            Self::Map(map) => map.get_pixel(x, y)[0],
        }
    }
}

fn scalar_to_intensity(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_channel(image: &RgbaImage, channel: usize) -> Vec<u8> {
        image.pixels().map(|p| p[channel]).collect()
    }

    #[test]
    fn test_packing_mixes_constants_and_maps() {
        let roughness_map = RgbaImage::from_fn(4, 3, |x, y| Rgba([(x * 50 + y * 7) as u8, 9, 9, 255]));

        let packed = pack_material_map(
            4,
            3,
            &MaterialChannelInput::Constant(0.5),
            &MaterialChannelInput::ImageMap(roughness_map.clone()),
            &MaterialChannelInput::Constant(1.0),
        );

        assert_eq!(packed.dimensions(), (4, 3));
        assert!(pixel_channel(&packed, 0).iter().all(|&v| v == 128));
        assert_eq!(pixel_channel(&packed, 1), pixel_channel(&roughness_map, 0));
        assert!(pixel_channel(&packed, 2).iter().all(|&v| v == 255));
        assert!(pixel_channel(&packed, 3).iter().all(|&v| v == 255));
    }

    #[test]
    fn test_scalar_boundaries() {
        let zero = pack_material_map(
            3,
            3,
            &MaterialChannelInput::Constant(0.0),
            &MaterialChannelInput::Constant(0.0),
            &MaterialChannelInput::Constant(0.0),
        );
        let one = pack_material_map(
            3,
            3,
            &MaterialChannelInput::Constant(1.0),
            &MaterialChannelInput::Constant(1.0),
            &MaterialChannelInput::Constant(1.0),
        );

        assert!(zero.pixels().all(|p| p.0 == [0, 0, 0, 255]));
        assert!(one.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_only_red_channel_of_map_is_read() {
        let map = RgbaImage::from_pixel(2, 2, Rgba([40, 200, 120, 10]));

        let packed = pack_material_map(
            2,
            2,
            &MaterialChannelInput::ImageMap(map),
            &MaterialChannelInput::Constant(0.0),
            &MaterialChannelInput::Constant(0.0),
        );

        assert!(packed.pixels().all(|p| p.0 == [40, 0, 0, 255]));
    }

    #[test]
    fn test_map_is_resampled_to_target_size() {
        let ao_map = RgbaImage::from_pixel(2, 2, Rgba([77, 77, 77, 255]));

        let packed = pack_material_map(
            6,
            5,
            &MaterialChannelInput::Constant(0.0),
            &MaterialChannelInput::Constant(0.0),
            &MaterialChannelInput::ImageMap(ao_map),
        );

        assert_eq!(packed.dimensions(), (6, 5));
        assert!(pixel_channel(&packed, 2).iter().all(|&v| v.abs_diff(77) <= 1));
    }
}
