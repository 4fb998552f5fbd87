//! Material channel types

use std::fmt;

use image::RgbaImage;

use crate::image_pipeline::common::error::{MapError, Result};

/// One of the three packed material channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialChannel {
    /// Stored in red
    Metallic,
    /// Stored in green
    Roughness,
    /// Ambient occlusion, stored in blue
    Ao,
}

impl MaterialChannel {
    /// Index of the channel inside a packed RGBA pixel.
    pub fn packed_index(self) -> usize {
        match self {
            Self::Metallic => 0,
            Self::Roughness => 1,
            Self::Ao => 2,
        }
    }
}

impl fmt::Display for MaterialChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Metallic => "metallic",
            Self::Roughness => "roughness",
            Self::Ao => "ao",
        };
        f.write_str(name)
    }
}

/// Where a channel's values come from.
///
/// A channel starts as `Constant` and becomes `ImageMap` once a file is
/// loaded for it. There is no way back.
#[derive(Debug, Clone)]
pub enum MaterialChannelInput {
    /// Uniform value in `[0, 1]`
    Constant(f32),
    /// Decoded map; only its red channel is read
    ImageMap(RgbaImage),
}

impl MaterialChannelInput {
    pub fn is_image_map(&self) -> bool {
        matches!(self, Self::ImageMap(_))
    }

    pub fn constant(&self) -> Option<f32> {
        match self {
            Self::Constant(value) => Some(*value),
            Self::ImageMap(_) => None,
        }
    }
}

/// Validates a scalar channel value.
///
/// # Errors
///
/// * `MapError::InvalidConfiguration` - the value is not finite or lies outside `[0, 1]`
pub fn validate_scalar(channel: MaterialChannel, value: f32) -> Result<f32> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(MapError::InvalidConfiguration(format!(
            "{channel} must be within [0, 1], got {value}"
        )));
    }
    Ok(value)
}

/// The three channel inputs of the packer
#[derive(Debug, Clone)]
pub struct MaterialInputs {
    pub metallic: MaterialChannelInput,
    pub roughness: MaterialChannelInput,
    pub ao: MaterialChannelInput,
}

impl Default for MaterialInputs {
    fn default() -> Self {
        Self {
            metallic: MaterialChannelInput::Constant(0.1),
            roughness: MaterialChannelInput::Constant(0.5),
            ao: MaterialChannelInput::Constant(1.0),
        }
    }
}

impl MaterialInputs {
    pub fn get(&self, channel: MaterialChannel) -> &MaterialChannelInput {
        match channel {
            MaterialChannel::Metallic => &self.metallic,
            MaterialChannel::Roughness => &self.roughness,
            MaterialChannel::Ao => &self.ao,
        }
    }

    pub fn get_mut(&mut self, channel: MaterialChannel) -> &mut MaterialChannelInput {
        match channel {
            MaterialChannel::Metallic => &mut self.metallic,
            MaterialChannel::Roughness => &mut self.roughness,
            MaterialChannel::Ao => &mut self.ao,
        }
    }

    pub fn factors(&self) -> MaterialFactors {
        MaterialFactors {
            metalness: self.metallic.constant(),
            roughness: self.roughness.constant(),
            ao_intensity: self.ao.constant(),
        }
    }
}

/// Scalar material properties a renderer applies directly.
///
/// A factor is `Some` while its channel is a constant and `None` once the
/// renderer should sample the packed texture instead.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialFactors {
    pub metalness: Option<f32>,
    pub roughness: Option<f32>,
    /// While AO has no map of its own, renderers occlude with the source
    /// texture (`TextureSlot::Source`) as the AO map, scaled by this value.
    pub ao_intensity: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors_follow_channel_mode() {
        let mut inputs = MaterialInputs::default();
        assert_eq!(
            inputs.factors(),
            MaterialFactors {
                metalness: Some(0.1),
                roughness: Some(0.5),
                ao_intensity: Some(1.0),
            }
        );

        *inputs.get_mut(MaterialChannel::Roughness) =
            MaterialChannelInput::ImageMap(RgbaImage::new(1, 1));

        let factors = inputs.factors();
        assert_eq!(factors.roughness, None);
        assert_eq!(factors.metalness, Some(0.1));
    }

    #[test]
    fn test_validate_scalar() {
        assert_eq!(validate_scalar(MaterialChannel::Ao, 0.0).unwrap(), 0.0);
        assert_eq!(validate_scalar(MaterialChannel::Ao, 1.0).unwrap(), 1.0);
        assert!(validate_scalar(MaterialChannel::Metallic, 1.01).is_err());
        assert!(validate_scalar(MaterialChannel::Metallic, -0.1).is_err());
        assert!(validate_scalar(MaterialChannel::Roughness, f32::NAN).is_err());
    }

    #[test]
    fn test_packed_index_order() {
        assert_eq!(MaterialChannel::Metallic.packed_index(), 0);
        assert_eq!(MaterialChannel::Roughness.packed_index(), 1);
        assert_eq!(MaterialChannel::Ao.packed_index(), 2);
    }
}
