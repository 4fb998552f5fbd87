//! Normal map configuration types

use tracing::warn;

use crate::image_pipeline::common::error::{MapError, Result};

/// Smallest strength handed to the generator. Non-positive requests are
/// clamped up to this value.
pub const MIN_STRENGTH: f32 = 1e-3;

/// Configuration for normal map generation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalMapConfig {
    /// Bump strength. The z component of every normal is `255 / strength`
    /// before normalization, so larger values give steeper bumps.
    pub strength: f32,
    /// Flip the red (X) channel after encoding
    pub invert_r: bool,
    /// Flip the green (Y) channel after encoding, e.g. for DirectX-style maps
    pub invert_g: bool,
}

impl Default for NormalMapConfig {
    fn default() -> Self {
        Self {
            strength: 2.0,
            invert_r: false,
            invert_g: false,
        }
    }
}

impl NormalMapConfig {
    pub fn builder() -> NormalMapConfigBuilder {
        NormalMapConfigBuilder::default()
    }

    /// Returns a copy whose strength is safe to divide by.
    ///
    /// # Errors
    ///
    /// * `MapError::InvalidConfiguration` - strength is NaN or infinite
    pub fn sanitized(&self) -> Result<Self> {
        if !self.strength.is_finite() {
            return Err(MapError::InvalidConfiguration(format!(
                "strength must be finite, got {}",
                self.strength
            )));
        }

        let mut config = *self;
        if config.strength < MIN_STRENGTH {
            warn!(
                "Strength {} is below the minimum, clamping to {}",
                config.strength, MIN_STRENGTH
            );
            config.strength = MIN_STRENGTH;
        }
        Ok(config)
    }
}

/// Builder for NormalMapConfig
#[derive(Default)]
pub struct NormalMapConfigBuilder {
    strength: Option<f32>,
    invert_r: Option<bool>,
    invert_g: Option<bool>,
}

impl NormalMapConfigBuilder {
    pub fn strength(mut self, strength: f32) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn invert_r(mut self, invert: bool) -> Self {
        self.invert_r = Some(invert);
        self
    }

    pub fn invert_g(mut self, invert: bool) -> Self {
        self.invert_g = Some(invert);
        self
    }

    pub fn build(self) -> NormalMapConfig {
        let default = NormalMapConfig::default();
        NormalMapConfig {
            strength: self.strength.unwrap_or(default.strength),
            invert_r: self.invert_r.unwrap_or(default.invert_r),
            invert_g: self.invert_g.unwrap_or(default.invert_g),
        }
    }
}
