//! Normal map generation module
//!
//! Derives a tangent-space normal map from the luminance of a source image
//! using a 3x3 Sobel gradient.

mod generator;
pub mod types;

pub use generator::generate_normal_map;
pub use types::{MIN_STRENGTH, NormalMapConfig, NormalMapConfigBuilder};
