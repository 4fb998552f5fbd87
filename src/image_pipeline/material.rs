//! Material map packing module
//!
//! Packs metallic, roughness and ambient occlusion into the R, G and B
//! channels of a single texture.

mod packer;
pub mod types;

pub use packer::pack_material_map;
pub use types::{MaterialChannel, MaterialChannelInput, MaterialFactors, MaterialInputs};
