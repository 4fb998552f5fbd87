//! Rendering collaborator boundary
//!
//! The pipelines never talk to a renderer directly. Finished buffers are
//! pushed through [`RenderSurface`], which a 3D viewer implements to upload
//! them as textures.

use image::RgbaImage;
use tracing::trace;

use crate::image_pipeline::material::MaterialFactors;

/// Texture binding a buffer is uploaded to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base colour, the source image itself. Also the occlusion map while
    /// AO is a constant, see [`MaterialFactors::ao_intensity`].
    Source,
    Normal,
    /// Packed metallic / roughness / AO
    PackedMaterial,
}

pub trait RenderSurface {
    fn upload_texture(&mut self, slot: TextureSlot, buffer: &RgbaImage);

    /// Scalar material properties that bypass the packed texture.
    fn apply_material_factors(&mut self, _factors: &MaterialFactors) {}
}

/// Surface that discards every upload, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn upload_texture(&mut self, slot: TextureSlot, buffer: &RgbaImage) {
        trace!(?slot, width = buffer.width(), height = buffer.height(), "Discarding texture upload");
    }
}
