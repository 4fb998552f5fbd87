//! Material map pipeline module
//!
//! This module derives a tangent-space normal map and a packed
//! metallic/roughness/AO map from a single source image, with separate
//! modules for decoding, generation, packing, previews and PNG export.

pub mod common;
pub mod source;
pub mod normal;
pub mod material;
pub mod preview;
pub mod export;
pub mod render;
pub mod scheduler;
pub mod workbench;

pub use common::{
    MapError,
    Result,
};

pub use source::{
    ImageCrateReader,
    LuminanceField,
    SourceImage,
    SourceImageReader,
};

pub use normal::{
    MIN_STRENGTH,
    NormalMapConfig,
    NormalMapConfigBuilder,
    generate_normal_map,
};

pub use material::{
    MaterialChannel,
    MaterialChannelInput,
    MaterialFactors,
    MaterialInputs,
    pack_material_map,
};

pub use preview::{
    Previews,
    preview_size,
    render_preview,
};

pub use export::{
    MapKind,
    MapWriter,
    PngCompression,
    StandardPngWriter,
};

pub use render::{
    NullSurface,
    RenderSurface,
    TextureSlot,
};

pub use scheduler::Debouncer;

pub use workbench::{
    Flushed,
    MapWorkbench,
    WorkbenchConfig,
    WorkbenchConfigBuilder,
};
