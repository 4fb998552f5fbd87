//! PNG export module
//!
//! This module serializes generated maps as lossless PNG files.

mod writer;
mod standard_png_writer;
pub mod types;

pub use writer::MapWriter;
pub use standard_png_writer::StandardPngWriter;
pub use types::{MATERIAL_MAP_FILE_NAME, MapKind, NORMAL_MAP_FILE_NAME, PngCompression};
