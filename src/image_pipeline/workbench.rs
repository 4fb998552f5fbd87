//! Map workbench module
//!
//! Owns the source image, both generated maps and their inputs, and
//! orchestrates regeneration, previews and export.

mod map_workbench;
pub mod types;


pub use map_workbench::MapWorkbench;
pub use types::{Flushed, WorkbenchConfig, WorkbenchConfigBuilder};
