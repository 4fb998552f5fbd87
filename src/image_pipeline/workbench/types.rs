//! Workbench configuration types

use std::time::Duration;

use crate::image_pipeline::export::PngCompression;
use crate::image_pipeline::scheduler::DEFAULT_DEBOUNCE_DELAY;

/// Configuration for the map workbench
#[derive(Debug, Clone)]
pub struct WorkbenchConfig {
    /// Quiescence window before a debounced regeneration runs
    pub debounce_delay: Duration,
    /// Width of generated previews in pixels; height follows the source aspect ratio
    pub preview_width: u32,
    /// Compression level used when exporting maps
    pub compression: PngCompression,
    /// Whether to validate source dimensions on load
    pub validate_dimensions: bool,
    /// Largest accepted source width or height, if any
    pub max_dimension: Option<u32>,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
            preview_width: 256,
            compression: PngCompression::Balanced,
            validate_dimensions: true,
            max_dimension: Some(16384),
        }
    }
}

impl WorkbenchConfig {
    pub fn builder() -> WorkbenchConfigBuilder {
        WorkbenchConfigBuilder::default()
    }
}

/// Builder for WorkbenchConfig
#[derive(Default)]
pub struct WorkbenchConfigBuilder {
    debounce_delay: Option<Duration>,
    preview_width: Option<u32>,
    compression: Option<PngCompression>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl WorkbenchConfigBuilder {
    pub fn debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = Some(delay);
        self
    }

    pub fn preview_width(mut self, width: u32) -> Self {
        self.preview_width = Some(width);
        self
    }

    pub fn compression(mut self, compression: PngCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> WorkbenchConfig {
        let default = WorkbenchConfig::default();
        WorkbenchConfig {
            debounce_delay: self.debounce_delay.unwrap_or(default.debounce_delay),
            preview_width: self.preview_width.unwrap_or(default.preview_width),
            compression: self.compression.unwrap_or(default.compression),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

/// Which pipelines a [`poll`](super::MapWorkbench::poll) regenerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flushed {
    pub normal: bool,
    pub material: bool,
}
