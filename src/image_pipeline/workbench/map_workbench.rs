use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use image::RgbaImage;
use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    common::error::{MapError, Result},
    export::{MapKind, MapWriter, StandardPngWriter},
    material::{
        MaterialChannel, MaterialChannelInput, MaterialFactors, MaterialInputs, pack_material_map,
        types::validate_scalar,
    },
    normal::{NormalMapConfig, generate_normal_map},
    preview::{Previews, preview_size, render_preview},
    render::{RenderSurface, TextureSlot},
    scheduler::Debouncer,
    source::{ImageCrateReader, SourceImage, SourceImageReader},
    workbench::types::{Flushed, WorkbenchConfig},
};

/// Owned state of the map tool.
///
/// Every trigger (a slider moving, a checkbox toggling, a channel map being
/// loaded) only updates the inputs and files a request with the pipeline's
/// debouncer. [`poll`](Self::poll) then regenerates each pipeline at most
/// once per quiescence window, from whatever the inputs are at that moment,
/// and pushes the result to the render surface.
pub struct MapWorkbench<S: RenderSurface, R: SourceImageReader = ImageCrateReader, W: MapWriter = StandardPngWriter> {
    reader: R,
    writer: W,
    surface: S,
    config: WorkbenchConfig,
    normal_config: NormalMapConfig,
    inputs: MaterialInputs,
    source: Option<SourceImage>,
    normal_map: RgbaImage,
    material_map: RgbaImage,
    normal_debounce: Debouncer,
    material_debounce: Debouncer,
}

impl<S: RenderSurface> MapWorkbench<S, ImageCrateReader, StandardPngWriter> {
    pub fn new(config: WorkbenchConfig, surface: S) -> Self {
        Self::with_custom(ImageCrateReader, StandardPngWriter, surface, config)
    }
}

impl<S: RenderSurface, R: SourceImageReader, W: MapWriter> MapWorkbench<S, R, W> {
    pub fn with_custom(reader: R, writer: W, surface: S, config: WorkbenchConfig) -> Self {
        let normal_debounce = Debouncer::new(config.debounce_delay);
        let material_debounce = Debouncer::new(config.debounce_delay);
        Self {
            reader,
            writer,
            surface,
            config,
            normal_config: NormalMapConfig::default(),
            inputs: MaterialInputs::default(),
            source: None,
            normal_map: RgbaImage::new(0, 0),
            material_map: RgbaImage::new(0, 0),
            normal_debounce,
            material_debounce,
        }
    }

    /// Empty images are always rejected; `validate_dimensions` only gates
    /// the `max_dimension` limit.
    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions(width, height));
        }

        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(MapError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Replaces the source image and regenerates both maps right away.
    ///
    /// Pending debounced requests are dropped since the regeneration already
    /// reflects the latest inputs. On error nothing is changed.
    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub fn load_source(&mut self, data: &[u8]) -> Result<()> {
        let pixels = {
            let _span = tracing::info_span!("decode_source").entered();
            self.reader.read_image(data)?
        };
        let (width, height) = pixels.dimensions();

        {
            let _span = tracing::info_span!("validate_dimensions", width, height).entered();
            self.validate_dimensions(width, height)?;
        }

        let source = SourceImage::new(pixels);
        let normal_map = self.build_normal_map(&source)?;
        let material_map = self.build_material_map(width, height);

        if self.normal_map.dimensions() != (width, height) {
            debug!(
                "Source dimensions changed {:?} -> {}x{}, reallocating buffers",
                self.normal_map.dimensions(),
                width,
                height
            );
        }

        self.source = Some(source);
        self.normal_map = normal_map;
        self.material_map = material_map;
        self.normal_debounce.cancel();
        self.material_debounce.cancel();

        self.publish_all();
        info!(width, height, "Source image loaded");
        Ok(())
    }

    pub fn load_source_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        info!(input = %path.display(), "Loading source image");
        let data = read_input(path)?;
        self.load_source(&data)
    }

    /// Switches `channel` to an image map and schedules a material update.
    ///
    /// The channel keeps sampling an image from now on; its scalar value is
    /// no longer consulted.
    ///
    /// # Errors
    ///
    /// * `MapError::AssetLoad` - the bytes do not decode
    /// * `MapError::InvalidDimensions` - the decoded map is empty
    ///
    /// On error the channel keeps its current input.
    #[instrument(skip(self, data, now), fields(input_size = data.len()))]
    pub fn load_material_map(&mut self, channel: MaterialChannel, data: &[u8], now: Instant) -> Result<()> {
        let map = {
            let _span = tracing::info_span!("decode_channel_map").entered();
            self.reader.read_image(data)?
        };

        let (width, height) = map.dimensions();
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions(width, height));
        }

        info!(%channel, width, height, "Channel map loaded");
        *self.inputs.get_mut(channel) = MaterialChannelInput::ImageMap(map);
        self.material_debounce.request(now);
        Ok(())
    }

    pub fn load_material_map_file<P: AsRef<Path>>(
        &mut self,
        channel: MaterialChannel,
        path: P,
        now: Instant,
    ) -> Result<()> {
        let path = path.as_ref();
        info!(%channel, input = %path.display(), "Loading channel map");
        let data = read_input(path)?;
        self.load_material_map(channel, &data, now)
    }

    /// Sets the bump strength. Values at or below zero are clamped when the
    /// map is regenerated.
    ///
    /// # Errors
    ///
    /// * `MapError::InvalidConfiguration` - strength is NaN or infinite
    pub fn set_strength(&mut self, strength: f32, now: Instant) -> Result<()> {
        if !strength.is_finite() {
            return Err(MapError::InvalidConfiguration(format!(
                "strength must be finite, got {strength}"
            )));
        }
        self.normal_config.strength = strength;
        self.normal_debounce.request(now);
        Ok(())
    }

    pub fn set_invert_r(&mut self, invert: bool, now: Instant) {
        self.normal_config.invert_r = invert;
        self.normal_debounce.request(now);
    }

    pub fn set_invert_g(&mut self, invert: bool, now: Instant) {
        self.normal_config.invert_g = invert;
        self.normal_debounce.request(now);
    }

    /// Sets the constant value of `channel`.
    ///
    /// Ignored with a warning once the channel is driven by an image map.
    ///
    /// # Errors
    ///
    /// * `MapError::InvalidConfiguration` - value outside `[0, 1]` or not finite
    pub fn set_channel_value(&mut self, channel: MaterialChannel, value: f32, now: Instant) -> Result<()> {
        let value = validate_scalar(channel, value)?;
        let input = self.inputs.get_mut(channel);
        if input.is_image_map() {
            warn!(%channel, "Channel is driven by an image map, ignoring scalar value");
            return Ok(());
        }
        *input = MaterialChannelInput::Constant(value);
        self.material_debounce.request(now);
        Ok(())
    }

    /// Runs every pipeline whose quiescence window has elapsed at `now`.
    ///
    /// A due request with no source loaded is dropped with a warning.
    pub fn poll(&mut self, now: Instant) -> Result<Flushed> {
        let mut flushed = Flushed::default();

        if let Some(coalesced) = self.normal_debounce.take_due(now) {
            debug!(coalesced, "Flushing normal map request");
            flushed.normal = skip_missing_source(self.regenerate_normal_map())?;
        }

        if let Some(coalesced) = self.material_debounce.take_due(now) {
            debug!(coalesced, "Flushing material map request");
            flushed.material = skip_missing_source(self.regenerate_material_map())?;
        }

        Ok(flushed)
    }

    /// Earliest instant at which a pending request becomes due.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.normal_debounce.deadline(), self.material_debounce.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    #[instrument(skip(self))]
    pub fn regenerate_normal_map(&mut self) -> Result<()> {
        let source = self.source.as_ref().ok_or(MapError::MissingSource)?;
        self.normal_map = self.build_normal_map(source)?;
        self.surface.upload_texture(TextureSlot::Normal, &self.normal_map);
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn regenerate_material_map(&mut self) -> Result<()> {
        let (width, height) = self.source.as_ref().ok_or(MapError::MissingSource)?.dimensions();
        self.material_map = self.build_material_map(width, height);
        self.surface.apply_material_factors(&self.inputs.factors());
        self.surface.upload_texture(TextureSlot::PackedMaterial, &self.material_map);
        Ok(())
    }

    fn build_normal_map(&self, source: &SourceImage) -> Result<RgbaImage> {
        let config = self.normal_config.sanitized()?;
        let _span = tracing::info_span!("generate_normal_map").entered();
        Ok(generate_normal_map(&source.luminance(), &config))
    }

    fn build_material_map(&self, width: u32, height: u32) -> RgbaImage {
        let _span = tracing::info_span!("pack_material_map").entered();
        pack_material_map(
            width,
            height,
            &self.inputs.metallic,
            &self.inputs.roughness,
            &self.inputs.ao,
        )
    }

    fn publish_all(&mut self) {
        if let Some(source) = &self.source {
            self.surface.upload_texture(TextureSlot::Source, source.pixels());
            self.surface.upload_texture(TextureSlot::Normal, &self.normal_map);
            self.surface.apply_material_factors(&self.inputs.factors());
            self.surface.upload_texture(TextureSlot::PackedMaterial, &self.material_map);
        }
    }

    /// Thumbnails of the source and both maps at the configured preview width.
    pub fn previews(&self) -> Result<Previews> {
        let source = self.source.as_ref().ok_or(MapError::MissingSource)?;
        let (width, height) = preview_size(source.width(), source.height(), self.config.preview_width);
        Ok(Previews {
            source: render_preview(source.pixels(), width, height),
            normal: render_preview(&self.normal_map, width, height),
            material: render_preview(&self.material_map, width, height),
        })
    }

    /// Encodes one map as PNG into `output`.
    #[instrument(skip(self, output))]
    pub fn export_to(&self, kind: MapKind, output: &mut dyn Write) -> Result<()> {
        let map = self.map(kind).ok_or(MapError::MissingSource)?;
        let _span = tracing::info_span!("encode_png").entered();
        self.writer.write_map(map, output, self.config.compression)
    }

    pub fn export(&self, kind: MapKind) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.export_to(kind, &mut bytes)?;
        Ok(bytes)
    }

    /// Writes `normal_map.png` and `material_map_mra.png` into `dir`.
    #[instrument(skip(self, dir))]
    pub fn export_to_dir<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>> {
        if self.source.is_none() {
            return Err(MapError::MissingSource);
        }

        let dir = dir.as_ref();
        let mut written = Vec::new();
        for kind in [MapKind::Normal, MapKind::Material] {
            let path = dir.join(kind.file_name());
            let mut file = std::fs::File::create(&path).map_err(|e| {
                MapError::OutputWrite(format!("{}: {}", path.display(), e))
            })?;
            self.export_to(kind, &mut file)?;
            info!(output = %path.display(), "Map exported");
            written.push(path);
        }
        Ok(written)
    }

    pub fn map(&self, kind: MapKind) -> Option<&RgbaImage> {
        self.source.as_ref()?;
        Some(match kind {
            MapKind::Normal => &self.normal_map,
            MapKind::Material => &self.material_map,
        })
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn normal_config(&self) -> &NormalMapConfig {
        &self.normal_config
    }

    pub fn material_inputs(&self) -> &MaterialInputs {
        &self.inputs
    }

    pub fn material_factors(&self) -> MaterialFactors {
        self.inputs.factors()
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input_file").entered();
    std::fs::read(path).map_err(|e| MapError::InputRead(format!("{}: {}", path.display(), e)))
}

fn skip_missing_source(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(MapError::MissingSource) => {
            warn!("Regeneration requested before a source image was loaded");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
