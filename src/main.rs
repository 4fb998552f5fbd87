use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pbr_mapgen_rs::image_pipeline::{
    MapWorkbench, MaterialChannel, NullSurface, PngCompression, WorkbenchConfig,
};
use pbr_mapgen_rs::logger;

use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "pbr-mapgen")]
#[command(about = "Derive a normal map and a packed metallic/roughness/AO map from one image")]
struct Cli {
    /// Source image (any format the image crate can decode)
    source: PathBuf,

    /// Bump strength, must be positive
    #[arg(long, default_value_t = 2.0)]
    strength: f32,

    /// Flip the red channel of the normal map
    #[arg(long)]
    invert_r: bool,

    /// Flip the green channel of the normal map
    #[arg(long)]
    invert_g: bool,

    /// Constant metallic value in [0, 1]
    #[arg(long)]
    metallic: Option<f32>,

    /// Constant roughness value in [0, 1]
    #[arg(long)]
    roughness: Option<f32>,

    /// Constant ambient occlusion value in [0, 1]
    #[arg(long)]
    ao: Option<f32>,

    /// Grayscale metallic map, replaces --metallic
    #[arg(long)]
    metallic_map: Option<PathBuf>,

    /// Grayscale roughness map, replaces --roughness
    #[arg(long)]
    roughness_map: Option<PathBuf>,

    /// Grayscale ambient occlusion map, replaces --ao
    #[arg(long)]
    ao_map: Option<PathBuf>,

    /// Directory the maps are written to
    #[arg(long, short, default_value = ".")]
    out_dir: PathBuf,

    /// Also write thumbnail previews of the source and both maps
    #[arg(long)]
    previews: bool,

    /// Width of preview thumbnails in pixels
    #[arg(long, default_value_t = 256)]
    preview_width: u32,

    /// PNG compression level
    #[arg(long, value_enum, default_value_t = Compression::Balanced)]
    compression: Compression,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Compression {
    Fast,
    Balanced,
    Best,
}

impl From<Compression> for PngCompression {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Fast => PngCompression::Fast,
            Compression::Balanced => PngCompression::Balanced,
            Compression::Best => PngCompression::Best,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(if cli.verbose { "debug" } else { "info" });

    info!("Starting pbr-mapgen...");

    match run(&cli) {
        Ok(()) => {
            info!("Maps generated successfully!");
            Ok(())
        }
        Err(e) => {
            error!("Map generation failed: {:#}", e);
            Err(e)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = WorkbenchConfig::builder()
        .preview_width(cli.preview_width)
        .compression(cli.compression.into())
        .build();
    let mut workbench = MapWorkbench::new(config, NullSurface);
    let now = Instant::now();

    info!("Compression: {:?}", workbench.config().compression);

    workbench.set_strength(cli.strength, now)?;
    workbench.set_invert_r(cli.invert_r, now);
    workbench.set_invert_g(cli.invert_g, now);

    let channels = [
        (MaterialChannel::Metallic, cli.metallic, &cli.metallic_map),
        (MaterialChannel::Roughness, cli.roughness, &cli.roughness_map),
        (MaterialChannel::Ao, cli.ao, &cli.ao_map),
    ];
    for (channel, value, map) in channels {
        if let Some(value) = value {
            workbench.set_channel_value(channel, value, now)?;
        }
        if let Some(path) = map {
            workbench
                .load_material_map_file(channel, path, now)
                .with_context(|| format!("loading {channel} map"))?;
        }
    }

    // Loading the source regenerates both maps from the settings above.
    workbench
        .load_source_file(&cli.source)
        .with_context(|| format!("loading source image {}", cli.source.display()))?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;
    workbench.export_to_dir(&cli.out_dir)?;

    if cli.previews {
        let previews = workbench.previews()?;
        for (name, image) in [
            ("source_preview.png", &previews.source),
            ("normal_preview.png", &previews.normal),
            ("material_preview.png", &previews.material),
        ] {
            let path = cli.out_dir.join(name);
            image
                .save(&path)
                .with_context(|| format!("writing preview {}", path.display()))?;
            info!(output = %path.display(), "Preview written");
        }
    }

    Ok(())
}
