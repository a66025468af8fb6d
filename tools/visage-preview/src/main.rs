//! Visage preview - offline renders of the avatar shading stage
//!
//! # Commands
//!
//! - `visage-preview render` - shade a UV quad through a pipeline variant
//!   at a chosen mouth pose and write a PNG
//! - `visage-preview atlas` - write the built-in placeholder pose atlas
//!
//! # Usage
//!
//! ```bash
//! # Render the built-in atlas at pose 2 with the default material
//! visage-preview render --pose 2 -o cheer.png
//!
//! # Render a real atlas with a scene file, addressing the pose by name
//! visage-preview render --atlas mouth.png --scene face.toml --pose cheer-a
//!
//! # Inspect the deferred G-buffer base color instead of the lit output
//! visage-preview render --mode deferred
//!
//! # Dump the placeholder atlas for editing
//! visage-preview atlas -o mouth_template.png
//! ```

mod builtin;
mod render;
mod scene;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Offline preview tool for Visage pose atlases and material configs
#[derive(Parser)]
#[command(name = "visage-preview")]
#[command(about = "Preview the Visage avatar shading stage offline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shade a UV quad and write a PNG
    Render(render::RenderArgs),

    /// Write the built-in placeholder pose atlas as a PNG
    Atlas(AtlasArgs),
}

#[derive(Args)]
struct AtlasArgs {
    /// Tile edge length in pixels
    #[arg(long, default_value = "64")]
    tile_size: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "mouth_atlas.png")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => render::run(args),
        Commands::Atlas(args) => write_atlas(args),
    }
}

fn write_atlas(args: AtlasArgs) -> Result<()> {
    use anyhow::Context;
    use visage_shade::packing::pack_unorm8;
    use visage_shade::texture::{Sampler, Texture};

    let tile_size = args.tile_size.max(8);
    let atlas: Texture = builtin::generate_atlas(tile_size);
    let mut img = image::RgbaImage::new(atlas.width(), atlas.height());
    for y in 0..atlas.height() {
        for x in 0..atlas.width() {
            // Texel-center nearest fetch reads the texel back exactly
            let uv = glam::Vec2::new(
                (x as f32 + 0.5) / atlas.width() as f32,
                (y as f32 + 0.5) / atlas.height() as f32,
            );
            let c = atlas.sample(Sampler::nearest(), uv);
            img.put_pixel(
                x,
                y,
                image::Rgba([
                    pack_unorm8(c.x),
                    pack_unorm8(c.y),
                    pack_unorm8(c.z),
                    pack_unorm8(c.w),
                ]),
            );
        }
    }
    img.save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(path = %args.output.display(), "atlas written");
    Ok(())
}
