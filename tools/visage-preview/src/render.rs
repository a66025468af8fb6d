//! Render a UV quad through a shading pipeline and write a PNG.
//!
//! The quad maps the image onto the full [0,1]² UV domain, so the overlay
//! region (bottom-left quarter-corner by default) is visible in place.
//! Discarded fragments show a gray checkerboard. Deferred pipelines are
//! previewed by unpacking the G-buffer base color.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use glam::{Vec2, Vec4};
use image::{Rgba, RgbaImage};
use visage_shade::expression::ExpressionSelector;
use visage_shade::fragment::{FragmentInput, FragmentOutput, FragmentSample};
use visage_shade::packing::pack_unorm8;
use visage_shade::pipeline::{DrawResources, PipelineDescriptor, ShadingPipeline};
use visage_shade::texture::{Sampler, Texture};

use crate::builtin;
use crate::scene::SceneConfig;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RenderMode {
    Forward,
    Deferred,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Pose to render: an index or a name from the scene's pose table
    #[arg(long, default_value = "0")]
    pub pose: String,

    /// Atlas PNG to sample; omit to use the built-in placeholder atlas
    #[arg(long)]
    pub atlas: Option<PathBuf>,

    /// Scene TOML (material + overlay + poses)
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Pipeline variant to render through
    #[arg(long, value_enum, default_value = "forward")]
    pub mode: RenderMode,

    /// Sample the atlas bilinearly instead of nearest
    #[arg(long)]
    pub linear: bool,

    /// Output image size in pixels (square)
    #[arg(long, default_value = "256")]
    pub size: u32,

    /// Output PNG path
    #[arg(short, long, default_value = "preview.png")]
    pub output: PathBuf,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let scene = match &args.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    let pose = scene.resolve_pose(&args.pose)?;

    let atlas = match &args.atlas {
        Some(path) => load_atlas(path)?,
        None => builtin::generate_atlas(64),
    };
    tracing::info!(
        pose,
        atlas_width = atlas.width(),
        atlas_height = atlas.height(),
        "rendering preview"
    );

    let descriptor = match args.mode {
        RenderMode::Forward => PipelineDescriptor::forward(),
        RenderMode::Deferred => PipelineDescriptor::deferred(),
    }
    .with_overlay(scene.overlay);
    let pipeline = ShadingPipeline::new(descriptor).context("building shading pipeline")?;

    let sampler = if args.linear {
        Sampler::linear()
    } else {
        Sampler::nearest()
    };
    let resources = DrawResources::new(&atlas)
        .with_atlas_sampler(sampler)
        .with_selector(ExpressionSelector::new(pose))
        .with_material(scene.material.clone().into_params());

    let size = args.size.max(1);
    let inputs: Vec<FragmentInput> = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            let uv = Vec2::new(
                (x as f32 + 0.5) / size as f32,
                (y as f32 + 0.5) / size as f32,
            );
            FragmentInput::new(
                FragmentSample::new(uv.extend(0.0), uv),
                Vec2::new(x as f32, y as f32),
            )
        })
        .collect();

    let output = pipeline
        .shade(&inputs, &resources)
        .context("shading the preview quad")?;

    let mut img = RgbaImage::new(size, size);
    for (i, fragment) in output.fragments.iter().enumerate() {
        let (x, y) = (i as u32 % size, i as u32 / size);
        let color = match fragment {
            Some(FragmentOutput::Forward(color)) => *color,
            Some(FragmentOutput::Deferred(packed)) => packed.base_color(),
            None => checker(x, y),
        };
        img.put_pixel(x, y, to_rgba8(color));
    }
    img.save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(path = %args.output.display(), "preview written");
    Ok(())
}

fn load_atlas(path: &std::path::Path) -> Result<Texture> {
    let img = image::open(path)
        .with_context(|| format!("opening atlas image {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Texture::from_rgba8(width, height, img.as_raw())
        .with_context(|| format!("converting atlas image {}", path.display()))
}

fn to_rgba8(color: Vec4) -> Rgba<u8> {
    Rgba([
        pack_unorm8(color.x),
        pack_unorm8(color.y),
        pack_unorm8(color.z),
        pack_unorm8(color.w),
    ])
}

/// 8x8 gray checkerboard marking discarded fragments
fn checker(x: u32, y: u32) -> Vec4 {
    if ((x / 8) + (y / 8)) % 2 == 0 {
        Vec4::new(0.35, 0.35, 0.35, 1.0)
    } else {
        Vec4::new(0.25, 0.25, 0.25, 1.0)
    }
}
