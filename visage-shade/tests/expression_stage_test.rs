//! End-to-end checks of the overlay inside a full shading pipeline,
//! using a real 4x1 pose atlas with per-tile colors and transparency.

use glam::{Vec2, Vec4};
use visage_shade::fragment::{FragmentInput, FragmentSample};
use visage_shade::material::MaterialParams;
use visage_shade::pipeline::{DrawResources, PipelineDescriptor, ShadingPipeline};
use visage_shade::texture::{Sampler, Texture};
use visage_shade::ExpressionSelector;

const TILE: u32 = 8;

/// 32x8 atlas, four 8x8 tiles. Each tile is a distinct opaque color in a
/// centered 4x4 "mouth" square; the rest of the tile is fully transparent.
fn pose_atlas() -> Texture {
    Texture::from_fn(4 * TILE, TILE, |x, y| {
        let tile = x / TILE;
        let (lx, ly) = (x % TILE, y);
        let inside = (2..6).contains(&lx) && (2..6).contains(&ly);
        if inside {
            Vec4::new(tile as f32 * 0.25, 0.5, 1.0 - tile as f32 * 0.25, 1.0)
        } else {
            Vec4::ZERO
        }
    })
}

fn tile_color(tile: u32) -> Vec4 {
    Vec4::new(tile as f32 * 0.25, 0.5, 1.0 - tile as f32 * 0.25, 1.0)
}

fn unlit_base() -> MaterialParams {
    MaterialParams {
        base_color: Vec4::new(0.1, 0.1, 0.1, 1.0),
        unlit: true,
        ..Default::default()
    }
}

fn input_at(uv: Vec2) -> FragmentInput {
    FragmentInput::new(FragmentSample::new(uv.extend(0.0), uv), uv * 256.0)
}

fn shade_one(pipeline: &ShadingPipeline, resources: &DrawResources, uv: Vec2) -> Vec4 {
    let output = pipeline.shade(&[input_at(uv)], resources).unwrap();
    output.fragments[0]
        .expect("fragment not discarded")
        .forward_color()
        .expect("forward pipeline")
}

/// Region center maps to the tile center, which is inside the opaque
/// mouth square of the selected pose.
#[test]
fn test_selected_pose_shows_through_at_region_center() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    let atlas = pose_atlas();
    let center = Vec2::new(0.125, 0.875);

    for pose in 0..4 {
        let resources = DrawResources::new(&atlas)
            .with_selector(ExpressionSelector::new(pose))
            .with_material(unlit_base());
        assert_eq!(shade_one(&pipeline, &resources, center), tile_color(pose));
    }
}

/// The transparent border of a tile leaves the material's own color.
#[test]
fn test_transparent_atlas_texels_keep_base_color() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    let atlas = pose_atlas();
    let resources = DrawResources::new(&atlas).with_material(unlit_base());

    // Region origin maps to atlas texel (0,0), a transparent border texel
    let color = shade_one(&pipeline, &resources, Vec2::new(0.0, 0.75));
    assert_eq!(color, Vec4::new(0.1, 0.1, 0.1, 1.0));
}

#[test]
fn test_outside_region_never_shows_the_atlas() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    let atlas = pose_atlas();
    let resources = DrawResources::new(&atlas)
        .with_selector(ExpressionSelector::new(2))
        .with_material(unlit_base());

    for uv in [
        Vec2::new(0.5, 0.5),
        Vec2::new(0.3, 0.9),  // right of the region
        Vec2::new(0.1, 0.7),  // below the region
        Vec2::new(0.99, 0.99),
    ] {
        assert_eq!(
            shade_one(&pipeline, &resources, uv),
            Vec4::new(0.1, 0.1, 0.1, 1.0)
        );
    }
}

/// Pose index 4 wraps onto pose 0 and renders identically.
#[test]
fn test_out_of_capacity_index_aliases_pose_zero() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    let atlas = pose_atlas();
    let center = Vec2::new(0.125, 0.875);

    let wrapped = DrawResources::new(&atlas)
        .with_selector(ExpressionSelector::new(4))
        .with_material(unlit_base());
    let zero = DrawResources::new(&atlas)
        .with_selector(ExpressionSelector::new(0))
        .with_material(unlit_base());
    assert_eq!(
        shade_one(&pipeline, &wrapped, center),
        shade_one(&pipeline, &zero, center)
    );
}

/// A linear sampler straddling the mouth edge produces alphas at or below
/// the threshold that must not replace the base color.
#[test]
fn test_soft_edge_below_threshold_preserves_base() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    let atlas = pose_atlas();
    let resources = DrawResources::new(&atlas)
        .with_atlas_sampler(Sampler::linear())
        .with_material(unlit_base());

    // Halfway between an opaque texel center and a transparent one:
    // sampled alpha is exactly 0.5, which the strict threshold rejects.
    // Atlas texel centers for tile 0 sit at x = (i + 0.5) / 32; the edge
    // pair is texels 1 (transparent) and 2 (opaque) on row 3 (opaque).
    let atlas_x = 2.0 / 32.0; // midpoint between texel centers 1 and 2
    let atlas_y = 3.5 / 8.0; // texel center, row 3
    // Invert the overlay mapping for tile 0: local = atlas_uv / tile_size
    let local = Vec2::new(atlas_x / 0.25, atlas_y / 1.0);
    let uv = Vec2::new(local.x * 0.25, 0.75 + local.y * 0.25);

    let color = shade_one(&pipeline, &resources, uv);
    assert_eq!(color, Vec4::new(0.1, 0.1, 0.1, 1.0));
}
