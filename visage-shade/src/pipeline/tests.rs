use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};

use super::*;
use crate::error::OverlayConfigError;
use crate::material::AlphaMode;
use crate::stages::forward_decal::DecalSurface;

/// Lighting double that passes the base color through, so tests can
/// assert exact colors on the forward path.
struct PassthroughLight;

impl Lighting for PassthroughLight {
    fn light(&self, state: &crate::material::MaterialState) -> Vec4 {
        state.base_color
    }
}

struct FlatResolver;

impl SurfaceResolver for FlatResolver {
    fn resolve(&self, screen_position: Vec2) -> FragmentSample {
        // 100x100 pixel draw mapped onto the unit UV square
        let uv = screen_position / 100.0;
        FragmentSample::new(uv.extend(0.0), uv)
    }
}

struct CornerProjector;

impl DecalProjector for CornerProjector {
    fn project(&self, input: &FragmentInput) -> DecalSurface {
        DecalSurface {
            world_position: input.sample.world_position,
            // Every fragment lands inside the overlay region
            uv: Vec2::new(0.1, 0.9),
            fade_alpha: 0.25,
        }
    }
}

const MOUTH: Vec4 = Vec4::new(0.9, 0.1, 0.2, 1.0);
const BASE: Vec4 = Vec4::new(0.2, 0.3, 0.4, 1.0);

fn mouth_atlas() -> Texture {
    Texture::solid(MOUTH)
}

fn unlit_material(alpha_mode: AlphaMode) -> MaterialParams {
    MaterialParams {
        base_color: BASE,
        unlit: true,
        alpha_mode,
        ..Default::default()
    }
}

fn input_at(uv: Vec2) -> FragmentInput {
    FragmentInput::new(FragmentSample::new(uv.extend(0.0), uv), uv * 100.0)
}

#[test]
fn test_validation_matrix() {
    assert!(matches!(
        ShadingPipeline::new(PipelineDescriptor {
            oit: true,
            ..PipelineDescriptor::deferred()
        }),
        Err(PipelineError::OitRequiresForward)
    ));
    assert!(matches!(
        ShadingPipeline::new(PipelineDescriptor {
            forward_decal: true,
            decal_projector: Some(Arc::new(CornerProjector)),
            ..PipelineDescriptor::deferred()
        }),
        Err(PipelineError::ForwardDecalRequiresForward)
    ));
    assert!(matches!(
        ShadingPipeline::new(PipelineDescriptor {
            dither: true,
            ..PipelineDescriptor::deferred()
        }),
        Err(PipelineError::DitherRequiresForward)
    ));
    assert!(matches!(
        ShadingPipeline::new(PipelineDescriptor {
            geometry: GeometrySource::Resolved,
            ..PipelineDescriptor::forward()
        }),
        Err(PipelineError::MissingSurfaceResolver)
    ));
    assert!(matches!(
        ShadingPipeline::new(PipelineDescriptor {
            forward_decal: true,
            ..PipelineDescriptor::forward()
        }),
        Err(PipelineError::MissingDecalProjector)
    ));
    assert!(matches!(
        ShadingPipeline::new(PipelineDescriptor::forward().with_overlay(OverlayConfig {
            alpha_threshold: 2.0,
            ..Default::default()
        })),
        Err(PipelineError::InvalidOverlay(
            OverlayConfigError::ThresholdOutOfRange(_)
        ))
    ));
}

#[test]
fn test_valid_variants_build() {
    assert!(ShadingPipeline::new(PipelineDescriptor::forward()).is_ok());
    assert!(ShadingPipeline::new(PipelineDescriptor::deferred()).is_ok());
    assert!(ShadingPipeline::new(PipelineDescriptor::forward().with_oit().with_dither()).is_ok());
    assert!(ShadingPipeline::new(
        PipelineDescriptor::forward().with_resolved_geometry(Arc::new(FlatResolver))
    )
    .is_ok());
    assert!(ShadingPipeline::new(
        PipelineDescriptor::forward().with_forward_decal(Arc::new(CornerProjector))
    )
    .is_ok());
}

#[test]
fn test_forward_overlay_inside_region_outside_unchanged() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    let atlas = mouth_atlas();
    let resources = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Opaque));

    let inputs = [input_at(Vec2::new(0.1, 0.9)), input_at(Vec2::new(0.5, 0.5))];
    let output = pipeline.shade(&inputs, &resources).unwrap();

    assert_eq!(output.fragments[0].unwrap().forward_color(), Some(MOUTH));
    assert_eq!(output.fragments[1].unwrap().forward_color(), Some(BASE));
    assert!(output.oit.is_empty());
}

#[test]
fn test_lit_path_uses_bound_lighting() {
    let pipeline = ShadingPipeline::new(
        PipelineDescriptor::forward().with_lighting(Arc::new(PassthroughLight)),
    )
    .unwrap();
    let atlas = mouth_atlas();
    let material = MaterialParams {
        base_color: BASE,
        ..Default::default()
    };
    let resources = DrawResources::new(&atlas).with_material(material);

    let output = pipeline
        .shade(&[input_at(Vec2::new(0.5, 0.5))], &resources)
        .unwrap();
    assert_eq!(output.fragments[0].unwrap().forward_color(), Some(BASE));
}

#[test]
fn test_deferred_packs_overlay_color() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::deferred()).unwrap();
    let atlas = mouth_atlas();
    let resources = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Opaque));

    let output = pipeline
        .shade(&[input_at(Vec2::new(0.1, 0.9))], &resources)
        .unwrap();
    let Some(FragmentOutput::Deferred(packed)) = output.fragments[0] else {
        panic!("expected deferred output");
    };
    let color = packed.base_color();
    for i in 0..4 {
        assert!((color[i] - MOUTH[i]).abs() < 1.0 / 255.0);
    }
    assert!(packed.unlit());
}

#[test]
fn test_mask_discards_after_overlay() {
    // Transparent atlas sample leaves the base alpha; mask cuts it.
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    let atlas = Texture::solid(Vec4::new(1.0, 1.0, 1.0, 0.0));
    let material = MaterialParams {
        base_color: Vec4::new(1.0, 1.0, 1.0, 0.1),
        unlit: true,
        alpha_mode: AlphaMode::Mask(0.5),
        ..Default::default()
    };
    let resources = DrawResources::new(&atlas).with_material(material);

    let output = pipeline
        .shade(&[input_at(Vec2::new(0.1, 0.9))], &resources)
        .unwrap();
    assert!(output.fragments[0].is_none());
    assert!(output.oit.is_empty());
}

#[test]
fn test_oit_defers_non_opaque_and_passes_opaque() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward().with_oit()).unwrap();
    let atlas = mouth_atlas();

    let blend = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Blend));
    let output = pipeline
        .shade(&[input_at(Vec2::new(0.5, 0.5))], &blend)
        .unwrap();
    assert!(output.fragments[0].is_none());
    assert_eq!(output.oit.len(), 1);
    assert_eq!(output.oit[0].color, BASE);
    assert_eq!(output.oit[0].screen_position, Vec2::new(50.0, 50.0));

    let opaque = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Opaque));
    let output = pipeline
        .shade(&[input_at(Vec2::new(0.5, 0.5))], &opaque)
        .unwrap();
    assert!(output.fragments[0].is_some());
    assert!(output.oit.is_empty());
}

#[test]
fn test_forward_decal_remaps_and_clamps() {
    let pipeline = ShadingPipeline::new(
        PipelineDescriptor::forward().with_forward_decal(Arc::new(CornerProjector)),
    )
    .unwrap();
    let atlas = mouth_atlas();
    let resources = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Blend));

    // Submitted UV is outside the region; the projector remaps it inside.
    let output = pipeline
        .shade(&[input_at(Vec2::new(0.5, 0.5))], &resources)
        .unwrap();
    let color = output.fragments[0].unwrap().forward_color().unwrap();
    assert_eq!(color.truncate(), MOUTH.truncate());
    // Final alpha clamped to the decal's fade alpha
    assert_eq!(color.w, 0.25);
}

#[test]
fn test_dither_extremes() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward().with_dither()).unwrap();
    let atlas = mouth_atlas();
    let resources = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Opaque));

    let faded: Vec<FragmentInput> = (0..16)
        .map(|i| {
            let sample = FragmentSample::new(Vec3::ZERO, Vec2::new(0.5, 0.5)).with_dither_factor(0.0);
            FragmentInput::new(sample, Vec2::new((i % 4) as f32, (i / 4) as f32))
        })
        .collect();
    let output = pipeline.shade(&faded, &resources).unwrap();
    assert!(output.fragments.iter().all(Option::is_none));

    // No dither factor on the sample means the stage keeps everything
    let solid = [input_at(Vec2::new(0.5, 0.5))];
    let output = pipeline.shade(&solid, &resources).unwrap();
    assert!(output.fragments[0].is_some());
}

#[test]
fn test_resolved_geometry_round_trip() {
    let pipeline = ShadingPipeline::new(
        PipelineDescriptor::forward().with_resolved_geometry(Arc::new(FlatResolver)),
    )
    .unwrap();
    let atlas = mouth_atlas();
    let resources = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Opaque));

    // Screen (10, 90) resolves to UV (0.1, 0.9), inside the region
    let output = pipeline
        .shade_resolved(&[Vec2::new(10.0, 90.0), Vec2::new(50.0, 50.0)], &resources)
        .unwrap();
    assert_eq!(output.fragments[0].unwrap().forward_color(), Some(MOUTH));
    assert_eq!(output.fragments[1].unwrap().forward_color(), Some(BASE));
}

#[test]
fn test_geometry_kind_mismatch_is_rejected() {
    let atlas = mouth_atlas();
    let resources = DrawResources::new(&atlas);

    let interpolated = ShadingPipeline::new(PipelineDescriptor::forward()).unwrap();
    assert_eq!(
        interpolated
            .shade_resolved(&[Vec2::ZERO], &resources)
            .unwrap_err(),
        ShadeError::ExpectsFragmentInputs
    );

    let resolved = ShadingPipeline::new(
        PipelineDescriptor::forward().with_resolved_geometry(Arc::new(FlatResolver)),
    )
    .unwrap();
    assert_eq!(
        resolved.shade(&[], &resources).unwrap_err(),
        ShadeError::ExpectsScreenPositions
    );
}

#[test]
fn test_parallel_matches_sequential() {
    let pipeline = ShadingPipeline::new(PipelineDescriptor::forward().with_oit()).unwrap();
    let atlas = mouth_atlas();
    let resources = DrawResources::new(&atlas).with_material(unlit_material(AlphaMode::Blend));

    let inputs: Vec<FragmentInput> = (0..64)
        .flat_map(|y| (0..64).map(move |x| (x, y)))
        .map(|(x, y)| input_at(Vec2::new(x as f32 / 63.0, y as f32 / 63.0)))
        .collect();

    let parallel = pipeline.shade(&inputs, &resources).unwrap();
    let sequential = pipeline.shade_sequential(&inputs, &resources).unwrap();
    assert_eq!(parallel.fragments, sequential.fragments);
    assert_eq!(parallel.oit, sequential.oit);
}
