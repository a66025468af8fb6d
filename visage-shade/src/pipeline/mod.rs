//! Pipeline configuration and the batch executor.
//!
//! A [`PipelineDescriptor`] names one point in the variant matrix (output
//! mode, geometry source, OIT, forward-decal, dither) plus the overlay
//! configuration and the bound external contracts. [`ShadingPipeline::new`]
//! validates it exactly once; after that the stage path is fixed and no
//! invocation re-checks the configuration.
//!
//! Invocations are pure functions of (fragment input, draw resources,
//! pipeline). Batches shade in parallel with rayon; a sequential path
//! exists for tools and produces identical results.

use std::sync::Arc;

use glam::Vec2;
use rayon::prelude::*;

use crate::error::{PipelineError, ShadeError};
use crate::expression::{self, ExpressionSelector, OverlayConfig};
use crate::fragment::{FragmentInput, FragmentOutput, FragmentSample};
use crate::gbuffer::PackedGBuffer;
use crate::material::MaterialParams;
use crate::stages::decal::{DecalCompositor, NoDecals};
use crate::stages::forward_decal::{self, DecalProjector};
use crate::stages::lighting::{DirectionalLambert, Lighting, NoPostProcess, PostProcess};
use crate::stages::oit::{OitAccumulator, OitFragment};
use crate::stages::{alpha, assembler, dither, StageControl};
use crate::texture::{Sampler, Texture};

/// How an invocation ends.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shaded {
    Output(FragmentOutput),
    Deferred(OitFragment),
    Discarded,
}

/// Lighting/output variant, chosen at pipeline build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pack attributes for a later lighting pass
    Deferred,
    /// Light in place and post-process
    Forward,
}

/// Where fragment samples come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometrySource {
    /// The rasterizer delivers interpolated samples directly
    Interpolated,
    /// Meshlet-style: samples are reconstructed from screen positions
    /// through a bound [`SurfaceResolver`]
    Resolved,
}

/// External contract reconstructing a fragment sample from a screen
/// position, for resolved-geometry pipelines.
pub trait SurfaceResolver: Send + Sync {
    fn resolve(&self, screen_position: Vec2) -> FragmentSample;
}

/// Everything a draw binds: the pose atlas, the selector uniform, and the
/// material. Read-only for every invocation of the draw.
pub struct DrawResources<'a> {
    pub atlas: &'a Texture,
    pub atlas_sampler: Sampler,
    pub selector: ExpressionSelector,
    pub material: MaterialParams,
    pub base_color_texture: Option<(&'a Texture, Sampler)>,
}

impl<'a> DrawResources<'a> {
    /// Bind an atlas with a nearest sampler, the default selector, and the
    /// default material.
    pub fn new(atlas: &'a Texture) -> Self {
        Self {
            atlas,
            atlas_sampler: Sampler::nearest(),
            selector: ExpressionSelector::default(),
            material: MaterialParams::default(),
            base_color_texture: None,
        }
    }

    pub fn with_atlas_sampler(mut self, sampler: Sampler) -> Self {
        self.atlas_sampler = sampler;
        self
    }

    pub fn with_selector(mut self, selector: ExpressionSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_material(mut self, material: MaterialParams) -> Self {
        self.material = material;
        self
    }

    pub fn with_base_color_texture(mut self, texture: &'a Texture, sampler: Sampler) -> Self {
        self.base_color_texture = Some((texture, sampler));
        self
    }
}

/// Result of shading one batch.
///
/// `fragments` is index-aligned with the submitted inputs; `None` marks an
/// invocation that discarded or deferred to OIT. `oit` holds the deferred
/// fragments in submission order.
#[derive(Debug)]
pub struct DrawOutput {
    pub fragments: Vec<Option<FragmentOutput>>,
    pub oit: Vec<OitFragment>,
}

/// One point in the pipeline variant matrix, plus bound contracts.
///
/// Constructed via [`PipelineDescriptor::forward`] or
/// [`PipelineDescriptor::deferred`] and customized with the builder
/// methods, then validated by [`ShadingPipeline::new`].
pub struct PipelineDescriptor {
    pub output_mode: OutputMode,
    pub geometry: GeometrySource,
    pub oit: bool,
    pub forward_decal: bool,
    pub dither: bool,
    pub overlay: OverlayConfig,
    pub decals: Arc<dyn DecalCompositor>,
    pub lighting: Arc<dyn Lighting>,
    pub post_process: Arc<dyn PostProcess>,
    pub resolver: Option<Arc<dyn SurfaceResolver>>,
    pub decal_projector: Option<Arc<dyn DecalProjector>>,
}

impl PipelineDescriptor {
    fn base(output_mode: OutputMode) -> Self {
        Self {
            output_mode,
            geometry: GeometrySource::Interpolated,
            oit: false,
            forward_decal: false,
            dither: false,
            overlay: OverlayConfig::default(),
            decals: Arc::new(NoDecals),
            lighting: Arc::new(DirectionalLambert::default()),
            post_process: Arc::new(NoPostProcess),
            resolver: None,
            decal_projector: None,
        }
    }

    /// Forward-lit pipeline with default contracts and overlay config
    pub fn forward() -> Self {
        Self::base(OutputMode::Forward)
    }

    /// Deferred-pack pipeline with default contracts and overlay config
    pub fn deferred() -> Self {
        Self::base(OutputMode::Deferred)
    }

    pub fn with_overlay(mut self, overlay: OverlayConfig) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_oit(mut self) -> Self {
        self.oit = true;
        self
    }

    pub fn with_dither(mut self) -> Self {
        self.dither = true;
        self
    }

    pub fn with_decals(mut self, decals: Arc<dyn DecalCompositor>) -> Self {
        self.decals = decals;
        self
    }

    pub fn with_lighting(mut self, lighting: Arc<dyn Lighting>) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_post_process(mut self, post_process: Arc<dyn PostProcess>) -> Self {
        self.post_process = post_process;
        self
    }

    pub fn with_resolved_geometry(mut self, resolver: Arc<dyn SurfaceResolver>) -> Self {
        self.geometry = GeometrySource::Resolved;
        self.resolver = Some(resolver);
        self
    }

    pub fn with_forward_decal(mut self, projector: Arc<dyn DecalProjector>) -> Self {
        self.forward_decal = true;
        self.decal_projector = Some(projector);
        self
    }
}

/// A validated, immutable shading pipeline.
pub struct ShadingPipeline {
    descriptor: PipelineDescriptor,
}

impl ShadingPipeline {
    /// Validate a descriptor into a runnable pipeline.
    ///
    /// # Errors
    ///
    /// Rejects the invalid corners of the variant matrix: OIT,
    /// forward-decal, and dither all require the forward output mode;
    /// resolved geometry requires a resolver; forward-decal mode requires
    /// a projector; the overlay configuration must validate.
    pub fn new(descriptor: PipelineDescriptor) -> Result<Self, PipelineError> {
        if descriptor.oit && descriptor.output_mode != OutputMode::Forward {
            return Err(PipelineError::OitRequiresForward);
        }
        if descriptor.forward_decal && descriptor.output_mode != OutputMode::Forward {
            return Err(PipelineError::ForwardDecalRequiresForward);
        }
        if descriptor.dither && descriptor.output_mode != OutputMode::Forward {
            return Err(PipelineError::DitherRequiresForward);
        }
        if descriptor.geometry == GeometrySource::Resolved && descriptor.resolver.is_none() {
            return Err(PipelineError::MissingSurfaceResolver);
        }
        if descriptor.forward_decal && descriptor.decal_projector.is_none() {
            return Err(PipelineError::MissingDecalProjector);
        }
        descriptor.overlay.validate()?;

        tracing::debug!(
            output_mode = ?descriptor.output_mode,
            geometry = ?descriptor.geometry,
            oit = descriptor.oit,
            forward_decal = descriptor.forward_decal,
            dither = descriptor.dither,
            "built shading pipeline"
        );
        Ok(Self { descriptor })
    }

    pub fn output_mode(&self) -> OutputMode {
        self.descriptor.output_mode
    }

    pub fn geometry(&self) -> GeometrySource {
        self.descriptor.geometry
    }

    pub fn overlay(&self) -> &OverlayConfig {
        &self.descriptor.overlay
    }

    /// Shade a batch of interpolated fragment inputs in parallel.
    ///
    /// # Errors
    ///
    /// Fails if the pipeline was built for resolved geometry.
    pub fn shade(
        &self,
        inputs: &[FragmentInput],
        resources: &DrawResources,
    ) -> Result<DrawOutput, ShadeError> {
        if self.descriptor.geometry != GeometrySource::Interpolated {
            return Err(ShadeError::ExpectsScreenPositions);
        }
        let shaded: Vec<Shaded> = inputs
            .par_iter()
            .map(|input| self.invoke(input, resources))
            .collect();
        Ok(Self::route(shaded))
    }

    /// Sequential twin of [`shade`](Self::shade); same results, no rayon.
    pub fn shade_sequential(
        &self,
        inputs: &[FragmentInput],
        resources: &DrawResources,
    ) -> Result<DrawOutput, ShadeError> {
        if self.descriptor.geometry != GeometrySource::Interpolated {
            return Err(ShadeError::ExpectsScreenPositions);
        }
        let shaded: Vec<Shaded> = inputs
            .iter()
            .map(|input| self.invoke(input, resources))
            .collect();
        Ok(Self::route(shaded))
    }

    /// Shade a batch of screen positions through the bound surface
    /// resolver.
    ///
    /// # Errors
    ///
    /// Fails if the pipeline was built for interpolated geometry.
    pub fn shade_resolved(
        &self,
        screen_positions: &[Vec2],
        resources: &DrawResources,
    ) -> Result<DrawOutput, ShadeError> {
        if self.descriptor.geometry != GeometrySource::Resolved {
            return Err(ShadeError::ExpectsFragmentInputs);
        }
        // Validation guarantees the resolver is bound for this geometry.
        let resolver = self
            .descriptor
            .resolver
            .as_ref()
            .expect("resolved pipeline validated with a resolver");
        let shaded: Vec<Shaded> = screen_positions
            .par_iter()
            .map(|&screen_position| {
                let input = FragmentInput::new(resolver.resolve(screen_position), screen_position);
                self.invoke(&input, resources)
            })
            .collect();
        Ok(Self::route(shaded))
    }

    /// Split invocation results into the index-aligned output vector and
    /// the OIT accumulation, preserving submission order.
    fn route(shaded: Vec<Shaded>) -> DrawOutput {
        let mut fragments = Vec::with_capacity(shaded.len());
        let mut accumulator = OitAccumulator::new();
        for result in shaded {
            match result {
                Shaded::Output(output) => fragments.push(Some(output)),
                Shaded::Deferred(fragment) => {
                    accumulator.submit(fragment);
                    fragments.push(None);
                }
                Shaded::Discarded => fragments.push(None),
            }
        }
        DrawOutput {
            fragments,
            oit: accumulator.into_fragments(),
        }
    }

    /// The fixed stage path for one fragment.
    fn invoke(&self, input: &FragmentInput, resources: &DrawResources) -> Shaded {
        let d = &self.descriptor;

        // Forward-decal pre-remap
        let (input, fade_alpha) = if d.forward_decal {
            let projector = d
                .decal_projector
                .as_ref()
                .expect("forward-decal pipeline validated with a projector");
            let surface = projector.project(input);
            (forward_decal::remap(input, &surface), Some(surface.fade_alpha))
        } else {
            (*input, None)
        };

        // Visibility dither
        if d.dither
            && dither::apply(input.sample.dither_factor, input.screen_position)
                == StageControl::Discard
        {
            return Shaded::Discarded;
        }

        // Assembly, then the overlay on the assembled base color
        let mut state = assembler::assemble(
            &resources.material,
            resources.base_color_texture,
            &input.sample,
        );
        state.base_color = expression::apply_overlay(
            &d.overlay,
            resources.atlas,
            resources.atlas_sampler,
            &resources.selector,
            input.sample.uv,
            state.base_color,
        );

        // Alpha policy; overlay colors are subject to it like any other
        if alpha::apply(&mut state) == StageControl::Discard {
            return Shaded::Discarded;
        }

        // Clustered decals
        state.base_color = d.decals.composite(
            state.world_position,
            input.screen_position,
            state.base_color,
        );

        // Output
        match d.output_mode {
            OutputMode::Deferred => Shaded::Output(FragmentOutput::Deferred(PackedGBuffer::pack(
                &state,
            ))),
            OutputMode::Forward => {
                let lit = if state.unlit {
                    state.base_color
                } else {
                    d.lighting.light(&state)
                };
                let mut color = d.post_process.post_process(lit, state.world_position);
                if let Some(fade_alpha) = fade_alpha {
                    color = forward_decal::clamp_alpha(color, fade_alpha);
                }
                if d.oit && !state.alpha_mode.is_opaque() {
                    return Shaded::Deferred(OitFragment {
                        world_position: state.world_position,
                        screen_position: input.screen_position,
                        color,
                    });
                }
                Shaded::Output(FragmentOutput::Forward(color))
            }
        }
    }
}

#[cfg(test)]
mod tests;
