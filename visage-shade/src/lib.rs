//! Visage - avatar material shading stage with a facial-expression overlay
//!
//! A CPU-executable model of a per-fragment PBR material stage whose one
//! non-trivial feature is the expression overlay: within a fixed region of
//! surface UV space, a pose tile selected by a per-draw integer index is
//! sampled from an atlas and hard-replaces the material's base color
//! wherever the sampled alpha clears a threshold.
//!
//! The surrounding stages (input assembly, alpha discard, decal
//! compositing, lighting/output, OIT deferral, forward-decal adaptation)
//! are external collaborators with fixed contracts; this crate ships
//! reference implementations of those contracts so pipelines are
//! executable and testable, but their internals are not the point.
//!
//! # Shape
//!
//! - [`expression`] - the overlay core: atlas grid, region, selector,
//!   and the overlay function itself
//! - [`stages`] - the fixed stage path around the overlay
//! - [`pipeline`] - variant selection (deferred/forward, interpolated/
//!   resolved geometry, OIT, forward-decal, dither), validated once at
//!   build, plus the rayon batch executor
//! - [`texture`], [`material`], [`gbuffer`], [`packing`] - the data model
//!
//! # Example
//!
//! ```
//! use glam::{Vec2, Vec4};
//! use visage_shade::expression::ExpressionSelector;
//! use visage_shade::fragment::{FragmentInput, FragmentSample};
//! use visage_shade::pipeline::{DrawResources, PipelineDescriptor, ShadingPipeline};
//! use visage_shade::texture::Texture;
//!
//! let pipeline = ShadingPipeline::new(PipelineDescriptor::forward())?;
//! let atlas = Texture::solid(Vec4::new(0.9, 0.1, 0.2, 1.0));
//! let resources = DrawResources::new(&atlas).with_selector(ExpressionSelector::new(2));
//!
//! let uv = Vec2::new(0.1, 0.9); // inside the mouth region
//! let inputs = [FragmentInput::new(
//!     FragmentSample::new(uv.extend(0.0), uv),
//!     Vec2::new(10.0, 90.0),
//! )];
//! let output = pipeline.shade(&inputs, &resources)?;
//! assert!(output.fragments[0].is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod expression;
pub mod fragment;
pub mod gbuffer;
pub mod material;
pub mod packing;
pub mod pipeline;
pub mod stages;
pub mod texture;

pub use error::{OverlayConfigError, PipelineError, ShadeError, TextureError};
pub use expression::{
    apply_overlay, overlay_sample_uv, AtlasGrid, ExpressionSelector, OverlayConfig, OverlayRegion,
    PoseTable,
};
pub use fragment::{FragmentInput, FragmentOutput, FragmentSample};
pub use gbuffer::PackedGBuffer;
pub use material::{AlphaMode, MaterialConfig, MaterialParams, MaterialState};
pub use pipeline::{
    DrawOutput, DrawResources, GeometrySource, OutputMode, PipelineDescriptor, ShadingPipeline,
};
pub use stages::oit::OitFragment;
pub use texture::{AddressMode, Sampler, Texture, TextureFilter};
