//! Material input assembly
//!
//! First stage of every invocation: turns the per-draw material constants
//! and one fragment sample into the mutable per-invocation material state
//! that the rest of the pipeline edits in place.

use crate::fragment::FragmentSample;
use crate::material::{MaterialParams, MaterialState};
use crate::texture::{Sampler, Texture};

/// Build the initial material state for a fragment.
///
/// Base color is the material constant modulated by the base-color
/// texture sample when one is bound (untextured draws use the constant
/// alone). Runs before the overlay; its output is the overlay's input.
pub fn assemble(
    params: &MaterialParams,
    base_color_texture: Option<(&Texture, Sampler)>,
    sample: &FragmentSample,
) -> MaterialState {
    let mut base_color = params.base_color;
    if let Some((texture, sampler)) = base_color_texture {
        base_color *= texture.sample(sampler, sample.uv);
    }
    MaterialState {
        base_color,
        emissive: params.emissive,
        metallic: params.metallic,
        perceptual_roughness: params.perceptual_roughness,
        reflectance: params.reflectance,
        world_position: sample.world_position,
        front_facing: sample.front_facing,
        unlit: params.unlit,
        double_sided: params.double_sided,
        alpha_mode: params.alpha_mode,
    }
}
