//! Per-invocation input and output types
//!
//! One [`FragmentInput`] enters the pipeline per covered surface sample;
//! at most one [`FragmentOutput`] leaves. Inputs are immutable once built.

use glam::{Vec2, Vec3, Vec4};

use crate::gbuffer::PackedGBuffer;

/// Interpolated surface data for one fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentSample {
    pub world_position: Vec3,
    /// Surface UV on the full [0,1]² domain
    pub uv: Vec2,
    pub front_facing: bool,
    /// Visibility-range dither factor in [0,1]; `None` when the mesh has
    /// no visibility range
    pub dither_factor: Option<f32>,
}

impl FragmentSample {
    pub fn new(world_position: Vec3, uv: Vec2) -> Self {
        Self {
            world_position,
            uv,
            front_facing: true,
            dither_factor: None,
        }
    }

    pub fn with_front_facing(mut self, front_facing: bool) -> Self {
        self.front_facing = front_facing;
        self
    }

    pub fn with_dither_factor(mut self, factor: f32) -> Self {
        self.dither_factor = Some(factor);
        self
    }
}

/// A fragment sample plus its screen position in pixel coordinates.
///
/// The screen position feeds the decal compositor and the visibility
/// dither mask; it is not part of the interpolated surface data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInput {
    pub sample: FragmentSample,
    pub screen_position: Vec2,
}

impl FragmentInput {
    pub fn new(sample: FragmentSample, screen_position: Vec2) -> Self {
        Self {
            sample,
            screen_position,
        }
    }
}

/// Final product of one invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FragmentOutput {
    /// Lit (or unlit-passthrough) color from the forward path
    Forward(Vec4),
    /// Packed attributes for the deferred lighting pass
    Deferred(PackedGBuffer),
}

impl FragmentOutput {
    /// Forward color, if this output came from the forward path
    pub fn forward_color(&self) -> Option<Vec4> {
        match self {
            FragmentOutput::Forward(color) => Some(*color),
            FragmentOutput::Deferred(_) => None,
        }
    }
}
