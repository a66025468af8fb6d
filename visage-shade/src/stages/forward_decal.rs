//! Forward-decal adaptation
//!
//! Pipelines that render a projected forward decal wrap the ordinary stage
//! path on both ends: before assembly the fragment's world position and UV
//! are overridden from decal-local geometry, and after lighting the final
//! alpha is clamped to the decal's own fade alpha.

use glam::{Vec2, Vec3, Vec4};

use crate::fragment::FragmentInput;

/// Decal-local geometry for one fragment of a projected forward decal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalSurface {
    pub world_position: Vec3,
    pub uv: Vec2,
    /// Projection fade, an upper bound on the fragment's final alpha
    pub fade_alpha: f32,
}

/// External contract mapping a fragment onto the decal's local geometry.
pub trait DecalProjector: Send + Sync {
    fn project(&self, input: &FragmentInput) -> DecalSurface;
}

/// Pre-assembly remap: substitute decal-local geometry into the sample.
pub fn remap(input: &FragmentInput, surface: &DecalSurface) -> FragmentInput {
    let mut remapped = *input;
    remapped.sample.world_position = surface.world_position;
    remapped.sample.uv = surface.uv;
    remapped
}

/// Post-lighting clamp: final alpha never exceeds the decal's fade alpha.
#[inline]
pub fn clamp_alpha(color: Vec4, fade_alpha: f32) -> Vec4 {
    Vec4::new(color.x, color.y, color.z, color.w.min(fade_alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::FragmentSample;

    #[test]
    fn test_remap_overrides_position_and_uv_only() {
        let input = FragmentInput::new(
            FragmentSample::new(Vec3::ONE, Vec2::new(0.5, 0.5)).with_dither_factor(0.7),
            Vec2::new(10.0, 20.0),
        );
        let surface = DecalSurface {
            world_position: Vec3::new(4.0, 5.0, 6.0),
            uv: Vec2::new(0.1, 0.9),
            fade_alpha: 0.5,
        };
        let remapped = remap(&input, &surface);
        assert_eq!(remapped.sample.world_position, surface.world_position);
        assert_eq!(remapped.sample.uv, surface.uv);
        assert_eq!(remapped.sample.dither_factor, Some(0.7));
        assert_eq!(remapped.screen_position, input.screen_position);
    }

    #[test]
    fn test_clamp_takes_the_smaller_alpha() {
        let color = Vec4::new(0.5, 0.5, 0.5, 0.8);
        assert_eq!(clamp_alpha(color, 0.3).w, 0.3);
        assert_eq!(clamp_alpha(color, 1.0).w, 0.8);
        assert_eq!(clamp_alpha(color, 0.3).truncate(), color.truncate());
    }
}
