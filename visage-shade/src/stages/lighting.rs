//! Forward lighting and post-processing contracts
//!
//! The forward output variant lights the material state through the
//! [`Lighting`] seam unless the material is flagged unlit, then runs the
//! result through [`PostProcess`] (the fog/premultiply/tone-map slot).
//! Lighting internals are out of scope; the shipped implementations exist
//! so forward pipelines are executable and testable, not as a rendering
//! reference.

use glam::{Vec3, Vec4};

use crate::material::MaterialState;

/// External lighting contract for the forward path.
pub trait Lighting: Send + Sync {
    /// Compute the lit color for a material state. Not called for unlit
    /// materials; alpha must pass through unchanged.
    fn light(&self, state: &MaterialState) -> Vec4;
}

/// Single directional light with a Lambert term against an assumed
/// up-facing surface, plus a flat ambient term. Back faces of double-sided
/// materials flip the assumed normal.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLambert {
    /// Direction the light travels, normalized
    pub direction: Vec3,
    pub color: Vec3,
    pub ambient: Vec3,
}

impl Default for DirectionalLambert {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.3, -0.8, 0.5).normalize(),
            color: Vec3::ONE,
            ambient: Vec3::splat(0.1),
        }
    }
}

impl Lighting for DirectionalLambert {
    fn light(&self, state: &MaterialState) -> Vec4 {
        let mut normal = Vec3::Y;
        if state.double_sided && !state.front_facing {
            normal = -normal;
        }
        let n_dot_l = normal.dot(-self.direction).max(0.0);
        let diffuse = self.ambient + self.color * n_dot_l;
        let lit = state.base_color.truncate() * diffuse + state.emissive.truncate();
        lit.extend(state.base_color.w)
    }
}

/// External post-lighting contract (fog, premultiplication, tone mapping).
pub trait PostProcess: Send + Sync {
    fn post_process(&self, color: Vec4, world_position: Vec3) -> Vec4;
}

/// Pass the lit color through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPostProcess;

impl PostProcess for NoPostProcess {
    #[inline]
    fn post_process(&self, color: Vec4, _world_position: Vec3) -> Vec4 {
        color
    }
}

/// Exponential distance fog from a view origin. Alpha is unaffected.
#[derive(Debug, Clone, Copy)]
pub struct DistanceFog {
    pub origin: Vec3,
    pub color: Vec3,
    pub density: f32,
}

impl PostProcess for DistanceFog {
    fn post_process(&self, color: Vec4, world_position: Vec3) -> Vec4 {
        let distance = world_position.distance(self.origin);
        let remain = (-self.density * distance).exp();
        let fogged = color.truncate() * remain + self.color * (1.0 - remain);
        fogged.extend(color.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::AlphaMode;

    fn state(base_color: Vec4) -> MaterialState {
        MaterialState {
            base_color,
            emissive: Vec4::ZERO,
            metallic: 0.0,
            perceptual_roughness: 0.5,
            reflectance: 0.5,
            world_position: Vec3::ZERO,
            front_facing: true,
            unlit: false,
            double_sided: false,
            alpha_mode: AlphaMode::Blend,
        }
    }

    #[test]
    fn test_lambert_preserves_alpha() {
        let lit = DirectionalLambert::default().light(&state(Vec4::new(1.0, 1.0, 1.0, 0.25)));
        assert_eq!(lit.w, 0.25);
    }

    #[test]
    fn test_light_from_below_leaves_only_ambient() {
        let light = DirectionalLambert {
            direction: Vec3::Y, // traveling straight up, away from the assumed normal
            color: Vec3::ONE,
            ambient: Vec3::splat(0.1),
        };
        let lit = light.light(&state(Vec4::ONE));
        assert!((lit.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_double_sided_back_face_flips_normal() {
        let light = DirectionalLambert {
            direction: Vec3::Y,
            color: Vec3::ONE,
            ambient: Vec3::ZERO,
        };
        let mut s = state(Vec4::ONE);
        s.double_sided = true;
        s.front_facing = false;
        let lit = light.light(&s);
        // Flipped normal now faces the light head-on
        assert!((lit.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_emissive_adds_after_lighting() {
        let light = DirectionalLambert {
            direction: Vec3::Y,
            color: Vec3::ONE,
            ambient: Vec3::ZERO,
        };
        let mut s = state(Vec4::new(1.0, 1.0, 1.0, 1.0));
        s.emissive = Vec4::new(0.5, 0.0, 0.0, 1.0);
        let lit = light.light(&s);
        assert!((lit.x - 0.5).abs() < 1e-6);
        assert_eq!(lit.y, 0.0);
    }

    #[test]
    fn test_fog_fades_with_distance() {
        let fog = DistanceFog {
            origin: Vec3::ZERO,
            color: Vec3::ONE,
            density: 0.5,
        };
        let near = fog.post_process(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec3::new(0.1, 0.0, 0.0));
        let far = fog.post_process(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec3::new(50.0, 0.0, 0.0));
        assert!(far.x > near.x);
        assert!(far.x > 0.99);
        assert_eq!(far.w, 1.0);
    }
}
