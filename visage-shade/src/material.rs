//! Material parameters and per-invocation material state
//!
//! Three layers, mirroring how a host feeds the stage:
//! - [`MaterialConfig`] - serializable material description loaded from
//!   TOML/JSON files, with host-side defaults applied on conversion
//! - [`MaterialParams`] - resolved per-draw constants, bound once per draw
//! - [`MaterialState`] - the mutable per-invocation aggregate threaded
//!   through the stage pipeline (exactly one per invocation)

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Fragment blend/discard policy for a material.
///
/// Only `Mask` can terminate an invocation; every other mode adjusts or
/// preserves the color and continues.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AlphaMode {
    /// Alpha is ignored and forced to 1.0
    #[default]
    Opaque,
    /// Discard below the cutoff, fully opaque at or above it
    Mask(f32),
    /// Standard alpha blending
    Blend,
    /// Premultiplied-alpha blending
    Premultiplied,
    /// Alpha controls multisample coverage; color passes through opaque
    AlphaToCoverage,
    /// Additive blending
    Add,
    /// Multiplicative blending
    Multiply,
}

impl AlphaMode {
    /// True only for `Opaque`. The transparency resolver defers every
    /// non-opaque mode, including `Mask` and `AlphaToCoverage`.
    #[inline]
    pub fn is_opaque(self) -> bool {
        matches!(self, AlphaMode::Opaque)
    }
}

/// Lower bound applied to perceptual roughness (keeps specular math stable)
pub const MIN_PERCEPTUAL_ROUGHNESS: f32 = 0.089;

/// A serializable material description, loaded from a file.
///
/// Every field is optional; [`MaterialConfig::into_params`] applies the
/// defaults. Texture fields hold asset names for the host to resolve and
/// bind; they are not part of the uniform data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    /// Base color RGBA (defaults to white)
    pub base_color: Option<[f32; 4]>,
    /// Name of the base color texture, resolved by the host
    pub base_color_texture: Option<String>,
    /// Metallic value, clamped to [0.0, 1.0] (defaults to 0.0)
    pub metallic: Option<f32>,
    /// Perceptual roughness, clamped to [0.089, 1.0] (defaults to 0.5)
    pub roughness: Option<f32>,
    /// Specular reflectance (defaults to 0.5)
    pub reflectance: Option<f32>,
    /// Emissive color RGBA (defaults to black)
    pub emissive_color: Option<[f32; 4]>,
    /// Skip lighting entirely for this material
    pub unlit: Option<bool>,
    /// Shade back faces as well as front faces
    pub double_sided: Option<bool>,
    /// Blend/discard policy (defaults to Opaque)
    pub blend_mode: Option<AlphaMode>,
    /// Name of the mouth pose atlas texture, resolved by the host
    pub mouth_atlas: Option<String>,
}

impl MaterialConfig {
    /// Resolve the config into runtime parameters, applying defaults and
    /// clamps for unspecified or out-of-range values.
    pub fn into_params(self) -> MaterialParams {
        MaterialParams {
            base_color: self
                .base_color
                .map(Vec4::from_array)
                .unwrap_or(Vec4::ONE),
            metallic: self.metallic.map(|v| v.clamp(0.0, 1.0)).unwrap_or(0.0),
            perceptual_roughness: self
                .roughness
                .map(|v| v.clamp(MIN_PERCEPTUAL_ROUGHNESS, 1.0))
                .unwrap_or(0.5),
            reflectance: self.reflectance.unwrap_or(0.5),
            emissive: self
                .emissive_color
                .map(Vec4::from_array)
                .unwrap_or(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            unlit: self.unlit.unwrap_or(false),
            double_sided: self.double_sided.unwrap_or(false),
            alpha_mode: self.blend_mode.unwrap_or_default(),
        }
    }
}

/// Resolved per-draw material constants, read-only for the draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub base_color: Vec4,
    pub metallic: f32,
    pub perceptual_roughness: f32,
    pub reflectance: f32,
    pub emissive: Vec4,
    pub unlit: bool,
    pub double_sided: bool,
    pub alpha_mode: AlphaMode,
}

impl Default for MaterialParams {
    fn default() -> Self {
        MaterialConfig::default().into_params()
    }
}

/// Mutable per-invocation material aggregate.
///
/// Created by the input assembler, mutated in place by the overlay, alpha
/// discard, decal, and lighting stages, consumed at the end of the
/// invocation. Exactly one exists per invocation; it is never shared
/// between fragments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialState {
    pub base_color: Vec4,
    pub emissive: Vec4,
    pub metallic: f32,
    pub perceptual_roughness: f32,
    pub reflectance: f32,
    pub world_position: Vec3,
    pub front_facing: bool,
    pub unlit: bool,
    pub double_sided: bool,
    pub alpha_mode: AlphaMode,
}
