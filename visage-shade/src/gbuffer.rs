//! Deferred output packing
//!
//! The deferred variant ends an invocation by packing the material state
//! into a fixed-layout G-buffer entry for the later lighting pass. Lane
//! formats: base color as RGBA8, scalar material properties as unorm8
//! lanes sharing a u32 with the flag bits, emissive as two f16x2 pairs,
//! world position as raw f32.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

use crate::material::MaterialState;
use crate::packing::{
    pack_f16x2, pack_rgba8, pack_u8x4, pack_unorm8, unpack_f16x2, unpack_rgba8, unpack_u8x4,
    unpack_unorm8,
};

const FLAG_UNLIT: u8 = 1 << 0;
const FLAG_DOUBLE_SIDED: u8 = 1 << 1;
const FLAG_FRONT_FACING: u8 = 1 << 2;

/// One packed G-buffer entry, 32 bytes, uploadable as-is.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct PackedGBuffer {
    /// Base color as 0xRRGGBBAA
    pub base_color: u32,
    /// Lanes: metallic, perceptual roughness, reflectance (unorm8), flags
    pub properties: u32,
    /// Emissive red/green as f16x2
    pub emissive_rg: u32,
    /// Emissive blue/alpha as f16x2
    pub emissive_ba: u32,
    pub world_position: [f32; 3],
    pub _reserved: u32,
}

impl PackedGBuffer {
    /// Pack a material state for deferred lighting.
    pub fn pack(state: &MaterialState) -> Self {
        let mut flags = 0u8;
        if state.unlit {
            flags |= FLAG_UNLIT;
        }
        if state.double_sided {
            flags |= FLAG_DOUBLE_SIDED;
        }
        if state.front_facing {
            flags |= FLAG_FRONT_FACING;
        }
        Self {
            base_color: pack_rgba8(state.base_color),
            properties: pack_u8x4(
                pack_unorm8(state.metallic),
                pack_unorm8(state.perceptual_roughness),
                pack_unorm8(state.reflectance),
                flags,
            ),
            emissive_rg: pack_f16x2(state.emissive.x, state.emissive.y),
            emissive_ba: pack_f16x2(state.emissive.z, state.emissive.w),
            world_position: state.world_position.to_array(),
            _reserved: 0,
        }
    }

    pub fn base_color(&self) -> Vec4 {
        unpack_rgba8(self.base_color)
    }

    pub fn metallic(&self) -> f32 {
        unpack_unorm8(unpack_u8x4(self.properties)[0])
    }

    pub fn perceptual_roughness(&self) -> f32 {
        unpack_unorm8(unpack_u8x4(self.properties)[1])
    }

    pub fn reflectance(&self) -> f32 {
        unpack_unorm8(unpack_u8x4(self.properties)[2])
    }

    pub fn emissive(&self) -> Vec4 {
        let (r, g) = unpack_f16x2(self.emissive_rg);
        let (b, a) = unpack_f16x2(self.emissive_ba);
        Vec4::new(r, g, b, a)
    }

    pub fn world_position(&self) -> Vec3 {
        Vec3::from_array(self.world_position)
    }

    pub fn unlit(&self) -> bool {
        unpack_u8x4(self.properties)[3] & FLAG_UNLIT != 0
    }

    pub fn double_sided(&self) -> bool {
        unpack_u8x4(self.properties)[3] & FLAG_DOUBLE_SIDED != 0
    }

    pub fn front_facing(&self) -> bool {
        unpack_u8x4(self.properties)[3] & FLAG_FRONT_FACING != 0
    }
}
