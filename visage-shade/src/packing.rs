//! Color and material-lane packing utilities
//!
//! Provides functions to convert f32 shading data to the packed formats used
//! by the deferred output target and the selector uniform:
//! - f32 [0.0, 1.0] -> unorm8
//! - f32 -> f16 (IEEE 754 half-float), pairs packed into u32 lanes
//! - RGBA f32 -> u32 RGBA8
//!
//! Used by the G-buffer packer and by tools that inspect packed output.

use glam::Vec4;
use half::f16;

// ============================================================================
// Basic Conversion Functions
// ============================================================================

/// Pack an f32 value [0.0, 1.0] to u8 [0, 255]
#[inline]
pub fn pack_unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Unpack u8 [0, 255] to f32 [0.0, 1.0]
#[inline]
pub fn unpack_unorm8(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Pack f32 to IEEE 754 half-precision float (f16) stored as u16
#[inline]
pub fn pack_f16(value: f32) -> u16 {
    f16::from_f32(value).to_bits()
}

/// Unpack IEEE 754 half-precision float (f16) from u16 to f32
#[inline]
pub fn unpack_f16(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

/// Pack two f32 values into a u32 as f16x2
#[inline]
pub fn pack_f16x2(x: f32, y: f32) -> u32 {
    let x_bits = pack_f16(x) as u32;
    let y_bits = pack_f16(y) as u32;
    x_bits | (y_bits << 16)
}

/// Unpack u32 to two f32 values from f16x2
#[inline]
pub fn unpack_f16x2(packed: u32) -> (f32, f32) {
    let x = unpack_f16((packed & 0xFFFF) as u16);
    let y = unpack_f16((packed >> 16) as u16);
    (x, y)
}

// ============================================================================
// RGBA8 Packing
// ============================================================================

/// Pack RGBA f32 [0.0, 1.0] to u32 RGBA8
/// Format: 0xRRGGBBAA (R in highest byte, A in lowest)
#[inline]
pub fn pack_rgba8(color: Vec4) -> u32 {
    let r = pack_unorm8(color.x);
    let g = pack_unorm8(color.y);
    let b = pack_unorm8(color.z);
    let a = pack_unorm8(color.w);
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32)
}

/// Unpack u32 RGBA8 to RGBA f32 [0.0, 1.0]
#[inline]
pub fn unpack_rgba8(packed: u32) -> Vec4 {
    Vec4::new(
        unpack_unorm8(((packed >> 24) & 0xFF) as u8),
        unpack_unorm8(((packed >> 16) & 0xFF) as u8),
        unpack_unorm8(((packed >> 8) & 0xFF) as u8),
        unpack_unorm8((packed & 0xFF) as u8),
    )
}

/// Pack 4 u8 lanes into a u32
/// Layout: [byte0, byte1, byte2, byte3] where byte0 is in low bits
#[inline]
pub fn pack_u8x4(b0: u8, b1: u8, b2: u8, b3: u8) -> u32 {
    (b0 as u32) | ((b1 as u32) << 8) | ((b2 as u32) << 16) | ((b3 as u32) << 24)
}

/// Unpack a u32 into 4 u8 lanes (byte0 from low bits)
#[inline]
pub fn unpack_u8x4(packed: u32) -> [u8; 4] {
    [
        (packed & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 24) & 0xFF) as u8,
    ]
}
