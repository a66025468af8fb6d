//! CPU texture and sampler model
//!
//! Holds texel data as linear-space RGBA f32 and samples it with the same
//! filter/address conventions a GPU sampler would apply. Textures are
//! read-only for the lifetime of a draw; sampling never mutates.

use glam::{Vec2, Vec4};

use crate::error::TextureError;
use crate::packing::unpack_unorm8;

/// Texture filter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum TextureFilter {
    /// Nearest neighbor (pixelated)
    #[default]
    Nearest = 0,
    /// Bilinear interpolation (smooth)
    Linear = 1,
}

impl TextureFilter {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => TextureFilter::Nearest,
            1 => TextureFilter::Linear,
            _ => TextureFilter::Nearest,
        }
    }
}

/// Texture coordinate addressing outside [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum AddressMode {
    /// Clamp to the edge texel
    #[default]
    ClampToEdge = 0,
    /// Tile the texture
    Repeat = 1,
}

impl AddressMode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => AddressMode::ClampToEdge,
            1 => AddressMode::Repeat,
            _ => AddressMode::ClampToEdge,
        }
    }

    /// Map a texel index onto [0, size) according to the address mode
    #[inline]
    fn resolve(self, index: i64, size: u32) -> u32 {
        let size = size as i64;
        let resolved = match self {
            AddressMode::ClampToEdge => index.clamp(0, size - 1),
            AddressMode::Repeat => index.rem_euclid(size),
        };
        resolved as u32
    }
}

/// Sampler state bound alongside a texture for the duration of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sampler {
    pub filter: TextureFilter,
    pub address_mode: AddressMode,
}

impl Sampler {
    /// Nearest-neighbor sampler clamping at edges (default for pose atlases)
    pub const fn nearest() -> Self {
        Self {
            filter: TextureFilter::Nearest,
            address_mode: AddressMode::ClampToEdge,
        }
    }

    /// Bilinear sampler clamping at edges
    pub const fn linear() -> Self {
        Self {
            filter: TextureFilter::Linear,
            address_mode: AddressMode::ClampToEdge,
        }
    }
}

/// A CPU-resident 2D texture with RGBA f32 texels in linear space.
///
/// Texels are stored row-major, origin at the top-left, matching the byte
/// order of an RGBA8 image upload.
#[derive(Debug, Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    texels: Vec<Vec4>,
}

impl Texture {
    /// Create a texture from pre-converted RGBA f32 texels (row-major).
    ///
    /// # Errors
    ///
    /// Returns `TextureError::ZeroDimension` for an empty extent and
    /// `TextureError::TexelCountMismatch` when the buffer length does not
    /// equal `width * height`.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Vec4>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if texels.len() != expected {
            return Err(TextureError::TexelCountMismatch {
                expected,
                actual: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Create a texture from raw RGBA8 bytes (4 bytes per texel, row-major).
    pub fn from_rgba8(width: u32, height: u32, data: &[u8]) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::ZeroDimension { width, height });
        }
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(TextureError::TexelCountMismatch {
                expected,
                actual: data.len(),
            });
        }
        let texels = data
            .chunks_exact(4)
            .map(|px| {
                Vec4::new(
                    unpack_unorm8(px[0]),
                    unpack_unorm8(px[1]),
                    unpack_unorm8(px[2]),
                    unpack_unorm8(px[3]),
                )
            })
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Generate a texture by evaluating `f` at every texel coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Vec4) -> Self {
        debug_assert!(width > 0 && height > 0);
        let mut texels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            texels,
        }
    }

    /// 1x1 texture of a single color (untextured-draw stand-in)
    pub fn solid(color: Vec4) -> Self {
        Self {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fetch a texel by integer coordinates, applying the address mode.
    #[inline]
    fn fetch(&self, x: i64, y: i64, address_mode: AddressMode) -> Vec4 {
        let x = address_mode.resolve(x, self.width);
        let y = address_mode.resolve(y, self.height);
        self.texels[(y * self.width + x) as usize]
    }

    /// Sample the texture at normalized UV coordinates.
    ///
    /// Nearest filtering fetches the texel containing the UV point. Linear
    /// filtering interpolates the four texels around the texel-center grid,
    /// matching GPU bilinear conventions (sample points at texel centers).
    pub fn sample(&self, sampler: Sampler, uv: Vec2) -> Vec4 {
        match sampler.filter {
            TextureFilter::Nearest => {
                let x = (uv.x * self.width as f32).floor() as i64;
                let y = (uv.y * self.height as f32).floor() as i64;
                self.fetch(x, y, sampler.address_mode)
            }
            TextureFilter::Linear => {
                let x = uv.x * self.width as f32 - 0.5;
                let y = uv.y * self.height as f32 - 0.5;
                let x0 = x.floor();
                let y0 = y.floor();
                let fx = x - x0;
                let fy = y - y0;
                let x0 = x0 as i64;
                let y0 = y0 as i64;

                let t00 = self.fetch(x0, y0, sampler.address_mode);
                let t10 = self.fetch(x0 + 1, y0, sampler.address_mode);
                let t01 = self.fetch(x0, y0 + 1, sampler.address_mode);
                let t11 = self.fetch(x0 + 1, y0 + 1, sampler.address_mode);

                let top = t00.lerp(t10, fx);
                let bottom = t01.lerp(t11, fx);
                top.lerp(bottom, fy)
            }
        }
    }
}
