//! Clustered-decal compositing contract
//!
//! Decal clustering itself is out of scope; the pipeline only needs the
//! seam. A compositor is bound once at pipeline build and queried per
//! fragment after alpha discard, so overlay-selected colors can still be
//! decaled.

use glam::{Vec2, Vec3, Vec4};

/// External decal compositing contract.
pub trait DecalCompositor: Send + Sync {
    /// Blend any decals covering this position into `color`.
    fn composite(&self, world_position: Vec3, screen_position: Vec2, color: Vec4) -> Vec4;
}

/// No decals bound; color passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecals;

impl DecalCompositor for NoDecals {
    #[inline]
    fn composite(&self, _world_position: Vec3, _screen_position: Vec2, color: Vec4) -> Vec4 {
        color
    }
}
