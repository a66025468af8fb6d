//! Pose atlas geometry and overlay configuration
//!
//! The atlas is a single texture holding pose tiles on a fixed grid. The
//! overlay is active only inside a sub-region of surface UV space. Both
//! were hard-coded in the shader this stage descends from; here they are
//! explicit configuration, validated once when a pipeline is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::OverlayConfigError;

/// Tile grid layout of a pose atlas.
///
/// `tile_size` is derived as `(1/columns, 1/rows)` in normalized atlas UV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasGrid {
    pub columns: u32,
    pub rows: u32,
}

impl AtlasGrid {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Normalized size of one tile
    #[inline]
    pub fn tile_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.columns as f32, 1.0 / self.rows as f32)
    }

    /// Total number of addressable tiles
    #[inline]
    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Grid coordinates for a pose index.
    ///
    /// Indices at or beyond capacity wrap: `x = index % columns`,
    /// `y = (index / columns) % rows`. For the default 4x1 grid, index 4
    /// aliases tile 0. The wrap is deliberate current behavior; nothing
    /// range-checks the index.
    #[inline]
    pub fn tile_coords(&self, index: u32) -> (u32, u32) {
        let x = index % self.columns;
        let y = (index / self.columns) % self.rows;
        (x, y)
    }

    /// Normalized atlas UV of a tile's top-left corner
    #[inline]
    pub fn tile_origin(&self, index: u32) -> Vec2 {
        let (x, y) = self.tile_coords(index);
        Vec2::new(x as f32, y as f32) * self.tile_size()
    }
}

impl Default for AtlasGrid {
    /// Four poses in a single row
    fn default() -> Self {
        Self::new(4, 1)
    }
}

/// The surface-UV rectangle in which the overlay is active.
///
/// Containment is closed on all four edges. The default region reproduces
/// the mouth placement this stage was built around: `u <= 0.25` and
/// `v >= 0.75` on the [0,1] UV domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayRegion {
    pub min_u: f32,
    pub min_v: f32,
    pub max_u: f32,
    pub max_v: f32,
}

impl OverlayRegion {
    pub const fn new(min_u: f32, min_v: f32, max_u: f32, max_v: f32) -> Self {
        Self {
            min_u,
            min_v,
            max_u,
            max_v,
        }
    }

    /// True when the UV point lies inside the region (edges included)
    #[inline]
    pub fn contains(&self, uv: Vec2) -> bool {
        uv.x >= self.min_u && uv.x <= self.max_u && uv.y >= self.min_v && uv.y <= self.max_v
    }

    /// Region extent along each axis
    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.max_u - self.min_u, self.max_v - self.min_v)
    }

    /// Remap a contained UV point onto normalized [0,1] tile-local space
    #[inline]
    pub fn to_local(&self, uv: Vec2) -> Vec2 {
        (uv - Vec2::new(self.min_u, self.min_v)) / self.extent()
    }
}

impl Default for OverlayRegion {
    fn default() -> Self {
        Self::new(0.0, 0.75, 0.25, 1.0)
    }
}

/// Complete overlay configuration: active region, atlas layout, and the
/// alpha threshold of the hard-replace blend rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub region: OverlayRegion,
    pub grid: AtlasGrid,
    /// Sampled alpha must be strictly greater than this to replace the
    /// base color
    pub alpha_threshold: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            region: OverlayRegion::default(),
            grid: AtlasGrid::default(),
            alpha_threshold: 0.5,
        }
    }
}

impl OverlayConfig {
    /// Check the configuration for use in a pipeline.
    ///
    /// # Errors
    ///
    /// Rejects an empty grid, a region that is degenerate or extends
    /// outside the [0,1] UV domain, and a threshold outside [0,1].
    pub fn validate(&self) -> Result<(), OverlayConfigError> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(OverlayConfigError::EmptyGrid {
                columns: self.grid.columns,
                rows: self.grid.rows,
            });
        }
        let r = &self.region;
        if !(r.min_u < r.max_u && r.min_v < r.max_v) {
            return Err(OverlayConfigError::DegenerateRegion(*r));
        }
        if r.min_u < 0.0 || r.min_v < 0.0 || r.max_u > 1.0 || r.max_v > 1.0 {
            return Err(OverlayConfigError::RegionOutOfDomain(*r));
        }
        if !(0.0..=1.0).contains(&self.alpha_threshold) {
            return Err(OverlayConfigError::ThresholdOutOfRange(
                self.alpha_threshold,
            ));
        }
        Ok(())
    }
}
