//! The expression overlay itself: region gate, tile addressing, and the
//! hard-alpha-threshold replace.
//!
//! Both functions are pure; all per-draw state (selector, atlas, config)
//! arrives as explicit parameters so the logic is unit-testable without a
//! rendering context. The overlay never discards an invocation.

use glam::{Vec2, Vec4};

use super::{ExpressionSelector, OverlayConfig};
use crate::texture::{Sampler, Texture};

/// Atlas UV the overlay would sample for a fragment UV, or `None` when the
/// fragment lies outside the active region.
///
/// Exposed separately from [`apply`] so the addressing math can be verified
/// without any texture bound: local remap of the region onto [0,1]², then
/// placement into the selected tile.
#[inline]
pub fn sample_uv(config: &OverlayConfig, uv: Vec2, mouth_index: u32) -> Option<Vec2> {
    if !config.region.contains(uv) {
        return None;
    }
    let local = config.region.to_local(uv);
    Some(local * config.grid.tile_size() + config.grid.tile_origin(mouth_index))
}

/// Run the overlay for one fragment.
///
/// Inside the region, the selected pose tile is sampled and its color
/// replaces `base_color` outright when the sampled alpha is strictly
/// greater than the configured threshold; at or below it the base color is
/// preserved. Outside the region the base color passes through and the
/// atlas is not touched.
///
/// A GPU port of this stage may need to hoist the sample out of the region
/// branch to satisfy uniform-control-flow rules and select the result
/// instead; the no-sample-outside-the-region behavior here is what the CPU
/// model guarantees.
#[inline]
pub fn apply(
    config: &OverlayConfig,
    atlas: &Texture,
    sampler: Sampler,
    selector: &ExpressionSelector,
    uv: Vec2,
    base_color: Vec4,
) -> Vec4 {
    let Some(atlas_uv) = sample_uv(config, uv, selector.mouth_index()) else {
        return base_color;
    };
    let mouth_color = atlas.sample(sampler, atlas_uv);
    if mouth_color.w > config.alpha_threshold {
        mouth_color
    } else {
        base_color
    }
}
