//! Alpha-mode policy application
//!
//! Runs immediately after the overlay, so overlay-selected colors remain
//! subject to the material's discard policy like any other base color.

use super::StageControl;
use crate::material::{AlphaMode, MaterialState};

/// Apply the material's alpha mode to the current base color.
///
/// Opaque and alpha-to-coverage force alpha to 1.0 (coverage resolution
/// happens downstream of this stage). Mask discards below its cutoff and
/// is fully opaque at or above it. The blending modes leave the color
/// untouched; actual blending happens at output merge, outside this
/// stage's scope.
pub fn apply(state: &mut MaterialState) -> StageControl {
    match state.alpha_mode {
        AlphaMode::Opaque | AlphaMode::AlphaToCoverage => {
            state.base_color.w = 1.0;
            StageControl::Continue
        }
        AlphaMode::Mask(cutoff) => {
            if state.base_color.w < cutoff {
                StageControl::Discard
            } else {
                state.base_color.w = 1.0;
                StageControl::Continue
            }
        }
        AlphaMode::Blend | AlphaMode::Premultiplied | AlphaMode::Add | AlphaMode::Multiply => {
            StageControl::Continue
        }
    }
}
