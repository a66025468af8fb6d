//! Visibility-range dithering
//!
//! Forward pipelines may fade geometry out over a visibility range by
//! discarding a screen-position-dependent subset of fragments instead of
//! blending. The mask is a 4x4 ordered-dither (Bayer) pattern; the stage
//! contract is just factor + screen position -> keep or discard.

use glam::Vec2;

use super::StageControl;

/// 4x4 Bayer matrix, values 0..16, row-major.
const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Threshold test of a dither factor against the screen-position cell.
///
/// Factor 1.0 keeps every fragment, 0.0 discards every fragment, and the
/// kept fraction grows monotonically in between. A sample with no dither
/// factor is always kept.
pub fn apply(dither_factor: Option<f32>, screen_position: Vec2) -> StageControl {
    let Some(factor) = dither_factor else {
        return StageControl::Continue;
    };
    let x = (screen_position.x.floor() as i64).rem_euclid(4) as usize;
    let y = (screen_position.y.floor() as i64).rem_euclid(4) as usize;
    let threshold = (BAYER_4X4[y][x] as f32 + 0.5) / 16.0;
    if factor > threshold {
        StageControl::Continue
    } else {
        StageControl::Discard
    }
}
