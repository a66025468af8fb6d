//! Built-in placeholder pose atlas
//!
//! Generated procedurally so the tool runs with no assets on disk: four
//! mouth poses on a 4x1 grid, opaque lip shapes on a fully transparent
//! background. Pose order matches the hosts this stage was built for:
//! idle, open, and a two-frame cheer.

use glam::{Vec2, Vec4};
use visage_shade::texture::Texture;

const LIP: Vec4 = Vec4::new(0.55, 0.08, 0.12, 1.0);
const INNER: Vec4 = Vec4::new(0.25, 0.02, 0.05, 1.0);

/// Generate the placeholder atlas with square tiles of the given size.
pub fn generate_atlas(tile_size: u32) -> Texture {
    Texture::from_fn(4 * tile_size, tile_size, |x, y| {
        let tile = x / tile_size;
        // Tile-local coordinates centered on (0,0), range [-1, 1]
        let half = tile_size as f32 / 2.0;
        let p = Vec2::new(
            ((x % tile_size) as f32 + 0.5 - half) / half,
            (y as f32 + 0.5 - half) / half,
        );
        match tile {
            0 => idle(p),
            1 => open(p),
            2 => cheer_a(p),
            _ => cheer_b(p),
        }
    })
}

/// Closed mouth: a thin horizontal bar
fn idle(p: Vec2) -> Vec4 {
    if p.x.abs() < 0.55 && p.y.abs() < 0.08 {
        LIP
    } else {
        Vec4::ZERO
    }
}

/// Open mouth: a filled ellipse with a darker interior
fn open(p: Vec2) -> Vec4 {
    let d = Vec2::new(p.x / 0.45, p.y / 0.6).length();
    if d < 0.7 {
        INNER
    } else if d < 1.0 {
        LIP
    } else {
        Vec4::ZERO
    }
}

/// First cheer frame: an upward-curved arc
fn cheer_a(p: Vec2) -> Vec4 {
    let curve = p.y - (p.x * p.x * 0.8 - 0.25);
    if p.x.abs() < 0.6 && curve.abs() < 0.12 {
        LIP
    } else {
        Vec4::ZERO
    }
}

/// Second cheer frame: the arc opened into a grin
fn cheer_b(p: Vec2) -> Vec4 {
    let top = p.x * p.x * 0.8 - 0.25;
    if p.x.abs() < 0.6 && p.y > top - 0.12 && p.y < 0.45 {
        if p.y > top + 0.12 {
            INNER
        } else {
            LIP
        }
    } else {
        Vec4::ZERO
    }
}
