//! Order-independent transparency deferral
//!
//! OIT-enabled forward pipelines do not write non-opaque fragments
//! directly; the invocation ends by producing an [`OitFragment`] for a
//! per-draw accumulation buffer. Final compositing happens in a separate
//! resolve pass, out of scope here.

use glam::{Vec2, Vec3, Vec4};

/// One fragment deferred to the OIT accumulation buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OitFragment {
    pub world_position: Vec3,
    pub screen_position: Vec2,
    pub color: Vec4,
}

/// Per-draw OIT accumulation buffer.
///
/// Invocations stay pure; the executor collects their deferred fragments
/// into this buffer after the parallel phase.
#[derive(Debug, Default)]
pub struct OitAccumulator {
    fragments: Vec<OitFragment>,
}

impl OitAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, fragment: OitFragment) {
        self.fragments.push(fragment);
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Hand the accumulated fragments to the resolve pass.
    pub fn into_fragments(self) -> Vec<OitFragment> {
        self.fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulator_keeps_submission_order() {
        let mut acc = OitAccumulator::new();
        for i in 0..3 {
            acc.submit(OitFragment {
                world_position: Vec3::splat(i as f32),
                screen_position: Vec2::ZERO,
                color: Vec4::ONE,
            });
        }
        assert_eq!(acc.len(), 3);
        let fragments = acc.into_fragments();
        assert_eq!(fragments[2].world_position, Vec3::splat(2.0));
    }
}
