//! Per-draw expression selector uniform and named-pose lookup
//!
//! The selector is the one piece of per-draw state the overlay reads: a
//! 16-byte unsigned integer vector uploaded once per draw call, constant
//! across every fragment of that draw. Only lane 0 carries meaning.

use bytemuck::{Pod, Zeroable};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Per-draw overlay selector, laid out for direct uniform upload.
///
/// Lane 0 is the mouth pose index; lanes 1-3 are reserved padding and
/// ignored by the overlay. The index is never range-checked against atlas
/// capacity; out-of-range values wrap into existing tiles.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct ExpressionSelector {
    pub index: [u32; 4],
}

impl ExpressionSelector {
    /// Selector for a pose index, reserved lanes zeroed
    pub const fn new(mouth_index: u32) -> Self {
        Self {
            index: [mouth_index, 0, 0, 0],
        }
    }

    /// The semantically meaningful lane
    #[inline]
    pub fn mouth_index(&self) -> u32 {
        self.index[0]
    }
}

/// Name-to-index table for addressing poses symbolically.
///
/// The selector itself is an unvalidated integer; hosts that want a
/// validated selection path map names through this table instead. Loadable
/// from TOML as a plain `name = index` map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoseTable {
    poses: HashMap<String, u32>,
}

impl PoseTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, index: u32) {
        self.poses.insert(name.into(), index);
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.poses.get(name).copied()
    }

    /// Build a selector for a named pose
    pub fn selector(&self, name: &str) -> Option<ExpressionSelector> {
        self.get(name).map(ExpressionSelector::new)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Pose names in the table, in arbitrary order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.poses.keys().map(String::as_str)
    }
}

impl FromIterator<(String, u32)> for PoseTable {
    fn from_iter<T: IntoIterator<Item = (String, u32)>>(iter: T) -> Self {
        Self {
            poses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_layout_is_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<ExpressionSelector>(), 16);
        let selector = ExpressionSelector::new(3);
        let bytes: &[u8] = bytemuck::bytes_of(&selector);
        assert_eq!(bytes[0], 3);
        assert!(bytes[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reserved_lanes_stay_zero() {
        let selector = ExpressionSelector::new(7);
        assert_eq!(selector.mouth_index(), 7);
        assert_eq!(selector.index[1..], [0, 0, 0]);
    }

    #[test]
    fn test_default_selects_pose_zero() {
        assert_eq!(ExpressionSelector::default().mouth_index(), 0);
    }

    #[test]
    fn test_pose_table_lookup() {
        let mut table = PoseTable::new();
        table.insert("idle", 0);
        table.insert("cheer", 2);
        assert_eq!(table.get("cheer"), Some(2));
        assert_eq!(table.get("missing"), None);
        assert_eq!(table.selector("idle"), Some(ExpressionSelector::new(0)));
        assert!(table.selector("missing").is_none());
    }

    #[test]
    fn test_pose_table_parses_from_toml() {
        let table: PoseTable = toml::from_str(
            r#"
            idle = 0
            open = 1
            cheer-a = 2
            cheer-b = 3
            "#,
        )
        .unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("cheer-b"), Some(3));
    }
}
