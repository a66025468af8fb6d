//! Facial-expression overlay: the core of this stage.
//!
//! A draw binds a pose atlas (tiles on a fixed grid) and a selector
//! uniform naming one tile. Within a configured sub-region of surface UV
//! space, the selected tile is sampled and hard-replaces the material's
//! base color wherever the sampled alpha clears a threshold. Everything
//! here is pure and parameter-driven; the surrounding pipeline stages
//! treat [`overlay::apply`] as just another step over the material state.

mod atlas;
mod overlay;
mod selector;

pub use atlas::{AtlasGrid, OverlayConfig, OverlayRegion};
pub use overlay::{apply as apply_overlay, sample_uv as overlay_sample_uv};
pub use selector::{ExpressionSelector, PoseTable};
