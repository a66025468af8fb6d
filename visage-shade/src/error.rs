//! Library error types
//!
//! Errors exist only at host-facing seams: texture construction, overlay
//! configuration, pipeline build, and draw submission. Invocations have no
//! error channel; anomalous per-fragment conditions degrade silently and
//! the only abnormal termination is an invocation discard.

use thiserror::Error;

use crate::expression::OverlayRegion;

/// Error constructing a CPU texture
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureError {
    #[error("texture extent {width}x{height} has a zero dimension")]
    ZeroDimension { width: u32, height: u32 },
    #[error("texel buffer length {actual} does not match extent ({expected} expected)")]
    TexelCountMismatch { expected: usize, actual: usize },
}

/// Error validating an overlay configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayConfigError {
    #[error("atlas grid {columns}x{rows} has no tiles")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("overlay region {0:?} is degenerate")]
    DegenerateRegion(OverlayRegion),
    #[error("overlay region {0:?} extends outside the [0,1] UV domain")]
    RegionOutOfDomain(OverlayRegion),
    #[error("alpha threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f32),
}

/// Error building a shading pipeline from a descriptor.
///
/// Every variant is a host-side configuration mistake caught once at
/// build time; a successfully built pipeline never re-checks these.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("order-independent transparency requires the forward output mode")]
    OitRequiresForward,
    #[error("forward-decal mode requires the forward output mode")]
    ForwardDecalRequiresForward,
    #[error("visibility dithering requires the forward output mode")]
    DitherRequiresForward,
    #[error("resolved geometry requires a bound surface resolver")]
    MissingSurfaceResolver,
    #[error("forward-decal mode requires a bound decal projector")]
    MissingDecalProjector,
    #[error("invalid overlay configuration: {0}")]
    InvalidOverlay(#[from] OverlayConfigError),
}

/// Error submitting a draw to a pipeline built for the other geometry kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShadeError {
    #[error("pipeline expects interpolated fragment inputs, not screen positions")]
    ExpectsFragmentInputs,
    #[error("pipeline expects resolved screen positions, not fragment inputs")]
    ExpectsScreenPositions,
}
