//! The fixed stage path surrounding the overlay.
//!
//! Every stage is either a plain function over the material state or an
//! object-safe trait bound once when the pipeline is built. Stages that
//! may terminate an invocation return [`StageControl`]; termination means
//! no further stage runs and no output is written for that fragment.

pub mod alpha;
pub mod assembler;
pub mod decal;
pub mod dither;
pub mod forward_decal;
pub mod lighting;
pub mod oit;

/// Whether an invocation continues past a stage.
///
/// `Discard` is the only abnormal-termination primitive in the execution
/// model; only alpha discard, visibility dither, and the transparency
/// resolver ever produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageControl {
    Continue,
    Discard,
}
