//! Error Types
//!
//! Every failure is detected while building a morphable entity, never during
//! a per-frame tick. Errors are terminal for the entity being built: no
//! partially constructed component or texture set is ever returned.
//!
//! Animation inputs are never rejected. Degenerate durations and keyframe
//! curves are resolved by clamping rules in `morpher_animation`.

use thiserror::Error;

/// The error type for building morph targets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphError {
    /// No base geometry was supplied.
    #[error("Missing base mesh")]
    MissingBaseMesh,

    /// The number of targets is outside `1..=max`.
    #[error("Invalid number of morph targets: {count} (expected 1..={max})")]
    InvalidTargetCount {
        /// Number of targets supplied
        count: usize,
        /// Configured maximum
        max: usize,
    },

    /// The packed texture would need more pixels than a maximum-size texture holds.
    #[error("Too much geometry: {elements} texture elements required (max {max})")]
    GeometryTooLarge {
        /// Required pixel count (`vertices * targets * 2`)
        elements: usize,
        /// Maximum addressable pixel count
        max: usize,
    },

    /// A target part does not have the same vertex count as the base part.
    #[error("Target not topologically identical for part '{part}': expected {expected} vertices, got {actual}")]
    TopologyMismatch {
        /// Part identifier being morphed
        part: String,
        /// Base vertex count
        expected: usize,
        /// Target vertex count
        actual: usize,
    },

    /// A target has no submodel or part matching the morphed base part.
    #[error("Target {target} has no part matching '{part}'")]
    MissingTargetPart {
        /// Part identifier being morphed
        part: String,
        /// Index of the offending target
        target: usize,
    },

    /// The number of packed samples does not equal `vertices * targets`.
    #[error("Sample count {actual} does not match {expected} (vertices x targets)")]
    SampleCountMismatch {
        /// `vertex_count * target_count`
        expected: usize,
        /// Number of samples supplied
        actual: usize,
    },

    /// A buffer's normal count differs from its position count.
    #[error("Normal count {normals} does not match position count {positions}")]
    NormalCountMismatch {
        /// Number of positions
        positions: usize,
        /// Number of normals
        normals: usize,
    },

    /// The packed buffer could not be realized as a texture object.
    #[error("Texture creation failed: {0}")]
    TextureCreationFailed(String),
}

/// Alias for `Result<T, MorphError>`.
pub type Result<T> = std::result::Result<T, MorphError>;
