//! Core types shared by every morpher crate.
//!
//! - [`MorphWeights`]: the 4-component blend factor vector
//! - [`MorphError`] and [`Result`]: the construction-time error taxonomy
//! - [`MorphSettings`] and [`MorphOptions`]: configuration
//! - [`PartId`]: case-insensitive morphable part identifier
//! - [`limits`]: hard texture and target limits

pub mod errors;
pub mod limits;
pub mod part_id;
pub mod settings;
pub mod weights;

pub use errors::{MorphError, Result};
pub use limits::{MAX_TARGET_COUNT, MAX_TEXTURE_WIDTH, MAX_VERTEX_ELEMENTS};
pub use part_id::PartId;
pub use settings::{MorphOptions, MorphSettings};
pub use weights::MorphWeights;
