//! Morph target geometry encoding.
//!
//! Converts a base mesh part and 1-4 target parts into a packed half-float
//! RGB texture consumed by a morphing vertex shader:
//!
//! 1. [`check_capacity`] rejects geometry that cannot fit before any work is done
//! 2. [`encode`] computes per-(vertex, target) position offsets and target normals
//! 3. [`plan`] lays the samples out row by row and pads the final row
//!
//! [`encode_part`] runs the three steps in order.

pub mod encoder;
pub mod layout;
pub mod mesh;
pub mod sample;
pub mod texture;

pub use encoder::{TargetSet, encode, encode_part};
pub use layout::{TextureLayout, check_capacity, plan};
pub use mesh::{MeshModel, MeshPart, SubModel};
pub use sample::PackedSample;
pub use texture::MorphTexture;
