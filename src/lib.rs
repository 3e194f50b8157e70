#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_arguments)]

//! # Morpher
//!
//! Morph target (blend shape) support for meshes with up to four targets.
//!
//! At setup, each morphed part is encoded into a packed RGB16F texture of
//! per-vertex position offsets and target normals. At runtime, a small
//! animation engine drives the 4-component weight vector that a vertex
//! shader uses to blend between targets.
//!
//! - [`geometry`]: delta encoding and texture layout
//! - [`animation`]: linear and keyframe animators plus the per-frame driver
//! - [`MorphComponent`]: entity-level construction and weight API
//! - [`TextureRegistry`]: shared ownership of realized textures

pub mod component;
pub mod registry;
pub mod system;

pub use morpher_animation as animation;
pub use morpher_geometry as geometry;

pub use component::MorphComponent;
pub use morpher_animation::{
    AnimationDriver, Easing, InterpolationMode, Keyframe, KeyframeCurve, MorphAnimation,
};
pub use morpher_core::{
    MAX_TARGET_COUNT, MAX_TEXTURE_WIDTH, MAX_VERTEX_ELEMENTS, MorphError, MorphOptions,
    MorphSettings, MorphWeights, PartId, Result,
};
pub use morpher_geometry::{MeshModel, MeshPart, MorphTexture, SubModel, TextureLayout};
pub use registry::{
    HeadlessTextureFactory, MorphTextureResource, TextureFactory, TextureKey, TextureRegistry,
};
pub use system::MorphSystem;
