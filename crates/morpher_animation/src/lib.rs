//! Morph weight animation.
//!
//! - [`LinearAnimator`]: eases from an origin to a target over a fixed duration
//! - [`TimelineAnimator`]: plays a [`KeyframeCurve`] over a fixed duration
//! - [`Animator`]: either of the above behind one `advance(dt)` call
//! - [`AnimationDriver`]: owns the current weights and at most one animator
//!
//! Everything here is synchronous and allocation-free per tick. Degenerate
//! inputs (zero duration, empty or single-keyframe curves) complete
//! immediately instead of failing.

pub mod animator;
pub mod driver;
pub mod easing;
pub mod linear;
pub mod timeline;
pub mod tracks;
pub mod values;

pub use animator::{AnimationEvent, AnimationStatus, Animator};
pub use driver::AnimationDriver;
pub use easing::Easing;
pub use linear::{LinearAnimator, MorphAnimation};
pub use timeline::TimelineAnimator;
pub use tracks::{InterpolationMode, Keyframe, KeyframeCurve};
pub use values::Interpolatable;
