//! Per-frame weight driver.
//!
//! Holds the interpolated weights and at most one [`Animator`]. Every
//! retarget replaces the in-flight animator and starts the new one from the
//! current interpolated weights, so a retarget mid-animation never jumps.

use morpher_core::MorphWeights;

use crate::animator::Animator;
use crate::linear::{LinearAnimator, MorphAnimation};
use crate::timeline::TimelineAnimator;
use crate::tracks::KeyframeCurve;

#[derive(Debug, Clone, Default)]
pub struct AnimationDriver {
    current: MorphWeights,
    target: MorphWeights,
    animator: Option<Animator>,
}

impl AnimationDriver {
    #[must_use]
    pub fn new(weights: MorphWeights) -> Self {
        Self {
            current: weights,
            target: weights,
            animator: None,
        }
    }

    /// The interpolated weights as of the last tick.
    #[must_use]
    pub fn current(&self) -> MorphWeights {
        self.current
    }

    /// The most recently requested weights, regardless of animation progress.
    #[must_use]
    pub fn target(&self) -> MorphWeights {
        self.target
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_some()
    }

    #[must_use]
    pub fn animator(&self) -> Option<&Animator> {
        self.animator.as_ref()
    }

    /// Linearly animates to `weights` over `duration` seconds.
    pub fn retarget(&mut self, weights: MorphWeights, duration: f32) {
        self.retarget_with(weights, MorphAnimation::linear(duration));
    }

    pub fn retarget_with(&mut self, weights: MorphWeights, animation: MorphAnimation) {
        self.start(LinearAnimator::with_animation(self.current, weights, animation).into());
    }

    /// Plays `curve` over `duration` seconds, starting from the current weights.
    pub fn retarget_keyframes(&mut self, curve: KeyframeCurve, duration: f32) {
        self.start(TimelineAnimator::from_origin(self.current, curve, duration).into());
    }

    /// Replaces the in-flight animator, if any.
    pub fn start(&mut self, animator: Animator) {
        if self.animator.is_some() {
            log::trace!("Discarding in-flight morph animation");
        }
        self.target = animator.final_weights();
        self.animator = Some(animator);
    }

    /// Stops animating and holds the current weights.
    pub fn stop(&mut self) {
        self.animator = None;
        self.target = self.current;
    }

    /// Advances the active animator by `dt` seconds.
    ///
    /// Returns the new weights while animating, including once on the frame
    /// the animation completes. Returns `None` when idle.
    pub fn tick(&mut self, dt: f32) -> Option<MorphWeights> {
        let animator = self.animator.as_mut()?;
        let event = animator.advance(dt);
        self.current = event.weights;

        if event.is_completed() {
            log::trace!("Morph animation completed at {:?}", event.weights);
            self.animator = None;
        }

        Some(event.weights)
    }
}
