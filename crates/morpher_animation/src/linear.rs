use morpher_core::MorphWeights;

use crate::animator::{AnimationEvent, finite_dt};
use crate::easing::Easing;

/// Duration and timing curve for a retarget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MorphAnimation {
    /// Seconds. Zero or negative completes on the first tick.
    pub duration: f32,
    pub easing: Easing,
}

impl MorphAnimation {
    #[must_use]
    pub fn linear(duration: f32) -> Self {
        Self {
            duration,
            easing: Easing::Linear,
        }
    }

    #[must_use]
    pub fn eased(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Interpolates from `origin` to `target` over `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearAnimator {
    origin: MorphWeights,
    target: MorphWeights,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl LinearAnimator {
    #[must_use]
    pub fn new(origin: MorphWeights, target: MorphWeights, duration: f32) -> Self {
        Self::with_animation(origin, target, MorphAnimation::linear(duration))
    }

    #[must_use]
    pub fn with_animation(
        origin: MorphWeights,
        target: MorphWeights,
        animation: MorphAnimation,
    ) -> Self {
        Self {
            origin,
            target,
            duration: animation.duration,
            elapsed: 0.0,
            easing: animation.easing,
        }
    }

    #[must_use]
    pub fn origin(&self) -> MorphWeights {
        self.origin
    }

    #[must_use]
    pub fn target(&self) -> MorphWeights {
        self.target
    }

    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Normalized progress in `[0, 1]`, before easing.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn advance(&mut self, dt: f32) -> AnimationEvent {
        self.elapsed += finite_dt(dt);

        let progress = self.progress();
        if progress >= 1.0 {
            return AnimationEvent::completed(self.target);
        }

        let t = self.easing.apply(progress);
        AnimationEvent::running(self.origin.lerp(self.target, t))
    }
}
