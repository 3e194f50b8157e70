use morpher_core::MorphWeights;

use crate::animator::{AnimationEvent, finite_dt};
use crate::tracks::KeyframeCurve;

/// Plays a keyframe curve from progress 0 to 1 over `duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineAnimator {
    curve: KeyframeCurve,
    duration: f32,
    elapsed: f32,
}

impl TimelineAnimator {
    #[must_use]
    pub fn new(curve: KeyframeCurve, duration: f32) -> Self {
        Self {
            curve,
            duration,
            elapsed: 0.0,
        }
    }

    /// Starts the curve from `origin` when it does not begin at progress 0.
    #[must_use]
    pub fn from_origin(origin: MorphWeights, curve: KeyframeCurve, duration: f32) -> Self {
        Self::new(curve.anchored(origin), duration)
    }

    #[must_use]
    pub fn curve(&self) -> &KeyframeCurve {
        &self.curve
    }

    #[must_use]
    pub fn final_weights(&self) -> MorphWeights {
        self.curve.evaluate(1.0)
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn advance(&mut self, dt: f32) -> AnimationEvent {
        self.elapsed += finite_dt(dt);

        // A constant curve has nothing to play
        if self.curve.len() <= 1 {
            return AnimationEvent::completed(self.final_weights());
        }

        let progress = self.progress();
        let weights = self.curve.evaluate(progress);
        if progress >= 1.0 {
            AnimationEvent::completed(weights)
        } else {
            AnimationEvent::running(weights)
        }
    }
}
