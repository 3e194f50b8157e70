use morpher_core::MorphWeights;

use crate::linear::LinearAnimator;
use crate::timeline::TimelineAnimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    /// Terminal. The animator must be retired once this is observed.
    Completed,
}

/// Output of a single `advance` step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationEvent {
    pub weights: MorphWeights,
    pub status: AnimationStatus,
}

impl AnimationEvent {
    #[must_use]
    pub fn running(weights: MorphWeights) -> Self {
        Self {
            weights,
            status: AnimationStatus::Running,
        }
    }

    #[must_use]
    pub fn completed(weights: MorphWeights) -> Self {
        Self {
            weights,
            status: AnimationStatus::Completed,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == AnimationStatus::Completed
    }
}

/// Treats a non-finite time step as no time passing.
pub(crate) fn finite_dt(dt: f32) -> f32 {
    if dt.is_finite() {
        dt
    } else {
        log::warn!("Ignoring non-finite animation time step {dt}");
        0.0
    }
}

/// The animator currently driving a weight vector.
#[derive(Debug, Clone)]
pub enum Animator {
    Linear(LinearAnimator),
    Timeline(TimelineAnimator),
}

impl Animator {
    pub fn advance(&mut self, dt: f32) -> AnimationEvent {
        match self {
            Animator::Linear(a) => a.advance(dt),
            Animator::Timeline(a) => a.advance(dt),
        }
    }

    /// Weights this animator settles on once completed.
    #[must_use]
    pub fn final_weights(&self) -> MorphWeights {
        match self {
            Animator::Linear(a) => a.target(),
            Animator::Timeline(a) => a.final_weights(),
        }
    }
}

impl From<LinearAnimator> for Animator {
    fn from(animator: LinearAnimator) -> Self {
        Animator::Linear(animator)
    }
}

impl From<TimelineAnimator> for Animator {
    fn from(animator: TimelineAnimator) -> Self {
        Animator::Timeline(animator)
    }
}
