//! Keyframe curves.
//!
//! A curve is a piecewise function of normalized progress. Keyframes are kept
//! sorted by progress; keyframes sharing a progress keep their insertion
//! order and the last one wins when sampled exactly at that progress.

use morpher_core::MorphWeights;
use smallvec::SmallVec;

use crate::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpolationMode {
    Linear,
    /// Holds the left keyframe's value until the next keyframe.
    Step,
}

/// A control point at `progress` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T = MorphWeights> {
    pub progress: f32,
    pub value: T,
}

impl<T> Keyframe<T> {
    #[must_use]
    pub fn new(progress: f32, value: T) -> Self {
        Self { progress, value }
    }
}

/// Ordered keyframes stored as parallel progress/value arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeCurve<T: Interpolatable = MorphWeights> {
    times: SmallVec<[f32; 8]>,
    values: SmallVec<[T; 8]>,
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> Default for KeyframeCurve<T> {
    fn default() -> Self {
        Self {
            times: SmallVec::new(),
            values: SmallVec::new(),
            interpolation: InterpolationMode::Linear,
        }
    }
}

impl<T: Interpolatable> KeyframeCurve<T> {
    /// Builds a linear curve. Out-of-order keyframes are stably sorted and
    /// keyframes with a non-finite progress are dropped.
    #[must_use]
    pub fn new(keyframes: impl IntoIterator<Item = Keyframe<T>>) -> Self {
        let mut keyframes: SmallVec<[Keyframe<T>; 8]> = keyframes
            .into_iter()
            .filter(|k| {
                let finite = k.progress.is_finite();
                if !finite {
                    log::warn!("Dropping keyframe with non-finite progress {}", k.progress);
                }
                finite
            })
            .collect();
        keyframes.sort_by(|a, b| a.progress.total_cmp(&b.progress));

        Self {
            times: keyframes.iter().map(|k| k.progress).collect(),
            values: keyframes.iter().map(|k| k.value).collect(),
            interpolation: InterpolationMode::Linear,
        }
    }

    #[must_use]
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn first_progress(&self) -> Option<f32> {
        self.times.first().copied()
    }

    pub fn keyframes(&self) -> impl Iterator<Item = Keyframe<T>> + '_ {
        self.times
            .iter()
            .zip(&self.values)
            .map(|(&progress, &value)| Keyframe { progress, value })
    }

    /// Inserts `value` at progress 0 unless the curve already starts at or
    /// before 0, so playback begins from `value` without a jump.
    #[must_use]
    pub fn anchored(mut self, value: T) -> Self {
        if self.times.first().is_none_or(|&t| t > 0.0) {
            self.times.insert(0, 0.0);
            self.values.insert(0, value);
        }
        self
    }

    /// Samples the curve at `progress`.
    ///
    /// Before the first keyframe the first value is returned, after the last
    /// keyframe the last value. An empty curve yields `T::default()`.
    #[must_use]
    pub fn evaluate(&self, progress: f32) -> T {
        let len = self.times.len();
        if len == 0 {
            return T::default();
        }
        if progress.is_nan() || progress < self.times[0] {
            return self.values[0];
        }

        // First keyframe strictly after `progress`
        let next = self.times.partition_point(|&t| t <= progress);
        if next >= len {
            return self.values[len - 1];
        }
        let index = next - 1;

        let t0 = self.times[index];
        let t1 = self.times[next];
        let width = t1 - t0;
        if width <= 0.0 {
            return self.values[next];
        }

        match self.interpolation {
            InterpolationMode::Step => self.values[index],
            InterpolationMode::Linear => {
                let t = ((progress - t0) / width).clamp(0.0, 1.0);
                T::interpolate_linear(self.values[index], self.values[next], t)
            }
        }
    }
}

impl<T: Interpolatable> FromIterator<Keyframe<T>> for KeyframeCurve<T> {
    fn from_iter<I: IntoIterator<Item = Keyframe<T>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsorted_keyframes_are_sorted() {
        let curve = KeyframeCurve::new([Keyframe::new(1.0, 10.0_f32), Keyframe::new(0.0, 0.0)]);
        assert_eq!(curve.first_progress(), Some(0.0));
        assert!((curve.evaluate(0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn nan_progress_is_dropped() {
        let curve = KeyframeCurve::new([Keyframe::new(f32::NAN, 3.0_f32), Keyframe::new(0.5, 1.0)]);
        assert_eq!(curve.len(), 1);
    }

    #[test]
    fn anchored_keeps_zero_start() {
        let curve = KeyframeCurve::new([Keyframe::new(0.0, 1.0_f32)]).anchored(5.0);
        assert_eq!(curve.len(), 1);
        let curve = KeyframeCurve::new([Keyframe::new(0.5, 1.0_f32)]).anchored(5.0);
        assert_eq!(curve.len(), 2);
        assert!((curve.evaluate(0.0) - 5.0).abs() < 1e-6);
    }
}
