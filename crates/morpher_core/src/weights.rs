use std::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::limits::MAX_TARGET_COUNT;

/// Blend factors for up to four morph targets.
///
/// Index `i` weights target `i`. Values are typically in `[0, 1]` but are
/// never clamped. Laid out as a plain `vec4<f32>` so it can be written
/// straight into a uniform buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MorphWeights {
    pub weights: [f32; MAX_TARGET_COUNT],
}

impl MorphWeights {
    pub const ZERO: Self = Self {
        weights: [0.0; MAX_TARGET_COUNT],
    };

    #[must_use]
    pub const fn new(weights: [f32; MAX_TARGET_COUNT]) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self {
            weights: [value; MAX_TARGET_COUNT],
        }
    }

    /// Builds weights from a slice, zero-filling missing entries and
    /// ignoring entries past [`MAX_TARGET_COUNT`].
    #[must_use]
    pub fn from_slice(values: &[f32]) -> Self {
        let mut weights = [0.0; MAX_TARGET_COUNT];
        for (dst, src) in weights.iter_mut().zip(values) {
            *dst = *src;
        }
        Self { weights }
    }

    #[must_use]
    pub fn lerp(self, end: Self, t: f32) -> Self {
        let mut result = Self::ZERO;
        for i in 0..MAX_TARGET_COUNT {
            result.weights[i] = self.weights[i] + (end.weights[i] - self.weights[i]) * t;
        }
        result
    }

    #[must_use]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::from_array(self.weights)
    }

    /// Largest componentwise absolute difference to `other`.
    #[must_use]
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        self.weights
            .iter()
            .zip(&other.weights)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl Index<usize> for MorphWeights {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.weights[index]
    }
}

impl IndexMut<usize> for MorphWeights {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.weights[index]
    }
}

impl From<[f32; MAX_TARGET_COUNT]> for MorphWeights {
    fn from(weights: [f32; MAX_TARGET_COUNT]) -> Self {
        Self { weights }
    }
}

impl From<Vec4> for MorphWeights {
    fn from(v: Vec4) -> Self {
        Self { weights: v.to_array() }
    }
}

impl From<MorphWeights> for Vec4 {
    fn from(w: MorphWeights) -> Self {
        w.to_vec4()
    }
}
