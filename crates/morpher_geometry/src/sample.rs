use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use half::f16;

/// One (vertex, target) record: the position offset from the base vertex
/// followed by the target's normal, each narrowed to half precision.
///
/// In the packed texture a sample occupies two consecutive RGB pixels.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PackedSample {
    pub offset: [f16; 3],
    pub normal: [f16; 3],
}

impl PackedSample {
    /// Narrows full-precision vectors. This is the only rounding step.
    #[must_use]
    pub fn from_f32(offset: Vec3, normal: Vec3) -> Self {
        Self {
            offset: narrow(offset),
            normal: narrow(normal),
        }
    }

    #[must_use]
    pub fn offset(&self) -> Vec3 {
        widen(self.offset)
    }

    #[must_use]
    pub fn normal(&self) -> Vec3 {
        widen(self.normal)
    }
}

#[inline]
pub(crate) fn narrow(v: Vec3) -> [f16; 3] {
    [f16::from_f32(v.x), f16::from_f32(v.y), f16::from_f32(v.z)]
}

#[inline]
pub(crate) fn widen(p: [f16; 3]) -> Vec3 {
    Vec3::new(p[0].to_f32(), p[1].to_f32(), p[2].to_f32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_twelve_bytes() {
        assert_eq!(std::mem::size_of::<PackedSample>(), 12);
    }

    #[test]
    fn exact_values_survive_narrowing() {
        let s = PackedSample::from_f32(Vec3::new(0.5, -2.0, 0.0), Vec3::Z);
        assert_eq!(s.offset(), Vec3::new(0.5, -2.0, 0.0));
        assert_eq!(s.normal(), Vec3::Z);
    }
}
