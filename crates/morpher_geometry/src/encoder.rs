//! Geometry delta encoding.
//!
//! Samples are emitted vertex-major, target-minor: all targets of vertex 0,
//! then all targets of vertex 1, and so on. Sample `(v, t)` sits at index
//! `v * target_count + t`.

use smallvec::SmallVec;

use morpher_core::{MAX_TARGET_COUNT, MorphError, MorphSettings, Result};

use crate::layout::{check_capacity, plan};
use crate::mesh::MeshPart;
use crate::sample::PackedSample;
use crate::texture::MorphTexture;

/// Ordered target parts, one per morph target.
pub type TargetSet<'a> = SmallVec<[&'a MeshPart; MAX_TARGET_COUNT]>;

/// Validates `base` against `targets` and encodes every (vertex, target) pair.
///
/// Offsets are subtracted in `f32` and narrowed to half precision only when
/// the sample is emitted. Nothing is returned on failure.
pub fn encode(base: &MeshPart, targets: &[&MeshPart]) -> Result<Vec<PackedSample>> {
    validate(base, targets)?;

    let vertex_count = base.vertex_count();
    let mut samples = Vec::with_capacity(vertex_count * targets.len());

    for (v, base_position) in base.positions.iter().enumerate() {
        for target in targets {
            let offset = target.positions[v] - *base_position;
            samples.push(PackedSample::from_f32(offset, target.normals[v]));
        }
    }

    Ok(samples)
}

/// Capacity check, encoding and layout for one part, in that order.
pub fn encode_part(
    base: &MeshPart,
    targets: &[&MeshPart],
    settings: &MorphSettings,
) -> Result<MorphTexture> {
    check_capacity(base.vertex_count(), targets.len(), settings.max_elements())?;
    let samples = encode(base, targets)?;
    plan(
        &samples,
        base.vertex_count(),
        targets.len(),
        settings.max_texture_width,
    )
}

fn validate(base: &MeshPart, targets: &[&MeshPart]) -> Result<()> {
    if !(1..=MAX_TARGET_COUNT).contains(&targets.len()) {
        return Err(MorphError::InvalidTargetCount {
            count: targets.len(),
            max: MAX_TARGET_COUNT,
        });
    }

    base.validate_normals()?;

    let expected = base.vertex_count();
    for target in targets {
        if target.vertex_count() != expected {
            return Err(MorphError::TopologyMismatch {
                part: base.name.clone(),
                expected,
                actual: target.vertex_count(),
            });
        }
        target.validate_normals()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn part(positions: &[Vec3]) -> MeshPart {
        MeshPart::new("part", positions.to_vec(), vec![Vec3::Y; positions.len()])
    }

    #[test]
    fn empty_target_set_is_rejected() {
        let base = part(&[Vec3::ZERO]);
        assert_eq!(
            encode(&base, &[]),
            Err(MorphError::InvalidTargetCount { count: 0, max: 4 })
        );
    }

    #[test]
    fn five_targets_are_rejected() {
        let base = part(&[Vec3::ZERO]);
        let targets = [&base; 5];
        assert!(matches!(
            encode(&base, &targets),
            Err(MorphError::InvalidTargetCount { count: 5, .. })
        ));
    }

    #[test]
    fn base_normals_are_validated() {
        let mut base = part(&[Vec3::ZERO, Vec3::X]);
        base.normals.pop();
        let target = part(&[Vec3::ZERO, Vec3::X]);
        assert_eq!(
            encode(&base, &[&target]),
            Err(MorphError::NormalCountMismatch {
                positions: 2,
                normals: 1
            })
        );
    }
}
