//! Input geometry buffers.
//!
//! A [`MeshModel`] is a list of named [`SubModel`]s, each made of one or more
//! [`MeshPart`]s. Targets must mirror the base model's structure for every
//! part being morphed.

use glam::Vec3;

use morpher_core::{MorphError, Result};

/// Index-aligned position and normal buffers for one drawable part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshPart {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl MeshPart {
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            positions,
            normals,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Fails with [`MorphError::NormalCountMismatch`] unless every position has a normal.
    pub fn validate_normals(&self) -> Result<()> {
        if self.normals.len() == self.positions.len() {
            Ok(())
        } else {
            Err(MorphError::NormalCountMismatch {
                positions: self.positions.len(),
                normals: self.normals.len(),
            })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubModel {
    pub id: String,
    pub parts: Vec<MeshPart>,
}

impl SubModel {
    #[must_use]
    pub fn new(id: impl Into<String>, parts: Vec<MeshPart>) -> Self {
        Self {
            id: id.into(),
            parts,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshModel {
    pub submodels: Vec<SubModel>,
}

impl MeshModel {
    #[must_use]
    pub fn new(submodels: Vec<SubModel>) -> Self {
        Self { submodels }
    }

    /// Convenience for single-part models.
    #[must_use]
    pub fn from_part(id: impl Into<String>, part: MeshPart) -> Self {
        Self {
            submodels: vec![SubModel::new(id, vec![part])],
        }
    }

    /// Total vertex count over every part of every submodel.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.submodels
            .iter()
            .flat_map(|s| &s.parts)
            .map(MeshPart::vertex_count)
            .sum()
    }

    /// Vertex counts per part, grouped by submodel id.
    #[must_use]
    pub fn named_vertex_counts(&self) -> Vec<(&str, Vec<usize>)> {
        self.submodels
            .iter()
            .map(|s| {
                (
                    s.id.as_str(),
                    s.parts.iter().map(MeshPart::vertex_count).collect(),
                )
            })
            .collect()
    }
}
