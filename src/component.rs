//! Morph Component
//!
//! Entity-level entry point. Construction validates the base model against
//! its targets, encodes one packed texture per morphed part and realizes each
//! through a [`TextureFactory`]. Afterwards the component drives its weight
//! vector frame by frame.
//!
//! Construction is all or nothing: on error no texture is registered and the
//! caller must assume nothing was created.
//!
//! ```rust,ignore
//! let registry = TextureRegistry::new();
//! let mut morph = MorphComponent::new(
//!     Some(&base),
//!     "body",
//!     &[smile, frown],
//!     MorphWeights::ZERO,
//!     &MorphSettings::default(),
//!     &factory,
//!     &registry,
//! )?;
//!
//! morph.set_target_weights(MorphWeights::new([1.0, 0.0, 0.0, 0.0]), 0.5);
//!
//! // Each frame
//! if let Some(weights) = morph.update(dt) {
//!     material.set_morph_weights(weights);
//! }
//! ```

use std::sync::Arc;

use morpher_animation::{AnimationDriver, KeyframeCurve, MorphAnimation};
use morpher_core::{MorphError, MorphOptions, MorphSettings, MorphWeights, PartId, Result};
use morpher_geometry::{
    MeshModel, MeshPart, MorphTexture, SubModel, TargetSet, check_capacity, encode_part,
};

use crate::registry::{MorphTextureResource, TextureFactory, TextureKey, TextureRegistry};

/// Morph target state for one entity.
#[derive(Debug)]
pub struct MorphComponent<H> {
    part_id: PartId,
    options: MorphOptions,
    driver: AnimationDriver,
    textures: Vec<Arc<MorphTextureResource<H>>>,
}

/// One part to encode: the base part and its counterpart in every target.
struct PartJob<'a> {
    key: TextureKey,
    base: &'a MeshPart,
    targets: TargetSet<'a>,
}

impl<H> MorphComponent<H> {
    /// Builds the packed textures for every base submodel matching `part_id`.
    ///
    /// Each target must contain a submodel matching `part_id` whose parts
    /// have the same vertex counts as the base submodel's parts.
    pub fn new<F>(
        base: Option<&MeshModel>,
        part_id: impl Into<PartId>,
        targets: &[MeshModel],
        weights: MorphWeights,
        settings: &MorphSettings,
        factory: &F,
        registry: &TextureRegistry<H>,
    ) -> Result<Self>
    where
        F: TextureFactory<Texture = H>,
    {
        let base = base.ok_or(MorphError::MissingBaseMesh)?;
        let part_id = part_id.into();

        if !(1..=settings.max_target_count).contains(&targets.len()) {
            return Err(MorphError::InvalidTargetCount {
                count: targets.len(),
                max: settings.max_target_count,
            });
        }

        check_capacity(base.vertex_count(), targets.len(), settings.max_elements())?;

        let jobs = collect_jobs(base, &part_id, targets)?;
        if jobs.is_empty() {
            log::warn!("No submodel matches morph part '{part_id}'");
        }

        let packed = encode_jobs(&jobs, settings)?;

        let mut textures = Vec::with_capacity(jobs.len());
        for (job, packed) in jobs.into_iter().zip(packed) {
            let handle = factory
                .create_texture(&job.key, &packed)
                .map_err(|e| MorphError::TextureCreationFailed(format!("{}: {e}", job.key)))?;

            log::debug!(
                "Morph texture {}: {} vertices x {} targets -> {}x{} ({} padding)",
                job.key,
                packed.vertex_count(),
                packed.target_count(),
                packed.width(),
                packed.height(),
                packed.layout().padding
            );

            textures.push(Arc::new(MorphTextureResource {
                key: job.key,
                packed,
                handle,
            }));
        }

        for texture in &textures {
            registry.insert(Arc::clone(texture));
        }

        Ok(Self {
            part_id,
            options: settings.options,
            driver: AnimationDriver::new(weights),
            textures,
        })
    }

    #[must_use]
    pub fn part_id(&self) -> &PartId {
        &self.part_id
    }

    /// Options for the rendering boundary, e.g. normal visualization.
    #[must_use]
    pub fn options(&self) -> MorphOptions {
        self.options
    }

    #[must_use]
    pub fn textures(&self) -> &[Arc<MorphTextureResource<H>>] {
        &self.textures
    }

    /// The requested weights, updated immediately by every retarget.
    #[must_use]
    pub fn weights(&self) -> MorphWeights {
        self.driver.target()
    }

    /// The interpolated weights as of the last update.
    #[must_use]
    pub fn current_weights(&self) -> MorphWeights {
        self.driver.current()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Animates linearly to `weights` over `duration` seconds (0 for instant).
    pub fn set_target_weights(&mut self, weights: MorphWeights, duration: f32) {
        self.driver.retarget(weights, duration);
    }

    pub fn set_target_weights_with(&mut self, weights: MorphWeights, animation: MorphAnimation) {
        self.driver.retarget_with(weights, animation);
    }

    /// Plays `curve` over `duration` seconds. [`weights`](Self::weights)
    /// becomes the curve's final value.
    pub fn set_keyframes(&mut self, curve: KeyframeCurve, duration: f32) {
        self.driver.retarget_keyframes(curve, duration);
    }

    /// Advances the animation. Returns weights to push to the material, or
    /// `None` when nothing changed.
    pub fn update(&mut self, dt: f32) -> Option<MorphWeights> {
        self.driver.tick(dt)
    }
}

fn matching_submodel<'a>(model: &'a MeshModel, part_id: &PartId) -> Option<&'a SubModel> {
    model.submodels.iter().find(|s| part_id.matches(&s.id))
}

fn collect_jobs<'a>(
    base: &'a MeshModel,
    part_id: &PartId,
    targets: &'a [MeshModel],
) -> Result<Vec<PartJob<'a>>> {
    let mut jobs = Vec::new();

    for submodel in base.submodels.iter().filter(|s| part_id.matches(&s.id)) {
        for (part_index, part) in submodel.parts.iter().enumerate() {
            let mut target_parts = TargetSet::new();
            for (target_index, target) in targets.iter().enumerate() {
                let target_part = matching_submodel(target, part_id)
                    .and_then(|s| s.parts.get(part_index))
                    .ok_or_else(|| MorphError::MissingTargetPart {
                        part: part_id.to_string(),
                        target: target_index,
                    })?;

                if target_part.vertex_count() != part.vertex_count() {
                    log::warn!(
                        "Topology mismatch for '{part_id}': base {:?}, target {target_index} {:?}",
                        base.named_vertex_counts(),
                        target.named_vertex_counts()
                    );
                    return Err(MorphError::TopologyMismatch {
                        part: part_id.to_string(),
                        expected: part.vertex_count(),
                        actual: target_part.vertex_count(),
                    });
                }
                target_parts.push(target_part);
            }

            if part.vertex_count() == 0 {
                log::debug!("Skipping empty part {part_index} of '{}'", submodel.id);
                continue;
            }

            jobs.push(PartJob {
                key: TextureKey {
                    part_id: part_id.clone(),
                    submodel: submodel.id.clone(),
                    part_index,
                },
                base: part,
                targets: target_parts,
            });
        }
    }

    Ok(jobs)
}

#[cfg(not(feature = "parallel"))]
fn encode_jobs(jobs: &[PartJob<'_>], settings: &MorphSettings) -> Result<Vec<MorphTexture>> {
    jobs.iter()
        .map(|job| encode_part(job.base, &job.targets, settings))
        .collect()
}

#[cfg(feature = "parallel")]
fn encode_jobs(jobs: &[PartJob<'_>], settings: &MorphSettings) -> Result<Vec<MorphTexture>> {
    use rayon::prelude::*;

    jobs.par_iter()
        .map(|job| encode_part(job.base, &job.targets, settings))
        .collect()
}
