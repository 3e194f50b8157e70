use morpher_core::MorphWeights;

use crate::component::MorphComponent;

/// Drives every morph component once per frame.
pub struct MorphSystem;

impl MorphSystem {
    /// Advances all components by `dt` seconds and returns the index and new
    /// weights of each component that changed this frame.
    pub fn update<H>(components: &mut [MorphComponent<H>], dt: f32) -> Vec<(usize, MorphWeights)> {
        components
            .iter_mut()
            .enumerate()
            .filter_map(|(index, component)| component.update(dt).map(|w| (index, w)))
            .collect()
    }

    /// Like [`update`](Self::update), handing each change to `apply` instead
    /// of collecting.
    pub fn update_with<H, F>(components: &mut [MorphComponent<H>], dt: f32, mut apply: F)
    where
        F: FnMut(&MorphComponent<H>, MorphWeights),
    {
        for component in components.iter_mut() {
            if let Some(weights) = component.update(dt) {
                apply(component, weights);
            }
        }
    }
}
