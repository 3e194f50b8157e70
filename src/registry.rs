//! Texture Registry
//!
//! Realized morph textures must outlive every renderer that samples them.
//! Each resource is reference counted: the owning [`MorphComponent`] holds one
//! `Arc`, the registry another, so a texture survives until both let go.
//!
//! [`MorphComponent`]: crate::component::MorphComponent

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use morpher_core::PartId;
use morpher_geometry::MorphTexture;

/// Identifies one morphed part: the component's part id, the base submodel
/// and the part's index within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureKey {
    pub part_id: PartId,
    pub submodel: String,
    pub part_index: usize,
}

impl fmt::Display for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.part_id, self.submodel, self.part_index)
    }
}

/// Realizes a packed buffer as a platform texture object.
///
/// Implemented by the rendering boundary. The buffer is RGB, 16-bit float
/// per channel, `packed.width() x packed.height()` pixels.
pub trait TextureFactory {
    type Texture;
    type Error: fmt::Display;

    fn create_texture(
        &self,
        key: &TextureKey,
        packed: &MorphTexture,
    ) -> Result<Self::Texture, Self::Error>;
}

/// Factory that keeps only the packed CPU buffer, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessTextureFactory;

impl TextureFactory for HeadlessTextureFactory {
    type Texture = ();
    type Error = std::convert::Infallible;

    fn create_texture(&self, _key: &TextureKey, _packed: &MorphTexture) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A packed buffer together with its realized texture handle.
#[derive(Debug)]
pub struct MorphTextureResource<H> {
    pub key: TextureKey,
    pub packed: MorphTexture,
    pub handle: H,
}

/// Thread-safe registry of realized textures keyed by [`TextureKey`].
pub struct TextureRegistry<H> {
    inner: RwLock<FxHashMap<TextureKey, Arc<MorphTextureResource<H>>>>,
}

impl<H> Default for TextureRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> TextureRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(FxHashMap::default()),
        }
    }

    /// Registers a resource, returning the one it replaced.
    pub fn insert(
        &self,
        resource: Arc<MorphTextureResource<H>>,
    ) -> Option<Arc<MorphTextureResource<H>>> {
        let mut guard = self.inner.write();
        guard.insert(resource.key.clone(), resource)
    }

    pub fn get(&self, key: &TextureKey) -> Option<Arc<MorphTextureResource<H>>> {
        self.inner.read().get(key).cloned()
    }

    /// All resources registered under `part_id`, in key order.
    pub fn get_part(&self, part_id: &PartId) -> Vec<Arc<MorphTextureResource<H>>> {
        let guard = self.inner.read();
        let mut resources: Vec<_> = guard
            .values()
            .filter(|r| &r.key.part_id == part_id)
            .cloned()
            .collect();
        resources.sort_by(|a, b| {
            (&a.key.submodel, a.key.part_index).cmp(&(&b.key.submodel, b.key.part_index))
        });
        resources
    }

    /// Removes every resource under `part_id`. Returns how many were removed.
    pub fn remove_part(&self, part_id: &PartId) -> usize {
        let mut guard = self.inner.write();
        let before = guard.len();
        guard.retain(|key, _| &key.part_id != part_id);
        before - guard.len()
    }

    /// Drops resources no component references any more.
    pub fn collect_unused(&self) -> usize {
        let mut guard = self.inner.write();
        let before = guard.len();
        guard.retain(|_, resource| Arc::strong_count(resource) > 1);
        let removed = before - guard.len();
        if removed > 0 {
            log::debug!("Released {removed} unused morph textures");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
