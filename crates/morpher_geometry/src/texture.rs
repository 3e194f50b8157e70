use glam::Vec3;
use half::f16;

use morpher_core::limits::{CHANNELS_PER_PIXEL, PIXELS_PER_SAMPLE};

use crate::layout::TextureLayout;
use crate::sample::widen;

/// A packed RGB16F delta texture, immutable once planned.
///
/// Uploaded by the rendering boundary as a 3-channel, 16-bit float image of
/// `layout.width x layout.height`, little-endian.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphTexture {
    data: Vec<f16>,
    layout: TextureLayout,
    vertex_count: usize,
    target_count: usize,
}

impl MorphTexture {
    pub(crate) fn new(
        data: Vec<f16>,
        layout: TextureLayout,
        vertex_count: usize,
        target_count: usize,
    ) -> Self {
        Self {
            data,
            layout,
            vertex_count,
            target_count,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &TextureLayout {
        &self.layout
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.layout.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.layout.height
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw channel data, `width * height * 3` values.
    #[must_use]
    pub fn data(&self) -> &[f16] {
        &self.data
    }

    /// Channel data as bytes, ready for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    #[must_use]
    pub fn pixel(&self, index: usize) -> Option<[f16; 3]> {
        let start = index.checked_mul(CHANNELS_PER_PIXEL)?;
        let end = start.checked_add(CHANNELS_PER_PIXEL)?;
        let channels = self.data.get(start..end)?;
        Some([channels[0], channels[1], channels[2]])
    }

    /// Decodes the `(offset, normal)` pair stored for `vertex` and `target`.
    #[must_use]
    pub fn sample(&self, vertex: usize, target: usize) -> Option<(Vec3, Vec3)> {
        if vertex >= self.vertex_count || target >= self.target_count {
            return None;
        }
        let pixel = (vertex * self.target_count + target) * PIXELS_PER_SAMPLE;
        let offset = self.pixel(pixel)?;
        let normal = self.pixel(pixel + 1)?;
        Some((widen(offset), widen(normal)))
    }
}
