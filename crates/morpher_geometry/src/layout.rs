//! Texture Layout Planning
//!
//! Each sample contributes two RGB pixels, offset first, then normal. Pixels
//! fill rows of `width = min(vertex_count, max_width)` left to right, top to
//! bottom, and the last row is zero-padded so the buffer is rectangular.
//!
//! A shader addresses sample `s` as:
//!
//! ```text
//! pixel = s * 2 (+ 1 for the normal)
//! row   = pixel / width
//! col   = pixel % width
//! ```
//!
//! With `width == vertex_count` every vertex's samples for all targets stay
//! in a predictable position without a lookup table.

use half::f16;

use morpher_core::limits::{CHANNELS_PER_PIXEL, PIXELS_PER_SAMPLE};
use morpher_core::{MorphError, Result};

use crate::sample::PackedSample;
use crate::texture::MorphTexture;

/// Dimensions of a packed delta texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureLayout {
    pub width: usize,
    pub height: usize,
    /// Zero pixels appended after the last real pixel.
    pub padding: usize,
    /// Real (non-padding) pixel count.
    pub pixel_count: usize,
}

impl TextureLayout {
    /// Computes the layout for `vertex_count * target_count` samples.
    ///
    /// An empty part yields a `0 x 0` layout.
    #[must_use]
    pub fn new(vertex_count: usize, target_count: usize, max_width: usize) -> Self {
        let pixel_count = vertex_count * target_count * PIXELS_PER_SAMPLE;
        let width = vertex_count.min(max_width.max(1));
        if width == 0 || pixel_count == 0 {
            return Self::default();
        }

        let quotient = pixel_count / width;
        let remainder = pixel_count % width;
        let (height, padding) = if remainder == 0 {
            (quotient, 0)
        } else {
            (quotient + 1, width - remainder)
        };

        Self {
            width,
            height,
            padding,
            pixel_count,
        }
    }

    #[must_use]
    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }

    /// Number of `f16` values in the packed buffer.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.total_pixels() * CHANNELS_PER_PIXEL
    }

    /// Bytes per row of the packed buffer (3 channels x 2 bytes).
    #[must_use]
    pub fn bytes_per_row(&self) -> usize {
        self.width * CHANNELS_PER_PIXEL * size_of::<f16>()
    }

    /// `(col, row)` of a pixel index.
    #[must_use]
    pub fn coords(&self, pixel_index: usize) -> (usize, usize) {
        (pixel_index % self.width, pixel_index / self.width)
    }
}

/// Rejects geometry whose packed pixels exceed `max_elements`.
///
/// Runs before encoding so oversized parts fail without doing any work.
pub fn check_capacity(vertex_count: usize, target_count: usize, max_elements: usize) -> Result<()> {
    let elements = vertex_count
        .saturating_mul(target_count)
        .saturating_mul(PIXELS_PER_SAMPLE);
    if elements > max_elements {
        return Err(MorphError::GeometryTooLarge {
            elements,
            max: max_elements,
        });
    }
    Ok(())
}

/// Lays `samples` out into a rectangular half-float RGB buffer.
pub fn plan(
    samples: &[PackedSample],
    vertex_count: usize,
    target_count: usize,
    max_width: usize,
) -> Result<MorphTexture> {
    let max_width = max_width.max(1);
    check_capacity(vertex_count, target_count, max_width.saturating_mul(max_width))?;
    let expected = vertex_count * target_count;
    if samples.len() != expected {
        return Err(MorphError::SampleCountMismatch {
            expected,
            actual: samples.len(),
        });
    }

    let layout = TextureLayout::new(vertex_count, target_count, max_width);

    let mut data = Vec::with_capacity(layout.element_count());
    for sample in samples {
        data.extend_from_slice(&sample.offset);
        data.extend_from_slice(&sample.normal);
    }
    data.resize(layout.element_count(), f16::ZERO);

    log::trace!(
        "Planned morph texture {}x{} ({} pixels, {} padding)",
        layout.width,
        layout.height,
        layout.pixel_count,
        layout.padding
    );

    Ok(MorphTexture::new(data, layout, vertex_count, target_count))
}
