//! Morph Settings
//!
//! Configuration consumed when building a morphable entity.
//!
//! ```rust,ignore
//! use morpher_core::{MorphOptions, MorphSettings};
//!
//! // Defaults: 8192-pixel texture rows, up to 4 targets, no debug options
//! let settings = MorphSettings::default();
//!
//! // Shade normals as colors at the rendering boundary
//! let settings = MorphSettings::default().with_options(MorphOptions::DEBUG_NORMALS);
//! ```

use bitflags::bitflags;

use crate::limits::{MAX_TARGET_COUNT, MAX_TEXTURE_WIDTH};

bitflags! {
    /// Options surfaced to the rendering boundary. The core never interprets them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MorphOptions: u32 {
        /// Display normals as vertex colors.
        const DEBUG_NORMALS = 1 << 0;
    }
}

/// Limits and options applied while building packed morph textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphSettings {
    /// Maximum texture row width in pixels. Also bounds the texture height.
    pub max_texture_width: usize,
    /// Maximum number of targets, never above [`MAX_TARGET_COUNT`].
    pub max_target_count: usize,
    pub options: MorphOptions,
}

impl Default for MorphSettings {
    fn default() -> Self {
        Self {
            max_texture_width: MAX_TEXTURE_WIDTH,
            max_target_count: MAX_TARGET_COUNT,
            options: MorphOptions::empty(),
        }
    }
}

impl MorphSettings {
    #[must_use]
    pub fn with_max_texture_width(mut self, width: usize) -> Self {
        self.max_texture_width = width.max(1);
        self
    }

    #[must_use]
    pub fn with_max_target_count(mut self, count: usize) -> Self {
        if count > MAX_TARGET_COUNT {
            log::warn!("max_target_count {count} exceeds {MAX_TARGET_COUNT}, clamping");
        }
        self.max_target_count = count.min(MAX_TARGET_COUNT);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: MorphOptions) -> Self {
        self.options = options;
        self
    }

    /// Maximum number of pixels a square texture of `max_texture_width` holds.
    #[must_use]
    pub fn max_elements(&self) -> usize {
        self.max_texture_width.saturating_mul(self.max_texture_width)
    }
}
