//! Hard limits for morph targets and the packed delta texture.

/// Maximum number of morph targets blended by one weight vector.
pub const MAX_TARGET_COUNT: usize = 4;

/// Maximum width (and height) of a packed delta texture, in pixels.
///
/// 8192 is supported by effectively every desktop and mobile GPU.
pub const MAX_TEXTURE_WIDTH: usize = 8192;

/// Maximum number of pixels addressable in a square texture of [`MAX_TEXTURE_WIDTH`].
pub const MAX_VERTEX_ELEMENTS: usize = MAX_TEXTURE_WIDTH * MAX_TEXTURE_WIDTH;

/// Number of pixels each (vertex, target) sample occupies: offset + normal.
pub const PIXELS_PER_SAMPLE: usize = 2;

/// Number of half-float channels per pixel.
pub const CHANNELS_PER_PIXEL: usize = 3;
