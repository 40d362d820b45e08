// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Texture sampling policy.

use peniko::{Extend, ImageQuality, ImageSampler};

/// How texels are filtered when sampled.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, Debug)]
pub enum FilterMode {
    /// No filtering: the nearest texel is used.
    #[default]
    Nearest,
    /// Bilinear interpolation between the four nearest texels.
    Bilinear,
    /// Bilinear interpolation across mip levels.
    MipMap,
}

impl From<ImageQuality> for FilterMode {
    fn from(quality: ImageQuality) -> Self {
        match quality {
            ImageQuality::Low => Self::Nearest,
            ImageQuality::Medium => Self::Bilinear,
            ImageQuality::High => Self::MipMap,
            #[allow(unreachable_patterns)]
            _ => Self::Bilinear,
        }
    }
}

/// Filter and per-axis wrap modes used to sample a texture.
///
/// Wrap modes reuse [`Extend`]: [`Extend::Pad`] clamps to the edge texel.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextureParams {
    /// The filter mode.
    pub filter: FilterMode,
    /// The wrap mode in the horizontal direction.
    pub x_extend: Extend,
    /// The wrap mode in the vertical direction.
    pub y_extend: Extend,
}

impl TextureParams {
    /// Unfiltered, clamp-to-edge sampling.
    pub const fn clamp_no_filter() -> Self {
        Self::new(FilterMode::Nearest)
    }

    /// Clamp-to-edge sampling with the given filter.
    pub const fn new(filter: FilterMode) -> Self {
        Self::with_extends(filter, Extend::Pad, Extend::Pad)
    }

    /// Sampling with explicit wrap modes for each axis.
    pub const fn with_extends(filter: FilterMode, x_extend: Extend, y_extend: Extend) -> Self {
        Self {
            filter,
            x_extend,
            y_extend,
        }
    }

    /// Whether either axis wraps instead of clamping.
    pub fn is_tiled(&self) -> bool {
        self.x_extend != Extend::Pad || self.y_extend != Extend::Pad
    }
}

impl Default for TextureParams {
    fn default() -> Self {
        Self::clamp_no_filter()
    }
}

impl From<&ImageSampler> for TextureParams {
    /// The sampler's alpha multiplier is not a sampling parameter and is ignored.
    fn from(sampler: &ImageSampler) -> Self {
        Self::with_extends(sampler.quality.into(), sampler.x_extend, sampler.y_extend)
    }
}

pub(crate) fn extend_bits(extend: Extend) -> u32 {
    match extend {
        Extend::Pad => 0,
        Extend::Repeat => 1,
        Extend::Reflect => 2,
        #[allow(unreachable_patterns)]
        _ => 3,
    }
}
