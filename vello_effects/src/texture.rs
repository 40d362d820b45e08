// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles to textures sampled by effects.
//!
//! Effects never own the textures they read. A [`TextureRef`] records the identity of a
//! texture owned by the renderer's resource tracking together with the few properties an
//! effect needs to reason about it. The renderer is responsible for keeping the texture alive
//! for as long as any effect holds a reference to it.

use core::num::NonZeroU32;

use crate::error::TextureError;

/// Opaque texture identifier.
///
/// Zero is reserved, so a missing texture cannot be expressed as a `TextureId`.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TextureId(NonZeroU32);

impl TextureId {
    /// Create a texture id, returning `None` for the reserved value `0`.
    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Return the texture id as a u32.
    pub fn as_u32(&self) -> u32 {
        self.0.get()
    }
}

/// The pixel layout of a texture.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum TextureFormat {
    /// A single 8-bit alpha channel.
    Alpha8,
    /// A single half-float alpha channel.
    AlphaF16,
    /// 16-bit packed RGB without alpha.
    Rgb565,
    /// 16-bit packed RGBA.
    Rgba4444,
    /// 8 bits per channel RGBA.
    Rgba8,
    /// 8 bits per channel BGRA.
    Bgra8,
    /// 8 bits per channel RGBA, sRGB encoded.
    Srgba8,
    /// ETC1 compressed RGB.
    Etc1,
    /// Half-float RGBA.
    RgbaF16,
    /// Single precision float RGBA.
    RgbaF32,
}

impl TextureFormat {
    /// Whether every texel of this format has an alpha of one.
    pub fn is_opaque(self) -> bool {
        matches!(self, Self::Rgb565 | Self::Etc1)
    }

    /// Whether this format only stores alpha.
    pub fn is_alpha_only(self) -> bool {
        matches!(self, Self::Alpha8 | Self::AlphaF16)
    }

    /// Whether this format is block compressed.
    pub fn is_compressed(self) -> bool {
        matches!(self, Self::Etc1)
    }

    /// The size of one texel, or `None` for compressed formats.
    pub fn bytes_per_pixel(self) -> Option<u8> {
        match self {
            Self::Alpha8 => Some(1),
            Self::AlphaF16 | Self::Rgb565 | Self::Rgba4444 => Some(2),
            Self::Rgba8 | Self::Bgra8 | Self::Srgba8 => Some(4),
            Self::RgbaF16 => Some(8),
            Self::RgbaF32 => Some(16),
            Self::Etc1 => None,
        }
    }
}

impl TryFrom<peniko::ImageFormat> for TextureFormat {
    type Error = TextureError;

    fn try_from(format: peniko::ImageFormat) -> Result<Self, Self::Error> {
        match format {
            peniko::ImageFormat::Rgba8 => Ok(Self::Rgba8),
            peniko::ImageFormat::Bgra8 => Ok(Self::Bgra8),
            // `ImageFormat` is non-exhaustive.
            #[allow(unreachable_patterns)]
            other => Err(TextureError::UnsupportedFormat(other)),
        }
    }
}

/// Which corner of the texture holds the first row of texels.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, Debug)]
pub enum Origin {
    /// Rows are stored top to bottom.
    #[default]
    TopLeft,
    /// Rows are stored bottom to top, as for some render targets.
    BottomLeft,
}

/// A non-owning reference to a texture.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TextureRef {
    id: TextureId,
    width: u16,
    height: u16,
    format: TextureFormat,
    origin: Origin,
}

impl TextureRef {
    /// Describe an existing texture.
    ///
    /// Returns [`TextureError::EmptyTexture`] if either dimension is zero.
    pub fn new(
        id: TextureId,
        width: u16,
        height: u16,
        format: TextureFormat,
        origin: Origin,
    ) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::EmptyTexture { width, height });
        }
        Ok(Self {
            id,
            width,
            height,
            format,
            origin,
        })
    }

    /// The texture's identity.
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Width in texels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The pixel format.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// The storage origin.
    pub fn origin(&self) -> Origin {
        self.origin
    }
}
