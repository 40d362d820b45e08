// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A texture together with the way it is sampled.

use core::fmt;

use crate::sampler::TextureParams;
use crate::texture::{TextureFormat, TextureRef};

/// A color channel of a sampled texel.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
    /// Alpha.
    A,
}

impl Channel {
    fn as_char(self) -> char {
        match self {
            Self::R => 'r',
            Self::G => 'g',
            Self::B => 'b',
            Self::A => 'a',
        }
    }
}

/// Remapping applied to the channels of a sampled texel.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub struct Swizzle([Channel; 4]);

impl Swizzle {
    /// The identity swizzle.
    pub const RGBA: Self = Self([Channel::R, Channel::G, Channel::B, Channel::A]);
    /// Broadcast alpha into every channel.
    pub const AAAA: Self = Self([Channel::A, Channel::A, Channel::A, Channel::A]);

    /// Create a swizzle from the source channel of each output channel.
    pub const fn new(channels: [Channel; 4]) -> Self {
        Self(channels)
    }

    /// The swizzle implied by a texture format.
    ///
    /// Alpha-only textures are stored in a single channel that must be read as alpha.
    pub fn for_format(format: TextureFormat) -> Self {
        if format.is_alpha_only() {
            Self::AAAA
        } else {
            Self::RGBA
        }
    }

    /// The source channel of each output channel.
    pub fn channels(&self) -> [Channel; 4] {
        self.0
    }

    /// Packs the swizzle into a byte, two bits per channel.
    pub fn to_key(&self) -> u8 {
        self.0.iter().enumerate().fold(0, |key, (i, channel)| {
            let bits = match channel {
                Channel::R => 0,
                Channel::G => 1,
                Channel::B => 2,
                Channel::A => 3,
            };
            key | (bits << (2 * i))
        })
    }
}

impl fmt::Display for Swizzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in self.0 {
            write!(f, "{}", channel.as_char())?;
        }
        Ok(())
    }
}

/// A reference to a texture plus the parameters used to sample it.
///
/// Two accesses are equal when they read the same texture, described by the same
/// [`TextureRef`], with the same [`TextureParams`]. The swizzle is not compared: it is
/// inferred from the texture's format, so accesses to the same texture agree on it.
#[derive(Clone, Copy, Debug)]
pub struct TextureAccess {
    texture: TextureRef,
    params: TextureParams,
    swizzle: Swizzle,
}

impl TextureAccess {
    /// Access `texture` with the swizzle implied by its format.
    pub fn new(texture: TextureRef, params: TextureParams) -> Self {
        Self::with_swizzle(texture, params, Swizzle::for_format(texture.format()))
    }

    /// Access `texture` with an explicit swizzle.
    pub fn with_swizzle(texture: TextureRef, params: TextureParams, swizzle: Swizzle) -> Self {
        Self {
            texture,
            params,
            swizzle,
        }
    }

    /// The sampled texture.
    pub fn texture(&self) -> &TextureRef {
        &self.texture
    }

    /// The sampling parameters.
    pub fn params(&self) -> &TextureParams {
        &self.params
    }

    /// The channel swizzle.
    pub fn swizzle(&self) -> Swizzle {
        self.swizzle
    }
}

impl PartialEq for TextureAccess {
    fn eq(&self, other: &Self) -> bool {
        self.texture == other.texture && self.params == other.params
    }
}

impl Eq for TextureAccess {}
