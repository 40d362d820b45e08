// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors that can occur when describing textures.

use thiserror::Error;

/// Errors that occur when building a [`TextureRef`](crate::TextureRef) or converting
/// an image description into one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureError {
    /// A texture must have at least one texel in each direction.
    #[error("texture has an empty extent ({width}x{height})")]
    EmptyTexture {
        /// The requested width.
        width: u16,
        /// The requested height.
        height: u16,
    },
    /// The image format has no texture format counterpart.
    #[error("image format {0:?} can't be sampled by a texture effect")]
    UnsupportedFormat(peniko::ImageFormat),
}
