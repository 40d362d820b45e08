// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinate transform applied before a texture is sampled.

use crate::matrix::Matrix3;
use crate::sampler::FilterMode;
use crate::texture::{Origin, TextureRef};

/// Textures whose larger dimension exceeds this many texels need high precision
/// coordinates when filtered.
const MEDIUM_PRECISION_MAX_DIMENSION: u16 = 1 << 8;

/// The coordinate space a [`CoordTransform`] reads its input from.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, Debug)]
pub enum CoordSpace {
    /// The local coordinates of the geometry being drawn.
    #[default]
    Local,
    /// Device (pixel) coordinates.
    Device,
}

/// Float precision the generated shader should use for transformed coordinates.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, Debug)]
pub enum Precision {
    /// The backend's default fragment precision.
    #[default]
    Default,
    /// Full 32-bit float precision.
    High,
}

/// A matrix applied to coordinates from a [`CoordSpace`] to produce texture coordinates.
///
/// A transform is immutable once built. Changing the mapping means building a new
/// transform, and with it a new effect.
///
/// Transforms are equal when their matrices are exactly equal and they read from the same
/// space. The texture derived [`reverse_y`](Self::reverse_y) and
/// [`precision`](Self::precision) are not compared.
#[derive(Clone, Copy, Default, Debug)]
pub struct CoordTransform {
    matrix: Matrix3,
    source_space: CoordSpace,
    reverse_y: bool,
    precision: Precision,
}

impl CoordTransform {
    /// A transform that isn't tied to a texture.
    pub fn new(source_space: CoordSpace, matrix: Matrix3) -> Self {
        Self {
            matrix,
            source_space,
            reverse_y: false,
            precision: Precision::Default,
        }
    }

    /// A transform producing coordinates for `texture`.
    ///
    /// Textures stored bottom-up have their y axis reversed when sampled, and large
    /// filtered textures request high precision coordinates.
    pub fn for_texture(
        source_space: CoordSpace,
        matrix: Matrix3,
        texture: &TextureRef,
        filter: FilterMode,
    ) -> Self {
        let max_dimension = texture.width().max(texture.height());
        let precision =
            if filter != FilterMode::Nearest && max_dimension > MEDIUM_PRECISION_MAX_DIMENSION {
                log::debug!(
                    "using high precision coordinates for {}x{} texture {:?}",
                    texture.width(),
                    texture.height(),
                    texture.id()
                );
                Precision::High
            } else {
                Precision::Default
            };
        Self {
            matrix,
            source_space,
            reverse_y: texture.origin() == Origin::BottomLeft,
            precision,
        }
    }

    /// The transform matrix.
    pub fn matrix(&self) -> &Matrix3 {
        &self.matrix
    }

    /// The space the input coordinates come from.
    pub fn source_space(&self) -> CoordSpace {
        self.source_space
    }

    /// Whether the y axis is flipped after transforming.
    pub fn reverse_y(&self) -> bool {
        self.reverse_y
    }

    /// The requested coordinate precision.
    pub fn precision(&self) -> Precision {
        self.precision
    }
}

impl PartialEq for CoordTransform {
    fn eq(&self, other: &Self) -> bool {
        self.source_space == other.source_space && self.matrix.cheap_eq(&other.matrix)
    }
}

impl Eq for CoordTransform {}
