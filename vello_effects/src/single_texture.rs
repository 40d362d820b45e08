// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared state of effects that sample a single texture.

use crate::coord_transform::{CoordSpace, CoordTransform, Precision};
use crate::invariant::{ColorComponents, InvariantOutput};
use crate::matrix::Matrix3;
use crate::processor::ProcessorKey;
use crate::sampler::{FilterMode, TextureParams, extend_bits};
use crate::texture::TextureRef;
use crate::texture_access::{Swizzle, TextureAccess};

/// One texture read through one coordinate transform.
///
/// Concrete effects embed a `SingleTextureEffect` and delegate the texture and transform
/// parts of the [`FragmentProcessor`](crate::FragmentProcessor) contract to it. It never
/// holds more than one texture; effects reading several textures need a different
/// building block.
///
/// The state is fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct SingleTextureEffect {
    coord_transform: CoordTransform,
    texture_access: TextureAccess,
}

impl SingleTextureEffect {
    /// Unfiltered, clamp-to-edge sampling of `texture`.
    pub fn new(texture: TextureRef, matrix: Matrix3, source_space: CoordSpace) -> Self {
        Self::with_params(
            texture,
            matrix,
            TextureParams::clamp_no_filter(),
            source_space,
        )
    }

    /// Clamp-to-edge sampling of `texture` with the given filter.
    pub fn with_filter(
        texture: TextureRef,
        matrix: Matrix3,
        filter: FilterMode,
        source_space: CoordSpace,
    ) -> Self {
        Self::with_params(texture, matrix, TextureParams::new(filter), source_space)
    }

    /// Sampling of `texture` with full control over the sampling parameters.
    pub fn with_params(
        texture: TextureRef,
        matrix: Matrix3,
        params: TextureParams,
        source_space: CoordSpace,
    ) -> Self {
        Self::from_access(TextureAccess::new(texture, params), matrix, source_space)
    }

    /// Sampling through an already built [`TextureAccess`], e.g. one with an explicit swizzle.
    pub fn from_access(
        texture_access: TextureAccess,
        matrix: Matrix3,
        source_space: CoordSpace,
    ) -> Self {
        let texture = texture_access.texture();
        let params = texture_access.params();
        log::trace!(
            "single texture effect for {:?}: {:?} from {:?} space",
            texture.id(),
            params,
            source_space
        );
        Self {
            coord_transform: CoordTransform::for_texture(
                source_space,
                matrix,
                texture,
                params.filter,
            ),
            texture_access,
        }
    }

    /// The sampled texture.
    pub fn texture(&self) -> &TextureRef {
        self.texture_access.texture()
    }

    /// The texture and the parameters it is sampled with.
    pub fn texture_access(&self) -> &TextureAccess {
        &self.texture_access
    }

    /// The transform producing texture coordinates.
    pub fn coord_transform(&self) -> &CoordTransform {
        &self.coord_transform
    }

    /// The transform's matrix.
    pub fn matrix(&self) -> &Matrix3 {
        self.coord_transform.matrix()
    }

    /// The space texture coordinates are derived from.
    pub fn source_space(&self) -> CoordSpace {
        self.coord_transform.source_space()
    }

    /// The sampling parameters.
    pub fn params(&self) -> &TextureParams {
        self.texture_access.params()
    }

    /// Helper for the texture and transform half of an effect's equality test.
    ///
    /// True when both effects sample the same texture with the same filter and wrap modes,
    /// through exactly equal matrices reading from the same coordinate space. Swizzles are
    /// not compared because they follow from the texture.
    pub fn has_same_texture_params_matrix_and_source_coords(&self, other: &Self) -> bool {
        self.texture_access == other.texture_access
            && self.coord_transform.matrix().cheap_eq(other.coord_transform.matrix())
            && self.coord_transform.source_space() == other.coord_transform.source_space()
    }

    /// Helper for effects whose output is the input color modulated by the sampled texel.
    ///
    /// The sampled value varies, so at most alpha can stay known: it does when the input is
    /// known opaque and the texture format is opaque. Otherwise nothing is known.
    pub fn update_invariant_output_for_modulation(&self, inout: &mut InvariantOutput) {
        if inout.is_opaque() && self.texture().format().is_opaque() {
            inout.set_valid_flags(ColorComponents::A);
        } else {
            inout.set_valid_flags(ColorComponents::empty());
        }
    }

    /// Append the parts of the shader variant key determined by the texture and transform.
    ///
    /// The matrix values are uniforms and do not contribute, only whether it has perspective.
    /// The swizzle contributes as inferred from the texture format, so effects that compare
    /// equal always produce equal keys.
    pub fn gen_key(&self, key: &mut ProcessorKey) {
        let transform = &self.coord_transform;
        let params = self.texture_access.params();
        let transform_bits = u32::from(transform.source_space() == CoordSpace::Device)
            | u32::from(transform.matrix().has_perspective()) << 1
            | u32::from(transform.reverse_y()) << 2
            | u32::from(transform.precision() == Precision::High) << 3;
        let sampler_bits = params.filter as u32
            | extend_bits(params.x_extend) << 2
            | extend_bits(params.y_extend) << 4;
        key.push(transform_bits | sampler_bits << 8);
        key.push(u32::from(Swizzle::for_format(self.texture().format()).to_key()));
    }
}
