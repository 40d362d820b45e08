// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete effects built on [`SingleTextureEffect`].

use core::any::Any;

use crate::coord_transform::CoordSpace;
use crate::invariant::InvariantOutput;
use crate::matrix::Matrix3;
use crate::processor::{FragmentProcessor, ProcessorKey};
use crate::sampler::{FilterMode, TextureParams};
use crate::single_texture::SingleTextureEffect;
use crate::texture::{TextureFormat, TextureRef};

/// Modulates the input color by a texel read from a texture.
#[derive(Clone, Debug)]
pub struct SimpleTextureEffect {
    base: SingleTextureEffect,
}

impl SimpleTextureEffect {
    /// Unfiltered, clamp-to-edge sampling.
    pub fn new(texture: TextureRef, matrix: Matrix3, source_space: CoordSpace) -> Self {
        Self {
            base: SingleTextureEffect::new(texture, matrix, source_space),
        }
    }

    /// Clamp-to-edge sampling with the given filter.
    pub fn with_filter(
        texture: TextureRef,
        matrix: Matrix3,
        filter: FilterMode,
        source_space: CoordSpace,
    ) -> Self {
        Self {
            base: SingleTextureEffect::with_filter(texture, matrix, filter, source_space),
        }
    }

    /// Sampling with explicit parameters.
    pub fn with_params(
        texture: TextureRef,
        matrix: Matrix3,
        params: TextureParams,
        source_space: CoordSpace,
    ) -> Self {
        Self {
            base: SingleTextureEffect::with_params(texture, matrix, params, source_space),
        }
    }

    /// The texture and transform state.
    pub fn base(&self) -> &SingleTextureEffect {
        &self.base
    }
}

impl FragmentProcessor for SimpleTextureEffect {
    fn name(&self) -> &'static str {
        "SimpleTextureEffect"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn num_textures(&self) -> usize {
        1
    }

    fn gen_key(&self, key: &mut ProcessorKey) {
        self.base.gen_key(key);
    }

    fn compute_invariant_output(&self, inout: &mut InvariantOutput) {
        self.base.update_invariant_output_for_modulation(inout);
    }

    fn on_is_equal(&self, other: &dyn FragmentProcessor) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| {
                self.base
                    .has_same_texture_params_matrix_and_source_coords(&other.base)
            })
    }
}

/// Conversion between premultiplied and unpremultiplied color.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, Debug)]
pub enum PmConversion {
    /// No conversion.
    #[default]
    None,
    /// Multiply the color channels by alpha.
    MulByAlpha,
    /// Divide the color channels by alpha.
    DivByAlpha,
}

/// Reads texels while swapping red and blue and/or converting premultiplication.
///
/// Used when copying between textures whose formats disagree on channel order or
/// alpha representation. Texels are read unfiltered.
#[derive(Clone, Debug)]
pub struct ConfigConversionEffect {
    base: SingleTextureEffect,
    swap_red_and_blue: bool,
    pm_conversion: PmConversion,
}

impl ConfigConversionEffect {
    /// Create a conversion reading `texture` through `matrix` in local space.
    ///
    /// # Panics
    ///
    /// Panics if the effect would not change anything, or if red and blue are swapped on a
    /// texture that isn't 8-bit RGBA or BGRA.
    pub fn new(
        texture: TextureRef,
        swap_red_and_blue: bool,
        pm_conversion: PmConversion,
        matrix: Matrix3,
    ) -> Self {
        assert!(
            swap_red_and_blue || pm_conversion != PmConversion::None,
            "a config conversion must swap channels or convert premultiplication"
        );
        assert!(
            !swap_red_and_blue
                || matches!(texture.format(), TextureFormat::Rgba8 | TextureFormat::Bgra8),
            "red and blue can only be swapped on 8-bit RGBA or BGRA textures, not {:?}",
            texture.format()
        );
        Self {
            base: SingleTextureEffect::new(texture, matrix, CoordSpace::Local),
            swap_red_and_blue,
            pm_conversion,
        }
    }

    /// The texture and transform state.
    pub fn base(&self) -> &SingleTextureEffect {
        &self.base
    }

    /// Whether red and blue are swapped.
    pub fn swap_red_and_blue(&self) -> bool {
        self.swap_red_and_blue
    }

    /// The premultiplication conversion applied.
    pub fn pm_conversion(&self) -> PmConversion {
        self.pm_conversion
    }
}

impl FragmentProcessor for ConfigConversionEffect {
    fn name(&self) -> &'static str {
        "ConfigConversionEffect"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn num_textures(&self) -> usize {
        1
    }

    fn gen_key(&self, key: &mut ProcessorKey) {
        self.base.gen_key(key);
        key.push(u32::from(self.swap_red_and_blue) | (self.pm_conversion as u32) << 1);
    }

    fn compute_invariant_output(&self, inout: &mut InvariantOutput) {
        // Channel swaps and alpha division defeat any per-component reasoning.
        inout.set_to_unknown();
    }

    fn on_is_equal(&self, other: &dyn FragmentProcessor) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| {
                self.base
                    .has_same_texture_params_matrix_and_source_coords(&other.base)
                    && self.swap_red_and_blue == other.swap_red_and_blue
                    && self.pm_conversion == other.pm_conversion
            })
    }
}
