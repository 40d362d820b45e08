// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Known facts about the color flowing through a chain of fragment processors.
//!
//! The compiler seeds an [`InvariantOutput`] with what it knows about the input color and
//! passes it to each processor in turn. Each processor may only narrow what is known: a
//! component stays valid only if the processor can prove its output value. Downstream
//! stages use the result to skip work, e.g. blending when the final color is opaque.

use bitflags::bitflags;
use peniko::color::PremulRgba8;

bitflags! {
    /// The color components whose value is known.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ColorComponents: u8 {
        /// Red.
        const R = 1 << 0;
        /// Green.
        const G = 1 << 1;
        /// Blue.
        const B = 1 << 2;
        /// Alpha.
        const A = 1 << 3;

        /// All four components.
        const RGBA = Self::R.bits() | Self::G.bits() | Self::B.bits() | Self::A.bits();
    }
}

/// The compiler's knowledge of a color at one point in a processor chain.
///
/// Only the components in [`valid_flags`](Self::valid_flags) carry meaning in
/// [`color`](Self::color).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvariantOutput {
    color: PremulRgba8,
    valid_flags: ColorComponents,
    is_single_component: bool,
    will_use_input_color: bool,
}

impl InvariantOutput {
    /// Create an invariant output from a color and the components known to be valid.
    pub fn new(
        color: PremulRgba8,
        valid_flags: ColorComponents,
        is_single_component: bool,
    ) -> Self {
        Self {
            color,
            valid_flags,
            is_single_component,
            will_use_input_color: true,
        }
    }

    /// Nothing is known about the color.
    pub fn unknown() -> Self {
        Self::new(
            PremulRgba8 {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            },
            ColorComponents::empty(),
            false,
        )
    }

    /// The known color. Components outside [`valid_flags`](Self::valid_flags) are meaningless.
    pub fn color(&self) -> PremulRgba8 {
        self.color
    }

    /// The components whose value is known.
    pub fn valid_flags(&self) -> ColorComponents {
        self.valid_flags
    }

    /// Whether the color is known to be a single value broadcast to all channels.
    pub fn is_single_component(&self) -> bool {
        self.is_single_component
    }

    /// Whether the processor reads its input color.
    pub fn will_use_input_color(&self) -> bool {
        self.will_use_input_color
    }

    /// Whether alpha is known to be fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.valid_flags.contains(ColorComponents::A) && self.color.a == u8::MAX
    }

    /// Whether the color is known to be opaque white.
    pub fn is_solid_white(&self) -> bool {
        let PremulRgba8 { r, g, b, a } = self.color;
        self.valid_flags == ColorComponents::RGBA && [r, g, b, a] == [u8::MAX; 4]
    }

    /// Replace the known components.
    ///
    /// This is how a processor states exactly what it can prove about its output.
    pub fn set_valid_flags(&mut self, valid_flags: ColorComponents) {
        self.valid_flags = valid_flags;
    }

    /// Forget everything about the color.
    pub fn set_to_unknown(&mut self) {
        self.valid_flags = ColorComponents::empty();
        self.is_single_component = false;
    }

    /// The output is a color unrelated to the input; the input is not read.
    pub fn set_to_other(&mut self, valid_flags: ColorComponents, color: PremulRgba8) {
        self.color = color;
        self.valid_flags = valid_flags;
        self.is_single_component = false;
        self.will_use_input_color = false;
    }

    /// Multiply by an unknown four-component value.
    pub fn mul_by_unknown_four_components(&mut self) {
        self.set_to_unknown();
    }

    /// Multiply by an unknown value broadcast to all four components.
    ///
    /// Zero stays zero, so a fully transparent input remains known.
    pub fn mul_by_unknown_single_component(&mut self) {
        let PremulRgba8 { r, g, b, a } = self.color;
        if self.valid_flags == ColorComponents::RGBA && [r, g, b, a] == [0; 4] {
            return;
        }
        self.valid_flags = ColorComponents::empty();
    }
}
