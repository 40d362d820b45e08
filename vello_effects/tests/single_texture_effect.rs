// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Equality and invariant propagation of single-texture effects, as seen by the compiler.

// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
// Feel free to send a PR that solves one or more of these.
#![allow(
    clippy::missing_assert_message,
    clippy::allow_attributes_without_reason
)]

use vello_effects::peniko::Extend;
use vello_effects::peniko::color::PremulRgba8;
use vello_effects::peniko::kurbo::Affine;
use vello_effects::{
    ColorComponents, CoordSpace, FilterMode, FragmentProcessor, InvariantOutput, Matrix3, Origin,
    ProcessorCache, SimpleTextureEffect, SingleTextureEffect, Swizzle, TextureAccess,
    TextureFormat, TextureId, TextureParams, TextureRef, is_equal,
};

fn texture(id: u32, format: TextureFormat) -> TextureRef {
    TextureRef::new(TextureId::new(id).unwrap(), 128, 64, format, Origin::TopLeft).unwrap()
}

fn input(a: u8, valid_flags: ColorComponents) -> InvariantOutput {
    InvariantOutput::new(
        PremulRgba8 {
            r: a / 2,
            g: a / 2,
            b: a / 2,
            a,
        },
        valid_flags,
        false,
    )
}

/// The effect every variation below is compared against.
fn reference() -> SingleTextureEffect {
    SingleTextureEffect::with_params(
        texture(1, TextureFormat::Rgba8),
        Matrix3::from_affine(Affine::rotate(0.5).then_translate((4.0, 2.0).into())),
        TextureParams::with_extends(FilterMode::Bilinear, Extend::Pad, Extend::Repeat),
        CoordSpace::Local,
    )
}

#[test]
fn equality_is_reflexive_and_symmetric() {
    let a = reference();
    let b = SingleTextureEffect::new(
        texture(1, TextureFormat::Rgba8),
        Matrix3::IDENTITY,
        CoordSpace::Device,
    );
    assert!(a.has_same_texture_params_matrix_and_source_coords(&a));
    assert_eq!(
        a.has_same_texture_params_matrix_and_source_coords(&b),
        b.has_same_texture_params_matrix_and_source_coords(&a)
    );
    assert_eq!(
        a.has_same_texture_params_matrix_and_source_coords(&reference()),
        reference().has_same_texture_params_matrix_and_source_coords(&a)
    );
}

#[test]
fn identically_built_effects_are_equal() {
    assert!(reference().has_same_texture_params_matrix_and_source_coords(&reference()));
}

#[test]
fn each_parameter_distinguishes_effects() {
    let base = reference();
    let texture_ref = *base.texture();
    let matrix = *base.matrix();
    let params = *base.params();

    let other_matrix = SingleTextureEffect::with_params(
        texture_ref,
        matrix * Matrix3::scale(1.0, 1.5),
        params,
        CoordSpace::Local,
    );
    let other_space =
        SingleTextureEffect::with_params(texture_ref, matrix, params, CoordSpace::Device);
    let other_texture = SingleTextureEffect::with_params(
        texture(2, TextureFormat::Rgba8),
        matrix,
        params,
        CoordSpace::Local,
    );
    let other_filter = SingleTextureEffect::with_params(
        texture_ref,
        matrix,
        TextureParams {
            filter: FilterMode::MipMap,
            ..params
        },
        CoordSpace::Local,
    );
    let other_wrap = SingleTextureEffect::with_params(
        texture_ref,
        matrix,
        TextureParams {
            y_extend: Extend::Reflect,
            ..params
        },
        CoordSpace::Local,
    );

    for other in [other_matrix, other_space, other_texture, other_filter, other_wrap] {
        assert!(!base.has_same_texture_params_matrix_and_source_coords(&other));
        assert!(!other.has_same_texture_params_matrix_and_source_coords(&base));
    }
}

#[test]
fn swizzle_does_not_distinguish_effects() {
    let t = texture(3, TextureFormat::Rgba8);
    let params = TextureParams::default();
    let rgba = SingleTextureEffect::from_access(
        TextureAccess::with_swizzle(t, params, Swizzle::RGBA),
        Matrix3::IDENTITY,
        CoordSpace::Local,
    );
    let aaaa = SingleTextureEffect::from_access(
        TextureAccess::with_swizzle(t, params, Swizzle::AAAA),
        Matrix3::IDENTITY,
        CoordSpace::Local,
    );
    assert!(rgba.has_same_texture_params_matrix_and_source_coords(&aaaa));
}

#[test]
fn default_construction_matches_explicit_clamp_no_filter() {
    let t = texture(1, TextureFormat::Rgba8);
    let implicit = SingleTextureEffect::new(t, Matrix3::IDENTITY, CoordSpace::Local);
    let explicit = SingleTextureEffect::with_params(
        t,
        Matrix3::IDENTITY,
        TextureParams::with_extends(FilterMode::Nearest, Extend::Pad, Extend::Pad),
        CoordSpace::Local,
    );
    let filter_only = SingleTextureEffect::with_filter(
        t,
        Matrix3::IDENTITY,
        FilterMode::Nearest,
        CoordSpace::Local,
    );
    assert_eq!(implicit.texture_access(), explicit.texture_access());
    assert_eq!(implicit.texture_access(), filter_only.texture_access());
}

#[test]
fn opaque_rgb_texture_keeps_alpha_only() {
    let effect = SimpleTextureEffect::new(
        texture(1, TextureFormat::Rgb565),
        Matrix3::IDENTITY,
        CoordSpace::Local,
    );
    let mut inout = input(255, ColorComponents::RGBA);
    effect.compute_invariant_output(&mut inout);
    assert_eq!(inout.valid_flags(), ColorComponents::A);
}

#[test]
fn variable_alpha_texture_clears_validity() {
    let effect = SimpleTextureEffect::new(
        texture(1, TextureFormat::Rgba8),
        Matrix3::IDENTITY,
        CoordSpace::Local,
    );
    let mut inout = input(255, ColorComponents::RGBA);
    effect.compute_invariant_output(&mut inout);
    assert_eq!(inout.valid_flags(), ColorComponents::empty());
}

#[test]
fn translucent_input_clears_validity_for_every_format() {
    for format in [
        TextureFormat::Rgb565,
        TextureFormat::Etc1,
        TextureFormat::Rgba8,
        TextureFormat::Alpha8,
    ] {
        let effect =
            SimpleTextureEffect::new(texture(1, format), Matrix3::IDENTITY, CoordSpace::Local);
        // Alpha known but not opaque.
        let mut inout = input(128, ColorComponents::RGBA);
        effect.compute_invariant_output(&mut inout);
        assert!(inout.valid_flags().is_empty(), "{format:?}");

        // Opaque value, but alpha isn't known.
        let mut inout = input(255, ColorComponents::R | ColorComponents::G);
        effect.compute_invariant_output(&mut inout);
        assert!(inout.valid_flags().is_empty(), "{format:?}");
    }
}

#[test]
fn modulation_never_asserts_opacity_by_itself() {
    let effect = SimpleTextureEffect::new(
        texture(1, TextureFormat::Rgb565),
        Matrix3::IDENTITY,
        CoordSpace::Local,
    );
    let mut inout = InvariantOutput::unknown();
    effect.compute_invariant_output(&mut inout);
    assert!(!inout.is_opaque());
}

#[test]
fn modulation_is_a_fixed_point() {
    for (format, a) in [
        (TextureFormat::Rgb565, 255),
        (TextureFormat::Rgba8, 255),
        (TextureFormat::Rgb565, 10),
    ] {
        let effect =
            SimpleTextureEffect::new(texture(1, format), Matrix3::IDENTITY, CoordSpace::Local);
        let mut once = input(a, ColorComponents::RGBA);
        effect.compute_invariant_output(&mut once);
        let mut twice = once;
        effect.compute_invariant_output(&mut twice);
        assert_eq!(once, twice);
    }
}

#[test]
fn cache_deduplicates_through_processor_equality() {
    let t = texture(1, TextureFormat::Rgba8);
    let make = |space| Box::new(SimpleTextureEffect::new(t, Matrix3::IDENTITY, space));
    let mut cache = ProcessorCache::new();
    let local = cache.intern(make(CoordSpace::Local));
    let device = cache.intern(make(CoordSpace::Device));
    assert_ne!(local, device);
    assert_eq!(cache.intern(make(CoordSpace::Local)), local);

    let interned = cache.get(local).unwrap();
    assert!(is_equal(interned, make(CoordSpace::Local).as_ref()));
}
