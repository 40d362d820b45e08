// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Building blocks for fragment effects that sample exactly one texture.
//!
//! An effect-graph compiler assembles many small fragment stages into one GPU program.
//! The stages in this crate each read a single texture through a [`CoordTransform`] and
//! combine the sampled value with their input color. [`SingleTextureEffect`] is the shared
//! piece every such stage embeds: it owns the transform and the [`TextureAccess`], and it
//! provides the two helpers concrete effects use to implement their part of the
//! [`FragmentProcessor`] contract:
//!
//! - [`SingleTextureEffect::has_same_texture_params_matrix_and_source_coords`] covers the
//!   texture and transform half of equality, which the compiler uses to deduplicate compiled
//!   shader variants (see [`ProcessorCache`]).
//! - [`SingleTextureEffect::update_invariant_output_for_modulation`] narrows an
//!   [`InvariantOutput`] for effects whose output is the input color modulated by the texture.
//!
//! Nothing here renders, owns GPU memory or schedules work. Textures are referenced through
//! [`TextureRef`] handles whose lifetime is managed elsewhere.
//!
//! # Example
//!
//! ```
//! use vello_effects::{
//!     ColorComponents, CoordSpace, InvariantOutput, Matrix3, Origin, SimpleTextureEffect,
//!     TextureFormat, TextureId, TextureRef,
//! };
//! use vello_effects::peniko::color::PremulRgba8;
//!
//! let id = TextureId::new(7).unwrap();
//! let texture = TextureRef::new(id, 64, 64, TextureFormat::Rgb565, Origin::TopLeft).unwrap();
//! let effect = SimpleTextureEffect::new(texture, Matrix3::scale(0.5, 0.5), CoordSpace::Local);
//!
//! let mut inout = InvariantOutput::new(
//!     PremulRgba8 { r: 0, g: 0, b: 0, a: 255 },
//!     ColorComponents::A,
//!     false,
//! );
//! effect.base().update_invariant_output_for_modulation(&mut inout);
//! assert_eq!(inout.valid_flags(), ColorComponents::A);
//! ```
//!
//! # Features
//!
//! - `bytemuck`: Implement [`bytemuck::Pod`] for [`Matrix3`] so it can be written directly
//!   into uniform buffers.
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod cache;
pub mod coord_transform;
pub mod effects;
pub mod error;
pub mod invariant;
pub mod matrix;
pub mod processor;
pub mod sampler;
pub mod single_texture;
pub mod texture;
pub mod texture_access;

pub use peniko;
pub use peniko::kurbo;

pub use cache::{ProcessorCache, ProcessorHandle};
pub use coord_transform::{CoordSpace, CoordTransform, Precision};
pub use effects::{ConfigConversionEffect, PmConversion, SimpleTextureEffect};
pub use error::TextureError;
pub use invariant::{ColorComponents, InvariantOutput};
pub use matrix::Matrix3;
pub use processor::{FragmentProcessor, ProcessorKey, is_equal};
pub use sampler::{FilterMode, TextureParams};
pub use single_texture::SingleTextureEffect;
pub use texture::{Origin, TextureFormat, TextureId, TextureRef};
pub use texture_access::{Channel, Swizzle, TextureAccess};
