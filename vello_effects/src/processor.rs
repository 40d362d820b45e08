// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract between fragment processors and the effect-graph compiler.

use core::any::Any;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::invariant::InvariantOutput;

/// Words identifying the shader code a processor generates.
///
/// Processors that generate the same code produce the same key, even when they differ in
/// uniform values such as their matrix.
pub type ProcessorKey = SmallVec<[u32; 8]>;

/// A stage of a fragment program.
///
/// The compiler relies on two capabilities of every processor: an exact equality test,
/// used to reuse compiled programs, and a conservative description of its output color.
pub trait FragmentProcessor: Debug + 'static {
    /// A short name for the processor's concrete type.
    fn name(&self) -> &'static str;

    /// Support for downcasting in [`on_is_equal`](Self::on_is_equal).
    fn as_any(&self) -> &dyn Any;

    /// The number of textures the processor samples.
    fn num_textures(&self) -> usize {
        0
    }

    /// Append the words that select this processor's shader variant.
    fn gen_key(&self, key: &mut ProcessorKey);

    /// Narrow `inout` to what is known about this processor's output.
    fn compute_invariant_output(&self, inout: &mut InvariantOutput);

    /// Compare against `other`, which [`is_equal`] guarantees has the same concrete type.
    fn on_is_equal(&self, other: &dyn FragmentProcessor) -> bool;
}

/// Whether two processors are interchangeable in a compiled program.
pub fn is_equal(a: &dyn FragmentProcessor, b: &dyn FragmentProcessor) -> bool {
    a.as_any().type_id() == b.as_any().type_id()
        && a.num_textures() == b.num_textures()
        && a.on_is_equal(b)
}

/// The full key of a processor: a class word derived from its name, then its own words.
pub fn processor_key(processor: &dyn FragmentProcessor) -> ProcessorKey {
    let mut key = ProcessorKey::new();
    key.push(class_id(processor.name()));
    processor.gen_key(&mut key);
    key
}

/// FNV-1a over the processor name.
fn class_id(name: &str) -> u32 {
    name.bytes().fold(0x811c_9dc5, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}
