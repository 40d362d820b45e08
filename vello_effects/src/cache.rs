// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deduplication of equal fragment processors.
//!
//! Equal processors generate the same shader and read the same resources, so the compiler
//! only needs to build and bind one of them. [`ProcessorCache`] interns processors and hands
//! out a shared [`ProcessorHandle`] for every processor equal to one it has already seen.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::processor::{FragmentProcessor, ProcessorKey, is_equal, processor_key};

/// Identifies an interned processor within a [`ProcessorCache`].
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct ProcessorHandle(u32);

impl ProcessorHandle {
    /// The index of the processor in interning order.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Interns fragment processors by equality.
#[derive(Debug, Default)]
pub struct ProcessorCache {
    processors: Vec<Box<dyn FragmentProcessor>>,
    /// Equal processors always have equal keys, so only one bucket needs to be searched.
    buckets: HashMap<ProcessorKey, SmallVec<[ProcessorHandle; 1]>>,
}

impl ProcessorCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle of a processor equal to `processor`, inserting it if there is none.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX` distinct processors are interned.
    pub fn intern(&mut self, processor: Box<dyn FragmentProcessor>) -> ProcessorHandle {
        let key = processor_key(processor.as_ref());
        let bucket = self.buckets.entry(key).or_default();
        if let Some(&handle) = bucket
            .iter()
            .find(|handle| is_equal(self.processors[handle.index()].as_ref(), processor.as_ref()))
        {
            log::debug!("reusing {} as {handle:?}", processor.name());
            return handle;
        }

        let index = u32::try_from(self.processors.len())
            .expect("exceeded the maximum number of processors");
        let handle = ProcessorHandle(index);
        log::debug!("interning {} as {handle:?}", processor.name());
        bucket.push(handle);
        self.processors.push(processor);
        handle
    }

    /// The processor behind `handle`, if it belongs to this cache.
    pub fn get(&self, handle: ProcessorHandle) -> Option<&dyn FragmentProcessor> {
        self.processors.get(handle.index()).map(Box::as_ref)
    }

    /// The number of distinct processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether no processor has been interned.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Remove every processor. Previously returned handles become invalid.
    pub fn clear(&mut self) {
        self.processors.clear();
        self.buckets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::ProcessorCache;
    use crate::coord_transform::CoordSpace;
    use crate::processor::is_equal;
    use crate::effects::SimpleTextureEffect;
    use crate::matrix::Matrix3;
    use crate::texture::{Origin, TextureFormat, TextureId, TextureRef};

    fn effect(matrix: Matrix3) -> Box<SimpleTextureEffect> {
        let texture = TextureRef::new(
            TextureId::new(1).unwrap(),
            8,
            8,
            TextureFormat::Rgba8,
            Origin::TopLeft,
        )
        .unwrap();
        Box::new(SimpleTextureEffect::new(texture, matrix, CoordSpace::Local))
    }

    #[test]
    fn equal_processors_share_a_handle() {
        let mut cache = ProcessorCache::new();
        let a = cache.intern(effect(Matrix3::IDENTITY));
        let b = cache.intern(effect(Matrix3::IDENTITY));
        let c = cache.intern(effect(Matrix3::scale(2.0, 2.0)));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(c).map(|p| p.name()), Some("SimpleTextureEffect"));
    }

    #[test]
    fn same_id_with_different_descriptions_is_not_shared() {
        let texture = |format, origin| {
            TextureRef::new(TextureId::new(1).unwrap(), 8, 8, format, origin).unwrap()
        };
        let effect = |texture| {
            Box::new(SimpleTextureEffect::new(
                texture,
                Matrix3::IDENTITY,
                CoordSpace::Local,
            ))
        };
        let top = texture(TextureFormat::Rgba8, Origin::TopLeft);
        let bottom = texture(TextureFormat::Rgba8, Origin::BottomLeft);
        let opaque = texture(TextureFormat::Rgb565, Origin::TopLeft);

        assert!(!is_equal(effect(top).as_ref(), effect(bottom).as_ref()));
        assert!(!is_equal(effect(top).as_ref(), effect(opaque).as_ref()));

        let mut cache = ProcessorCache::new();
        let a = cache.intern(effect(top));
        let b = cache.intern(effect(bottom));
        let c = cache.intern(effect(opaque));
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.intern(effect(bottom)), b);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn clear() {
        let mut cache = ProcessorCache::new();
        let handle = cache.intern(effect(Matrix3::IDENTITY));
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(handle).is_none());
    }
}
