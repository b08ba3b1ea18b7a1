//! Reference Lifecycle
//!
//! Strings are shared by reference count. `acquire` extends a string's
//! lifetime, `release` ends one share and frees the descriptor and its
//! payload at zero.
//!
//! The counter saturates instead of wrapping: at the ceiling the engine
//! first invalidates all property-lookup caches and runs a full GC pass
//! (external holders may release their references), and only if the
//! counter is still pinned does it hand out a deep copy with a fresh
//! counter, leaving the original untouched.

use crate::heap::StringHeap;
use crate::value::{self, CHUNK_HEADER_SIZE, Container, StringDesc, StringRef};

/// Ceiling of the reference counter.
const REFS_MAX: u32 = u32::MAX;

impl StringHeap {
    /// Take another reference to `s`.
    ///
    /// Returns `s` itself, or a deep copy when the counter is saturated
    /// and the collector pass freed nothing.
    pub fn acquire(&mut self, s: StringRef) -> StringRef {
        debug_assert!(self.desc(s).refs > 0);

        if self.desc(s).refs == REFS_MAX {
            tracing::debug!("string reference counter saturated, running collector");

            if let Some(mut hooks) = self.gc.take() {
                hooks.invalidate_lookup_caches(self);
                hooks.run_gc(self);
                self.gc = Some(hooks);
            }

            if self.desc(s).refs == REFS_MAX {
                // nothing was released; share a copy instead
                return self.copy_string(s);
            }

            self.desc_mut(s).refs += 1;
            return s;
        }

        self.desc_mut(s).refs += 1;
        s
    }

    /// Drop one reference to `s`, freeing it at zero.
    pub fn release(&mut self, s: StringRef) {
        {
            let desc = self.desc_mut(s);
            debug_assert!(desc.refs > 0, "release of a dead string");
            desc.refs -= 1;
            if desc.refs != 0 {
                return;
            }
        }

        // payload first, descriptor record last
        let desc = self.desc(s).clone();
        match desc.container {
            Container::HeapChunk => {
                let block = desc.chunk_block();
                let data_size =
                    value::chunk_size(self.blocks.bytes(block)) as usize + CHUNK_HEADER_SIZE;
                self.blocks.free(block, data_size);
            }
            Container::HeapNumber => {
                self.numbers.free(desc.number_cell());
            }
            Container::Literal
            | Container::Uint32
            | Container::Magic
            | Container::MagicEx => {
                // nothing owned outside the descriptor
            }
        }

        self.descs.free(s.0);
    }

    /// Deep-copy `s` into a fresh descriptor with one reference.
    fn copy_string(&mut self, s: StringRef) -> StringRef {
        debug_assert!(self.desc(s).refs > 0);

        let desc = self.desc(s).clone();
        let copy = match desc.container {
            Container::Literal
            | Container::Uint32
            | Container::Magic
            | Container::MagicEx => {
                let mut fresh = desc;
                fresh.refs = 1;
                self.alloc_desc(fresh)
            }
            Container::HeapNumber => {
                // re-canonicalize through the number constructor
                let num = *self.numbers.get(desc.number_cell());
                self.new_string_from_number(num)
            }
            Container::HeapChunk => {
                let data = self.blocks.bytes(desc.chunk_block()).to_vec();
                let block = self.blocks.alloc(data.len());
                self.blocks.bytes_mut(block).copy_from_slice(&data);
                self.alloc_desc(StringDesc::heap_chunk(desc.hash, block))
            }
        };

        debug_assert!(self.strings_equal(s, copy));
        copy
    }

    /// Assert that `s` is a transient descriptor: one reference and no
    /// owned heap payload. Transients are built for a single comparison
    /// and must never be acquired.
    pub fn debug_assert_transient(&self, s: StringRef) {
        if cfg!(debug_assertions) {
            let desc = self.desc(s);
            debug_assert_eq!(desc.refs, 1, "transient string was acquired");
            debug_assert!(
                matches!(
                    desc.container,
                    Container::Literal
                        | Container::Magic
                        | Container::MagicEx
                        | Container::Uint32
                ),
                "transient string owns heap payload"
            );
        }
    }
}
