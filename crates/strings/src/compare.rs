//! Equality and Relational Compare
//!
//! Equality is two-tier. The fast path needs no bytes at all: different
//! hashes can never be equal, and a matching `(container, payload)` word
//! is the same identity. The slow path runs only on a hash match that the
//! word check could not settle; interned identities resolve immediately
//! (distinct ids imply distinct content by construction), heap variants
//! compare their stored values, and only the cross-container case touches
//! the bytes, borrowing them directly where a container stores them and
//! rendering through scratch where it does not.
//!
//! Relational compare is plain lexicographic less-than over the
//! materialized bytes, delegated to the codec's unit-aware comparator.

use lark_core::codec;
use lark_core::number;

use crate::heap::StringHeap;
use crate::render::Scratch;
use crate::value::{self, Container, StringRef};

impl StringHeap {
    /// Exact content equality.
    pub fn strings_equal(&self, a: StringRef, b: StringRef) -> bool {
        let desc_a = self.desc(a);
        let desc_b = self.desc(b);

        if desc_a.hash != desc_b.hash {
            return false;
        }
        if desc_a.container == desc_b.container
            && desc_a.payload_word() == desc_b.payload_word()
        {
            return true;
        }
        self.strings_equal_slowpath(a, b)
    }

    /// Fast comparison for callers that already know the hashes match
    /// (the property-lookup cache). May answer `false` for equal strings
    /// of different identities; never answers `true` wrongly.
    pub fn strings_equal_assuming_hashes(&self, a: StringRef, b: StringRef) -> bool {
        let desc_a = self.desc(a);
        let desc_b = self.desc(b);
        debug_assert_eq!(desc_a.hash, desc_b.hash);

        desc_a.container == desc_b.container && desc_a.payload_word() == desc_b.payload_word()
    }

    /// True when `a` sorts strictly before `b`.
    pub fn string_less_than(&self, a: StringRef, b: StringRef) -> bool {
        if self.strings_equal(a, b) {
            return false;
        }

        let mut scratch_a = Scratch::new();
        let mut scratch_b = Scratch::new();
        codec::compare_less(
            self.string_bytes(a, &mut scratch_a),
            self.string_bytes(b, &mut scratch_b),
        )
    }

    fn strings_equal_slowpath(&self, a: StringRef, b: StringRef) -> bool {
        let desc_a = self.desc(a);
        let desc_b = self.desc(b);

        if desc_a.container == desc_b.container {
            match desc_a.container {
                Container::Literal
                | Container::Magic
                | Container::MagicEx
                | Container::Uint32 => {
                    // interned identities: distinct payloads, distinct content
                    debug_assert_ne!(desc_a.payload_word(), desc_b.payload_word());
                    return false;
                }
                Container::HeapNumber | Container::HeapChunk => {}
            }
        }

        let size = self.string_size(a);
        if size != self.string_size(b) {
            return false;
        }
        if size == 0 {
            return true;
        }

        if desc_a.container == desc_b.container {
            match desc_a.container {
                Container::HeapNumber => {
                    let num_a = *self.numbers.get(desc_a.number_cell());
                    let num_b = *self.numbers.get(desc_b.number_cell());
                    if number::is_nan(num_a) && number::is_nan(num_b) {
                        return true;
                    }
                    return num_a == num_b;
                }
                Container::HeapChunk => {
                    let block_a = self.blocks.bytes(desc_a.chunk_block());
                    let block_b = self.blocks.bytes(desc_b.chunk_block());
                    if value::chunk_unit_length(block_a) != value::chunk_unit_length(block_b) {
                        return false;
                    }
                    return value::chunk_payload(block_a) == value::chunk_payload(block_b);
                }
                _ => unreachable!("interned identities already resolved"),
            }
        }

        let mut scratch_a = Scratch::new();
        let mut scratch_b = Scratch::new();
        self.string_bytes(a, &mut scratch_a) == self.string_bytes(b, &mut scratch_b)
    }
}
