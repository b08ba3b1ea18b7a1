//! Numeric Interplay
//!
//! Strings convert to numbers (property keys arrive as text, arithmetic
//! wants numbers) and some strings *are* canonical array indices. A string
//! is an array index iff it equals the decimal form of a u32 below the
//! reserved ceiling `u32::MAX`, which the object model keeps as its
//! not-an-index sentinel.

use lark_core::number;

use crate::heap::StringHeap;
use crate::render::Scratch;
use crate::value::{Container, StringRef};

/// Largest u32 that is *not* a valid array index.
pub const ARRAY_INDEX_SENTINEL: u32 = u32::MAX;

impl StringHeap {
    /// Numeric value of the logical string.
    ///
    /// Packed and heap numbers answer from the descriptor; every other
    /// container parses its text (the empty string is zero).
    pub fn string_to_number(&self, s: StringRef) -> f64 {
        let desc = self.desc(s);
        match desc.container {
            Container::Uint32 => number::uint32_to_number(desc.uint32_value()),
            Container::HeapNumber => *self.numbers.get(desc.number_cell()),
            Container::Literal
            | Container::Magic
            | Container::MagicEx
            | Container::HeapChunk => {
                if self.string_size(s) == 0 {
                    return 0.0;
                }
                let mut scratch = Scratch::new();
                number::text_to_number(self.string_bytes(s, &mut scratch))
            }
        }
    }

    /// Array-index test: `Some(index)` when the string is the canonical
    /// decimal form of a u32 below [`ARRAY_INDEX_SENTINEL`].
    pub fn string_array_index(&mut self, s: StringRef) -> Option<u32> {
        let index = if self.desc(s).container == Container::Uint32 {
            self.desc(s).uint32_value()
        } else {
            let index = number::number_to_uint32(self.string_to_number(s));

            let probe = self.new_string_from_uint32(index);
            let matches = self.strings_equal(s, probe);
            self.release(probe);

            if !matches {
                return None;
            }
            index
        };

        (index != ARRAY_INDEX_SENTINEL).then_some(index)
    }
}
