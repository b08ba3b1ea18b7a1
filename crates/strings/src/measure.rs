//! Size, Length and Indexed Access
//!
//! Byte size is O(1) for every container. Code-unit length is stored for
//! chunks, cached for literals and well-known entries, and equals the byte
//! size for numeric strings (every character of a canonical numeric string
//! is single-byte). Heap numbers are the one exception to "no formatting
//! on read": their size re-formats the number into a stack buffer, an
//! accepted cost inherited from the tight-memory layout.

use lark_core::codec::{self, CodeUnit};
use lark_core::magic;
use lark_core::number;
use lark_core::pool::SlotId;

use crate::heap::StringHeap;
use crate::render::Scratch;
use crate::value::{self, Container, StringRef};

impl StringHeap {
    /// Byte size of the logical string.
    pub fn string_size(&self, s: StringRef) -> u32 {
        let desc = self.desc(s);
        match desc.container {
            Container::Literal => self.lits.charset_size(desc.lit_id()),
            Container::Magic => magic::size(desc.magic_id()),
            Container::MagicEx => self.magic_ex.size(desc.magic_ex_id()),
            Container::Uint32 => number::uint32_text_len(desc.uint32_value()) as u32,
            Container::HeapNumber => self.heap_number_size(desc.number_cell()),
            Container::HeapChunk => value::chunk_size(self.blocks.bytes(desc.chunk_block())),
        }
    }

    /// Code-unit length of the logical string.
    pub fn string_length(&self, s: StringRef) -> u32 {
        let desc = self.desc(s);
        match desc.container {
            Container::Literal => self.lits.charset_unit_length(desc.lit_id()),
            Container::Magic => magic::unit_length(desc.magic_id()),
            Container::MagicEx => self.magic_ex.unit_length(desc.magic_ex_id()),
            // numeric strings are all single-byte units
            Container::Uint32 => number::uint32_text_len(desc.uint32_value()) as u32,
            Container::HeapNumber => self.heap_number_size(desc.number_cell()),
            Container::HeapChunk => value::chunk_unit_length(self.blocks.bytes(desc.chunk_block())),
        }
    }

    /// True when the logical string is empty.
    #[inline]
    pub fn string_is_empty(&self, s: StringRef) -> bool {
        self.string_size(s) == 0
    }

    /// Code unit at `index`.
    ///
    /// # Panics
    /// Panics in debug mode if `index` is out of bounds.
    pub fn string_unit_at(&self, s: StringRef, index: u32) -> CodeUnit {
        debug_assert!(index < self.string_length(s), "unit index out of bounds");

        let mut scratch = Scratch::new();
        codec::unit_at(self.string_bytes(s, &mut scratch), index)
    }

    /// Byte at `index`.
    ///
    /// # Panics
    /// Panics in debug mode if `index` is out of bounds.
    pub fn string_byte_at(&self, s: StringRef, index: u32) -> u8 {
        debug_assert!(index < self.string_size(s), "byte index out of bounds");

        let mut scratch = Scratch::new();
        self.string_bytes(s, &mut scratch)[index as usize]
    }

    /// Byte size of a heap-number string, by re-formatting the number.
    fn heap_number_size(&self, cell: SlotId) -> u32 {
        let mut buf = [0u8; number::MAX_NUMBER_TEXT_LEN];
        number::number_to_text(*self.numbers.get(cell), &mut buf) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_length_per_container() {
        let mut heap = StringHeap::new();
        heap.register_magic_ex("appné".as_bytes());
        let lit = heap.intern_literal("wingé".as_bytes());

        let chunk = heap.new_string_from_bytes("aé🙂b".as_bytes());
        assert_eq!(heap.string_size(chunk), 8);
        assert_eq!(heap.string_length(chunk), 4);

        let literal = heap.new_string_from_literal(lit);
        assert_eq!(heap.string_size(literal), 6);
        assert_eq!(heap.string_length(literal), 5);

        let uint = heap.new_string_from_uint32(4200);
        assert_eq!(heap.string_size(uint), 4);
        assert_eq!(heap.string_length(uint), 4);

        let num = heap.new_string_from_number(3.14);
        assert_eq!(heap.string_size(num), 4);
        assert_eq!(heap.string_length(num), 4);

        let m = heap.new_string_from_bytes(b"length");
        assert_eq!(heap.string_size(m), 6);
        assert_eq!(heap.string_length(m), 6);

        let ex = heap.new_string_from_bytes("appné".as_bytes());
        assert_eq!(heap.string_size(ex), 6);
        assert_eq!(heap.string_length(ex), 5);
    }

    #[test]
    fn test_empty() {
        let mut heap = StringHeap::new();
        let empty = heap.new_string_from_bytes(b"");
        assert!(heap.string_is_empty(empty));
        assert_eq!(heap.string_length(empty), 0);
    }

    #[test]
    fn test_unit_at() {
        let mut heap = StringHeap::new();
        let s = heap.new_string_from_bytes("aé🙂b".as_bytes());
        assert_eq!(heap.string_unit_at(s, 0), u32::from(b'a'));
        assert_eq!(heap.string_unit_at(s, 1), 0xE9);
        assert_eq!(heap.string_unit_at(s, 2), 0x1F642);
        assert_eq!(heap.string_unit_at(s, 3), u32::from(b'b'));

        let uint = heap.new_string_from_uint32(42);
        assert_eq!(heap.string_unit_at(uint, 1), u32::from(b'2'));
    }

    #[test]
    fn test_byte_at() {
        let mut heap = StringHeap::new();
        let s = heap.new_string_from_bytes("aé".as_bytes());
        assert_eq!(heap.string_byte_at(s, 0), b'a');
        assert_eq!(heap.string_byte_at(s, 1), 0xC3);
        assert_eq!(heap.string_byte_at(s, 2), 0xA9);
    }
}
