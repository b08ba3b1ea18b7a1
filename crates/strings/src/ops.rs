//! Concatenation, Substring and Trim
//!
//! All three produce new string values; contents are never edited in
//! place.
//!
//! Concatenation merges two values into one chunk and extends the left
//! operand's cached hash over the right operand's bytes instead of
//! re-hashing the whole result. The result is deliberately *not* checked
//! against the well-known tables; equality still treats it correctly
//! because the comparator handles the cross-container case.
//!
//! Substring and trim are code-unit-correct: they materialize once and
//! move byte cursors with the codec's width helpers, then feed the byte
//! range back through the byte constructor (which canonicalizes as usual).

use lark_core::chars;
use lark_core::codec;
use lark_core::hash;
use lark_core::magic::MAGIC_EMPTY;

use crate::heap::StringHeap;
use crate::value::{self, CHUNK_HEADER_SIZE, StringDesc, StringRef};

impl StringHeap {
    /// Concatenate `a` and `b` into a new string value.
    ///
    /// An empty operand returns the other operand acquired, not a copy.
    pub fn concat_strings(&mut self, a: StringRef, b: StringRef) -> StringRef {
        let size_a = self.string_size(a) as usize;
        let size_b = self.string_size(b) as usize;

        if size_a == 0 {
            return self.acquire(b);
        }
        if size_b == 0 {
            return self.acquire(a);
        }

        let total = size_a + size_b;
        let mut data = vec![0u8; total];
        self.copy_string_bytes(a, &mut data[..size_a])
            .expect("buffer sized to fit");
        self.copy_string_bytes(b, &mut data[size_a..])
            .expect("buffer sized to fit");

        let unit_length = self.string_length(a) + self.string_length(b);
        let combined_hash = hash::hash_combine(self.string_hash(a), &data[size_a..]);

        let block = self.blocks.alloc(total + CHUNK_HEADER_SIZE);
        let dst = self.blocks.bytes_mut(block);
        value::write_chunk_header(dst, total as u32, unit_length);
        value::chunk_payload_mut(dst).copy_from_slice(&data);

        self.alloc_desc(StringDesc::heap_chunk(combined_hash, block))
    }

    /// New string over the code units `[start, end)` of `s`.
    ///
    /// Requires `start <= end <= length` (checked in debug builds).
    pub fn substring(&mut self, s: StringRef, start: u32, end: u32) -> StringRef {
        debug_assert!(start <= end, "substring: inverted range");
        debug_assert!(end <= self.string_length(s), "substring: range out of bounds");

        if start >= end {
            return self.new_string_from_bytes(&[]);
        }

        let bytes = self.string_to_vec(s);

        let mut from = 0usize;
        for _ in 0..start {
            from += codec::unit_size_by_first_byte(bytes[from]);
        }
        let mut to = from;
        for _ in 0..(end - start) {
            to += codec::unit_size_by_first_byte(bytes[to]);
        }

        self.new_string_from_bytes(&bytes[from..to])
    }

    /// New string with leading and trailing whitespace and line
    /// terminators removed.
    pub fn trim_string(&mut self, s: StringRef) -> StringRef {
        let bytes = self.string_to_vec(s);
        if bytes.is_empty() {
            return self.new_magic_string(MAGIC_EMPTY);
        }

        let mut from = 0usize;
        while from < bytes.len() {
            let (unit, size) = codec::decode_unit(&bytes[from..]);
            if !chars::is_white_space(unit) && !chars::is_line_terminator(unit) {
                break;
            }
            from += size;
        }

        let mut to = bytes.len();
        while to > from {
            let (unit, size) = codec::decode_unit_before(&bytes, to);
            if !chars::is_white_space(unit) && !chars::is_line_terminator(unit) {
                break;
            }
            to -= size;
        }

        if from < to {
            self.new_string_from_bytes(&bytes[from..to])
        } else {
            self.new_magic_string(MAGIC_EMPTY)
        }
    }
}
