//! String Constructors
//!
//! Every string value enters the engine through one of these. Each
//! constructor returns a descriptor with one reference and a valid hash,
//! and performs the canonicalization the descriptor contract demands:
//!
//! - bytes matching a well-known (or extended well-known) string come back
//!   as that table entry, never as a private chunk
//! - a number that round-trips through u32 is packed into the descriptor
//!   itself; only out-of-range numbers get a heap cell
//!
//! Concatenation is the one documented exception to the well-known rule;
//! see `ops`.

use lark_core::codec::{self, CodeUnit};
use lark_core::hash::{self, StringHash};
use lark_core::literal::{LitId, LitRecord};
use lark_core::magic::{self, MagicExId, MagicId};
use lark_core::number;

use crate::heap::StringHeap;
use crate::value::{self, CHUNK_HEADER_SIZE, StringDesc, StringRef};

enum LitKind {
    Magic(MagicId),
    MagicEx(MagicExId),
    Charset(StringHash),
}

impl StringHeap {
    /// Build a string from its bytes.
    ///
    /// The bytes must be well-formed text (checked in debug builds only).
    pub fn new_string_from_bytes(&mut self, bytes: &[u8]) -> StringRef {
        debug_assert!(codec::is_valid(bytes), "string bytes are not valid text");

        if let Some(id) = magic::lookup(bytes) {
            return self.new_magic_string(id);
        }
        if let Some(id) = self.magic_ex.lookup(bytes) {
            return self.new_magic_string_ex(id);
        }

        // the empty string is a well-known entry, so a chunk is never empty
        debug_assert!(!bytes.is_empty());

        let size = bytes.len();
        let block = self.blocks.alloc(size + CHUNK_HEADER_SIZE);
        let data = self.blocks.bytes_mut(block);
        value::write_chunk_header(data, size as u32, codec::unit_length(bytes));
        value::chunk_payload_mut(data).copy_from_slice(bytes);

        self.alloc_desc(StringDesc::heap_chunk(hash::hash(bytes), block))
    }

    /// Build a one-unit string from a code unit.
    pub fn new_string_from_unit(&mut self, unit: CodeUnit) -> StringRef {
        let mut buf = [0u8; codec::MAX_BYTES_PER_UNIT];
        let size = codec::encode_unit(unit, &mut buf);
        self.new_string_from_bytes(&buf[..size])
    }

    /// Build the decimal string of a `u32`, packed in the descriptor.
    pub fn new_string_from_uint32(&mut self, value: u32) -> StringRef {
        let mut buf = [0u8; number::MAX_UINT32_TEXT_LEN];
        let len = number::uint32_to_text(value, &mut buf);

        self.alloc_desc(StringDesc::uint32(hash::hash(&buf[..len]), value))
    }

    /// Build the canonical string of a number.
    pub fn new_string_from_number(&mut self, num: f64) -> StringRef {
        let uint32 = number::number_to_uint32(num);
        if num == number::uint32_to_number(uint32) {
            return self.new_string_from_uint32(uint32);
        }

        let mut buf = [0u8; number::MAX_NUMBER_TEXT_LEN];
        let len = number::number_to_text(num, &mut buf);
        let text = &buf[..len];

        if let Some(id) = magic::lookup(text) {
            return self.new_magic_string(id);
        }
        if let Some(id) = self.magic_ex.lookup(text) {
            return self.new_magic_string_ex(id);
        }

        let cell = self.numbers.alloc(num);
        self.alloc_desc(StringDesc::heap_number(hash::hash(text), cell))
    }

    /// Build a string over an interned literal.
    ///
    /// Literals that intern as well-known references resolve to the
    /// corresponding table entry; charset literals reuse their cached hash.
    pub fn new_string_from_literal(&mut self, lit: LitId) -> StringRef {
        let kind = match self.lits.record(lit) {
            LitRecord::Magic(id) => LitKind::Magic(*id),
            LitRecord::MagicEx(id) => LitKind::MagicEx(*id),
            LitRecord::Charset { hash, .. } => LitKind::Charset(*hash),
        };

        match kind {
            LitKind::Magic(id) => self.new_magic_string(id),
            LitKind::MagicEx(id) => self.new_magic_string_ex(id),
            LitKind::Charset(hash) => self.alloc_desc(StringDesc::literal(hash, lit)),
        }
    }

    /// Build a string over a built-in well-known entry.
    pub fn new_magic_string(&mut self, id: MagicId) -> StringRef {
        debug_assert!(id.0 < magic::count(), "magic id out of range");

        self.alloc_desc(StringDesc::magic(hash::hash(magic::bytes(id)), id))
    }

    /// Build a string over an extended well-known entry.
    pub fn new_magic_string_ex(&mut self, id: MagicExId) -> StringRef {
        debug_assert!(id.0 < self.magic_ex.count(), "extended magic id out of range");

        let entry_hash = hash::hash(self.magic_ex.bytes(id));
        self.alloc_desc(StringDesc::magic_ex(entry_hash, id))
    }
}
