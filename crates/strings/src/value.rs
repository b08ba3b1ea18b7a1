//! String Descriptor Layout
//!
//! Every Lark string value is one fixed-size descriptor: a reference
//! count, the cached content hash, a container tag and one 64-bit payload
//! word. The tag selects how the payload is read:
//!
//! ```text
//! ┌──────────┬──────────┬───────────┬──────────────────────────────┐
//! │ refs u32 │ hash u32 │ container │ payload (one u64 word)       │
//! ├──────────┼──────────┼───────────┼──────────────────────────────┤
//! │          │          │ Literal   │ literal store id             │
//! │          │          │ Magic     │ built-in magic id            │
//! │          │          │ MagicEx   │ extended magic id            │
//! │          │          │ Uint32    │ the number itself            │
//! │          │          │ HeapNumber│ number-cell handle           │
//! │          │          │ HeapChunk │ chunk-block handle           │
//! └──────────┴──────────┴───────────┴──────────────────────────────┘
//! ```
//!
//! The payload is always written through a typed constructor that zeroes
//! the whole word first, so comparing `(container, payload)` as raw words
//! is exact: equal words of the same container mean the same identity.
//!
//! Chunk blocks carry an 8-byte header, byte size then code-unit length,
//! followed by the raw text.

use lark_core::hash::StringHash;
use lark_core::literal::LitId;
use lark_core::magic::{MagicExId, MagicId};
use lark_core::pool::SlotId;

/// Handle to a pooled string descriptor.
///
/// Copyable like a raw pointer; ownership is expressed through the
/// acquire/release protocol, not through the handle itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringRef(pub(crate) SlotId);

/// Storage strategy of a string descriptor.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// Interned charset literal in the literal store
    Literal = 0,
    /// Built-in well-known string
    Magic = 1,
    /// Application-registered well-known string
    MagicEx = 2,
    /// A u32 packed in the descriptor; the text is its decimal form
    Uint32 = 3,
    /// Heap number cell; the text is its canonical form
    HeapNumber = 4,
    /// Heap chunk block holding raw text
    HeapChunk = 5,
}

/// One string descriptor.
#[derive(Debug, Clone)]
pub struct StringDesc {
    pub(crate) refs: u32,
    pub(crate) hash: StringHash,
    pub(crate) container: Container,
    payload: u64,
}

impl StringDesc {
    fn new(container: Container, hash: StringHash, payload: u64) -> Self {
        Self {
            refs: 1,
            hash,
            container,
            payload,
        }
    }

    pub(crate) fn literal(hash: StringHash, lit: LitId) -> Self {
        Self::new(Container::Literal, hash, u64::from(lit.0))
    }

    pub(crate) fn magic(hash: StringHash, id: MagicId) -> Self {
        Self::new(Container::Magic, hash, u64::from(id.0))
    }

    pub(crate) fn magic_ex(hash: StringHash, id: MagicExId) -> Self {
        Self::new(Container::MagicEx, hash, u64::from(id.0))
    }

    pub(crate) fn uint32(hash: StringHash, value: u32) -> Self {
        Self::new(Container::Uint32, hash, u64::from(value))
    }

    pub(crate) fn heap_number(hash: StringHash, cell: SlotId) -> Self {
        Self::new(Container::HeapNumber, hash, u64::from(cell))
    }

    pub(crate) fn heap_chunk(hash: StringHash, block: SlotId) -> Self {
        Self::new(Container::HeapChunk, hash, u64::from(block))
    }

    /// The raw payload word, compared by the equality fast path.
    #[inline(always)]
    pub(crate) fn payload_word(&self) -> u64 {
        self.payload
    }

    #[inline]
    pub(crate) fn lit_id(&self) -> LitId {
        debug_assert_eq!(self.container, Container::Literal);
        LitId(self.payload as u32)
    }

    #[inline]
    pub(crate) fn magic_id(&self) -> MagicId {
        debug_assert_eq!(self.container, Container::Magic);
        MagicId(self.payload as u16)
    }

    #[inline]
    pub(crate) fn magic_ex_id(&self) -> MagicExId {
        debug_assert_eq!(self.container, Container::MagicEx);
        MagicExId(self.payload as u16)
    }

    #[inline]
    pub(crate) fn uint32_value(&self) -> u32 {
        debug_assert_eq!(self.container, Container::Uint32);
        self.payload as u32
    }

    #[inline]
    pub(crate) fn number_cell(&self) -> SlotId {
        debug_assert_eq!(self.container, Container::HeapNumber);
        self.payload as SlotId
    }

    #[inline]
    pub(crate) fn chunk_block(&self) -> SlotId {
        debug_assert_eq!(self.container, Container::HeapChunk);
        self.payload as SlotId
    }
}

// =============================================================================
// Chunk block layout
// =============================================================================

/// Bytes of the chunk header: byte size (u32 LE) then unit length (u32 LE).
pub(crate) const CHUNK_HEADER_SIZE: usize = 8;

pub(crate) fn write_chunk_header(block: &mut [u8], size: u32, unit_length: u32) {
    debug_assert_eq!(block.len(), CHUNK_HEADER_SIZE + size as usize);
    block[..4].copy_from_slice(&size.to_le_bytes());
    block[4..8].copy_from_slice(&unit_length.to_le_bytes());
}

#[inline]
pub(crate) fn chunk_size(block: &[u8]) -> u32 {
    u32::from_le_bytes(block[..4].try_into().expect("chunk header truncated"))
}

#[inline]
pub(crate) fn chunk_unit_length(block: &[u8]) -> u32 {
    u32::from_le_bytes(block[4..8].try_into().expect("chunk header truncated"))
}

#[inline]
pub(crate) fn chunk_payload(block: &[u8]) -> &[u8] {
    debug_assert_eq!(block.len(), CHUNK_HEADER_SIZE + chunk_size(block) as usize);
    &block[CHUNK_HEADER_SIZE..]
}

#[inline]
pub(crate) fn chunk_payload_mut(block: &mut [u8]) -> &mut [u8] {
    &mut block[CHUNK_HEADER_SIZE..]
}
