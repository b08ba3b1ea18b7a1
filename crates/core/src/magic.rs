//! Well-Known Constant Strings
//!
//! The engine keeps one read-only table of the strings every script touches
//! (`length`, `undefined`, property vocabulary, …) and refers to them by a
//! small dense id instead of allocating them. A second, *extended* table
//! with the same surface is populated by the embedding application at
//! engine startup.
//!
//! Ids index the tables directly. The built-in table is sorted bytewise so
//! recognition is a binary search; unit lengths are precomputed once
//! instead of re-walking the bytes on every length query.

use std::sync::OnceLock;

use crate::codec;

/// Id of a built-in well-known string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MagicId(pub u16);

/// Id of an application-registered well-known string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MagicExId(pub u16);

/// The built-in table, sorted bytewise. The empty string is entry zero.
const MAGIC_STRINGS: &[&str] = &[
    "",
    "Array",
    "Boolean",
    "Function",
    "Infinity",
    "Math",
    "NaN",
    "Number",
    "Object",
    "String",
    "arguments",
    "boolean",
    "callee",
    "caller",
    "constructor",
    "eval",
    "false",
    "function",
    "get",
    "global",
    "join",
    "length",
    "message",
    "name",
    "null",
    "number",
    "object",
    "prototype",
    "set",
    "string",
    "toString",
    "true",
    "undefined",
    "value",
    "valueOf",
    "writable",
];

/// The empty string.
pub const MAGIC_EMPTY: MagicId = MagicId(0);

/// Byte size of the longest built-in entry; strings longer than this can
/// never match, which recognition uses as a fast reject.
pub const LENGTH_LIMIT: usize = longest_entry();

const fn longest_entry() -> usize {
    let mut longest = 0usize;
    let mut index = 0usize;
    while index < MAGIC_STRINGS.len() {
        if MAGIC_STRINGS[index].len() > longest {
            longest = MAGIC_STRINGS[index].len();
        }
        index += 1;
    }
    longest
}

/// Number of built-in entries.
#[inline]
pub fn count() -> u16 {
    MAGIC_STRINGS.len() as u16
}

/// Bytes of a built-in entry.
#[inline]
pub fn bytes(id: MagicId) -> &'static [u8] {
    debug_assert!(id.0 < count(), "magic id {} out of range", id.0);
    MAGIC_STRINGS[usize::from(id.0)].as_bytes()
}

/// Byte size of a built-in entry.
#[inline]
pub fn size(id: MagicId) -> u32 {
    bytes(id).len() as u32
}

/// Code-unit length of a built-in entry, memoized at first use.
pub fn unit_length(id: MagicId) -> u32 {
    static LENGTHS: OnceLock<Box<[u32]>> = OnceLock::new();
    let lengths = LENGTHS.get_or_init(|| {
        MAGIC_STRINGS
            .iter()
            .map(|entry| codec::unit_length(entry.as_bytes()))
            .collect()
    });
    lengths[usize::from(id.0)]
}

/// Recognize a byte slice as a built-in entry.
pub fn lookup(candidate: &[u8]) -> Option<MagicId> {
    if candidate.len() > LENGTH_LIMIT {
        return None;
    }
    MAGIC_STRINGS
        .binary_search_by(|entry| entry.as_bytes().cmp(candidate))
        .ok()
        .map(|index| MagicId(index as u16))
}

/// The extended table. Owned by the engine context; registration happens
/// once at startup and the table is read-only afterwards.
#[derive(Debug, Default)]
pub struct MagicExTable {
    entries: Vec<Box<[u8]>>,
    unit_lengths: Vec<u32>,
    length_limit: usize,
}

impl MagicExTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one entry, returning its id. Ids are dense and follow
    /// registration order.
    pub fn register(&mut self, entry: &[u8]) -> MagicExId {
        debug_assert!(codec::is_valid(entry), "extended magic entry is not valid text");
        debug_assert!(
            self.lookup(entry).is_none() && lookup(entry).is_none(),
            "extended magic entry duplicates an existing magic string"
        );

        let id = MagicExId(self.entries.len() as u16);
        self.length_limit = self.length_limit.max(entry.len());
        self.unit_lengths.push(codec::unit_length(entry));
        self.entries.push(entry.into());
        tracing::debug!(id = id.0, size = entry.len(), "registered extended magic string");
        id
    }

    /// Number of registered entries.
    #[inline]
    pub fn count(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Bytes of an entry.
    #[inline]
    pub fn bytes(&self, id: MagicExId) -> &[u8] {
        debug_assert!(id.0 < self.count(), "extended magic id {} out of range", id.0);
        &self.entries[usize::from(id.0)]
    }

    /// Byte size of an entry.
    #[inline]
    pub fn size(&self, id: MagicExId) -> u32 {
        self.bytes(id).len() as u32
    }

    /// Code-unit length of an entry, computed at registration.
    #[inline]
    pub fn unit_length(&self, id: MagicExId) -> u32 {
        debug_assert!(id.0 < self.count());
        self.unit_lengths[usize::from(id.0)]
    }

    /// Byte size of the longest entry (zero while the table is empty).
    #[inline]
    pub fn length_limit(&self) -> usize {
        self.length_limit
    }

    /// Recognize a byte slice as a registered entry.
    pub fn lookup(&self, candidate: &[u8]) -> Option<MagicExId> {
        if candidate.is_empty() || candidate.len() > self.length_limit {
            return None;
        }
        self.entries
            .iter()
            .position(|entry| entry.as_ref() == candidate)
            .map(|index| MagicExId(index as u16))
    }
}
