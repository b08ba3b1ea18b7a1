//! Interned Literal Store
//!
//! Source-program string literals are interned once, at parse time, and
//! addressed afterwards by a 32-bit id. Interning canonicalizes: bytes
//! that match a well-known (or extended well-known) string intern as a
//! reference to that table instead of a private charset record, so two
//! spellings of `"length"` can never produce two identities.
//!
//! Charset records cache their content hash and code-unit length; string
//! descriptors built over a literal reuse both without touching the bytes.

use crate::codec;
use crate::hash::{self, StringHash};
use crate::magic::{self, MagicExId, MagicExTable, MagicId};

/// Id of an interned literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LitId(pub u32);

/// One interned record.
#[derive(Debug)]
pub enum LitRecord {
    /// Owned text with cached measurements
    Charset {
        bytes: Box<[u8]>,
        unit_length: u32,
        hash: StringHash,
    },
    /// Reference to a built-in well-known string
    Magic(MagicId),
    /// Reference to an application-registered well-known string
    MagicEx(MagicExId),
}

/// Append-only store of interned literals.
#[derive(Debug, Default)]
pub struct LitStore {
    records: Vec<LitRecord>,
}

impl LitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a literal, canonicalizing magic matches and deduplicating
    /// charset records.
    pub fn intern(&mut self, bytes: &[u8], magic_ex: &MagicExTable) -> LitId {
        debug_assert!(codec::is_valid(bytes), "literal is not valid text");

        let record = if let Some(id) = magic::lookup(bytes) {
            LitRecord::Magic(id)
        } else if let Some(id) = magic_ex.lookup(bytes) {
            LitRecord::MagicEx(id)
        } else {
            if let Some(existing) = self.find_charset(bytes) {
                return existing;
            }
            LitRecord::Charset {
                bytes: bytes.into(),
                unit_length: codec::unit_length(bytes),
                hash: hash::hash(bytes),
            }
        };

        if let Some(existing) = self.find_ref(&record) {
            return existing;
        }

        let id = LitId(self.records.len() as u32);
        self.records.push(record);
        id
    }

    #[inline]
    pub fn record(&self, id: LitId) -> &LitRecord {
        &self.records[id.0 as usize]
    }

    pub fn count(&self) -> u32 {
        self.records.len() as u32
    }

    /// Bytes of a charset record.
    pub fn charset_bytes(&self, id: LitId) -> &[u8] {
        match self.record(id) {
            LitRecord::Charset { bytes, .. } => bytes,
            _ => unreachable!("literal {} is not a charset record", id.0),
        }
    }

    /// Byte size of a charset record.
    pub fn charset_size(&self, id: LitId) -> u32 {
        self.charset_bytes(id).len() as u32
    }

    /// Cached code-unit length of a charset record.
    pub fn charset_unit_length(&self, id: LitId) -> u32 {
        match self.record(id) {
            LitRecord::Charset { unit_length, .. } => *unit_length,
            _ => unreachable!("literal {} is not a charset record", id.0),
        }
    }

    /// Cached content hash of a charset record.
    pub fn charset_hash(&self, id: LitId) -> StringHash {
        match self.record(id) {
            LitRecord::Charset { hash, .. } => *hash,
            _ => unreachable!("literal {} is not a charset record", id.0),
        }
    }

    fn find_charset(&self, candidate: &[u8]) -> Option<LitId> {
        self.records.iter().position(|record| {
            matches!(record, LitRecord::Charset { bytes, .. } if bytes.as_ref() == candidate)
        })
        .map(|index| LitId(index as u32))
    }

    fn find_ref(&self, wanted: &LitRecord) -> Option<LitId> {
        self.records
            .iter()
            .position(|record| match (record, wanted) {
                (LitRecord::Magic(a), LitRecord::Magic(b)) => a == b,
                (LitRecord::MagicEx(a), LitRecord::MagicEx(b)) => a == b,
                _ => false,
            })
            .map(|index| LitId(index as u32))
    }
}
