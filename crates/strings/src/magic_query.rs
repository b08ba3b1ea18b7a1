//! Well-Known String Recognition
//!
//! Is this string one of the well-known constants, and which one? The
//! answer is a tag check: constructors canonicalize, so any string whose
//! bytes match a table entry already carries the `Magic` (or `MagicEx`)
//! container. For every other container the answer is no; debug builds
//! double-check that claim by actually scanning the table, bounded by the
//! table's length limit.
//!
//! Concatenation results are exempt from canonicalization, so asking
//! about a concat result whose bytes spell a well-known entry trips the
//! debug check. Callers route concat results through equality instead.

use lark_core::magic::{self, MagicExId, MagicId};

use crate::heap::StringHeap;
use crate::value::{Container, StringRef};

impl StringHeap {
    /// Id of the built-in well-known entry this string is, if any.
    pub fn string_magic_id(&self, s: StringRef) -> Option<MagicId> {
        let desc = self.desc(s);
        if desc.container == Container::Magic {
            let id = desc.magic_id();
            debug_assert!(id.0 < magic::count());
            return Some(id);
        }

        debug_assert!(
            self.string_length(s) as usize > magic::LENGTH_LIMIT
                || self.magic_scan(s).is_none(),
            "constructor failed to canonicalize a well-known string"
        );
        None
    }

    /// Id of the extended well-known entry this string is, if any.
    pub fn string_magic_ex_id(&self, s: StringRef) -> Option<MagicExId> {
        let desc = self.desc(s);
        if desc.container == Container::MagicEx {
            let id = desc.magic_ex_id();
            debug_assert!(id.0 < self.magic_ex.count());
            return Some(id);
        }

        debug_assert!(
            self.string_length(s) as usize > self.magic_ex.length_limit()
                || self.magic_ex_scan(s).is_none(),
            "constructor failed to canonicalize an extended well-known string"
        );
        None
    }

    /// Scan the built-in table by content, through a stack buffer sized
    /// by the table's length limit.
    fn magic_scan(&self, s: StringRef) -> Option<MagicId> {
        let mut buf = [0u8; magic::LENGTH_LIMIT];
        match self.copy_string_bytes(s, &mut buf) {
            Ok(written) => magic::lookup(&buf[..written]),
            Err(_) => None,
        }
    }

    /// Scan the extended table by content.
    fn magic_ex_scan(&self, s: StringRef) -> Option<MagicExId> {
        if self.string_size(s) as usize > self.magic_ex.length_limit() {
            return None;
        }
        self.magic_ex.lookup(&self.string_to_vec(s))
    }
}
