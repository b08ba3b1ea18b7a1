//! Materialization
//!
//! Turning a descriptor back into its logical bytes. The public entry is
//! [`StringHeap::copy_string_bytes`], which reports the required size when
//! the caller's buffer is too small so the caller can retry with a bigger
//! one.
//!
//! Internally, readers that only need to *look* at the bytes use
//! [`Scratch`]: chunk and literal strings hand out their stored bytes
//! directly, every other container renders into a small stack buffer and
//! spills to an owned buffer only when it must (long extended well-known
//! entries).

use lark_core::number;
use thiserror::Error;

use crate::heap::StringHeap;
use crate::value::{self, Container, StringRef};

/// The destination buffer cannot hold the string.
///
/// The sole recoverable error in the string core; retry with a buffer of
/// at least `required` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("string does not fit: {required} bytes required")]
pub struct BufferTooSmall {
    pub required: usize,
}

/// Reusable byte scratch for transient reads.
pub(crate) struct Scratch {
    stack: [u8; number::MAX_NUMBER_TEXT_LEN],
    spill: Vec<u8>,
}

impl Scratch {
    pub(crate) fn new() -> Self {
        Self {
            stack: [0u8; number::MAX_NUMBER_TEXT_LEN],
            spill: Vec::new(),
        }
    }
}

impl StringHeap {
    /// Copy the logical bytes of `s` into `buf`.
    ///
    /// Returns the number of bytes written, or [`BufferTooSmall`] without
    /// writing anything when the buffer is too small (a zero-size buffer
    /// always fails).
    pub fn copy_string_bytes(
        &self,
        s: StringRef,
        buf: &mut [u8],
    ) -> Result<usize, BufferTooSmall> {
        debug_assert!(self.desc(s).refs > 0);

        let required = self.string_size(s) as usize;
        if required > buf.len() || buf.is_empty() {
            return Err(BufferTooSmall { required });
        }

        let desc = self.desc(s);
        match desc.container {
            Container::HeapChunk => {
                let block = self.blocks.bytes(desc.chunk_block());
                buf[..required].copy_from_slice(value::chunk_payload(block));
            }
            Container::Literal => {
                buf[..required].copy_from_slice(self.lits.charset_bytes(desc.lit_id()));
            }
            Container::Uint32 => {
                let written = number::uint32_to_text(desc.uint32_value(), buf);
                debug_assert_eq!(written, required);
            }
            Container::HeapNumber => {
                let mut text = [0u8; number::MAX_NUMBER_TEXT_LEN];
                let written = number::number_to_text(*self.numbers.get(desc.number_cell()), &mut text);
                debug_assert_eq!(written, required);
                buf[..written].copy_from_slice(&text[..written]);
            }
            Container::Magic => {
                buf[..required].copy_from_slice(lark_core::magic::bytes(desc.magic_id()));
            }
            Container::MagicEx => {
                buf[..required].copy_from_slice(self.magic_ex.bytes(desc.magic_ex_id()));
            }
        }

        Ok(required)
    }

    /// Borrow the logical bytes of `s`, rendering through `scratch` when
    /// the container does not store them directly.
    pub(crate) fn string_bytes<'a>(&'a self, s: StringRef, scratch: &'a mut Scratch) -> &'a [u8] {
        let desc = self.desc(s);
        match desc.container {
            Container::HeapChunk => value::chunk_payload(self.blocks.bytes(desc.chunk_block())),
            Container::Literal => self.lits.charset_bytes(desc.lit_id()),
            _ => match self.copy_string_bytes(s, &mut scratch.stack) {
                Ok(written) => &scratch.stack[..written],
                Err(BufferTooSmall { required }) => {
                    scratch.spill = vec![0u8; required];
                    let written = self
                        .copy_string_bytes(s, &mut scratch.spill)
                        .expect("spill buffer sized to fit");
                    &scratch.spill[..written]
                }
            },
        }
    }

    /// Materialize a full owned copy of the logical bytes.
    pub(crate) fn string_to_vec(&self, s: StringRef) -> Vec<u8> {
        let size = self.string_size(s) as usize;
        if size == 0 {
            return Vec::new();
        }
        let mut buf = vec![0u8; size];
        let written = self
            .copy_string_bytes(s, &mut buf)
            .expect("buffer sized to fit");
        debug_assert_eq!(written, size);
        buf
    }
}
