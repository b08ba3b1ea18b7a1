//! Lark Strings: the polymorphic string value
//!
//! The primary composite value of the Lark script engine is the string:
//! property keys, identifiers, array indices and number-to-text
//! conversions all flow through it, under working sets measured in tens of
//! kilobytes. One fixed-size, reference-counted descriptor represents
//! every logical string; a container tag picks the cheapest storage for
//! each value (well-known table entry, interned literal, u32 packed in the
//! descriptor, heap number cell, heap chunk).
//!
//! All operations run against a [`StringHeap`], the explicit engine
//! context. The engine is single threaded; nothing here is shared across
//! threads and no atomics are involved.
//!
//! ```
//! use lark_strings::StringHeap;
//!
//! let mut heap = StringHeap::new();
//! let key = heap.new_string_from_bytes(b"length");
//! let num = heap.new_string_from_number(42.0);
//!
//! let mut buf = [0u8; 16];
//! let written = heap.copy_string_bytes(num, &mut buf).unwrap();
//! assert_eq!(&buf[..written], b"42");
//! assert_eq!(heap.string_array_index(num), Some(42));
//!
//! heap.release(num);
//! heap.release(key);
//! ```

pub mod build;
pub mod compare;
pub mod heap;
pub mod lifecycle;
pub mod magic_query;
pub mod measure;
pub mod numeric;
pub mod ops;
pub mod render;
pub mod value;

// Re-export key types and functions
pub use heap::{GcHooks, StringHeap};
pub use numeric::ARRAY_INDEX_SENTINEL;
pub use render::BufferTooSmall;
pub use value::{Container, StringRef};
