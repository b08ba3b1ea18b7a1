//! Lark Core: literal, codec and memory primitives
//!
//! This crate is the leaf layer of the Lark embedded script engine. It
//! knows nothing about string descriptors or the object model; it provides
//! the services they are built on:
//!
//! - `codec`: the variable-width text encoding (1-4 byte code units)
//! - `chars`: whitespace / line-terminator classification
//! - `hash`: resumable FNV-1a content hash
//! - `number`: canonical number <-> text conversions
//! - `magic`: built-in and application-extended well-known string tables
//! - `literal`: the interned literal store
//! - `pool`: slot pools and the block heap (32-bit handles)

pub mod chars;
pub mod codec;
pub mod hash;
pub mod literal;
pub mod magic;
pub mod number;
pub mod pool;

// Re-export key types and functions
pub use codec::CodeUnit;
pub use hash::StringHash;
pub use literal::{LitId, LitRecord, LitStore};
pub use magic::{MAGIC_EMPTY, MagicExId, MagicExTable, MagicId};
pub use pool::{BlockHeap, SlotId, SlotPool};
