//! String Heap
//!
//! The long-lived engine context every string operation runs against. It
//! owns the four stores a descriptor can point into (chunk blocks, number
//! cells, the descriptor pool itself, the literal store), the extended
//! well-known table, and the injected GC hooks used by the refcount
//! saturation escape hatch.
//!
//! The engine is single threaded; the heap is plain mutable state passed
//! explicitly, never global.

use lark_core::literal::{LitId, LitStore};
use lark_core::magic::{MagicExId, MagicExTable};
use lark_core::pool::{BlockHeap, SlotPool};

use crate::value::{StringDesc, StringRef};

/// Collector hooks invoked when a reference counter saturates.
///
/// A real embedding wires these to its property-lookup cache and garbage
/// collector; the collector may release string references through the heap
/// it is handed. Without hooks the saturated descriptor is deep-copied.
pub trait GcHooks {
    /// Drop every property-lookup cache entry.
    fn invalidate_lookup_caches(&mut self, heap: &mut StringHeap);

    /// Run a full collection pass.
    fn run_gc(&mut self, heap: &mut StringHeap);
}

/// The string heap: descriptor pool, payload stores and engine tables.
pub struct StringHeap {
    pub(crate) blocks: BlockHeap,
    pub(crate) numbers: SlotPool<f64>,
    pub(crate) descs: SlotPool<StringDesc>,
    pub(crate) lits: LitStore,
    pub(crate) magic_ex: MagicExTable,
    pub(crate) gc: Option<Box<dyn GcHooks>>,
}

impl StringHeap {
    pub fn new() -> Self {
        Self {
            blocks: BlockHeap::new(),
            numbers: SlotPool::new(),
            descs: SlotPool::new(),
            lits: LitStore::new(),
            magic_ex: MagicExTable::new(),
            gc: None,
        }
    }

    pub fn with_gc_hooks(hooks: Box<dyn GcHooks>) -> Self {
        let mut heap = Self::new();
        heap.gc = Some(hooks);
        heap
    }

    pub fn set_gc_hooks(&mut self, hooks: Box<dyn GcHooks>) {
        self.gc = Some(hooks);
    }

    /// Register an application well-known string. Startup-time only.
    pub fn register_magic_ex(&mut self, bytes: &[u8]) -> MagicExId {
        self.magic_ex.register(bytes)
    }

    /// Intern a source literal, canonicalizing well-known matches.
    pub fn intern_literal(&mut self, bytes: &[u8]) -> LitId {
        self.lits.intern(bytes, &self.magic_ex)
    }

    /// Cached content hash of a string.
    #[inline]
    pub fn string_hash(&self, s: StringRef) -> lark_core::hash::StringHash {
        self.desc(s).hash
    }

    /// Storage strategy of a string.
    #[inline]
    pub fn string_container(&self, s: StringRef) -> crate::value::Container {
        self.desc(s).container
    }

    /// Current reference count of a string.
    #[inline]
    pub fn ref_count(&self, s: StringRef) -> u32 {
        self.desc(s).refs
    }

    /// Number of live string descriptors.
    pub fn live_strings(&self) -> usize {
        self.descs.live()
    }

    /// Bytes currently held by chunk blocks.
    pub fn live_heap_bytes(&self) -> usize {
        self.blocks.live_bytes()
    }

    /// Number of live heap number cells.
    pub fn live_number_cells(&self) -> usize {
        self.numbers.live()
    }

    #[inline]
    pub(crate) fn desc(&self, s: StringRef) -> &StringDesc {
        self.descs.get(s.0)
    }

    #[inline]
    pub(crate) fn desc_mut(&mut self, s: StringRef) -> &mut StringDesc {
        self.descs.get_mut(s.0)
    }

    #[inline]
    pub(crate) fn alloc_desc(&mut self, desc: StringDesc) -> StringRef {
        StringRef(self.descs.alloc(desc))
    }
}

impl Default for StringHeap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_heap_is_empty() {
        let heap = StringHeap::new();
        assert_eq!(heap.live_strings(), 0);
        assert_eq!(heap.live_heap_bytes(), 0);
        assert_eq!(heap.live_number_cells(), 0);
    }

    #[test]
    fn test_register_and_intern() {
        let mut heap = StringHeap::new();
        let ex = heap.register_magic_ex(b"appKey");
        assert_eq!(heap.magic_ex.bytes(ex), b"appKey");

        let lit = heap.intern_literal(b"wingspan");
        assert_eq!(heap.lits.charset_bytes(lit), b"wingspan");
    }
}
