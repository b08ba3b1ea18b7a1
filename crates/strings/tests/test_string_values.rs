//! End-to-end behavior of the string value core: construction through the
//! public surface only, canonical containers, comparisons, slicing and the
//! reference protocol.

use lark_core::{hash, magic, number};
use lark_strings::{ARRAY_INDEX_SENTINEL, Container, StringHeap, StringRef};

fn bytes_of(heap: &StringHeap, s: StringRef) -> Vec<u8> {
    let size = heap.string_size(s) as usize;
    let mut buf = vec![0u8; size.max(1)];
    let written = heap.copy_string_bytes(s, &mut buf).expect("sized buffer");
    buf.truncate(written);
    buf
}

#[test]
fn test_magic_canonicalization_end_to_end() {
    let mut heap = StringHeap::new();

    let from_bytes = heap.new_string_from_bytes(b"length");
    assert_eq!(heap.string_container(from_bytes), Container::Magic);
    assert_eq!(heap.string_hash(from_bytes), hash::hash(b"length"));

    let id = magic::lookup(b"length").expect("length is well-known");
    let from_id = heap.new_magic_string(id);
    assert!(heap.strings_equal(from_bytes, from_id));
    assert_eq!(heap.string_magic_id(from_bytes), Some(id));
}

#[test]
fn test_uint32_packing_end_to_end() {
    let mut heap = StringHeap::new();

    let s = heap.new_string_from_number(42.0);
    assert_eq!(heap.string_container(s), Container::Uint32);
    assert_eq!(bytes_of(&heap, s), b"42");
    assert_eq!(heap.string_length(s), 2);
    assert_eq!(heap.string_array_index(s), Some(42));
}

#[test]
fn test_non_canonical_number_end_to_end() {
    let mut heap = StringHeap::new();

    let s = heap.new_string_from_number(3.14);
    assert_eq!(heap.string_container(s), Container::HeapNumber);
    assert_eq!(bytes_of(&heap, s), b"3.14");
    assert_eq!(heap.string_to_number(s), 3.14);

    let nan_a = heap.new_string_from_number(f64::NAN);
    let nan_b = heap.new_string_from_number(f64::NAN);
    assert!(heap.strings_equal(nan_a, nan_b));
}

#[test]
fn test_concat_skips_canonicalization_but_compares_equal() {
    let mut heap = StringHeap::new();

    let head = heap.new_string_from_bytes(b"leng");
    let tail = heap.new_string_from_bytes(b"th");
    let joined = heap.concat_strings(head, tail);
    assert_eq!(heap.string_container(joined), Container::HeapChunk);

    let id = magic::lookup(b"length").unwrap();
    let magic_string = heap.new_magic_string(id);
    assert!(heap.strings_equal(joined, magic_string));
    assert!(heap.strings_equal(magic_string, joined));
}

#[test]
fn test_substring_over_variable_width_units() {
    let mut heap = StringHeap::new();

    let s = heap.new_string_from_bytes("aé🙂b".as_bytes());
    assert_eq!(heap.string_length(s), 4);

    let mid = heap.substring(s, 1, 3);
    assert_eq!(bytes_of(&heap, mid), "é🙂".as_bytes());
    assert_eq!(heap.string_length(mid), 2);
}

#[test]
fn test_trim_end_to_end() {
    let mut heap = StringHeap::new();

    let padded = heap.new_string_from_bytes(b"  hi\n");
    let trimmed = heap.trim_string(padded);
    let plain = heap.new_string_from_bytes(b"hi");
    assert!(heap.strings_equal(trimmed, plain));

    let blank = heap.new_string_from_bytes(b"   ");
    let empty = heap.trim_string(blank);
    assert_eq!(heap.string_container(empty), Container::Magic);
    assert!(heap.string_is_empty(empty));
}

#[test]
fn test_hash_matches_materialized_bytes_for_all_containers() {
    let mut heap = StringHeap::new();
    heap.register_magic_ex(b"appKey");
    let lit = heap.intern_literal(b"wingspan");

    let samples = [
        heap.new_string_from_bytes(b"feathers"),
        heap.new_string_from_literal(lit),
        heap.new_string_from_uint32(90125),
        heap.new_string_from_number(0.5),
        heap.new_string_from_bytes(b"appKey"),
        heap.new_string_from_bytes(b"undefined"),
        heap.new_string_from_bytes(b""),
    ];
    for s in samples {
        assert_eq!(heap.string_hash(s), hash::hash(&bytes_of(&heap, s)));
    }
}

#[test]
fn test_every_builtin_entry_canonicalizes() {
    let mut heap = StringHeap::new();

    for raw in 0..magic::count() {
        let id = magic::MagicId(raw);
        let s = heap.new_string_from_bytes(magic::bytes(id));
        assert_eq!(heap.string_container(s), Container::Magic);
        assert_eq!(heap.string_magic_id(s), Some(id));
        assert_eq!(heap.string_length(s), magic::unit_length(id));
    }
}

#[test]
fn test_uint32_canonicalization_sweep() {
    let mut heap = StringHeap::new();

    for value in [0u32, 1, 9, 10, 42, 999_999_999, u32::MAX] {
        let s = heap.new_string_from_number(f64::from(value));
        assert_eq!(heap.string_container(s), Container::Uint32);

        let text = bytes_of(&heap, s);
        assert_eq!(number::text_to_number(&text), f64::from(value));
        assert_eq!(heap.string_size(s) as usize, text.len());
    }
}

#[test]
fn test_equality_is_an_equivalence_and_implies_hash() {
    let mut heap = StringHeap::new();
    let lit = heap.intern_literal(b"42");

    let samples = [
        heap.new_string_from_bytes(b"42"),
        heap.new_string_from_literal(lit),
        heap.new_string_from_uint32(42),
        heap.new_string_from_number(42.0),
        heap.new_string_from_bytes(b"wing"),
        heap.new_string_from_bytes(b""),
    ];

    for &a in &samples {
        assert!(heap.strings_equal(a, a), "reflexive");
        for &b in &samples {
            let ab = heap.strings_equal(a, b);
            assert_eq!(ab, heap.strings_equal(b, a), "symmetric");
            if ab {
                assert_eq!(heap.string_hash(a), heap.string_hash(b));
            }
            for &c in &samples {
                if ab && heap.strings_equal(b, c) {
                    assert!(heap.strings_equal(a, c), "transitive");
                }
            }
        }
    }
}

#[test]
fn test_less_than_is_a_strict_order() {
    let mut heap = StringHeap::new();

    let samples = [
        heap.new_string_from_bytes(b""),
        heap.new_string_from_bytes(b"a"),
        heap.new_string_from_bytes(b"ab"),
        heap.new_string_from_uint32(10),
        heap.new_string_from_uint32(9),
        heap.new_string_from_number(1.5),
        heap.new_string_from_bytes("é".as_bytes()),
    ];

    for &a in &samples {
        for &b in &samples {
            if heap.string_less_than(a, b) {
                assert!(!heap.string_less_than(b, a), "antisymmetric");
            }
            let equal = heap.strings_equal(a, b);
            let neither = !heap.string_less_than(a, b) && !heap.string_less_than(b, a);
            assert_eq!(equal, neither);
            for &c in &samples {
                if heap.string_less_than(a, b) && heap.string_less_than(b, c) {
                    assert!(heap.string_less_than(a, c), "transitive");
                }
            }
        }
    }
}

#[test]
fn test_concat_additivity_and_identity() {
    let mut heap = StringHeap::new();

    let a = heap.new_string_from_bytes("wing🙂".as_bytes());
    let b = heap.new_string_from_uint32(42);
    let joined = heap.concat_strings(a, b);

    assert_eq!(
        heap.string_size(joined),
        heap.string_size(a) + heap.string_size(b)
    );
    assert_eq!(
        heap.string_length(joined),
        heap.string_length(a) + heap.string_length(b)
    );

    let mut expected = bytes_of(&heap, a);
    expected.extend_from_slice(&bytes_of(&heap, b));
    assert_eq!(bytes_of(&heap, joined), expected);

    let empty = heap.new_string_from_bytes(b"");
    let left = heap.concat_strings(empty, a);
    let right = heap.concat_strings(a, empty);
    assert!(heap.strings_equal(left, a));
    assert!(heap.strings_equal(right, a));
}

#[test]
fn test_substring_composition() {
    let mut heap = StringHeap::new();
    let s = heap.new_string_from_bytes("aé🙂bé".as_bytes());

    for i in 0..=5u32 {
        for j in i..=5 {
            for k in j..=5 {
                let left = heap.substring(s, i, j);
                let right = heap.substring(s, j, k);
                let joined = heap.concat_strings(left, right);
                let whole = heap.substring(s, i, k);
                assert!(
                    heap.strings_equal(joined, whole),
                    "substr({i},{j}) ++ substr({j},{k}) != substr({i},{k})"
                );
            }
        }
        let empty = heap.substring(s, i, i);
        assert!(heap.string_is_empty(empty));
    }
}

#[test]
fn test_array_index_sweep_and_sentinel() {
    let mut heap = StringHeap::new();

    for value in [0u32, 1, 42, 4096, ARRAY_INDEX_SENTINEL - 1] {
        let s = heap.new_string_from_uint32(value);
        assert_eq!(heap.string_array_index(s), Some(value));
    }

    let sentinel = heap.new_string_from_uint32(ARRAY_INDEX_SENTINEL);
    assert_eq!(heap.string_array_index(sentinel), None);
}

#[test]
fn test_refcount_conservation() {
    let mut heap = StringHeap::new();
    assert_eq!(heap.live_strings(), 0);

    let a = heap.new_string_from_bytes(b"wingspan");
    let b = heap.new_string_from_number(3.14);
    let shared = heap.acquire(a);
    let joined = heap.concat_strings(a, b);
    let trimmed = heap.trim_string(joined);
    let sliced = heap.substring(joined, 2, 6);

    heap.release(sliced);
    heap.release(trimmed);
    heap.release(joined);
    heap.release(shared);
    heap.release(b);
    heap.release(a);

    assert_eq!(heap.live_strings(), 0);
    assert_eq!(heap.live_heap_bytes(), 0);
    assert_eq!(heap.live_number_cells(), 0);
}

#[test]
fn test_literal_interning_identities() {
    let mut heap = StringHeap::new();
    heap.register_magic_ex(b"appKey");

    // interning the same spelling twice yields one identity
    let first = heap.intern_literal(b"wingspan");
    let second = heap.intern_literal(b"wingspan");
    assert_eq!(first, second);

    let via_lit = heap.new_string_from_literal(first);
    let via_bytes = heap.new_string_from_bytes(b"wingspan");
    assert!(heap.strings_equal(via_lit, via_bytes));

    // a literal spelling an extended entry resolves to that entry
    let ex_lit = heap.intern_literal(b"appKey");
    let via_ex = heap.new_string_from_literal(ex_lit);
    assert_eq!(heap.string_container(via_ex), Container::MagicEx);
}
