//! # Segment Table Properties
//!
//! Random allocate/free sequences checked against a simple model of which
//! handles are live.

use std::collections::BTreeSet;

use proptest::prelude::*;
use umvm_core::config::MemoryConfig;
use umvm_core::memory::SegmentTable;

#[derive(Clone, Debug)]
enum Op {
    Alloc(u32),
    Free(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u32..64).prop_map(Op::Alloc),
        2 => any::<usize>().prop_map(Op::Free),
    ]
}

fn fresh_table() -> SegmentTable {
    let mut t = SegmentTable::new(&MemoryConfig::default());
    t.install_program(vec![0]).unwrap();
    t
}

proptest! {
    #[test]
    fn prop_allocations_match_model(ops in prop::collection::vec(op_strategy(), 1..200)) {
        let mut t = fresh_table();
        let mut live: BTreeSet<u32> = BTreeSet::new();

        for op in ops {
            let count_before = t.handle_count();
            match op {
                Op::Alloc(len) => {
                    let table_full = live.len() + 1 == count_before;
                    let h = t.allocate(len).unwrap();

                    prop_assert_ne!(h, 0);
                    prop_assert!(!live.contains(&h));
                    prop_assert!(t.is_active(h));
                    let seg = t.segment(h).unwrap();
                    prop_assert_eq!(seg.len(), len as usize);
                    prop_assert!(seg.words().iter().all(|&w| w == 0));

                    if table_full {
                        prop_assert_eq!(t.handle_count(), count_before * 2);
                        prop_assert_eq!(h as usize, count_before);
                    } else {
                        prop_assert_eq!(t.handle_count(), count_before);
                    }
                    prop_assert!(live.insert(h));
                }
                Op::Free(pick) => {
                    if live.is_empty() {
                        continue;
                    }
                    let h = *live.iter().nth(pick % live.len()).unwrap();
                    t.free(h).unwrap();
                    prop_assert!(live.remove(&h));
                    prop_assert!(!t.is_active(h));
                    prop_assert_eq!(t.handle_count(), count_before);
                }
            }
            prop_assert!(t.handle_count() >= count_before);
            prop_assert_eq!(t.stats().live as usize, live.len());
        }
    }

    #[test]
    fn prop_freed_handle_is_reused_next(
        n in 1usize..40,
        pick in any::<usize>(),
        len in 0u32..32,
    ) {
        let mut t = fresh_table();
        let handles: Vec<u32> = (0..n).map(|_| t.allocate(len).unwrap()).collect();
        let victim = handles[pick % handles.len()];
        t.free(victim).unwrap();
        prop_assert_eq!(t.allocate(len).unwrap(), victim);
    }
}
