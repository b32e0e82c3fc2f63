#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can check
// private structural invariants after every operation.

use crate::chain_hash_map::ChainHashMap;
use crate::error::MapError;
use crate::policy::GrowthPolicy;
use crate::test_hashers::ConstBuildHasher;
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Get(usize),
    Remove(usize),
    Contains(String),
    Mutate(usize, i32),
    // Walk bucket `hash % bucket_count` of the pooled key and remove it via the cursor.
    CursorRemove(usize),
    Iterate,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => idx.clone().prop_map(OpI::CursorRemove),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Runs one scenario against `sut`, comparing every step with a std HashMap.
// Invariants exercised across random operation sequences:
// - `get` returns the most recently set value; absent keys are KeyNotFound;
// - `remove` returns true exactly when the model held the key and len drops by one;
// - `contains` parity for pooled and foreign keys (borrowed `&str` lookup);
// - a bucket-cursor removal keeps len/used_buckets consistent;
// - `iter` yields each live entry exactly once;
// - structural invariants (home bucket, cached hash, used_buckets, len,
//   doubling-only bucket count) hold after every op.
fn run_scenario<S: BuildHasher>(
    mut sut: ChainHashMap<Key, i32, S>,
    pool: Vec<String>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<Key, i32> = HashMap::new();
    let mut last_bucket_count = sut.bucket_count();

    for op in ops {
        match op {
            OpI::Set(i, v) => {
                let k = key_from(&pool, i);
                let prev = sut.set(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::Get(i) => {
                let k = key_from(&pool, i);
                let expected = model.get(&k).ok_or(MapError::KeyNotFound);
                prop_assert_eq!(sut.get(&k), expected);
            }
            OpI::Remove(i) => {
                let k = key_from(&pool, i);
                let before = sut.len();
                let removed = sut.remove(&k);
                prop_assert_eq!(removed, model.remove(&k).is_some());
                prop_assert_eq!(sut.len(), if removed { before - 1 } else { before });
                prop_assert!(!sut.contains(&k));
            }
            OpI::Contains(s) => {
                let has = sut.contains(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(&pool, i);
                match (sut.get_mut(k.0.as_str()), model.get_mut(&k)) {
                    (Ok(a), Some(b)) => {
                        *a = a.saturating_add(d);
                        *b = b.saturating_add(d);
                    }
                    (Err(MapError::KeyNotFound), None) => {}
                    (a, b) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", a, b),
                }
            }
            OpI::CursorRemove(i) => {
                let k = key_from(&pool, i);
                let index = (sut.hasher().hash_one(&k) % sut.bucket_count() as u64) as usize;
                let mut removed = None;
                let mut cursor = sut.bucket_cursor_mut(index).expect("home bucket in range");
                while let Some(entry) = cursor.current() {
                    if entry.key() == &k {
                        removed = cursor.remove_current();
                        break;
                    }
                    cursor.move_next();
                }
                prop_assert_eq!(removed.map(|(_, v)| v), model.remove(&k));
            }
            OpI::Iterate => {
                let s: BTreeMap<_, _> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                let m: BTreeMap<_, _> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(sut.iter().len(), sut.len());
                prop_assert_eq!(s, m);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
        }

        sut.assert_invariants();
        prop_assert!(sut.bucket_count() >= last_bucket_count, "bucket array never shrinks");
        last_bucket_count = sut.bucket_count();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() <= sut.policy().max_load_factor());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_scenario(ChainHashMap::new(), pool, ops)?;
    }

    // Tiny array and short chains: nearly every insert of a fresh key grows.
    #[test]
    fn prop_state_machine_aggressive_growth((pool, ops) in arb_scenario()) {
        let policy = GrowthPolicy::new(1, 1, 0.5);
        run_scenario(ChainHashMap::with_policy(policy), pool, ops)?;
    }

    // Worst-case collisions: every key shares one hash, so everything chains
    // in bucket 0 and equality alone resolves lookups.
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_scenario(ChainHashMap::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}
