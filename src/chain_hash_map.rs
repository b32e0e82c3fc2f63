//! ChainHashMap: separate chaining over an array of `LinkedList` buckets.
//!
//! An entry lives in bucket `hash(key) % bucket_count`. New entries are
//! prepended to their chain. The bucket array doubles when an insertion
//! leaves its chain longer than the policy allows or pushes the load factor
//! (`used_buckets / bucket_count`) over the limit; entries are then moved,
//! never cloned, into the new array using their cached hash.

use crate::error::MapError;
use crate::linked_list::{self, CursorMut, LinkedList};
use crate::policy::GrowthPolicy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use hashbrown::hash_map::DefaultHashBuilder;

/// One stored key/value pair with the key's hash computed at insertion.
#[derive(Clone, Debug)]
pub struct Entry<K, V> {
    key: K,
    hash: u64,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn value(&self) -> &V {
        &self.value
    }
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
    pub fn hash(&self) -> u64 {
        self.hash
    }

    fn matches<Q>(&self, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.hash == hash && self.key.borrow() == q
    }
}

type Bucket<K, V> = LinkedList<Entry<K, V>>;

#[derive(Copy, Clone, Debug)]
enum GrowthTrigger {
    ChainLength,
    LoadFactor,
}

/// Hash map with separately chained buckets.
///
/// `Clone` is an explicit deep copy of every chain; the hasher is cloned
/// with it so cached hashes keep addressing the same buckets.
#[derive(Clone)]
pub struct ChainHashMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    policy: GrowthPolicy,
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    used_buckets: usize, // buckets with at least one entry
}

#[inline]
fn bucket_index(hash: u64, bucket_count: usize) -> usize {
    (hash % bucket_count as u64) as usize
}

fn empty_buckets<K, V>(count: usize) -> Vec<Bucket<K, V>> {
    (0..count).map(|_| LinkedList::new()).collect()
}

// A chain can only be split by growing if its entries do not all share one hash.
fn has_distinct_hashes<K, V>(chain: &Bucket<K, V>) -> bool {
    let mut hashes = chain.iter().map(Entry::hash);
    match hashes.next() {
        Some(first) => hashes.any(|h| h != first),
        None => false,
    }
}

impl<K, V> ChainHashMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_policy(GrowthPolicy::default())
    }

    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self::with_policy(GrowthPolicy::default().with_initial_capacity(initial_capacity))
    }

    pub fn with_policy(policy: GrowthPolicy) -> Self {
        Self::with_policy_and_hasher(policy, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for ChainHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> ChainHashMap<K, V, S> {
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn used_buckets(&self) -> usize {
        self.used_buckets
    }

    pub fn load_factor(&self) -> f64 {
        self.used_buckets as f64 / self.buckets.len() as f64
    }

    pub fn policy(&self) -> &GrowthPolicy {
        &self.policy
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn bucket_len(&self, index: usize) -> Result<usize, MapError> {
        self.bucket(index).map(LinkedList::len)
    }

    /// Entries of one bucket in chain order.
    pub fn bucket_iter(
        &self,
        index: usize,
    ) -> Result<linked_list::Iter<'_, Entry<K, V>>, MapError> {
        self.bucket(index).map(LinkedList::iter)
    }

    /// Cursor over one bucket's chain. Removing through it keeps the map's
    /// counters consistent.
    pub fn bucket_cursor_mut(
        &mut self,
        index: usize,
    ) -> Result<BucketCursor<'_, K, V>, MapError> {
        self.bucket(index)?;
        Ok(self.cursor_at(index))
    }

    /// Drop every entry. The bucket array keeps its current size.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            bucket.clear();
        }
        self.len = 0;
        self.used_buckets = 0;
    }

    /// All entries, bucket by bucket in index order, each chain front to back.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            chain: None,
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            chain: None,
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    fn bucket(&self, index: usize) -> Result<&Bucket<K, V>, MapError> {
        self.buckets.get(index).ok_or(MapError::BucketOutOfBounds {
            index,
            bucket_count: self.buckets.len(),
        })
    }

    fn cursor_at(&mut self, index: usize) -> BucketCursor<'_, K, V> {
        BucketCursor {
            entries: self.buckets[index].cursor_mut(),
            len: &mut self.len,
            used_buckets: &mut self.used_buckets,
        }
    }
}

impl<K, V, S> ChainHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_policy_and_hasher(GrowthPolicy::default(), hasher)
    }

    pub fn with_policy_and_hasher(policy: GrowthPolicy, hasher: S) -> Self {
        Self {
            hasher,
            policy,
            buckets: empty_buckets(policy.initial_capacity()),
            len: 0,
            used_buckets: 0,
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    fn locate<Q>(&self, q: &Q) -> (u64, usize)
    where
        Q: ?Sized + Hash,
    {
        let hash = self.make_hash(q);
        (hash, bucket_index(hash, self.buckets.len()))
    }

    /// Insert or overwrite. Returns the previous value when the key was
    /// already present; in that case the chain is untouched and no growth
    /// check runs.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let (hash, index) = self.locate(&key);
        if let Some(entry) = self.buckets[index]
            .iter_mut()
            .find(|e| e.hash == hash && e.key == key)
        {
            return Some(core::mem::replace(&mut entry.value, value));
        }

        let bucket = &mut self.buckets[index];
        bucket.push_front(Entry { key, hash, value });
        self.len += 1;
        if bucket.len() == 1 {
            self.used_buckets += 1;
        }
        if let Some(trigger) = self.growth_trigger(index) {
            self.rehash(trigger);
        }
        None
    }

    pub fn get<Q>(&self, q: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q)
            .map(|e| &e.value)
            .ok_or(MapError::KeyNotFound)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (hash, index) = self.locate(q);
        self.buckets[index]
            .iter_mut()
            .find(|e| e.matches(hash, q))
            .map(|e| &mut e.value)
            .ok_or(MapError::KeyNotFound)
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    /// Remove `q` if present. Absence is not an error.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).is_some()
    }

    /// Remove `q` if present and hand back the owned pair.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (hash, index) = self.locate(q);
        let mut cursor = self.cursor_at(index);
        while let Some(entry) = cursor.current() {
            if entry.matches(hash, q) {
                return cursor.remove_current();
            }
            cursor.move_next();
        }
        None
    }

    fn find<Q>(&self, q: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (hash, index) = self.locate(q);
        self.buckets[index].iter().find(|e| e.matches(hash, q))
    }

    fn growth_trigger(&self, index: usize) -> Option<GrowthTrigger> {
        let chain = &self.buckets[index];
        if self.policy.chain_too_long(chain.len()) {
            if has_distinct_hashes(chain) {
                return Some(GrowthTrigger::ChainLength);
            }
            log::trace!(
                "bucket {} holds {} entries sharing one hash; growth would not split it",
                index,
                chain.len()
            );
        }
        if self.policy.overloaded(self.used_buckets, self.buckets.len()) {
            return Some(GrowthTrigger::LoadFactor);
        }
        None
    }

    // Double the bucket array and move every entry by its cached hash.
    fn rehash(&mut self, trigger: GrowthTrigger) {
        let old_count = self.buckets.len();
        let new_count = old_count * 2;
        let mut fresh: Vec<Bucket<K, V>> = empty_buckets(new_count);
        for bucket in core::mem::take(&mut self.buckets) {
            for entry in bucket {
                fresh[bucket_index(entry.hash, new_count)].push_front(entry);
            }
        }
        self.used_buckets = fresh.iter().filter(|b| !b.is_empty()).count();
        self.buckets = fresh;
        log::debug!(
            "grew bucket array {} -> {} ({} entries, {} used buckets, trigger: {:?})",
            old_count,
            new_count,
            self.len,
            self.used_buckets,
            trigger
        );
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let count = self.buckets.len();
        let initial = self.policy.initial_capacity();
        assert_eq!(count % initial, 0, "bucket count is a multiple of initial");
        assert!((count / initial).is_power_of_two(), "bucket count doubles only");

        let total: usize = self.buckets.iter().map(LinkedList::len).sum();
        assert_eq!(self.len, total, "len equals the sum of chain lengths");

        let used = self.buckets.iter().filter(|b| !b.is_empty()).count();
        assert_eq!(self.used_buckets, used, "used_buckets tracks non-empty buckets");

        for (i, bucket) in self.buckets.iter().enumerate() {
            for (n, entry) in bucket.iter().enumerate() {
                assert_eq!(entry.hash, self.make_hash(&entry.key), "stale cached hash");
                assert_eq!(bucket_index(entry.hash, count), i, "entry outside home bucket");
                assert!(
                    bucket.iter().skip(n + 1).all(|other| other.key != entry.key),
                    "keys are unique within a chain"
                );
            }
        }
    }
}

impl<K, V, S> fmt::Debug for ChainHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut ChainHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;
    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

/// Cursor over a single bucket's chain.
///
/// Wraps the list cursor so that removal also updates the owning map's
/// entry count and used-bucket count. Keys are read-only through the cursor.
pub struct BucketCursor<'a, K, V> {
    entries: CursorMut<'a, Entry<K, V>>,
    len: &'a mut usize,
    used_buckets: &'a mut usize,
}

impl<'a, K, V> BucketCursor<'a, K, V> {
    pub fn current(&self) -> Option<&Entry<K, V>> {
        self.entries.current()
    }

    pub fn current_mut(&mut self) -> Option<(&K, &mut V)> {
        self.entries
            .current_mut()
            .map(|e| (&e.key, &mut e.value))
    }

    pub fn is_end(&self) -> bool {
        self.entries.is_end()
    }

    pub fn move_next(&mut self) {
        self.entries.move_next();
    }

    /// Unlink the current entry in O(1); the cursor moves onto the next one.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let entry = self.entries.remove_current()?;
        *self.len -= 1;
        if self.entries.list_len() == 0 {
            *self.used_buckets -= 1;
        }
        Some((entry.key, entry.value))
    }
}

/// Iterator over `(&K, &V)` across all buckets.
pub struct Iter<'a, K, V> {
    buckets: core::slice::Iter<'a, Bucket<K, V>>,
    chain: Option<linked_list::Iter<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets.clone(),
            chain: self.chain.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some((&entry.key, &entry.value));
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` across all buckets.
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Bucket<K, V>>,
    chain: Option<linked_list::IterMut<'a, Entry<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain.as_mut().and_then(|c| c.next()) {
                self.remaining -= 1;
                return Some((&entry.key, &mut entry.value));
            }
            self.chain = Some(self.buckets.next()?.iter_mut());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

pub struct Keys<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<&'a K> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V>(Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_hashers::{ConstBuildHasher, IdentityBuildHasher};
    use std::collections::BTreeSet;

    fn identity_map() -> ChainHashMap<u64, u64, IdentityBuildHasher> {
        ChainHashMap::with_hasher(IdentityBuildHasher::default())
    }

    /// Invariant: with capacity 8 and identity hashing, the 7th distinct key
    /// pushes used_buckets/bucket_count to 7/8 > 0.8 and the array doubles to 16.
    #[test]
    fn load_factor_growth_scenario() {
        let mut m = identity_map();
        for k in 0..=10u64 {
            assert!(m.set(k, k).is_none());
            let expected = if k < 6 { 8 } else { 16 };
            assert_eq!(m.bucket_count(), expected, "after inserting key {}", k);
            m.assert_invariants();
        }
        for k in 0..=10u64 {
            assert_eq!(m.get(&k), Ok(&k));
        }
        assert_eq!(m.get(&11), Err(MapError::KeyNotFound));
        assert_eq!(m.len(), 11);
        assert_eq!(m.used_buckets(), 11);
    }

    /// Invariant: a chain longer than 3 with distinct hashes forces a doubling
    /// even while the load factor is low.
    #[test]
    fn chain_length_growth_splits_chain() {
        let mut m = identity_map();
        for k in [0u64, 8, 16] {
            m.set(k, k);
        }
        assert_eq!(m.bucket_count(), 8);
        assert_eq!(m.bucket_len(0), Ok(3));

        m.set(24, 24);
        assert_eq!(m.bucket_count(), 16);
        assert_eq!(m.bucket_len(0), Ok(2));
        assert_eq!(m.bucket_len(8), Ok(2));
        assert_eq!(m.used_buckets(), 2);
        m.assert_invariants();
    }

    /// Invariant: rehash moves entries in chain order with front insertion, so
    /// entries that stay together come out in reversed relative order.
    #[test]
    fn rehash_front_inserts_in_chain_order() {
        let mut m = identity_map();
        for k in [0u64, 16, 32] {
            m.set(k, k);
        }
        // Chains are newest-first.
        let before: Vec<u64> = m.bucket_iter(0).unwrap().map(|e| *e.key()).collect();
        assert_eq!(before, vec![32, 16, 0]);

        m.set(8, 8);
        assert_eq!(m.bucket_count(), 16);
        let after: Vec<u64> = m.bucket_iter(0).unwrap().map(|e| *e.key()).collect();
        assert_eq!(after, vec![0, 16, 32]);
        let moved: Vec<u64> = m.bucket_iter(8).unwrap().map(|e| *e.key()).collect();
        assert_eq!(moved, vec![8]);
        m.assert_invariants();
    }

    /// Invariant: fully colliding keys never trigger unbounded growth.
    #[test]
    fn identical_hashes_do_not_grow() {
        let mut m: ChainHashMap<String, usize, ConstBuildHasher> =
            ChainHashMap::with_hasher(ConstBuildHasher);
        for i in 0..50 {
            m.set(format!("k{i}"), i);
        }
        assert_eq!(m.bucket_count(), 8);
        assert_eq!(m.bucket_len(0), Ok(50));
        for i in 0..50 {
            assert_eq!(m.get(format!("k{i}").as_str()), Ok(&i));
        }
        m.assert_invariants();
    }

    #[test]
    fn set_overwrites_in_place_without_growth() {
        let mut m = identity_map();
        for k in 0..6u64 {
            m.set(k, k);
        }
        assert_eq!(m.set(3, 100), Some(3));
        assert_eq!(m.set(3, 200), Some(100));
        assert_eq!(m.len(), 6);
        assert_eq!(m.used_buckets(), 6);
        assert_eq!(m.bucket_count(), 8);
        assert_eq!(m.get(&3), Ok(&200));
    }

    /// Invariant: removal decrements len by one and drops used_buckets when the
    /// chain becomes empty; absent keys leave the map untouched.
    #[test]
    fn remove_updates_counters() {
        let mut m = identity_map();
        m.set(1, 10);
        m.set(9, 90);
        assert_eq!(m.used_buckets(), 1);

        assert!(m.remove(&1));
        assert!(!m.contains(&1));
        assert_eq!(m.len(), 1);
        assert_eq!(m.used_buckets(), 1);

        assert!(!m.remove(&1));
        assert_eq!(m.len(), 1);

        assert_eq!(m.remove_entry(&9), Some((9, 90)));
        assert_eq!(m.used_buckets(), 0);
        assert_eq!(m.bucket_len(1), Ok(0));
        assert!(m.is_empty());
        m.assert_invariants();
    }

    #[test]
    fn bucket_queries_are_bounds_checked() {
        let mut m = identity_map();
        let oob = MapError::BucketOutOfBounds {
            index: 8,
            bucket_count: 8,
        };
        assert_eq!(m.bucket_len(8), Err(oob));
        assert!(matches!(m.bucket_iter(8), Err(e) if e == oob));
        assert!(matches!(m.bucket_cursor_mut(8), Err(e) if e == oob));
        assert_eq!(m.bucket_len(7), Ok(0));
    }

    /// Invariant: removing through a bucket cursor keeps len/used_buckets exact
    /// and the walk continues over the rest of the chain.
    #[test]
    fn bucket_cursor_removes_and_continues() {
        let mut m = identity_map();
        for k in [2u64, 10, 18] {
            m.set(k, k * 10);
        }
        {
            let mut c = m.bucket_cursor_mut(2).unwrap();
            let mut seen = Vec::new();
            while let Some(entry) = c.current() {
                let k = *entry.key();
                seen.push(k);
                if k == 10 {
                    assert_eq!(c.remove_current(), Some((10, 100)));
                } else {
                    if let Some((_, v)) = c.current_mut() {
                        *v += 1;
                    }
                    c.move_next();
                }
            }
            assert!(c.is_end());
            assert_eq!(seen, vec![18, 10, 2]);
        }
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&18), Ok(&181));
        assert_eq!(m.get(&2), Ok(&21));
        m.assert_invariants();

        let mut c = m.bucket_cursor_mut(2).unwrap();
        while c.remove_current().is_some() {}
        drop(c);
        assert_eq!(m.used_buckets(), 0);
        assert!(m.is_empty());
        m.assert_invariants();
    }

    #[test]
    fn borrowed_lookup_with_str() {
        let mut m: ChainHashMap<String, i32> = ChainHashMap::new();
        m.set("hello".to_string(), 1);
        assert!(m.contains("hello"));
        assert!(!m.contains("world"));
        assert_eq!(m.get("hello"), Ok(&1));
        *m.get_mut("hello").unwrap() += 1;
        assert_eq!(m.get("hello"), Ok(&2));
        assert_eq!(m.get_mut("world"), Err(MapError::KeyNotFound));
        assert!(m.remove("hello"));
    }

    #[test]
    fn iteration_visits_each_entry_once() {
        let mut m: ChainHashMap<u32, u32> = (0..100).map(|k| (k, k * 2)).collect();
        assert_eq!(m.iter().len(), 100);
        let keys: BTreeSet<u32> = m.keys().copied().collect();
        assert_eq!(keys, (0..100).collect::<BTreeSet<_>>());
        assert_eq!(m.values().map(|&v| v as u64).sum::<u64>(), 9900);

        for (_, v) in m.iter_mut() {
            *v += 1;
        }
        for (k, v) in &m {
            assert_eq!(*v, k * 2 + 1);
        }
        m.assert_invariants();
    }

    #[test]
    fn clear_keeps_bucket_array() {
        let mut m = identity_map();
        m.extend((0..20u64).map(|k| (k, k)));
        let count = m.bucket_count();
        assert!(count > 8);
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.used_buckets(), 0);
        assert_eq!(m.bucket_count(), count);
        assert_eq!(m.iter().count(), 0);
        m.set(3, 3);
        assert_eq!(m.get(&3), Ok(&3));
        m.assert_invariants();
    }

    #[test]
    fn clone_is_independent() {
        let mut a = identity_map();
        a.extend((0..10u64).map(|k| (k, k)));
        let b = a.clone();
        a.set(0, 100);
        a.remove(&1);
        assert_eq!(b.get(&0), Ok(&0));
        assert!(b.contains(&1));
        assert_eq!(b.len(), 10);
        b.assert_invariants();
    }

    #[test]
    fn custom_policy_grows_early() {
        let policy = GrowthPolicy::default()
            .with_initial_capacity(2)
            .with_max_load_factor(0.5);
        let mut m: ChainHashMap<u64, u64, IdentityBuildHasher> =
            ChainHashMap::with_policy_and_hasher(policy, IdentityBuildHasher::default());
        assert_eq!(m.bucket_count(), 2);
        m.set(0, 0);
        assert_eq!(m.bucket_count(), 2);
        m.set(1, 1);
        assert_eq!(m.bucket_count(), 4);
        assert_eq!(m.policy(), &policy);
        m.assert_invariants();
    }

    #[test]
    fn debug_renders_as_map() {
        let mut m = identity_map();
        m.set(1, 2);
        assert_eq!(format!("{:?}", m), "{1: 2}");
    }
}
