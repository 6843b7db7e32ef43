//! TwoQCache: bounded key/value cache with the 2Q replacement policy
//!
//! Keys move through three segments:
//! - **In**: FIFO of newly admitted keys (probationary)
//! - **Out**: FIFO of keys demoted from In; values stay resident
//! - **Hot**: LRU of keys that were read again while in Out
//!
//! Only a hit in Out promotes. A hit in In leaves the key in place, so a
//! one-time scan never reaches Hot.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use parking_lot::Mutex;
use tracing::{debug, error, trace};

use crate::config::{CacheConfig, Capacities};
use crate::error::{Error, Result};
use crate::queue::{KeyQueue, MAX_PREALLOC};
use crate::stats::CacheStats;
use crate::traits::Cache;

/// Segment a cached key currently belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Probationary FIFO
    In,
    /// Demoted FIFO
    Out,
    /// LRU working set
    Hot,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::In => f.write_str("in"),
            Segment::Out => f.write_str("out"),
            Segment::Hot => f.write_str("hot"),
        }
    }
}

/// Point-in-time copy of segment membership, oldest key first in each list.
///
/// Sizes are the cache's own counters, reported separately from the key
/// lists so drift between the two is observable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSnapshot<K> {
    /// Keys in the In segment
    pub in_keys: Vec<K>,
    /// Keys in the Out segment
    pub out_keys: Vec<K>,
    /// Keys in the Hot segment, least recently used first
    pub hot_keys: Vec<K>,
    /// In counter
    pub in_size: usize,
    /// Out counter
    pub out_size: usize,
    /// Hot counter
    pub hot_size: usize,
}

/// One segment's queue with its counter and fixed capacity
struct SegmentQueue<K> {
    keys: KeyQueue<K>,
    size: usize,
    cap: usize,
}

impl<K> SegmentQueue<K>
where
    K: Hash + Eq + Clone,
{
    fn new(cap: usize) -> Self {
        Self {
            keys: KeyQueue::with_capacity(cap),
            size: 0,
            cap,
        }
    }

    fn has_room(&self) -> bool {
        self.size < self.cap
    }

    fn push(&mut self, key: K) {
        if self.keys.push_back(key) {
            self.size += 1;
        }
    }

    fn pop_oldest(&mut self) -> Option<K> {
        let key = self.keys.pop_front()?;
        self.size -= 1;
        Some(key)
    }

    fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.keys.remove(key) {
            self.size -= 1;
            true
        } else {
            false
        }
    }

    fn is_consistent(&self) -> bool {
        self.size == self.keys.len()
    }

    fn clear(&mut self) {
        self.keys.clear();
        self.size = 0;
    }
}

/// State guarded by the cache lock
struct Inner<K, V> {
    entries: HashMap<K, V, RandomState>,
    in_seg: SegmentQueue<K>,
    out_seg: SegmentQueue<K>,
    hot_seg: SegmentQueue<K>,
}

impl<K, V> Inner<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone,
{
    fn new(caps: Capacities) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(
                caps.total().min(MAX_PREALLOC),
                RandomState::new(),
            ),
            in_seg: SegmentQueue::new(caps.in_cap),
            out_seg: SegmentQueue::new(caps.out_cap),
            hot_seg: SegmentQueue::new(caps.hot_cap),
        }
    }

    fn get<Q>(&mut self, key: &Q, stats: &CacheStats) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (owned_key, value) = match self.entries.get_key_value(key) {
            Some((k, v)) => (k.clone(), v.clone()),
            None => {
                stats.record_miss();
                return Ok(None);
            }
        };
        stats.record_hit();

        if self.hot_seg.keys.contains(key) {
            self.hot_seg.keys.move_to_back(key);
            trace!(key = ?owned_key, "touched hot entry");
        } else if self.out_seg.keys.contains(key) {
            self.hot_seg.push(owned_key.clone());
            self.trim_hot(stats)?;
            self.out_seg.remove(key);
            stats.record_promotion();
            trace!(key = ?owned_key, "promoted out -> hot");
        }

        Ok(Some(value))
    }

    fn put(&mut self, key: K, value: V, stats: &CacheStats) -> Result<V> {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = value.clone();
            stats.record_update();
            return Ok(value);
        }
        stats.record_insert();

        let target = if self.in_seg.has_room() {
            Some(Segment::In)
        } else if self.out_seg.has_room() {
            Some(Segment::Out)
        } else if self.hot_seg.has_room() {
            Some(Segment::Hot)
        } else if self.trim_in(stats) {
            Some(Segment::In)
        } else {
            None
        };

        self.entries.insert(key.clone(), value.clone());
        match target {
            Some(Segment::In) => self.in_seg.push(key),
            Some(Segment::Out) => self.out_seg.push(key),
            Some(Segment::Hot) => self.hot_seg.push(key),
            None => {
                // In cannot free a slot: admit straight into Hot and let
                // its trim pass pick the victim.
                self.hot_seg.push(key);
                self.trim_hot(stats)?;
            }
        }

        Ok(value)
    }

    fn remove<Q>(&mut self, key: &Q, stats: &CacheStats) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.entries.remove(key)?;
        let segment = if self.in_seg.remove(key) {
            Some(Segment::In)
        } else if self.out_seg.remove(key) {
            Some(Segment::Out)
        } else if self.hot_seg.remove(key) {
            Some(Segment::Hot)
        } else {
            None
        };
        stats.record_removal();
        trace!(segment = ?segment, "removed entry");
        Some(value)
    }

    /// Demote the oldest In keys into Out until In has a free slot.
    /// Returns false when In has no capacity at all.
    fn trim_in(&mut self, stats: &CacheStats) -> bool {
        if self.in_seg.cap < 1 {
            return false;
        }

        loop {
            if self.in_seg.has_room() {
                return true;
            }
            let demoted = match self.in_seg.pop_oldest() {
                Some(key) => key,
                None => return true,
            };

            while self.out_seg.size >= self.out_seg.cap {
                match self.out_seg.pop_oldest() {
                    Some(evicted) => {
                        self.entries.remove(&evicted);
                        stats.record_eviction();
                        debug!(key = ?evicted, segment = %Segment::Out, "evicted");
                    }
                    None => break,
                }
            }

            trace!(key = ?demoted, "demoted in -> out");
            self.out_seg.push(demoted);
            stats.record_demotion();
        }
    }

    /// Evict least recently used Hot keys until Hot fits its capacity.
    fn trim_hot(&mut self, stats: &CacheStats) -> Result<()> {
        if !self.out_seg.is_consistent()
            || !self.hot_seg.is_consistent()
            || (self.out_seg.keys.is_empty() && self.hot_seg.size != 0)
        {
            let msg = format!(
                "segment sizes inconsistent (out: {} counted / {} queued, hot: {} counted / {} queued)",
                self.out_seg.size,
                self.out_seg.keys.len(),
                self.hot_seg.size,
                self.hot_seg.keys.len(),
            );
            error!("{}", msg);
            return Err(Error::InvariantViolation(msg));
        }

        while self.hot_seg.size > self.hot_seg.cap {
            match self.hot_seg.pop_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    stats.record_eviction();
                    debug!(key = ?evicted, segment = %Segment::Hot, "evicted");
                }
                None => break,
            }
        }

        Ok(())
    }

    fn segment_of<Q>(&self, key: &Q) -> Option<Segment>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.in_seg.keys.contains(key) {
            Some(Segment::In)
        } else if self.out_seg.keys.contains(key) {
            Some(Segment::Out)
        } else if self.hot_seg.keys.contains(key) {
            Some(Segment::Hot)
        } else {
            None
        }
    }

    fn snapshot(&self) -> SegmentSnapshot<K> {
        SegmentSnapshot {
            in_keys: self.in_seg.keys.iter().cloned().collect(),
            out_keys: self.out_seg.keys.iter().cloned().collect(),
            hot_keys: self.hot_seg.keys.iter().cloned().collect(),
            in_size: self.in_seg.size,
            out_size: self.out_seg.size,
            hot_size: self.hot_seg.size,
        }
    }

    fn check_invariants(&self) -> Result<()> {
        let segments = [
            (Segment::In, &self.in_seg),
            (Segment::Out, &self.out_seg),
            (Segment::Hot, &self.hot_seg),
        ];

        let mut queued = 0;
        for (name, seg) in segments {
            if !seg.is_consistent() {
                return Err(Error::InvariantViolation(format!(
                    "{} counter is {} but {} keys are queued",
                    name,
                    seg.size,
                    seg.keys.len()
                )));
            }
            if seg.size > seg.cap {
                return Err(Error::InvariantViolation(format!(
                    "{} holds {} keys, capacity {}",
                    name, seg.size, seg.cap
                )));
            }
            for key in seg.keys.iter() {
                if !self.entries.contains_key(key) {
                    return Err(Error::InvariantViolation(format!(
                        "{:?} queued in {} but has no value",
                        key, name
                    )));
                }
            }
            queued += seg.size;
        }

        for key in self.entries.keys() {
            let memberships = segments
                .iter()
                .filter(|(_, seg)| seg.keys.contains(key))
                .count();
            if memberships != 1 {
                return Err(Error::InvariantViolation(format!(
                    "{:?} belongs to {} segments",
                    key, memberships
                )));
            }
        }

        if queued != self.entries.len() {
            return Err(Error::InvariantViolation(format!(
                "{} keys queued for {} entries",
                queued,
                self.entries.len()
            )));
        }

        Ok(())
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.in_seg.clear();
        self.out_seg.clear();
        self.hot_seg.clear();
    }
}

/// Thread-safe 2Q cache.
///
/// Every operation takes one exclusive lock for its whole body, so callers
/// never observe a half-moved key.
pub struct TwoQCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    stats: CacheStats,
    capacity: usize,
    capacities: Capacities,
}

impl<K, V> TwoQCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone,
{
    /// Create a cache sized for `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidConfiguration` - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(&CacheConfig::new(capacity))
    }

    /// Create a cache from a [`CacheConfig`]
    pub fn with_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        let capacities = config.capacities();
        debug!(
            capacity = config.capacity,
            in_cap = capacities.in_cap,
            out_cap = capacities.out_cap,
            hot_cap = capacities.hot_cap,
            "created 2Q cache"
        );

        Ok(Self {
            inner: Mutex::new(Inner::new(capacities)),
            stats: CacheStats::new(),
            capacity: config.capacity,
            capacities,
        })
    }

    /// Look up a value.
    ///
    /// A hit in Hot refreshes its recency; a hit in Out promotes it to Hot.
    /// A hit in In leaves it where it is.
    ///
    /// # Returns
    /// * `Ok(None)` - key is not cached
    ///
    /// # Errors
    /// * `Error::InvariantViolation` - segment bookkeeping is corrupt
    pub fn get<Q>(&self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key, &self.stats)
    }

    /// Insert or overwrite a value, returning the stored value.
    ///
    /// Overwriting an existing key replaces the value in place and does not
    /// change which segment holds it. New keys take the first free slot in
    /// In, Out, then Hot; when all are full In's oldest keys are demoted to
    /// make room. Evictions happen as a side effect and are not reported.
    ///
    /// # Errors
    /// * `Error::InvariantViolation` - segment bookkeeping is corrupt
    pub fn put(&self, key: K, value: V) -> Result<V> {
        self.inner.lock().put(key, value, &self.stats)
    }

    /// Remove a key, returning its value if it was cached
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key, &self.stats)
    }

    /// Check for a key without affecting its segment or recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().entries.contains_key(key)
    }

    /// Segment currently holding `key`, if cached
    pub fn segment_of<Q>(&self, key: &Q) -> Option<Segment>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().segment_of(key)
    }

    /// Copy of the current segment membership
    pub fn snapshot(&self) -> SegmentSnapshot<K> {
        self.inner.lock().snapshot()
    }

    /// Verify segment disjointness, counter agreement and capacity bounds
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.lock().check_invariants()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Configured total capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Derived per-segment capacities
    pub fn capacities(&self) -> Capacities {
        self.capacities
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.clear();
        self.stats.reset();
    }
}

impl<K, V> Cache<K, V> for TwoQCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug + Send,
    V: Clone + Send,
{
    fn put(&self, key: K, value: V) -> Result<V> {
        TwoQCache::put(self, key, value)
    }

    fn get(&self, key: &K) -> Result<Option<V>> {
        TwoQCache::get(self, key)
    }

    fn remove(&self, key: &K) -> Option<V> {
        TwoQCache::remove(self, key)
    }
}

impl<K, V> fmt::Debug for TwoQCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot();
        f.debug_struct("TwoQCache")
            .field("capacity", &self.capacity)
            .field("in", &snapshot.in_keys)
            .field("out", &snapshot.out_keys)
            .field("hot", &snapshot.hot_keys)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(list: &[String]) -> Vec<&str> {
        list.iter().map(String::as_str).collect()
    }

    fn filled_cache() -> TwoQCache<String, i32> {
        let cache = TwoQCache::new(10).unwrap();
        for i in 1..=10 {
            cache.put(i.to_string(), i).unwrap();
        }
        cache
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = TwoQCache::<String, i32>::new(0);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_put_into_in() {
        let cache = TwoQCache::new(10).unwrap();

        assert_eq!(cache.put("test".to_string(), 1).unwrap(), 1);

        let snapshot = cache.snapshot();
        assert_eq!(keys(&snapshot.in_keys), vec!["test"]);
        assert_eq!(snapshot.in_size, 1);
        assert!(snapshot.out_keys.is_empty());
        assert!(snapshot.hot_keys.is_empty());
    }

    #[test]
    fn test_put_existing_key_overwrites_in_place() {
        let cache = TwoQCache::new(10).unwrap();

        cache.put("test".to_string(), 1).unwrap();
        assert_eq!(cache.put("test".to_string(), 2).unwrap(), 2);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.snapshot().in_size, 1);
        assert_eq!(cache.get("test").unwrap(), Some(2));
        assert_eq!(cache.stats().updates(), 1);
    }

    #[test]
    fn test_overflow_from_in_lands_in_out() {
        let cache = TwoQCache::new(10).unwrap();

        cache.put("1".to_string(), 1).unwrap();
        cache.put("2".to_string(), 2).unwrap();
        cache.put("3".to_string(), 3).unwrap();

        let snapshot = cache.snapshot();
        assert_eq!(keys(&snapshot.in_keys), vec!["1", "2"]);
        assert_eq!(keys(&snapshot.out_keys), vec!["3"]);
        assert_eq!(cache.get("3").unwrap(), Some(3));
    }

    #[test]
    fn test_first_free_slot_fill_order() {
        let cache = filled_cache();

        let snapshot = cache.snapshot();
        assert_eq!(keys(&snapshot.in_keys), vec!["1", "2"]);
        assert_eq!(keys(&snapshot.out_keys), vec!["3", "4", "5", "6", "7", "8"]);
        assert_eq!(keys(&snapshot.hot_keys), vec!["9", "10"]);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_full_cache_demotes_oldest_in() {
        let cache = filled_cache();

        cache.put("11".to_string(), 11).unwrap();

        let snapshot = cache.snapshot();
        assert_eq!(keys(&snapshot.in_keys), vec!["2", "11"]);
        assert_eq!(keys(&snapshot.out_keys), vec!["4", "5", "6", "7", "8", "1"]);
        assert_eq!(keys(&snapshot.hot_keys), vec!["9", "10"]);

        // Out was full, so its oldest key left the cache entirely
        assert!(!cache.contains("3"));
        assert_eq!(cache.len(), 10);
        assert_eq!(cache.stats().demotions(), 1);
        assert_eq!(cache.stats().evictions(), 1);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_get_in_does_not_promote() {
        let cache = TwoQCache::new(10).unwrap();
        cache.put("a".to_string(), 1).unwrap();

        assert_eq!(cache.get("a").unwrap(), Some(1));
        assert_eq!(cache.get("a").unwrap(), Some(1));

        assert_eq!(cache.segment_of("a"), Some(Segment::In));
        assert_eq!(cache.stats().promotions(), 0);
    }

    #[test]
    fn test_get_out_promotes_to_hot() {
        let cache = TwoQCache::new(10).unwrap();
        for i in 1..=3 {
            cache.put(i.to_string(), i).unwrap();
        }
        assert_eq!(cache.segment_of("3"), Some(Segment::Out));

        assert_eq!(cache.get("3").unwrap(), Some(3));

        assert_eq!(cache.segment_of("3"), Some(Segment::Hot));
        let snapshot = cache.snapshot();
        assert!(snapshot.out_keys.is_empty());
        assert_eq!(snapshot.out_size, 0);
        assert_eq!(snapshot.hot_size, 1);
        assert_eq!(cache.stats().promotions(), 1);
    }

    #[test]
    fn test_promotion_evicts_lru_hot() {
        let cache = filled_cache();

        // Hot is full with 9, 10; touch 9 so 10 becomes least recent
        cache.get("9").unwrap();
        assert_eq!(keys(&cache.snapshot().hot_keys), vec!["10", "9"]);

        cache.get("3").unwrap();

        let snapshot = cache.snapshot();
        assert_eq!(keys(&snapshot.hot_keys), vec!["9", "3"]);
        assert_eq!(keys(&snapshot.out_keys), vec!["4", "5", "6", "7", "8"]);
        assert!(!cache.contains("10"));
        assert_eq!(cache.get("10").unwrap(), None);
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_get_missing_key_changes_nothing() {
        let cache = filled_cache();
        let before = cache.snapshot();

        assert_eq!(cache.get("missing").unwrap(), None);

        assert_eq!(cache.snapshot(), before);
        assert_eq!(cache.stats().misses(), 1);
    }

    #[test]
    fn test_remove() {
        let cache = TwoQCache::new(10).unwrap();
        cache.put("1".to_string(), 1).unwrap();

        assert_eq!(cache.remove("1"), Some(1));

        assert!(!cache.contains("1"));
        assert_eq!(cache.segment_of("1"), None);
        assert_eq!(cache.snapshot().in_size, 0);
        assert_eq!(cache.get("1").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key() {
        let cache = TwoQCache::<String, i32>::new(10).unwrap();
        assert_eq!(cache.remove("nope"), None);
        assert_eq!(cache.stats().removals(), 0);
    }

    #[test]
    fn test_remove_from_each_segment() {
        let cache = filled_cache();

        assert_eq!(cache.remove("1"), Some(1));
        assert_eq!(cache.remove("5"), Some(5));
        assert_eq!(cache.remove("10"), Some(10));

        let snapshot = cache.snapshot();
        assert_eq!((snapshot.in_size, snapshot.out_size, snapshot.hot_size), (1, 5, 1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_max_capacity_constructs() {
        let cache = TwoQCache::<u8, u8>::new(usize::MAX).unwrap();

        assert_eq!(cache.capacity(), usize::MAX);
        assert_eq!(cache.capacities().total(), usize::MAX);
        cache.put(1, 1).unwrap();
        assert_eq!(cache.get(&1).unwrap(), Some(1));
    }

    #[test]
    fn test_large_capacity_grows_on_demand() {
        let cache = TwoQCache::<u32, u32>::new(1 << 31).unwrap();

        for i in 0..5000 {
            cache.put(i, i).unwrap();
        }

        assert_eq!(cache.len(), 5000);
        assert_eq!(cache.segment_of(&0), Some(Segment::In));
        assert_eq!(cache.get(&4999).unwrap(), Some(4999));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_capacity_one_admits_into_out() {
        let cache = TwoQCache::new(1).unwrap();

        cache.put("a".to_string(), 1).unwrap();
        assert_eq!(cache.segment_of("a"), Some(Segment::Out));

        // No In or Hot capacity: the newcomer goes through Hot and is
        // evicted by its trim pass
        assert_eq!(cache.put("b".to_string(), 2).unwrap(), 2);
        assert!(!cache.contains("b"));
        assert!(cache.contains("a"));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_capacity_one_promotion_drops_key() {
        let cache = TwoQCache::new(1).unwrap();
        cache.put("a".to_string(), 1).unwrap();

        // Hot has zero capacity, so the promoted key is evicted at once
        assert_eq!(cache.get("a").unwrap(), Some(1));
        assert!(cache.is_empty());
        cache.check_invariants().unwrap();
    }

    #[test]
    fn test_trim_hot_detects_corruption() {
        let cache = TwoQCache::<String, i32>::new(10).unwrap();
        {
            let mut inner = cache.inner.lock();
            inner.hot_seg.size = 1;
        }

        let err = cache.inner.lock().trim_hot(&cache.stats).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_check_invariants_detects_drift() {
        let cache = filled_cache();
        cache.inner.lock().out_seg.size = 2;

        assert!(matches!(
            cache.check_invariants(),
            Err(Error::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_clear() {
        let cache = filled_cache();
        cache.get("1").unwrap();

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.snapshot().in_size, 0);
        assert_eq!(cache.stats().hits(), 0);
        assert_eq!(cache.stats().inserts(), 0);
        cache.put("x".to_string(), 1).unwrap();
        assert_eq!(cache.stats().inserts(), 1);
        assert_eq!(cache.segment_of("x"), Some(Segment::In));
    }

    #[test]
    fn test_cache_trait_object() {
        let cache: Box<dyn Cache<String, i32>> = Box::new(TwoQCache::<String, i32>::new(10).unwrap());

        cache.put("k".to_string(), 5).unwrap();
        assert_eq!(cache.get(&"k".to_string()).unwrap(), Some(5));
        assert_eq!(cache.remove(&"k".to_string()), Some(5));
        assert_eq!(cache.get(&"k".to_string()).unwrap(), None);
    }

    #[test]
    fn test_debug_lists_segments() {
        let cache = TwoQCache::new(10).unwrap();
        cache.put("a".to_string(), 1).unwrap();

        let rendered = format!("{:?}", cache);
        assert!(rendered.contains("in: [\"a\"]"));
    }
}
