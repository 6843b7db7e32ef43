//! Ordered key queue backing each 2Q segment
//!
//! Slab-allocated doubly-linked list indexed by an AHash map, giving O(1)
//! append, pop-oldest, removal and move-to-back. The same structure serves
//! the FIFO segments (In, Out) and the LRU segment (Hot).

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Upper bound on slots reserved up front; larger queues grow on demand
pub(crate) const MAX_PREALLOC: usize = 1024;

/// Node in the queue's doubly-linked list
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Insertion-ordered set of keys. `head` is the oldest entry, `tail` the newest.
pub(crate) struct KeyQueue<K> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
}

impl<K> KeyQueue<K>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty queue sized for `capacity` keys, reserving at most
    /// [`MAX_PREALLOC`] slots
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_PREALLOC);
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
        }
    }

    /// Append a key at the newest end. Returns false if it was already queued.
    pub(crate) fn push_back(&mut self, key: K) -> bool {
        if self.map.contains_key(&key) {
            return false;
        }

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            prev: self.tail,
            next: None,
        });

        if let Some(tail_idx) = self.tail {
            if let Some(tail) = &mut self.nodes[tail_idx] {
                tail.next = Some(idx);
            }
        }

        self.tail = Some(idx);
        if self.head.is_none() {
            self.head = Some(idx);
        }

        self.map.insert(key, idx);
        true
    }

    /// Remove and return the oldest key
    pub(crate) fn pop_front(&mut self) -> Option<K> {
        let head_idx = self.head?;
        self.unlink(head_idx);
        self.free_node(head_idx);
        let node = self.nodes[head_idx].take()?;
        self.map.remove(&node.key);
        Some(node.key)
    }

    /// Remove a key wherever it sits. Returns false if it was not queued.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(idx) = self.map.remove(key) {
            self.unlink(idx);
            self.free_node(idx);
            self.nodes[idx] = None;
            true
        } else {
            false
        }
    }

    /// Move a queued key to the newest end
    pub(crate) fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let idx = match self.map.get(key) {
            Some(&idx) => idx,
            None => return false,
        };

        if self.tail == Some(idx) {
            return true; // Already newest
        }

        self.unlink(idx);

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = self.tail;
            node.next = None;
        }

        if let Some(tail_idx) = self.tail {
            if let Some(tail) = &mut self.nodes[tail_idx] {
                tail.next = Some(idx);
            }
        }

        self.tail = Some(idx);
        if self.head.is_none() {
            self.head = Some(idx);
        }
        true
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keys from oldest to newest
    pub(crate) fn iter(&self) -> Iter<'_, K> {
        Iter {
            queue: self,
            cursor: self.head,
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(None);
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.free_list.push(idx);
    }
}

/// Iterator over a [`KeyQueue`], oldest first
pub(crate) struct Iter<'a, K> {
    queue: &'a KeyQueue<K>,
    cursor: Option<usize>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.nodes[self.cursor?].as_ref()?;
        self.cursor = node.next;
        Some(&node.key)
    }
}
