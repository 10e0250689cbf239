//! Ordered key queue with O(1) removal anywhere in the chain
//!
//! Keys are kept in a doubly-linked chain stored in an [`Arena`]. The head is
//! the oldest key and the tail the newest. A `lookup` map from key to arena
//! index lets `remove` and `move_to_tail` find a node without walking the
//! chain, so every operation touches a constant number of nodes.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use ahash::RandomState;

use crate::arena::{Arena, Node};

/// FIFO queue of unique keys supporting constant-time removal by key
#[derive(Clone)]
pub struct KeyQueue<K> {
    lookup: HashMap<K, usize, RandomState>,
    arena: Arena<K>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K> KeyQueue<K> {
    /// Number of keys in the queue
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Oldest key, if any
    pub fn peek_head(&self) -> Option<&K> {
        self.head.and_then(|idx| self.arena.get(idx)).map(|node| &node.key)
    }

    /// Newest key, if any
    pub fn peek_tail(&self) -> Option<&K> {
        self.tail.and_then(|idx| self.arena.get(idx)).map(|node| &node.key)
    }

    /// Iterate keys from head (oldest) to tail (newest)
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            arena: &self.arena,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Remove every key, releasing the arena
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }
}

impl<K> KeyQueue<K>
where
    K: Hash + Eq + Clone,
{
    /// Create an empty queue
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty queue with room for `capacity` keys before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            arena: Arena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Check if `key` is queued
    pub fn contains(&self, key: &K) -> bool {
        self.lookup.contains_key(key)
    }

    /// Append `key` at the tail
    ///
    /// Returns `false` and leaves the queue untouched if `key` is already
    /// queued.
    pub fn enqueue_tail(&mut self, key: K) -> bool {
        if self.lookup.contains_key(&key) {
            return false;
        }

        let idx = self.arena.alloc(Node::new(key.clone()));
        self.link_tail(idx);
        self.lookup.insert(key, idx);
        true
    }

    /// Remove and return the head key
    pub fn dequeue_head(&mut self) -> Option<K> {
        let idx = self.head?;
        self.unlink(idx);
        let node = self.arena.release(idx)?;
        self.lookup.remove(&node.key);
        Some(node.key)
    }

    /// Remove `key` wherever it sits in the chain
    ///
    /// Returns whether the key was present.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.lookup.remove(key) {
            Some(idx) => {
                self.unlink(idx);
                self.arena.release(idx);
                true
            }
            None => false,
        }
    }

    /// Move `key` to the tail, keeping its node
    ///
    /// Returns whether the key was present.
    pub fn move_to_tail(&mut self, key: &K) -> bool {
        let idx = match self.lookup.get(key) {
            Some(&idx) => idx,
            None => return false,
        };

        if self.tail == Some(idx) {
            return true; // Already newest
        }

        self.unlink(idx);
        self.link_tail(idx);
        true
    }

    fn link_tail(&mut self, idx: usize) {
        let old_tail = self.tail;

        if let Some(node) = self.arena.get_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = self.arena.get_mut(tail_idx) {
                    tail.next = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }

        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.arena.get_mut(idx) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.arena.get_mut(prev_idx) {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.arena.get_mut(next_idx) {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.arena.slots()
    }

    /// Walk the chain both ways and panic on any broken link
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let len = self.len();
        assert_eq!(self.lookup.len(), len, "lookup out of sync with arena");

        if len == 0 {
            assert!(self.head.is_none() && self.tail.is_none());
            return;
        }

        let head = self.head.expect("non-empty queue without head");
        let tail = self.tail.expect("non-empty queue without tail");
        assert!(self.arena.get(head).unwrap().prev.is_none());
        assert!(self.arena.get(tail).unwrap().next.is_none());
        if len == 1 {
            assert_eq!(head, tail);
        }

        let mut forward = Vec::with_capacity(len);
        let mut cursor = Some(head);
        while let Some(idx) = cursor {
            assert!(forward.len() < len, "cycle in next links");
            let node = self.arena.get(idx).unwrap();
            assert_eq!(self.lookup.get(&node.key), Some(&idx));
            forward.push(idx);
            cursor = node.next;
        }
        assert_eq!(forward.last(), Some(&tail));

        let mut backward = Vec::with_capacity(len);
        let mut cursor = Some(tail);
        while let Some(idx) = cursor {
            assert!(backward.len() < len, "cycle in prev links");
            backward.push(idx);
            cursor = self.arena.get(idx).unwrap().prev;
        }
        backward.reverse();
        assert_eq!(forward, backward);
    }
}

impl<K> Default for KeyQueue<K>
where
    K: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Extend<K> for KeyQueue<K>
where
    K: Hash + Eq + Clone,
{
    /// Keys already queued are skipped
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.enqueue_tail(key);
        }
    }
}

impl<K> FromIterator<K> for KeyQueue<K>
where
    K: Hash + Eq + Clone,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

impl<'a, K> IntoIterator for &'a KeyQueue<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug> fmt::Debug for KeyQueue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders keys head to tail as `a, b, c`
impl<K: fmt::Display> fmt::Display for KeyQueue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", key)?;
        }
        Ok(())
    }
}

/// Head-to-tail iterator over a [`KeyQueue`]
pub struct Iter<'a, K> {
    arena: &'a Arena<K>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> DoubleEndedIterator for Iter<'_, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.arena.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.key)
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
