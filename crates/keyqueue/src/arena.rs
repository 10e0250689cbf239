//! Slot arena for queue nodes
//!
//! Nodes live in a `Vec` of optional slots and link to each other by index.
//! Released slots go onto a free list and are handed out again before the
//! vector grows.

/// Node in the doubly-linked key chain
#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    /// Neighbour toward the head (least recently used end)
    pub(crate) prev: Option<usize>,
    /// Neighbour toward the tail (most recently used end)
    pub(crate) next: Option<usize>,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K) -> Self {
        Self {
            key,
            prev: None,
            next: None,
        }
    }
}

/// Backing store for [`Node`]s addressed by stable indices
#[derive(Debug, Clone)]
pub(crate) struct Arena<K> {
    slots: Vec<Option<Node<K>>>,
    free_list: Vec<usize>,
    live: usize,
}

impl<K> Arena<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Store a node, reusing a released slot when one is available
    pub(crate) fn alloc(&mut self, node: Node<K>) -> usize {
        let idx = if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        };
        self.live += 1;
        idx
    }

    /// Take the node out of its slot and put the slot on the free list
    pub(crate) fn release(&mut self, idx: usize) -> Option<Node<K>> {
        let node = self.slots.get_mut(idx)?.take()?;
        self.free_list.push(idx);
        self.live -= 1;
        Some(node)
    }

    pub(crate) fn get(&self, idx: usize) -> Option<&Node<K>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Node<K>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Number of occupied slots
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Number of allocated slots, occupied or free
    #[cfg(test)]
    pub(crate) fn slots(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.live = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = Arena::with_capacity(4);

        let a = arena.alloc(Node::new("a"));
        let b = arena.alloc(Node::new("b"));

        assert_ne!(a, b);
        assert_eq!(arena.get(a).map(|n| n.key), Some("a"));
        assert_eq!(arena.get(b).map(|n| n.key), Some("b"));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_release_reuses_slot() {
        let mut arena = Arena::with_capacity(4);

        let a = arena.alloc(Node::new(1));
        arena.alloc(Node::new(2));

        let released = arena.release(a).unwrap();
        assert_eq!(released.key, 1);
        assert_eq!(arena.len(), 1);
        assert!(arena.get(a).is_none());

        // Freed slot comes back before the vector grows
        let c = arena.alloc(Node::new(3));
        assert_eq!(c, a);
        assert_eq!(arena.slots(), 2);
    }

    #[test]
    fn test_release_empty_slot() {
        let mut arena: Arena<u32> = Arena::with_capacity(1);

        assert!(arena.release(0).is_none());

        let a = arena.alloc(Node::new(7));
        assert!(arena.release(a).is_some());
        // Double release must not put the slot on the free list twice
        assert!(arena.release(a).is_none());
        assert_eq!(arena.len(), 0);

        let b = arena.alloc(Node::new(8));
        let c = arena.alloc(Node::new(9));
        assert_ne!(b, c);
    }

    #[test]
    fn test_get_mut_links() {
        let mut arena = Arena::with_capacity(2);

        let a = arena.alloc(Node::new('a'));
        let b = arena.alloc(Node::new('b'));
        arena.get_mut(a).unwrap().next = Some(b);
        arena.get_mut(b).unwrap().prev = Some(a);

        assert_eq!(arena.get(a).unwrap().next, Some(b));
        assert_eq!(arena.get(b).unwrap().prev, Some(a));
        assert!(arena.get_mut(42).is_none());
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::with_capacity(2);

        arena.alloc(Node::new(1));
        arena.alloc(Node::new(2));
        arena.clear();

        assert_eq!(arena.len(), 0);
        assert_eq!(arena.slots(), 0);
    }
}
