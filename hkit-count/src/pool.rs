//! Free-list backed node storage.
//!
//! Nodes live in a `Vec` arena and are addressed by [`NodeId`]. Released slots go onto a
//! free list and are handed out again by the next [`NodePool::alloc`], so a sweep that
//! inserts and erases `n` nodes never holds more slots than its peak tree size.

/// Index of a node slot in a [`NodePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct NodePool<T> {
    slots: Vec<Option<T>>,
    free: Vec<u32>,
}

impl<T> Default for NodePool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodePool<T> {
    pub fn new() -> Self {
        NodePool {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        NodePool {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Store `node`, reusing a released slot when one is available.
    pub fn alloc(&mut self, node: T) -> NodeId {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx as usize] = Some(node);
                NodeId(idx)
            }
            None => {
                let idx = u32::try_from(self.slots.len())
                    .unwrap_or_else(|_| panic!("node pool exhausted the u32 index space"));
                self.slots.push(Some(node));
                NodeId(idx)
            }
        }
    }

    /// Take the node out of its slot and put the slot on the free list.
    ///
    /// Panics if the slot was already released.
    pub fn release(&mut self, id: NodeId) -> T {
        let node = self.slots[id.index()]
            .take()
            .unwrap_or_else(|| panic!("double release of node {:?}", id));
        self.free.push(id.0);
        node
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &T {
        self.slots[id.index()]
            .as_ref()
            .unwrap_or_else(|| panic!("access to released node {:?}", id))
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        self.slots[id.index()]
            .as_mut()
            .unwrap_or_else(|| panic!("access to released node {:?}", id))
    }

    /// Number of nodes currently allocated.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever created.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_released_slots_are_reused() {
        let mut pool = NodePool::new();
        let a = pool.alloc("a");
        let b = pool.alloc("b");
        assert_eq!(pool.live(), 2);

        assert_eq!(pool.release(a), "a");
        assert_eq!(pool.live(), 1);

        let c = pool.alloc("c");
        assert_eq!(c, a);
        assert_eq!(pool.capacity(), 2);
        assert_eq!(*pool.get(c), "c");
        assert_eq!(*pool.get(b), "b");
    }

    #[rstest]
    fn test_get_mut() {
        let mut pool = NodePool::with_capacity(4);
        let id = pool.alloc(1);
        *pool.get_mut(id) += 41;
        assert_eq!(*pool.get(id), 42);
    }

    #[rstest]
    #[should_panic(expected = "double release")]
    fn test_double_release_panics() {
        let mut pool = NodePool::new();
        let id = pool.alloc(0u8);
        pool.release(id);
        pool.release(id);
    }

    #[rstest]
    #[should_panic(expected = "released node")]
    fn test_access_after_release_panics() {
        let mut pool = NodePool::new();
        let id = pool.alloc(0u8);
        pool.release(id);
        pool.get(id);
    }
}
