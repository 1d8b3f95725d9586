use std::cmp::Ordering;

use crate::pool::{NodeId, NodePool};

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
    height: u8,
    /// Number of nodes in the subtree rooted here.
    size: u32,
}

/// An AVL tree augmented with subtree sizes.
///
/// Besides the usual ordered-set operations, every node knows how many nodes hang below
/// it, which turns "how many keys are smaller than `k`" into a single root-to-leaf walk.
/// Nodes are kept in a [`NodePool`]; a [`NodeId`] returned by [`RankTree::insert`] stays
/// valid until the node is removed, so callers can erase arbitrary entries later without
/// searching for them.
///
/// Keys must be unique. Callers that sweep over records with repeated coordinates
/// tie-break on the record index.
///
/// # Examples
///
/// ```
/// use hkit_count::tree::RankTree;
///
/// let mut tree = RankTree::new();
/// assert_eq!(tree.insert(10u32, ()).1, 0);
/// assert_eq!(tree.insert(30, ()).1, 1);
/// assert_eq!(tree.insert(20, ()).1, 1);
///
/// assert_eq!(tree.rank(&25), 2);
/// assert_eq!(tree.rank_inclusive(&30), 3);
/// assert_eq!(tree.pop_first(), Some((10, ())));
/// ```
#[derive(Debug)]
pub struct RankTree<K, V> {
    pool: NodePool<Node<K, V>>,
    root: Option<NodeId>,
}

impl<K: Ord, V> Default for RankTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> RankTree<K, V> {
    pub fn new() -> Self {
        RankTree {
            pool: NodePool::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        RankTree {
            pool: NodePool::with_capacity(capacity),
            root: None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size(self.root)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of node slots the pool has ever created.
    pub fn pool_capacity(&self) -> usize {
        self.pool.capacity()
    }

    ///
    /// Insert a key, returning its node id and its rank: the number of keys already in
    /// the tree that are strictly less than it.
    ///
    /// Panics if the key is already present.
    ///
    pub fn insert(&mut self, key: K, value: V) -> (NodeId, usize) {
        let id = self.pool.alloc(Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
            size: 1,
        });
        let mut rank = 0;
        let root = self.insert_at(self.root, id, &mut rank);
        self.root = Some(root);
        (id, rank)
    }

    /// The smallest entry, without removing it.
    pub fn first(&self) -> Option<(NodeId, &K, &V)> {
        let mut cur = self.root?;
        while let Some(left) = self.pool.get(cur).left {
            cur = left;
        }
        let node = self.pool.get(cur);
        Some((cur, &node.key, &node.value))
    }

    /// Remove and return the smallest entry.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let root = self.root?;
        let (root, min) = self.remove_min(root);
        self.root = root;
        let node = self.pool.release(min);
        Some((node.key, node.value))
    }

    ///
    /// Remove an arbitrary node.
    ///
    /// Panics if `id` does not refer to a node currently in the tree.
    ///
    pub fn remove(&mut self, id: NodeId) -> (K, V) {
        self.root = self.remove_at(self.root, id);
        let node = self.pool.release(id);
        (node.key, node.value)
    }

    pub fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.pool.get_mut(id).value
    }

    /// Number of keys strictly less than `query`. The query need not be stored.
    pub fn rank(&self, query: &K) -> usize {
        self.count_below(|key| key < query)
    }

    /// Number of keys less than or equal to `query`. The query need not be stored.
    pub fn rank_inclusive(&self, query: &K) -> usize {
        self.count_below(|key| key <= query)
    }

    // walks one root-to-leaf path; `below` must be monotone in key order
    fn count_below<F>(&self, below: F) -> usize
    where
        F: Fn(&K) -> bool,
    {
        let mut count = 0;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.pool.get(id);
            if below(&node.key) {
                count += self.size(node.left) + 1;
                cur = node.right;
            } else {
                cur = node.left;
            }
        }
        count
    }

    fn insert_at(&mut self, root: Option<NodeId>, id: NodeId, rank: &mut usize) -> NodeId {
        let Some(r) = root else {
            return id;
        };
        let (left, right) = self.children(r);
        match self.pool.get(id).key.cmp(&self.pool.get(r).key) {
            Ordering::Less => {
                let child = self.insert_at(left, id, rank);
                self.pool.get_mut(r).left = Some(child);
            }
            Ordering::Greater => {
                *rank += self.size(left) + 1;
                let child = self.insert_at(right, id, rank);
                self.pool.get_mut(r).right = Some(child);
            }
            Ordering::Equal => panic!("duplicate key inserted into rank tree"),
        }
        self.rebalance(r)
    }

    // returns the new subtree root and the detached minimum
    fn remove_min(&mut self, r: NodeId) -> (Option<NodeId>, NodeId) {
        let (left, right) = self.children(r);
        match left {
            None => (right, r),
            Some(left) => {
                let (child, min) = self.remove_min(left);
                self.pool.get_mut(r).left = child;
                (Some(self.rebalance(r)), min)
            }
        }
    }

    fn remove_at(&mut self, root: Option<NodeId>, id: NodeId) -> Option<NodeId> {
        let Some(r) = root else {
            panic!("node {:?} is not in the tree", id);
        };
        let (left, right) = self.children(r);
        if r == id {
            return match (left, right) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    // the successor takes the removed node's place
                    let (right, succ) = self.remove_min(right);
                    let node = self.pool.get_mut(succ);
                    node.left = Some(left);
                    node.right = right;
                    Some(self.rebalance(succ))
                }
            };
        }
        match self.pool.get(id).key.cmp(&self.pool.get(r).key) {
            Ordering::Less => {
                let child = self.remove_at(left, id);
                self.pool.get_mut(r).left = child;
            }
            Ordering::Greater => {
                let child = self.remove_at(right, id);
                self.pool.get_mut(r).right = child;
            }
            Ordering::Equal => panic!("node {:?} is not in the tree", id),
        }
        Some(self.rebalance(r))
    }

    #[inline]
    fn children(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let node = self.pool.get(id);
        (node.left, node.right)
    }

    #[inline]
    fn size(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| self.pool.get(id).size as usize)
    }

    #[inline]
    fn height(&self, id: Option<NodeId>) -> i32 {
        id.map_or(0, |id| self.pool.get(id).height as i32)
    }

    fn update(&mut self, id: NodeId) {
        let (left, right) = self.children(id);
        let height = 1 + self.height(left).max(self.height(right));
        let size = 1 + self.size(left) + self.size(right);
        let node = self.pool.get_mut(id);
        node.height = height as u8;
        node.size = size as u32;
    }

    fn rotate_right(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.pool.get(id).left else {
            unreachable!("right rotation without a left child");
        };
        let moved = self.pool.get(pivot).right;
        self.pool.get_mut(id).left = moved;
        self.pool.get_mut(pivot).right = Some(id);
        self.update(id);
        self.update(pivot);
        pivot
    }

    fn rotate_left(&mut self, id: NodeId) -> NodeId {
        let Some(pivot) = self.pool.get(id).right else {
            unreachable!("left rotation without a right child");
        };
        let moved = self.pool.get(pivot).left;
        self.pool.get_mut(id).right = moved;
        self.pool.get_mut(pivot).left = Some(id);
        self.update(id);
        self.update(pivot);
        pivot
    }

    fn rebalance(&mut self, id: NodeId) -> NodeId {
        self.update(id);
        let (left, right) = self.children(id);
        let balance = self.height(left) - self.height(right);
        if balance > 1 {
            if let Some(left) = left {
                let (ll, lr) = self.children(left);
                if self.height(ll) < self.height(lr) {
                    let child = self.rotate_left(left);
                    self.pool.get_mut(id).left = Some(child);
                }
            }
            return self.rotate_right(id);
        }
        if balance < -1 {
            if let Some(right) = right {
                let (rl, rr) = self.children(right);
                if self.height(rr) < self.height(rl) {
                    let child = self.rotate_right(right);
                    self.pool.get_mut(id).right = Some(child);
                }
            }
            return self.rotate_left(id);
        }
        id
    }
}
