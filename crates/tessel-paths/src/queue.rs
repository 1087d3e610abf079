use tessel_core::Point;

/// Index of a node in the [`PriorityQueue`] arena.
pub type NodeId = usize;

/// A search node. Nodes live in the queue's arena for the whole search and
/// are addressed by [`NodeId`]; `parent` links form the route back to the
/// start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub pos: Point,
    pub cost: i32,
    pub parent: Option<NodeId>,
    heap_index: Option<usize>,
    visited: bool,
}

impl SearchNode {
    /// Whether the node has been popped. Its cost is final.
    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether the node is still waiting in the heap.
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.heap_index.is_some()
    }
}

/// Binary min-heap of [`SearchNode`]s keyed by cost.
///
/// Ties are broken by insertion order (lower [`NodeId`] first), which keeps
/// every search deterministic. Each node records its position in the heap so
/// that [`decrease_key`](Self::decrease_key) can re-heapify from there.
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    nodes: Vec<SearchNode>,
    heap: Vec<NodeId>,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node and return its id. O(log n).
    pub fn push(&mut self, pos: Point, cost: i32, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SearchNode {
            pos,
            cost,
            parent,
            heap_index: Some(self.heap.len()),
            visited: false,
        });
        self.heap.push(id);
        self.sift_up(self.heap.len() - 1);
        id
    }

    /// Remove the cheapest node, mark it visited and return its id.
    pub fn pop_min(&mut self) -> Option<NodeId> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let id = self.heap.pop()?;
        let node = &mut self.nodes[id];
        node.heap_index = None;
        node.visited = true;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(id)
    }

    /// Lower the cost of a queued node and re-point its parent.
    ///
    /// Returns `false` and changes nothing if `cost` is not strictly below
    /// the current cost. Calling it on a node that was already popped is a
    /// caller bug: it panics in debug builds and is ignored otherwise.
    pub fn decrease_key(&mut self, id: NodeId, cost: i32, parent: Option<NodeId>) -> bool {
        let node = &mut self.nodes[id];
        debug_assert!(node.is_queued(), "decrease_key on node {id}, which is not queued");
        let Some(i) = node.heap_index else {
            return false;
        };
        if cost >= node.cost {
            return false;
        }
        node.cost = cost;
        node.parent = parent;
        self.sift_up(i);
        true
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id]
    }

    /// Every node ever pushed, indexed by [`NodeId`].
    #[inline]
    pub fn nodes(&self) -> &[SearchNode] {
        &self.nodes
    }

    /// Number of queued (not yet popped) nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    // -----------------------------------------------------------------------
    // Heap internals
    // -----------------------------------------------------------------------

    #[inline]
    fn less(&self, a: NodeId, b: NodeId) -> bool {
        (self.nodes[a].cost, a) < (self.nodes[b].cost, b)
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.nodes[self.heap[i]].heap_index = Some(i);
        self.nodes[self.heap[j]].heap_index = Some(j);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(self.heap[i], self.heap[parent]) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let l = 2 * i + 1;
            let r = l + 1;
            let mut smallest = i;
            if l < len && self.less(self.heap[l], self.heap[smallest]) {
                smallest = l;
            }
            if r < len && self.less(self.heap[r], self.heap[smallest]) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut PriorityQueue) -> Vec<(NodeId, i32)> {
        let mut out = Vec::new();
        while let Some(id) = q.pop_min() {
            out.push((id, q.node(id).cost));
        }
        out
    }

    fn check_heap_indices(q: &PriorityQueue) {
        for (i, &id) in q.heap.iter().enumerate() {
            assert_eq!(q.nodes[id].heap_index, Some(i));
            if i > 0 {
                assert!(!q.less(id, q.heap[(i - 1) / 2]));
            }
        }
    }

    #[test]
    fn pops_in_cost_order() {
        let mut q = PriorityQueue::new();
        for (i, c) in [5, 1, 9, 3, 7, 2, 8].into_iter().enumerate() {
            q.push(Point::new(i as i32, 0), c, None);
            check_heap_indices(&q);
        }
        assert_eq!(q.len(), 7);
        let costs: Vec<i32> = drain(&mut q).into_iter().map(|(_, c)| c).collect();
        assert_eq!(costs, vec![1, 2, 3, 5, 7, 8, 9]);
        assert!(q.is_empty());
        assert!(q.pop_min().is_none());
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut q = PriorityQueue::new();
        let ids: Vec<NodeId> = (0..6)
            .map(|i| q.push(Point::new(i, i), 4, None))
            .collect();
        q.push(Point::new(9, 9), 3, None);
        let order: Vec<NodeId> = drain(&mut q).into_iter().map(|(id, _)| id).collect();
        assert_eq!(order[0], 6);
        assert_eq!(&order[1..], &ids[..]);
    }

    #[test]
    fn pop_marks_visited() {
        let mut q = PriorityQueue::new();
        let a = q.push(Point::ZERO, 0, None);
        let b = q.push(Point::new(1, 0), 1, Some(a));
        assert!(q.node(a).is_queued());
        assert_eq!(q.pop_min(), Some(a));
        assert!(q.node(a).is_visited());
        assert!(!q.node(a).is_queued());
        assert!(!q.node(b).is_visited());
        assert_eq!(q.node(b).parent, Some(a));
        assert_eq!(q.nodes().len(), 2);
    }

    #[test]
    fn decrease_key_moves_node_forward() {
        let mut q = PriorityQueue::new();
        let root = q.push(Point::ZERO, 0, None);
        q.pop_min();
        let a = q.push(Point::new(1, 0), 10, None);
        let b = q.push(Point::new(2, 0), 5, None);
        let c = q.push(Point::new(3, 0), 7, None);
        assert!(q.decrease_key(a, 2, Some(root)));
        check_heap_indices(&q);
        assert_eq!(q.node(a).cost, 2);
        assert_eq!(q.node(a).parent, Some(root));
        let order: Vec<NodeId> = drain(&mut q).into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn decrease_key_rejects_invalid_updates() {
        let mut q = PriorityQueue::new();
        let a = q.push(Point::ZERO, 4, None);
        let b = q.push(Point::new(1, 0), 6, None);
        // Not strictly cheaper.
        assert!(!q.decrease_key(b, 6, Some(a)));
        assert!(!q.decrease_key(b, 9, Some(a)));
        assert_eq!(q.node(b).cost, 6);
        assert_eq!(q.node(b).parent, None);
        check_heap_indices(&q);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "not queued")]
    fn decrease_key_on_popped_node_panics() {
        let mut q = PriorityQueue::new();
        let a = q.push(Point::ZERO, 4, None);
        q.push(Point::new(1, 0), 6, None);
        assert_eq!(q.pop_min(), Some(a));
        q.decrease_key(a, 0, None);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn decrease_key_on_popped_node_is_ignored() {
        let mut q = PriorityQueue::new();
        let a = q.push(Point::ZERO, 4, None);
        assert_eq!(q.pop_min(), Some(a));
        assert!(!q.decrease_key(a, 0, None));
        assert_eq!(q.node(a).cost, 4);
    }
}
