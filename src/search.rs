use std::fmt::Debug;

use nonmax::NonMaxUsize;
use rustc_hash::FxHashMap;

use crate::cost::Cost;
use crate::space::Action;
use crate::space::Solution;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, A, C>` within its `SearchTree`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SearchTreeIndex {
    index: NonMaxUsize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        // Nodes aren't zero-sized, a Vec of them can't hold `usize::MAX` items.
        let index = NonMaxUsize::new(index).expect("search tree index overflow");
        Self { index }
    }

    #[inline(always)]
    pub fn get(&self) -> usize {
        self.index.get()
    }
}

#[derive(Clone, Debug)]
pub struct SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub(crate) parent: Option<(SearchTreeIndex, A)>,
    pub(crate) state: St,
    pub(crate) g: C,
    pub(crate) closed: bool,
}

impl<St, A, C> SearchTreeNode<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    pub fn new(s: St, parent: Option<(SearchTreeIndex, A)>, g: C) -> Self {
        Self {
            parent,
            state: s,
            g,
            closed: false,
        }
    }

    /// Gives this Node a better path through a new parent.
    pub fn reach(&mut self, new_parent: (SearchTreeIndex, A), g: C) {
        debug_assert!(g < self.g);
        debug_assert!(!self.closed, "Closed nodes are never reopened");
        self.parent = Some(new_parent);
        self.g = g;
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }
    #[inline(always)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Every node discovered by a search.
///
/// Nodes only get appended, and link to their parent, forming a search tree
/// rooted at the initial state. Each state gets at most one node, found
/// through the node map, so the tree doubles as the explored set.
pub struct SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, A, C>>,
    node_map: FxHashMap<St, SearchTreeIndex>,
}

impl<St, A, C> SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(1024),
            node_map: FxHashMap::default(),
        }
    }

    /// Adds a node for a state that wasn't discovered yet.
    pub fn push(&mut self, node: SearchTreeNode<St, A, C>) -> SearchTreeIndex {
        debug_assert!(!self.node_map.contains_key(node.state()));
        let index = SearchTreeIndex::new(self.nodes.len());
        self.node_map.insert(node.state.clone(), index);
        self.nodes.push(node);
        index
    }

    /// The node for a state, if it was discovered.
    #[inline(always)]
    pub fn find(&self, s: &St) -> Option<SearchTreeIndex> {
        self.node_map.get(s).copied()
    }

    #[inline(always)]
    pub fn mark_closed(&mut self, index: SearchTreeIndex) {
        let node = &mut self[index];
        debug_assert!(!node.closed, "Nodes get closed only once");
        node.closed = true;
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of closed nodes.
    pub fn closed_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.closed).count()
    }

    /// Walks parent links back to the root.
    ///
    /// Step costs are recovered from the `g` difference between a node and its
    /// parent.
    #[must_use]
    pub fn solution(&self, mut node_index: SearchTreeIndex) -> Solution<St, A, C> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PathReconstruction");

        let mut solution = Solution::<St, A, C>::new_from_start(self[node_index].state.clone());

        while let Some((parent_index, a)) = &self[node_index].parent {
            debug_assert!(node_index != *parent_index);
            let p = &self[*parent_index];
            let c: C = self[node_index].g - p.g;
            debug_assert!(c.valid());

            solution.prepend(p.state.clone(), a.clone(), c);
            node_index = *parent_index;
        }

        solution.finish();
        debug_assert!(solution.seems_valid());
        solution
    }
}

impl<St, A, C> Default for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, A, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    type Output = SearchTreeNode<St, A, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.get()]
    }
}

impl<St, A, C> std::ops::IndexMut<SearchTreeIndex> for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    #[inline(always)]
    fn index_mut(&mut self, index: SearchTreeIndex) -> &mut SearchTreeNode<St, A, C> {
        &mut self.nodes[index.get()]
    }
}

impl<St, A, C> Debug for SearchTree<St, A, C>
where
    St: State,
    A: Action,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Cell(u8);
    impl State for Cell {}

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Hop(&'static str);
    impl Action for Hop {}

    #[test]
    fn find_returns_pushed_nodes() {
        let mut tree = SearchTree::<Cell, Hop, u32>::new();
        assert!(tree.is_empty());
        let root = tree.push(SearchTreeNode::new(Cell(0), None, 0));
        let child = tree.push(SearchTreeNode::new(Cell(1), Some((root, Hop("a"))), 3));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.find(&Cell(0)), Some(root));
        assert_eq!(tree.find(&Cell(1)), Some(child));
        assert_eq!(tree.find(&Cell(2)), None);
        assert_eq!(tree[child].g(), 3);
    }

    #[test]
    fn closing_nodes() {
        let mut tree = SearchTree::<Cell, Hop, u32>::new();
        let root = tree.push(SearchTreeNode::new(Cell(0), None, 0));
        assert!(!tree[root].is_closed());
        tree.mark_closed(root);
        assert!(tree[root].is_closed());
        assert_eq!(tree.closed_count(), 1);
    }

    #[test]
    fn solution_follows_parents() {
        let mut tree = SearchTree::<Cell, Hop, u32>::new();
        let root = tree.push(SearchTreeNode::new(Cell(0), None, 0));
        let a = tree.push(SearchTreeNode::new(Cell(1), Some((root, Hop("a"))), 5));
        let b = tree.push(SearchTreeNode::new(Cell(2), Some((root, Hop("b"))), 1));
        let c = tree.push(SearchTreeNode::new(Cell(3), Some((a, Hop("c"))), 9));

        // A cheaper way into `a` also makes `c` cheaper to rebuild.
        tree[a].reach((b, Hop("d")), 2);
        tree[c].g = 6;

        let solution = tree.solution(c);
        assert_eq!(solution.start, Cell(0));
        assert_eq!(solution.end, Cell(3));
        assert_eq!(solution.actions, vec![Hop("b"), Hop("d"), Hop("c")]);
        assert_eq!(solution.cost, 6);
    }

    #[test]
    fn root_solution_is_empty() {
        let mut tree = SearchTree::<Cell, Hop, u32>::new();
        let root = tree.push(SearchTreeNode::new(Cell(7), None, 0));
        let solution = tree.solution(root);
        assert!(solution.is_empty());
        assert_eq!(solution.cost, 0);
        assert_eq!(solution.start, solution.end);
    }
}
