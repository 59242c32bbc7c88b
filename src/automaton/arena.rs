//! Arena-based node storage for the trie and the automaton built from it.
//!
//! Nodes live in a `Vec` and refer to each other by `NodeId`, a plain index.
//! Failure and suffix links point backwards (and sideways) through the trie,
//! which would be cyclic with owned pointers; with indices they are just
//! numbers.
//!
//! Transitions are kept out of the node structs in one flat `Vec<NodeId>`
//! with a fixed stride per node (256 for bytes, 16 for nibbles), so the hot
//! lookup is `trans[node * stride + symbol]`.

use smallvec::SmallVec;

use super::alphabet::Alphabet;

/// A node identifier - just an index into the arena.
///
/// Id 0 is always the root. In a transition table it doubles as "no edge"
/// before baking, since no trie edge ever leads back to the root.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn is_root(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the automaton.
#[derive(Clone, Debug)]
pub struct Node {
    /// Longest proper suffix of this node's path that is also in the trie.
    pub(crate) fail: NodeId,
    /// Nearest node on the failure chain that ends a pattern. `ROOT` if none.
    pub(crate) suffix: NodeId,
    /// Path length in symbols.
    pub(crate) depth: u32,
    /// Pattern ids ending exactly at this node. Several when the dictionary
    /// repeats a pattern.
    pub(crate) terminals: SmallVec<[u32; 1]>,
    /// Start of this node's closure in the automaton's flat output list.
    pub(crate) out_start: usize,
    /// Number of pattern ids in the closure.
    pub(crate) out_len: usize,
}

impl Node {
    fn with_depth(depth: u32) -> Self {
        Self {
            fail: NodeId::ROOT,
            suffix: NodeId::ROOT,
            depth,
            terminals: SmallVec::new(),
            out_start: 0,
            out_len: 0,
        }
    }

    /// Failure link target.
    #[inline]
    pub fn fail(&self) -> NodeId {
        self.fail
    }

    /// Suffix (output) link target, `ROOT` when no terminal node is on the
    /// failure chain.
    #[inline]
    pub fn suffix(&self) -> NodeId {
        self.suffix
    }

    /// Path length in alphabet symbols.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Pattern ids ending exactly here, in insertion order.
    #[inline]
    pub fn terminals(&self) -> &[u32] {
        &self.terminals
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        !self.terminals.is_empty()
    }
}

/// Arena owning every node and the flat transition table.
#[derive(Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
    trans: Vec<NodeId>,
    alphabet: Alphabet,
    stride: usize,
}

impl std::fmt::Debug for NodeArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeArena")
            .field("nodes_count", &self.nodes.len())
            .field("alphabet", &self.alphabet)
            .finish()
    }
}

impl NodeArena {
    /// Create an arena holding only the root.
    pub fn new(alphabet: Alphabet) -> Self {
        let stride = alphabet.stride();
        Self {
            nodes: vec![Node::with_depth(0)],
            trans: vec![NodeId::ROOT; stride],
            alphabet,
            stride,
        }
    }

    /// Allocate a node with no edges, returning its ID.
    pub fn alloc(&mut self, depth: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::with_depth(depth));
        self.trans
            .resize(self.trans.len() + self.stride, NodeId::ROOT);
        id
    }

    /// The transition stored for `(id, symbol)`.
    #[inline]
    pub fn next(&self, id: NodeId, symbol: u8) -> NodeId {
        self.trans[id.index() * self.stride + symbol as usize]
    }

    #[inline]
    pub fn set_next(&mut self, id: NodeId, symbol: u8, target: NodeId) {
        self.trans[id.index() * self.stride + symbol as usize] = target;
    }

    /// The full transition row of a node.
    #[cfg(test)]
    pub fn row(&self, id: NodeId) -> &[NodeId] {
        let start = id.index() * self.stride;
        &self.trans[start..start + self.stride]
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// The node behind `id`, or `None` if `id` is not from this arena.
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over node ids in creation order.
    #[cfg(test)]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Release spare capacity once no more nodes will be added.
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        self.trans.shrink_to_fit();
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        let spilled: usize = self
            .nodes
            .iter()
            .filter(|n| n.terminals.spilled())
            .map(|n| n.terminals.capacity() * std::mem::size_of::<u32>())
            .sum();
        self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.trans.capacity() * std::mem::size_of::<NodeId>()
            + spilled
    }
}

impl std::ops::Index<NodeId> for NodeArena {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl std::ops::IndexMut<NodeId> for NodeArena {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_zero() {
        assert!(NodeId::ROOT.is_root());
        assert!(!NodeId(1).is_root());
        assert_eq!(NodeId::ROOT.index(), 0);
    }

    #[test]
    fn test_arena_alloc() {
        let mut arena = NodeArena::new(Alphabet::Byte);
        let id1 = arena.alloc(1);
        let id2 = arena.alloc(2);

        assert_eq!(id1.index(), 1);
        assert_eq!(id2.index(), 2);
        assert_eq!(arena.len(), 3);
        assert_eq!(arena[id2].depth, 2);
        assert_eq!(arena.row(id2).len(), 256);
    }

    #[test]
    fn test_transitions_default_to_root() {
        let mut arena = NodeArena::new(Alphabet::Nibble);
        let child = arena.alloc(1);
        assert_eq!(arena.stride(), 16);
        assert!(arena.row(NodeId::ROOT).iter().all(|t| t.is_root()));

        arena.set_next(NodeId::ROOT, 0x0A, child);
        assert_eq!(arena.next(NodeId::ROOT, 0x0A), child);
        assert!(arena.next(NodeId::ROOT, 0x0B).is_root());
        assert!(arena.row(child).iter().all(|t| t.is_root()));
    }

    #[test]
    fn test_links_can_point_backwards() {
        let mut arena = NodeArena::new(Alphabet::Byte);
        let a = arena.alloc(1);
        let b = arena.alloc(2);

        arena[b].fail = a;
        arena[a].fail = NodeId::ROOT;

        assert_eq!(arena[b].fail, a);
        assert!(arena[arena[b].fail].fail.is_root());
    }

    #[test]
    fn test_get_rejects_foreign_ids() {
        let mut arena = NodeArena::new(Alphabet::Byte);
        let a = arena.alloc(1);
        assert_eq!(arena.get(a).map(Node::depth), Some(1));
        assert!(arena.get(NodeId(2)).is_none());
    }

    #[test]
    fn test_node_accessors() {
        let mut arena = NodeArena::new(Alphabet::Byte);
        let a = arena.alloc(1);
        arena[a].terminals.push(4);
        arena[a].terminals.push(7);

        let node = &arena[a];
        assert!(node.fail().is_root());
        assert!(node.suffix().is_root());
        assert_eq!(node.depth(), 1);
        assert_eq!(node.terminals(), &[4, 7]);
        assert!(node.is_terminal());
        assert!(!arena[NodeId::ROOT].is_terminal());
    }
}
