//! Trie vertices and the arena that owns them.
//!
//! Every node lives in a single `Vec<Node>` and is addressed by a 32-bit
//! [`NodeId`]. Child slots hold ids rather than boxes, which lets a child keep
//! a plain id back to its parent without creating an ownership cycle. The
//! parent link is only read to rebuild a node's key.

use std::fmt;

/// One child slot per possible byte value.
pub(crate) const NUM_CHILDREN: usize = 256;

/// Index of a node in its trie's arena.
///
/// Ids are only meaningful for the trie that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The root is always the first node allocated.
    pub const ROOT: NodeId = NodeId(0);
    /// Empty child slot / missing parent.
    const NULL: NodeId = NodeId(u32::MAX);

    #[inline]
    fn is_null(self) -> bool {
        self.0 == Self::NULL.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("NodeId(NULL)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node {
    /// Direct-indexed by edge byte; `NodeId::NULL` marks an empty slot.
    children: Box<[NodeId; NUM_CHILDREN]>,
    /// `NodeId::NULL` at the root.
    parent: NodeId,
    depth: u32,
    /// Byte on the edge from `parent`. Zero at the root.
    edge: u8,
    is_key: bool,
}

impl Node {
    fn root() -> Self {
        Self {
            children: Box::new([NodeId::NULL; NUM_CHILDREN]),
            parent: NodeId::NULL,
            depth: 0,
            edge: 0,
            is_key: false,
        }
    }

    #[inline]
    pub(crate) fn child(&self, c: u8) -> Option<NodeId> {
        let id = self.children[c as usize];
        (!id.is_null()).then_some(id)
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<NodeId> {
        (!self.parent.is_null()).then_some(self.parent)
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.depth as usize
    }

    #[inline]
    pub(crate) fn edge(&self) -> u8 {
        self.edge
    }

    #[inline]
    pub(crate) fn is_key(&self) -> bool {
        self.is_key
    }

    /// Marks the node as a stored key. Returns `true` if it was not one yet.
    #[inline]
    pub(crate) fn mark_key(&mut self) -> bool {
        !std::mem::replace(&mut self.is_key, true)
    }

    /// Occupied slots in ascending byte order.
    pub(crate) fn children(&self) -> impl DoubleEndedIterator<Item = (u8, NodeId)> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, id)| !id.is_null())
            .map(|(c, &id)| (c as u8, id))
    }
}

/// Owner of every node in a trie.
#[derive(Clone)]
pub(crate) struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Creates an arena holding only the root.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::root());
        Self { nodes }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Returns the child of `parent` at slot `c`, allocating it if the slot
    /// is empty. An occupied slot is never overwritten.
    ///
    /// The caller is responsible for staying within the id range; `Trie`
    /// checks its node limit before creating any chain.
    pub(crate) fn create_child(&mut self, parent: NodeId, c: u8) -> NodeId {
        if let Some(existing) = self.get(parent).child(c) {
            return existing;
        }

        debug_assert!(self.nodes.len() < NodeId::NULL.index());
        let id = NodeId(self.nodes.len() as u32);
        let depth = self.get(parent).depth + 1;
        self.nodes.push(Node {
            children: Box::new([NodeId::NULL; NUM_CHILDREN]),
            parent,
            depth,
            edge: c,
            is_key: false,
        });
        self.get_mut(parent).children[c as usize] = id;
        id
    }

    /// Rebuilds the bytes on the path from the root to `id` by following
    /// parent links upward.
    pub(crate) fn reconstruct_key(&self, id: NodeId) -> Vec<u8> {
        let mut key = vec![0u8; self.get(id).depth()];
        let mut pos = key.len();
        let mut cur = id;
        while let Some(parent) = self.get(cur).parent() {
            pos -= 1;
            key[pos] = self.get(cur).edge;
            cur = parent;
        }
        debug_assert_eq!(pos, 0, "parent chain shorter than recorded depth");
        key
    }

    pub(crate) fn memory_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
            + self.nodes.len() * std::mem::size_of::<[NodeId; NUM_CHILDREN]>()
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }
}

/// Read-only view of one node in a [`Trie`](crate::Trie).
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    arena: &'a NodeArena,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(arena: &'a NodeArena, id: NodeId) -> Self {
        Self { arena, id }
    }

    #[inline]
    fn node(&self) -> &'a Node {
        self.arena.get(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of bytes between the root and this node.
    pub fn depth(&self) -> usize {
        self.node().depth()
    }

    /// Whether the path to this node was explicitly inserted.
    pub fn is_key(&self) -> bool {
        self.node().is_key()
    }

    /// Byte on the edge from the parent, `None` at the root.
    pub fn edge(&self) -> Option<u8> {
        self.node().parent().map(|_| self.node().edge())
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node().parent().map(|id| NodeRef::new(self.arena, id))
    }

    pub fn child(&self, c: u8) -> Option<NodeRef<'a>> {
        self.node().child(c).map(|id| NodeRef::new(self.arena, id))
    }

    /// Children in ascending edge-byte order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let arena = self.arena;
        self.node()
            .children()
            .map(move |(_, id)| NodeRef::new(arena, id))
    }

    /// The byte sequence spelled by the path from the root to this node.
    pub fn key(&self) -> Vec<u8> {
        self.arena.reconstruct_key(self.id)
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &String::from_utf8_lossy(&self.key()))
            .field("depth", &self.depth())
            .field("is_key", &self.is_key())
            .finish()
    }
}
