use std::iter::FusedIterator;

use crate::node::{NodeArena, NodeId};

/// Lazy iterator over stored keys, yielded in ascending byte order.
///
/// Created by [`Trie::iter`](crate::Trie::iter) and
/// [`Trie::keys_with_prefix`](crate::Trie::keys_with_prefix). Walks the
/// subtree with an explicit stack, so deep keys cannot overflow the call
/// stack.
#[derive(Clone)]
pub struct Keys<'a> {
    arena: &'a NodeArena,
    stack: Vec<NodeId>,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(arena: &'a NodeArena, start: Option<NodeId>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = self.arena.get(id);
            // Reversed so the smallest edge byte is popped first.
            self.stack
                .extend(node.children().rev().map(|(_, child)| child));
            if node.is_key() {
                return Some(self.arena.reconstruct_key(id));
            }
        }
        None
    }
}

impl FusedIterator for Keys<'_> {}
