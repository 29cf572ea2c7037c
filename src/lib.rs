//! # bytetrie
//!
//! A prefix tree over byte strings with one node per byte.
//!
//! Supports insertion, exact membership, longest-prefix lookup and
//! enumeration of every stored key under a prefix. Nodes are never removed.
//!
//! ## Example
//!
//! ```rust
//! use bytetrie::Trie;
//!
//! let mut trie = Trie::new();
//! trie.load_keys(["an", "ant", "anthem", "bee"]);
//!
//! assert!(trie.contains(b"an"));
//! assert!(!trie.contains(b"any"));
//! assert_eq!(trie.get_longest_prefix(b"any"), b"an");
//! assert_eq!(
//!     trie.get_all_with_prefix(b"an"),
//!     vec![b"an".to_vec(), b"ant".to_vec(), b"anthem".to_vec()],
//! );
//! ```

#![deny(unsafe_code)]

mod config;
mod error;
mod iter;
mod node;

pub use config::TrieConfig;
pub use error::{Result, TrieError};
pub use iter::Keys;
pub use node::{NodeId, NodeRef};

use node::NodeArena;
use tracing::{debug, trace};

// =============================================================================
// Trie
// =============================================================================

/// A byte-keyed prefix tree.
///
/// The empty key is treated as always present by [`contains`](Self::contains)
/// but is never stored, so it is not counted by [`len`](Self::len) and never
/// yielded by enumeration.
#[derive(Clone)]
pub struct Trie {
    arena: NodeArena,
    /// Number of nodes with `is_key` set.
    len: usize,
    config: TrieConfig,
}

impl Trie {
    /// Creates an empty trie with no limits.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates an empty trie bounded by `config`.
    pub fn with_config(config: TrieConfig) -> Self {
        debug!(
            max_key_len = ?config.max_key_len,
            max_nodes = ?config.max_nodes,
            initial_capacity = config.initial_capacity,
            "creating trie"
        );
        Self {
            arena: NodeArena::with_capacity(config.initial_capacity),
            len: 0,
            config,
        }
    }

    /// Limits this trie was created with.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Number of stored keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no key has been stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, including the root.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Approximate heap and inline bytes held by the trie.
    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.arena.memory_usage()
    }

    /// Releases spare node arena capacity.
    pub fn shrink_to_fit(&mut self) {
        self.arena.shrink_to_fit();
    }

    /// View of the root node, which spells the empty key.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(&self.arena, NodeId::ROOT)
    }

    // -------------------------------------------------------------------------
    // Insertion
    // -------------------------------------------------------------------------

    /// Inserts `key`, returning `true` if it was not already stored.
    ///
    /// The empty key is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the insertion would exceed a limit from [`TrieConfig`] or the
    /// `u32` node id range. Use [`try_insert`](Self::try_insert) to handle
    /// that case.
    pub fn insert(&mut self, key: &[u8]) -> bool {
        match self.try_insert(key) {
            Ok(added) => added,
            Err(err) => panic!("trie insert failed: {err}"),
        }
    }

    /// Inserts `key`, returning `true` if it was not already stored.
    ///
    /// Limits are checked before any node is created, so on error the trie is
    /// left exactly as it was.
    pub fn try_insert(&mut self, key: &[u8]) -> Result<bool> {
        if key.is_empty() {
            return Ok(false);
        }

        let max = self.config.key_len_limit();
        if key.len() > max {
            debug!(len = key.len(), max, "rejecting key over length limit");
            return Err(TrieError::KeyTooLong {
                len: key.len(),
                max,
            });
        }

        let mut cur = self.find_longest_prefix_node(key);
        let matched = self.arena.get(cur).depth();

        let limit = self.config.node_limit();
        let needed = self.arena.len().saturating_add(key.len() - matched);
        if needed > limit {
            debug!(needed, limit, "rejecting key over node limit");
            return Err(TrieError::NodeLimit { needed, limit });
        }

        for &c in &key[matched..] {
            cur = self.arena.create_child(cur, c);
        }

        let added = self.arena.get_mut(cur).mark_key();
        if added {
            self.len += 1;
        }
        trace!(
            key_len = key.len(),
            shared = matched,
            added,
            "inserted key"
        );
        Ok(added)
    }

    /// Inserts every key in order. Returns how many were newly stored.
    ///
    /// # Panics
    ///
    /// Same conditions as [`insert`](Self::insert).
    pub fn load_keys<I, K>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let before = self.len;
        for key in keys {
            self.insert(key.as_ref());
        }
        let added = self.len - before;
        debug!(added, total = self.len, nodes = self.arena.len(), "loaded keys");
        added
    }

    /// Fallible [`load_keys`](Self::load_keys). Stops at the first rejected
    /// key; keys before it stay inserted.
    pub fn try_load_keys<I, K>(&mut self, keys: I) -> Result<usize>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<[u8]>,
    {
        let before = self.len;
        for key in keys {
            self.try_insert(key.as_ref())?;
        }
        let added = self.len - before;
        debug!(added, total = self.len, nodes = self.arena.len(), "loaded keys");
        Ok(added)
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Follows edges matching `key` from the root as far as they go.
    ///
    /// The returned node's depth is the length of the longest prefix of `key`
    /// present as a path; it is the root when not even the first byte
    /// matches.
    pub(crate) fn find_longest_prefix_node(&self, key: &[u8]) -> NodeId {
        let mut cur = NodeId::ROOT;
        for &c in key {
            match self.arena.get(cur).child(c) {
                Some(next) => cur = next,
                None => break,
            }
        }
        cur
    }

    /// Node spelling exactly `prefix`, if that path exists.
    fn prefix_node(&self, prefix: &[u8]) -> Option<NodeId> {
        let id = self.find_longest_prefix_node(prefix);
        (self.arena.get(id).depth() == prefix.len()).then_some(id)
    }

    /// Longest prefix of `key` that exists as a path in the trie.
    ///
    /// The result need not be a stored key: with only `"ant"` stored,
    /// `get_longest_prefix(b"any")` is `"an"`.
    pub fn get_longest_prefix(&self, key: &[u8]) -> Vec<u8> {
        self.arena
            .reconstruct_key(self.find_longest_prefix_node(key))
    }

    /// Whether `key` was inserted. The empty key is always reported present.
    pub fn contains(&self, key: &[u8]) -> bool {
        if key.is_empty() {
            return true;
        }
        let node = self.arena.get(self.find_longest_prefix_node(key));
        node.depth() == key.len() && node.is_key()
    }

    /// Whether any path, stored key or not, spells `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.prefix_node(prefix).is_some()
    }

    /// Every stored key beginning with `prefix`, in ascending byte order.
    ///
    /// The subtree is walked with an explicit stack, so key length does not
    /// bound the call depth.
    pub fn get_all_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.keys_with_prefix(prefix).collect()
    }

    /// Lazy form of [`get_all_with_prefix`](Self::get_all_with_prefix).
    pub fn keys_with_prefix(&self, prefix: &[u8]) -> Keys<'_> {
        Keys::new(&self.arena, self.prefix_node(prefix))
    }

    /// All stored keys in ascending byte order.
    pub fn iter(&self) -> Keys<'_> {
        Keys::new(&self.arena, Some(NodeId::ROOT))
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Trie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|k| String::from_utf8_lossy(&k).into_owned()))
            .finish()
    }
}

impl<K: AsRef<[u8]>> FromIterator<K> for Trie {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.load_keys(iter);
        trie
    }
}

impl<K: AsRef<[u8]>> Extend<K> for Trie {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.load_keys(iter);
    }
}

impl<'a> IntoIterator for &'a Trie {
    type Item = Vec<u8>;
    type IntoIter = Keys<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod proptests;
