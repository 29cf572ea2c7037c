//! Construction-time limits for a [`Trie`](crate::Trie).

/// Configuration for a [`Trie`](crate::Trie).
///
/// The defaults impose no limits beyond what a `u32` node id and depth can
/// address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieConfig {
    /// Longest key accepted by `try_insert`.
    pub max_key_len: Option<usize>,
    /// Maximum number of nodes, root included.
    pub max_nodes: Option<usize>,
    /// Node arena capacity to reserve up front.
    pub initial_capacity: usize,
}

impl TrieConfig {
    /// Same as [`TrieConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects keys longer than `max_key_len` bytes.
    pub fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = Some(max_key_len);
        self
    }

    /// Caps the node arena at `max_nodes`, root included.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Reserves room for `initial_capacity` nodes up front.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Effective key length bound: the configured one, capped by the `u32`
    /// depth range.
    pub(crate) fn key_len_limit(&self) -> usize {
        let hard = u32::MAX as usize;
        self.max_key_len.map_or(hard, |max| max.min(hard))
    }

    /// Effective node bound. One id value is reserved as the empty-slot
    /// sentinel.
    pub(crate) fn node_limit(&self) -> usize {
        let hard = u32::MAX as usize;
        self.max_nodes.map_or(hard, |max| max.min(hard))
    }
}
