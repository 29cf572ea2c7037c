use thiserror::Error;

/// Errors returned by the fallible insertion paths.
///
/// Lookups never fail; only growing the trie past a limit is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrieError {
    /// The key is longer than the configured (or representable) maximum.
    #[error("key of {len} bytes exceeds maximum key length of {max}")]
    KeyTooLong { len: usize, max: usize },

    /// Inserting the key would grow the node arena past its limit.
    #[error("insert needs {needed} nodes but the trie is limited to {limit}")]
    NodeLimit { needed: usize, limit: usize },
}

pub type Result<T, E = TrieError> = std::result::Result<T, E>;
