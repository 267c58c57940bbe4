//! Errors reported by structural diagnostics.
//!
//! Lookup misses are never errors: `get`, `remove` and the prefix queries report absence
//! with `None` or an empty collection. The variants here describe a trie whose shape has
//! stopped matching its invariants, which can only happen through a bug in the split or
//! merge logic.

use thiserror::Error;

/// Errors that can occur in trie operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A non-root node has an empty key part.
    #[error("node at depth {depth} has an empty key part")]
    EmptyKeyPart {
        /// Distance from the root
        depth: usize,
    },

    /// A child is filed under an element other than the first element of its key part.
    #[error("child at depth {depth} is filed under the wrong element")]
    MisfiledChild {
        /// Distance from the root
        depth: usize,
    },

    /// A non-root node has no value and exactly one child, so it should have been merged.
    #[error("node at depth {depth} is a valueless pass-through")]
    PassThroughNode {
        /// Distance from the root
        depth: usize,
    },

    /// A non-root node has no value and no children, so it should have been pruned.
    #[error("node at depth {depth} is a valueless leaf")]
    DeadLeaf {
        /// Distance from the root
        depth: usize,
    },

    /// The incremental size counter disagrees with the number of key-nodes.
    #[error("size counter says {recorded} but the tree holds {actual} values")]
    SizeMismatch {
        /// Value of the size counter
        recorded: usize,
        /// Number of nodes holding a value
        actual: usize,
    },
}

/// Result type for trie diagnostics
pub type Result<T> = std::result::Result<T, Error>;
