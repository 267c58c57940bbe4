//! # Compact Trie
//!
//! A mutable compact trie (also known as a patricia trie) with one generic core and three
//! ways of storing edge labels.
//!
//! Chains of single-child nodes are collapsed into a single edge whose label holds several
//! key elements. Inserting a key that diverges inside an edge splits it; removing a key merges
//! a node left with no value and one child back into that child, and prunes valueless leaves.
//!
//! ## Features
//!
//! - **One algorithm, three key representations**: [`GenericTrie`] keys on slices of any
//!   `Eq + Hash + Clone` element, [`StringTrie`] owns a `String` per edge, and
//!   [`StringViewTrie`] lets edges share one source string through [`StrView`]
//! - **Prefix queries**: `starts_with`, `get_all_with_prefix` and [`PrefixView`] work even when
//!   the prefix ends partway through an edge
//! - **Map interface**: iteration with reconstructed keys, a removing [`Cursor`], `retain`,
//!   bulk construction, and shape-independent equality and hashing
//! - **Compaction control**: a [`CompactionPolicy`] decides when shared or oversized edge
//!   storage is released after removals
//!
//! ## Example
//!
//! ```rust
//! use compact_trie::StringTrie;
//!
//! let mut trie = StringTrie::new();
//! trie.insert("team", 1);
//! trie.insert("tea", 2);
//! trie.insert("ten", 3);
//!
//! assert_eq!(trie.get("tea"), Some(&2));
//! assert_eq!(trie.get_all_values_with_prefix("tea").len(), 2);
//!
//! assert_eq!(trie.remove("team"), Some(1));
//! assert!(!trie.contains_key("team"));
//! assert_eq!(trie.len(), 2);
//! ```

mod config;
mod cursor;
mod error;
mod iter;
mod key;
mod node;
mod prefix_view;
mod trie;
mod util;
pub mod utils;

// Re-export public types
pub use crate::config::CompactionPolicy;
pub use crate::cursor::Cursor;
pub use crate::error::{Error, Result};
pub use crate::iter::{Iter, Keys, Values};
pub use crate::key::{KeyPart, KeySeq, StrView};
pub use crate::prefix_view::PrefixView;
pub use crate::trie::{CompactTrie, GenericTrie, OwnedKey, StringTrie, StringViewTrie};
