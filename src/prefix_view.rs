//! Prefix view into a compact trie.
//!
//! This module provides the `PrefixView` type, which gives read access to the entries of a
//! trie whose keys share a prefix.

use std::fmt;

use crate::iter::{Iter, Values};
use crate::key::{KeyPart, KeySeq};
use crate::node::TrieNode;
use crate::trie::{CompactTrie, OwnedKey};

/// A lightweight borrowed view of the entries whose keys start with a prefix.
///
/// The subtree under the prefix is located once, when the view is created. The prefix may
/// end partway through an edge label.
///
/// # Examples
///
/// ```
/// use compact_trie::StringTrie;
///
/// let first: StringTrie<i32> = [("hello", 1), ("help", 2), ("world", 3)].into();
/// let second: StringTrie<i32> = [("help", 2), ("hello", 1)].into();
///
/// let view = first.prefix_view("hel");
///
/// // Views with identical content are equal
/// assert_eq!(view, second.prefix_view("hel"));
///
/// assert!(view.contains_key("hello"));
/// assert!(!view.contains_key("world"));
/// assert_eq!(view.get("help"), Some(&2));
/// ```
pub struct PrefixView<'a, P: KeyPart, V> {
    /// The source trie for this view
    trie: &'a CompactTrie<P, V>,

    /// The key prefix defining this view
    prefix: OwnedKey<P>,

    /// The node under which every matching key is stored, if any key can match
    subtrie_node: Option<&'a TrieNode<P, V>>,
}

impl<'a, P: KeyPart, V> PrefixView<'a, P, V> {
    /// Creates a new prefix view for the given trie and prefix.
    pub(crate) fn new(trie: &'a CompactTrie<P, V>, prefix: &P::Seq) -> Self {
        let mut owned = OwnedKey::<P>::default();
        prefix.push_onto(&mut owned);

        PrefixView {
            trie,
            prefix: owned,
            subtrie_node: trie.locate_prefix(prefix).map(|(node, _)| node),
        }
    }

    /// Returns the key prefix for this view.
    pub fn prefix(&self) -> &OwnedKey<P> {
        &self.prefix
    }

    /// Returns the underlying trie.
    pub fn trie(&self) -> &'a CompactTrie<P, V> {
        self.trie
    }

    /// Returns whether any stored key starts with the prefix.
    pub fn exists(&self) -> bool {
        self.subtrie_node
            .map_or(false, |node| node.is_key_node() || !node.is_leaf())
    }

    /// Returns the number of entries in this view.
    pub fn len(&self) -> usize {
        self.subtrie_node.map_or(0, |node| node.subtree_size())
    }

    /// Returns whether this view is empty (contains no entries).
    pub fn is_empty(&self) -> bool {
        !self.exists()
    }

    /// Checks if the view contains a key.
    ///
    /// Only returns true if the key is in the trie and starts with the prefix.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Gets the value for a key if it exists in this prefix view.
    pub fn get<Q>(&self, key: &Q) -> Option<&'a V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        if !key.as_ref().starts_with_seq(self.prefix_seq()) {
            return None;
        }

        self.trie.get(key)
    }

    /// Returns an iterator over the entries of this view, in no particular order.
    pub fn iter(&self) -> Iter<'a, P, V> {
        self.trie.prefix_iter(&self.prefix)
    }

    /// Returns an iterator over the values of this view.
    pub fn values(&self) -> Values<'a, P, V> {
        Values::new(self.subtrie_node)
    }

    fn prefix_seq(&self) -> &P::Seq {
        self.prefix.as_ref()
    }
}

impl<'a, P: KeyPart, V> Clone for PrefixView<'a, P, V> {
    fn clone(&self) -> Self {
        PrefixView {
            trie: self.trie,
            prefix: self.prefix.clone(),
            subtrie_node: self.subtrie_node,
        }
    }
}

impl<'a, P, V> fmt::Debug for PrefixView<'a, P, V>
where
    P: KeyPart,
    OwnedKey<P>: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixView")
            .field("prefix", &self.prefix)
            .field("len", &self.len())
            .finish()
    }
}

// Views are equal when they hold the same entries, whatever their prefixes
impl<'a, 'b, P, Q, V> PartialEq<PrefixView<'b, Q, V>> for PrefixView<'a, P, V>
where
    P: KeyPart,
    Q: KeyPart<Seq = P::Seq>,
    V: PartialEq,
{
    fn eq(&self, other: &PrefixView<'b, Q, V>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(&key) == Some(value))
    }
}

impl<'a, P: KeyPart, V: Eq> Eq for PrefixView<'a, P, V> {}

impl<'a, 'v, P: KeyPart, V> IntoIterator for &'v PrefixView<'a, P, V> {
    type Item = (OwnedKey<P>, &'a V);
    type IntoIter = Iter<'a, P, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
