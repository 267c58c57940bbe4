//! Depth-first iterators over a trie or one of its subtrees.
//!
//! Keys are not stored whole anywhere in the tree, so `Iter` rebuilds each one by
//! concatenating key parts along the path into a single reusable buffer.

use crate::key::{KeyPart, KeySeq};
use crate::node::TrieNode;
use crate::trie::OwnedKey;

/// An iterator over the entries of a trie, yielding `(key, &value)` pairs.
///
/// The order of traversal is unspecified.
pub struct Iter<'a, P: KeyPart, V> {
    /// Nodes still to visit, each with the path length of its parent
    stack: Vec<(&'a TrieNode<P, V>, usize)>,

    /// The key of the most recently visited node
    path: OwnedKey<P>,
}

impl<'a, P: KeyPart, V> Iter<'a, P, V> {
    /// Starts a walk at `start`, whose key part follows the first `path_len` units of `path`.
    pub(crate) fn new(start: Option<&'a TrieNode<P, V>>, path: OwnedKey<P>, path_len: usize) -> Self {
        Iter {
            stack: start.map(|node| (node, path_len)).into_iter().collect(),
            path,
        }
    }
}

impl<'a, P: KeyPart, V> Iterator for Iter<'a, P, V> {
    type Item = (OwnedKey<P>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, parent_len)) = self.stack.pop() {
            let part = node.key_part.as_seq();
            <P::Seq as KeySeq>::truncate_owned(&mut self.path, parent_len);
            part.push_onto(&mut self.path);

            let path_len = parent_len + part.len();
            self.stack
                .extend(node.children.values().map(|child| (child, path_len)));

            if let Some(value) = &node.value {
                return Some((self.path.clone(), value));
            }
        }

        None
    }
}

/// An iterator over the keys of a trie.
pub struct Keys<'a, P: KeyPart, V> {
    inner: Iter<'a, P, V>,
}

impl<'a, P: KeyPart, V> Keys<'a, P, V> {
    pub(crate) fn new(inner: Iter<'a, P, V>) -> Self {
        Keys { inner }
    }
}

impl<'a, P: KeyPart, V> Iterator for Keys<'a, P, V> {
    type Item = OwnedKey<P>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// An iterator over the values of a trie.
///
/// Unlike [`Iter`] this never rebuilds keys.
pub struct Values<'a, P: KeyPart, V> {
    stack: Vec<&'a TrieNode<P, V>>,
}

impl<'a, P: KeyPart, V> Values<'a, P, V> {
    pub(crate) fn new(start: Option<&'a TrieNode<P, V>>) -> Self {
        Values {
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a, P: KeyPart, V> Iterator for Values<'a, P, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            self.stack.extend(node.children.values());

            if let Some(value) = &node.value {
                return Some(value);
            }
        }

        None
    }
}
