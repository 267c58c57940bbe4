//! Internal node implementation for the compact trie.
//!
//! This module contains the internal `TrieNode` structure that forms the backbone
//! of the trie. Nodes own their children directly; the split and merge primitives
//! that keep the tree compressed live here so every key part representation shares them.

use std::collections::HashMap;

use crate::config::CompactionPolicy;
use crate::key::{KeyPart, KeySeq};

/// The element a node's children are keyed by.
pub(crate) type ElemOf<P> = <<P as KeyPart>::Seq as KeySeq>::Elem;

/// Internal node type for the compact trie.
///
/// Each node contains a key part (the compressed edge label from its parent), an optional
/// value, and a map of children keyed by the first element of their key parts.
#[derive(Clone)]
pub(crate) struct TrieNode<P: KeyPart, V> {
    /// The edge label leading to this node; empty only at the root
    pub key_part: P,

    /// The value stored at this node, if any
    pub value: Option<V>,

    /// Child nodes indexed by the first element of their key part
    pub children: HashMap<ElemOf<P>, TrieNode<P, V>>,
}

/// What happened to a node when it was tidied after a removal below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cleanup {
    /// The node is a valueless leaf and must be detached by its parent.
    Prune,
    /// The node absorbed its only child.
    Merged,
    /// The node is still structurally necessary.
    Kept,
}

impl<P: KeyPart, V> TrieNode<P, V> {
    /// Creates a new empty node with the given key part
    pub fn new(key_part: P) -> Self {
        TrieNode {
            key_part,
            value: None,
            children: HashMap::new(),
        }
    }

    /// Creates a new leaf node with the given key part and value
    pub fn with_value(key_part: P, value: V) -> Self {
        TrieNode {
            key_part,
            value: Some(value),
            children: HashMap::new(),
        }
    }

    /// Returns whether a stored key ends at this node
    pub fn is_key_node(&self) -> bool {
        self.value.is_some()
    }

    /// Returns whether this node is a leaf node (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the element this node is filed under in its parent
    pub fn first_elem(&self) -> Option<ElemOf<P>> {
        self.key_part.as_seq().first_elem()
    }

    /// Returns the number of values stored in this subtree
    pub fn subtree_size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.is_key_node() {
                count += 1;
            }
            stack.extend(node.children.values());
        }

        count
    }

    /// Returns the number of nodes in this subtree, this node included
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.values());
        }

        count
    }

    /// Files `child` under the first element of its key part.
    pub fn attach(&mut self, child: Self) {
        match child.first_elem() {
            Some(elem) => {
                let displaced = self.children.insert(elem, child);
                debug_assert!(displaced.is_none(), "attach displaced an existing child");
            }
            None => unreachable!("attached a child with an empty key part"),
        }
    }

    /// Splits this node's key part after `at` units.
    ///
    /// This node keeps the head of its key part and loses its value and children to a new
    /// node holding the tail, which becomes its only child.
    pub fn split(&mut self, at: usize) {
        debug_assert!(
            at > 0 && at < self.key_part.as_seq().len(),
            "split point must fall strictly inside the key part"
        );

        let tail = self.key_part.split_off(at);
        let lower = TrieNode {
            key_part: tail,
            value: self.value.take(),
            children: std::mem::take(&mut self.children),
        };

        self.attach(lower);
    }

    /// Merges this valueless node with its only child.
    ///
    /// The key parts are concatenated and the child's value and children are adopted.
    pub fn absorb_only_child(&mut self) {
        debug_assert!(self.value.is_none(), "merging a key-node into its child");
        debug_assert_eq!(self.children.len(), 1, "merging a node without exactly one child");

        let mut children = std::mem::take(&mut self.children).into_values();
        let Some(child) = children.next() else {
            return;
        };

        self.key_part.append(child.key_part);
        self.value = child.value;
        self.children = child.children;
    }

    /// Restores compactness after a removal somewhere in this subtree.
    pub fn cleanup(&mut self, policy: &CompactionPolicy) -> Cleanup {
        if self.is_key_node() || self.children.len() > 1 {
            self.key_part.compact_with(policy);
            return Cleanup::Kept;
        }

        if self.is_leaf() {
            return Cleanup::Prune;
        }

        self.absorb_only_child();
        self.key_part.compact_with(policy);
        Cleanup::Merged
    }

    /// Compacts every key part in this subtree and releases spare child map capacity.
    pub fn shrink_to_fit(&mut self) -> usize {
        let mut compacted = 0;
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if node.key_part.compact_with(&CompactionPolicy::Always) {
                compacted += 1;
            }
            node.children.shrink_to_fit();
            stack.extend(node.children.values_mut());
        }

        compacted
    }
}
