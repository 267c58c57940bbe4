//! The main trie implementation.
//!
//! This module contains the `CompactTrie` type, which provides the primary API for working
//! with the compact trie, and the aliases naming its three key part representations.

use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::ops::Index;

use crate::config::CompactionPolicy;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::iter::{Iter, Keys, Values};
use crate::key::{KeyPart, KeySeq, StrView};
use crate::node::{Cleanup, TrieNode};
use crate::prefix_view::PrefixView;

/// The owned key type a trie reconstructs full keys into (`Vec<E>` or `String`).
pub type OwnedKey<P> = <<P as KeyPart>::Seq as KeySeq>::Owned;

/// A compact trie keyed by slices of arbitrary elements.
pub type GenericTrie<E, V> = CompactTrie<Vec<E>, V>;

/// A compact trie keyed by strings, each node owning its key part.
pub type StringTrie<V> = CompactTrie<String, V>;

/// A compact trie keyed by strings, each node viewing a shared source string.
pub type StringViewTrie<V> = CompactTrie<StrView, V>;

/// A mutable compact trie (also known as a patricia trie).
///
/// Chains of single-child nodes are compressed into one edge holding a multi-element key
/// part. Insertion splits an edge when a new key diverges partway through it; removal merges
/// a node that is left with no value and a single child back into that child, so the tree
/// never holds a redundant pass-through node.
///
/// The key part representation `P` decides how edges are stored; see [`GenericTrie`],
/// [`StringTrie`] and [`StringViewTrie`].
///
/// # Examples
///
/// ```
/// use compact_trie::StringTrie;
///
/// let mut trie = StringTrie::new();
/// trie.insert("apple", 1);
/// trie.insert("application", 2);
/// trie.insert("banana", 3);
///
/// assert_eq!(trie.get("apple"), Some(&1));
/// assert!(trie.starts_with("appl"));
///
/// let mut values = trie.get_all_values_with_prefix("app");
/// values.sort();
/// assert_eq!(values, vec![&1, &2]);
/// ```
#[derive(Clone)]
pub struct CompactTrie<P: KeyPart, V> {
    /// The root node of the trie; its key part is always empty
    pub(crate) root: TrieNode<P, V>,

    /// The number of values stored in the trie
    size: usize,

    /// When key parts are rebuilt to release retained memory
    policy: CompactionPolicy,
}

impl<P: KeyPart, V> CompactTrie<P, V> {
    /// Creates a new, empty trie with the default [`CompactionPolicy`].
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let trie = StringTrie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_compaction(CompactionPolicy::default())
    }

    /// Creates a new, empty trie using the given compaction policy.
    pub fn with_compaction(policy: CompactionPolicy) -> Self {
        CompactTrie {
            root: TrieNode::new(P::default()),
            size: 0,
            policy,
        }
    }

    /// Returns the compaction policy this trie was created with.
    pub fn compaction_policy(&self) -> CompactionPolicy {
        self.policy
    }

    /// Returns the number of values stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let mut trie = StringTrie::new();
    /// assert_eq!(trie.len(), 0);
    ///
    /// trie.insert("hello", 42);
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every value from the trie.
    pub fn clear(&mut self) {
        log::debug!("clearing trie of {} values", self.size);
        self.root = TrieNode::new(P::default());
        self.size = 0;
    }

    /// Returns the number of nodes in the tree, the root included.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Rebuilds every key part into a minimal allocation, whatever the compaction policy.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::{CompactionPolicy, StringViewTrie};
    ///
    /// let mut trie = StringViewTrie::with_compaction(CompactionPolicy::Never);
    /// trie.insert("application", 1);
    /// trie.insert("apply", 2);
    ///
    /// // "appl" and "ication" still share the source of "application"
    /// assert_eq!(trie.shrink_to_fit(), 2);
    /// assert_eq!(trie.shrink_to_fit(), 0);
    /// ```
    pub fn shrink_to_fit(&mut self) -> usize {
        let compacted = self.root.shrink_to_fit();
        log::debug!("shrink_to_fit compacted {} key parts", compacted);
        compacted
    }

    /// Retrieves a reference to the value stored for the given key, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let mut trie = StringTrie::new();
    /// trie.insert("hello", 42);
    ///
    /// assert_eq!(trie.get("hello"), Some(&42));
    /// assert_eq!(trie.get("hell"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        self.find_node(key.as_ref())
            .and_then(|node| node.value.as_ref())
    }

    /// Retrieves a mutable reference to the value stored for the given key, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        let mut current = &mut self.root;
        let mut remaining = key.as_ref();

        while let Some(first) = remaining.first_elem() {
            let child = current.children.get_mut(&first)?;
            let common_len = child.key_part.as_seq().common_prefix_len(remaining);

            if common_len < child.key_part.as_seq().len() {
                return None;
            }

            remaining = remaining.tail(common_len);
            current = child;
        }

        current.value.as_mut()
    }

    /// Returns `true` if the trie contains a value for the given key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Inserts a key-value pair into the trie.
    ///
    /// If the key already exists, the value is replaced and the old value returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let mut trie = StringTrie::new();
    ///
    /// assert_eq!(trie.insert("apple", 4), None);
    /// assert_eq!(trie.insert("apple", 5), Some(4));
    /// assert_eq!(trie.len(), 1);
    /// assert_eq!(trie.get("apple"), Some(&5));
    /// ```
    pub fn insert<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: AsRef<P::Seq>,
    {
        let mut current = &mut self.root;
        let mut remaining = key.as_ref();

        loop {
            let Some(first) = remaining.first_elem() else {
                // The key ends exactly at this node
                let previous = current.value.replace(value);
                if previous.is_none() {
                    self.size += 1;
                }
                return previous;
            };

            match current.children.entry(first) {
                Entry::Vacant(slot) => {
                    slot.insert(TrieNode::with_value(P::from_seq(remaining), value));
                    self.size += 1;
                    return None;
                }
                Entry::Occupied(slot) => {
                    let child = slot.into_mut();
                    let part_len = child.key_part.as_seq().len();
                    let common_len = child.key_part.as_seq().common_prefix_len(remaining);

                    if common_len < part_len {
                        // The key diverges (or ends) inside this edge
                        log::trace!("splitting key part of {} units after {}", part_len, common_len);
                        child.split(common_len);

                        let rest = remaining.tail(common_len);
                        if rest.is_empty() {
                            child.value = Some(value);
                        } else {
                            child.attach(TrieNode::with_value(P::from_seq(rest), value));
                        }

                        self.size += 1;
                        return None;
                    }

                    remaining = remaining.tail(common_len);
                    current = child;
                }
            }
        }
    }

    /// Removes a key from the trie, returning its value if it was present.
    ///
    /// Nodes left behind as valueless leaves are pruned and valueless nodes left with a single
    /// child are merged into it. A miss leaves the tree untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let mut trie = StringTrie::new();
    /// trie.insert("tea", 2);
    /// trie.insert("ten", 3);
    ///
    /// assert_eq!(trie.remove("te"), None);
    /// assert_eq!(trie.remove("tea"), Some(2));
    /// assert_eq!(trie.len(), 1);
    /// assert_eq!(trie.node_count(), 2);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        let removed = Self::remove_recursive(&mut self.root, key.as_ref(), &self.policy)?;
        self.size -= 1;
        Some(removed)
    }

    // Recursive helper for remove; tidies each child on the way back up
    fn remove_recursive(
        node: &mut TrieNode<P, V>,
        key: &P::Seq,
        policy: &CompactionPolicy,
    ) -> Option<V> {
        let Some(first) = key.first_elem() else {
            return node.value.take();
        };

        let child = node.children.get_mut(&first)?;
        let part_len = child.key_part.as_seq().len();

        if child.key_part.as_seq().common_prefix_len(key) < part_len {
            return None;
        }

        let removed = Self::remove_recursive(child, key.tail(part_len), policy)?;

        match child.cleanup(policy) {
            Cleanup::Prune => {
                log::trace!("pruning valueless leaf");
                node.children.remove(&first);
            }
            Cleanup::Merged => log::trace!("merged valueless node into its only child"),
            Cleanup::Kept => {}
        }

        Some(removed)
    }

    /// Returns `true` if at least one stored key starts with `prefix`.
    ///
    /// The prefix does not have to end on a node boundary. An empty trie holds no keys, so
    /// this returns `false` for it even when `prefix` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::GenericTrie;
    ///
    /// let mut trie = GenericTrie::<char, &str>::new();
    /// trie.insert(['A', 'C', 'G'], "x");
    /// trie.insert(['A', 'C', 'T'], "y");
    ///
    /// assert!(trie.starts_with(&['A', 'C']));
    /// assert!(trie.starts_with(&['A']));
    /// assert!(!trie.starts_with(&['C']));
    /// ```
    pub fn starts_with<Q>(&self, prefix: &Q) -> bool
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        self.locate_prefix(prefix.as_ref())
            .map_or(false, |(node, _)| node.is_key_node() || !node.is_leaf())
    }

    /// Returns every entry whose key starts with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let trie: StringTrie<i32> = [("team", 1), ("tea", 2), ("ten", 3)].into();
    ///
    /// let found = trie.get_all_with_prefix("tea");
    /// assert_eq!(found.len(), 2);
    /// assert_eq!(found["team"], &1);
    /// ```
    pub fn get_all_with_prefix<Q>(&self, prefix: &Q) -> HashMap<OwnedKey<P>, &V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        self.prefix_iter(prefix).collect()
    }

    /// Returns the values of every entry whose key starts with `prefix`, in no particular order.
    pub fn get_all_values_with_prefix<Q>(&self, prefix: &Q) -> Vec<&V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        self.prefix_values(prefix).collect()
    }

    /// Creates a view of the entries whose keys start with `prefix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let trie: StringTrie<i32> = [("hello", 1), ("help", 2), ("world", 3)].into();
    ///
    /// let view = trie.prefix_view("hel");
    /// assert_eq!(view.len(), 2);
    /// assert!(view.contains_key("hello"));
    /// assert!(!view.contains_key("world"));
    /// ```
    pub fn prefix_view<Q>(&self, prefix: &Q) -> PrefixView<'_, P, V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        PrefixView::new(self, prefix.as_ref())
    }

    /// Returns an iterator over the entries whose keys start with `prefix`.
    pub fn prefix_iter<Q>(&self, prefix: &Q) -> Iter<'_, P, V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        let prefix = prefix.as_ref();
        match self.locate_prefix(prefix) {
            Some((node, start)) => {
                let mut path = OwnedKey::<P>::default();
                prefix.head(start).push_onto(&mut path);
                Iter::new(Some(node), path, start)
            }
            None => Iter::new(None, OwnedKey::<P>::default(), 0),
        }
    }

    /// Returns an iterator over the values whose keys start with `prefix`.
    pub fn prefix_values<Q>(&self, prefix: &Q) -> Values<'_, P, V>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        Values::new(self.locate_prefix(prefix.as_ref()).map(|(node, _)| node))
    }

    /// Returns an iterator over all entries, reconstructing each key.
    ///
    /// Every call walks the tree afresh; the order is unspecified.
    pub fn iter(&self) -> Iter<'_, P, V> {
        Iter::new(Some(&self.root), OwnedKey::<P>::default(), 0)
    }

    /// Returns an iterator over all keys.
    pub fn keys(&self) -> Keys<'_, P, V> {
        Keys::new(self.iter())
    }

    /// Returns an iterator over all values.
    pub fn values(&self) -> Values<'_, P, V> {
        Values::new(Some(&self.root))
    }

    /// Returns a cursor that walks a snapshot of the keys and can remove or replace entries.
    pub fn cursor(&mut self) -> Cursor<'_, P, V> {
        Cursor::new(self)
    }

    /// Retains only the entries for which `keep` returns `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compact_trie::StringTrie;
    ///
    /// let mut trie: StringTrie<i32> = [("a", 1), ("ab", 2), ("abc", 3)].into();
    /// trie.retain(|_, value| *value != 2);
    ///
    /// assert_eq!(trie.len(), 2);
    /// assert!(!trie.contains_key("ab"));
    /// ```
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&OwnedKey<P>, &mut V) -> bool,
    {
        let mut cursor = self.cursor();

        loop {
            let retained = match cursor.next() {
                Some((key, value)) => keep(key, value),
                None => break,
            };

            if !retained {
                cursor.remove_current();
            }
        }
    }

    /// Verifies the structural invariants of the tree.
    ///
    /// Every non-root node must have a non-empty key part, be filed under its first element,
    /// and either hold a value or have at least two children; the size counter must match the
    /// number of stored values.
    pub fn check_invariants(&self) -> Result<()> {
        let mut actual = 0;
        let mut stack = vec![(&self.root, 0usize)];

        while let Some((node, depth)) = stack.pop() {
            if node.is_key_node() {
                actual += 1;
            }

            if depth > 0 {
                if node.key_part.as_seq().is_empty() {
                    return Err(Error::EmptyKeyPart { depth });
                }
                if !node.is_key_node() {
                    match node.children.len() {
                        0 => return Err(Error::DeadLeaf { depth }),
                        1 => return Err(Error::PassThroughNode { depth }),
                        _ => {}
                    }
                }
            }

            for (elem, child) in &node.children {
                if child.first_elem().as_ref() != Some(elem) {
                    return Err(Error::MisfiledChild { depth: depth + 1 });
                }
                stack.push((child, depth + 1));
            }
        }

        if actual != self.size {
            return Err(Error::SizeMismatch {
                recorded: self.size,
                actual,
            });
        }

        Ok(())
    }

    // Finds the node a key ends at exactly, if the path exists
    fn find_node(&self, key: &P::Seq) -> Option<&TrieNode<P, V>> {
        let mut current = &self.root;
        let mut remaining = key;

        while let Some(first) = remaining.first_elem() {
            let child = current.children.get(&first)?;
            let common_len = child.key_part.as_seq().common_prefix_len(remaining);

            // The key diverges inside this edge
            if common_len < child.key_part.as_seq().len() {
                return None;
            }

            remaining = remaining.tail(common_len);
            current = child;
        }

        Some(current)
    }

    /// Finds the node whose subtree holds every key starting with `prefix`.
    ///
    /// Returns the node and the offset into `prefix` where that node's key part begins. The
    /// prefix may end partway through the node's key part.
    pub(crate) fn locate_prefix(&self, prefix: &P::Seq) -> Option<(&TrieNode<P, V>, usize)> {
        let mut current = &self.root;
        let mut start = 0;
        let mut consumed = 0;

        loop {
            let remaining = prefix.tail(consumed);
            let Some(first) = remaining.first_elem() else {
                return Some((current, start));
            };

            let child = current.children.get(&first)?;
            let part = child.key_part.as_seq();
            let common_len = part.common_prefix_len(remaining);

            if common_len == remaining.len() {
                return Some((child, consumed));
            }
            if common_len < part.len() {
                return None;
            }

            start = consumed;
            consumed += common_len;
            current = child;
        }
    }
}

impl<P: KeyPart, V> Default for CompactTrie<P, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Equal iff the same key-value associations are stored, whatever the tree shape or key part type
impl<P, Q, V> PartialEq<CompactTrie<Q, V>> for CompactTrie<P, V>
where
    P: KeyPart,
    Q: KeyPart<Seq = P::Seq>,
    V: PartialEq,
{
    fn eq(&self, other: &CompactTrie<Q, V>) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(&key) == Some(value))
    }
}

impl<P: KeyPart, V: Eq> Eq for CompactTrie<P, V> {}

impl<P, V, S> PartialEq<HashMap<OwnedKey<P>, V, S>> for CompactTrie<P, V>
where
    P: KeyPart,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &HashMap<OwnedKey<P>, V, S>) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get::<OwnedKey<P>>(&key) == Some(value))
    }
}

// Order-independent: entry hashes are summed, so equal tries hash equally whatever their shape
impl<P: KeyPart, V: Hash> Hash for CompactTrie<P, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let combined = self.iter().fold(0u64, |acc, (key, value)| {
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            value.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });

        self.size.hash(state);
        combined.hash(state);
    }
}

impl<P, V> fmt::Debug for CompactTrie<P, V>
where
    P: KeyPart,
    OwnedKey<P>: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<P, V, Q> Index<&Q> for CompactTrie<P, V>
where
    P: KeyPart,
    Q: AsRef<P::Seq> + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<P, V, K> Extend<(K, V)> for CompactTrie<P, V>
where
    P: KeyPart,
    K: AsRef<P::Seq>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// Later pairs win on duplicate keys
impl<P, V, K> FromIterator<(K, V)> for CompactTrie<P, V>
where
    P: KeyPart,
    K: AsRef<P::Seq>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = CompactTrie::new();
        trie.extend(iter);
        trie
    }
}

impl<P, V, K, const N: usize> From<[(K, V); N]> for CompactTrie<P, V>
where
    P: KeyPart,
    K: AsRef<P::Seq>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a, P: KeyPart, V> IntoIterator for &'a CompactTrie<P, V> {
    type Item = (OwnedKey<P>, &'a V);
    type IntoIter = Iter<'a, P, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sorted<T: Ord + Clone>(values: Vec<&T>) -> Vec<T> {
        let mut values: Vec<T> = values.into_iter().cloned().collect();
        values.sort();
        values
    }

    #[test]
    fn test_new_trie() {
        let trie: StringTrie<u32> = CompactTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.compaction_policy(), CompactionPolicy::default());
    }

    #[test]
    fn test_get_nonexistent() {
        let trie: StringTrie<u32> = CompactTrie::new();
        assert_eq!(trie.get("hello"), None);
        assert_eq!(trie.get(""), None);
    }

    #[test]
    fn test_insert_and_get() {
        let mut trie: StringTrie<u32> = CompactTrie::new();
        assert_eq!(trie.insert("hello", 42), None);

        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("hello"), Some(&42));
        assert_eq!(trie.get("world"), None);
        assert_eq!(trie.get("hell"), None);
        assert_eq!(trie.get("hello!"), None);
    }

    #[test]
    fn test_insert_replace() {
        let mut trie: StringTrie<u32> = CompactTrie::new();
        trie.insert("hello", 42);

        assert_eq!(trie.insert("hello", 100), Some(42));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("hello"), Some(&100));
    }

    #[test]
    fn test_insert_multiple() {
        let mut trie: StringTrie<u32> = CompactTrie::new();
        trie.insert("hello", 42);
        trie.insert("world", 100);
        trie.insert("hello world", 200);

        assert_eq!(trie.len(), 3);
        assert_eq!(trie.get("hello"), Some(&42));
        assert_eq!(trie.get("world"), Some(&100));
        assert_eq!(trie.get("hello world"), Some(&200));
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_node_splitting() {
        let mut trie: StringTrie<u32> = CompactTrie::new();
        trie.insert("alphabet", 1);
        trie.insert("alpine", 2);

        // root -> "alp" -> {"habet", "ine"}
        let alp = &trie.root.children[&'a'];
        assert_eq!(alp.key_part, "alp");
        assert!(alp.value.is_none());
        assert_eq!(alp.children[&'h'].key_part, "habet");
        assert_eq!(alp.children[&'i'].key_part, "ine");

        assert_eq!(trie.get("alphabet"), Some(&1));
        assert_eq!(trie.get("alpine"), Some(&2));
        assert_eq!(trie.get("alp"), None);
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_larger_key_first() {
        let mut trie: StringTrie<u32> = CompactTrie::new();
        trie.insert("alphabet", 1);

        // Ends exactly at the split point, so the value lands on the head node
        trie.insert("alpha", 2);

        let alpha = &trie.root.children[&'a'];
        assert_eq!(alpha.key_part, "alpha");
        assert_eq!(alpha.value, Some(2));
        assert_eq!(trie.get("alphabet"), Some(&1));
        assert_eq!(trie.get("alpha"), Some(&2));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_shorter_key_first() {
        let mut trie: StringTrie<u32> = CompactTrie::new();
        trie.insert("alpha", 1);
        trie.insert("alphabet", 2);

        assert_eq!(trie.get("alpha"), Some(&1));
        assert_eq!(trie.get("alphabet"), Some(&2));
        assert_eq!(trie.node_count(), 3);
    }

    #[test]
    fn test_get_mut() {
        let mut trie: StringTrie<u32> = [("tea", 1), ("team", 2)].into();

        if let Some(value) = trie.get_mut("tea") {
            *value += 10;
        }

        assert_eq!(trie.get("tea"), Some(&11));
        assert_eq!(trie.get_mut("te"), None);
        assert_eq!(trie.get_mut("teams"), None);
    }

    #[test]
    fn test_remove_existing() {
        let mut trie: StringTrie<u32> = [("hello", 42), ("world", 100)].into();

        assert_eq!(trie.remove("hello"), Some(42));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.get("hello"), None);
        assert_eq!(trie.get("world"), Some(&100));
        assert_eq!(trie.node_count(), 2);
    }

    #[test]
    fn test_remove_nonexistent() {
        let mut trie: StringTrie<u32> = [("hello", 42), ("help", 7)].into();
        let nodes = trie.node_count();

        assert_eq!(trie.remove("world"), None);
        assert_eq!(trie.remove("hel"), None);
        assert_eq!(trie.remove("he"), None);
        assert_eq!(trie.remove("hello!"), None);
        assert_eq!(trie.remove(""), None);

        assert_eq!(trie.len(), 2);
        assert_eq!(trie.node_count(), nodes);

        // Removing from an empty trie
        let mut empty: StringTrie<u32> = CompactTrie::new();
        assert_eq!(empty.remove("anything"), None);
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_remove_with_compression() {
        let mut trie: StringTrie<u32> = [("abc", 1), ("abcde", 2)].into();

        // Removing the middle key leaves "abc" a pass-through, which merges with "de"
        assert_eq!(trie.remove("abc"), Some(1));

        let merged = &trie.root.children[&'a'];
        assert_eq!(merged.key_part, "abcde");
        assert_eq!(merged.value, Some(2));
        assert!(merged.is_leaf());
        assert_eq!(trie.get("abcde"), Some(&2));
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_prunes_then_merges_parent() {
        let mut trie: StringTrie<u32> = [("team", 1), ("tea", 2), ("ten", 3)].into();

        assert_eq!(trie.remove("team"), Some(1));
        assert!(!trie.contains_key("team"));
        assert!(trie.contains_key("tea"));
        assert_eq!(trie.len(), 2);
        trie.check_invariants().unwrap();

        assert_eq!(trie.remove("tea"), Some(2));
        assert_eq!(trie.len(), 1);
        assert!(trie.contains_key("ten"));

        // "te" lost its "a" branch and was merged with "n"
        assert_eq!(trie.node_count(), 2);
        assert_eq!(trie.root.children[&'t'].key_part, "ten");
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_empty_key() {
        let mut trie: StringTrie<u32> = CompactTrie::new();
        trie.insert("", 100);
        trie.insert("a", 1);

        assert_eq!(trie.get(""), Some(&100));
        assert_eq!(sorted(trie.get_all_values_with_prefix("")), vec![1, 100]);

        assert_eq!(trie.remove(""), Some(100));
        assert_eq!(trie.get(""), None);
        assert_eq!(trie.len(), 1);
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_prefix_queries() {
        let trie: StringTrie<u32> =
            [("apple", 1), ("application", 2), ("apply", 3), ("banana", 4)].into();

        assert_eq!(sorted(trie.get_all_values_with_prefix("app")), vec![1, 2, 3]);
        assert_eq!(sorted(trie.get_all_values_with_prefix("ban")), vec![4]);
        assert!(trie.get_all_values_with_prefix("xyz").is_empty());

        // Prefix ending inside an edge label
        assert_eq!(sorted(trie.get_all_values_with_prefix("appli")), vec![2]);
        assert!(trie.get_all_values_with_prefix("applz").is_empty());

        let keys: HashSet<String> = trie.get_all_with_prefix("appl").into_keys().collect();
        let expected: HashSet<String> = ["apple", "application", "apply"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_starts_with() {
        let trie: StringTrie<u32> = [("apple", 1), ("banana", 4)].into();

        assert!(trie.starts_with("app"));
        assert!(trie.starts_with("apple"));
        assert!(trie.starts_with(""));
        assert!(!trie.starts_with("apples"));
        assert!(!trie.starts_with("apx"));
        assert!(!trie.starts_with("c"));

        let empty: StringTrie<u32> = CompactTrie::new();
        assert!(!empty.starts_with(""));
    }

    #[test]
    fn test_clear() {
        let mut trie: StringTrie<u32> = [("a", 1), ("b", 2)].into();
        trie.clear();

        assert!(trie.is_empty());
        assert_eq!(trie.get("a"), None);
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn test_generic_trie() {
        let mut trie: GenericTrie<u8, &str> = CompactTrie::new();
        trie.insert([1, 2, 3], "a");
        trie.insert(vec![1, 2, 4], "b");
        trie.insert(&[1u8][..], "c");

        assert_eq!(trie.get(&[1, 2, 3]), Some(&"a"));
        assert_eq!(trie.get(&vec![1, 2, 4]), Some(&"b"));
        assert_eq!(trie.get(&[1]), Some(&"c"));
        assert_eq!(trie.get(&[1, 2]), None);
        assert_eq!(trie.len(), 3);

        let found = trie.get_all_with_prefix(&[1, 2]);
        assert_eq!(found.get(&vec![1, 2, 3]), Some(&&"a"));
        assert_eq!(found.len(), 2);
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_view_split_shares_source_and_removal_compacts() {
        let mut trie: StringViewTrie<u32> = CompactTrie::new();
        trie.insert("abcdefghij", 1);
        trie.insert("ab", 2);

        {
            let head = &trie.root.children[&'a'];
            let tail = &head.children[&'c'];
            assert_eq!(head.key_part.as_str(), "ab");
            assert!(head.key_part.shares_source_with(&tail.key_part));
            assert_eq!(head.key_part.source_len(), 10);
        }

        // "ab" survives on the removal path and views 2 of 10 bytes
        assert_eq!(trie.remove("abcdefghij"), Some(1));

        let head = &trie.root.children[&'a'];
        assert_eq!(head.key_part.as_str(), "ab");
        assert_eq!(head.key_part.source_len(), 2);
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_view_compaction_disabled() {
        let mut trie: StringViewTrie<u32> = CompactTrie::with_compaction(CompactionPolicy::Never);
        trie.insert("abcdefghij", 1);
        trie.insert("ab", 2);
        trie.remove("abcdefghij");

        assert_eq!(trie.root.children[&'a'].key_part.source_len(), 10);

        assert_eq!(trie.shrink_to_fit(), 1);
        assert_eq!(trie.root.children[&'a'].key_part.source_len(), 2);
    }

    #[test]
    fn test_view_merge_allocates_minimal_source() {
        let mut trie: StringViewTrie<u32> = CompactTrie::with_compaction(CompactionPolicy::Never);
        trie.insert("team", 1);
        trie.insert("tea", 2);
        trie.insert("ten", 3);
        trie.remove("tea");
        trie.remove("ten");

        let merged = &trie.root.children[&'t'];
        assert_eq!(merged.key_part.as_str(), "team");
        assert_eq!(merged.key_part.source_len(), 4);
    }

    #[test]
    fn test_equality_across_representations() {
        let owned: StringTrie<u32> = [("tea", 1), ("ten", 2), ("team", 3)].into();
        let viewed: StringViewTrie<u32> = [("team", 3), ("ten", 2), ("tea", 1)].into();

        assert_eq!(owned, viewed);

        let map: HashMap<String, u32> = [("tea".to_string(), 1), ("ten".to_string(), 2), ("team".to_string(), 3)]
            .into_iter()
            .collect();
        assert_eq!(owned, map);

        let different: StringTrie<u32> = [("tea", 1), ("ten", 2), ("team", 4)].into();
        assert_ne!(owned, different);
    }

    #[test]
    fn test_equality_with_hash_map() {
        let mut trie: GenericTrie<u8, &str> = GenericTrie::new();
        let mut map: HashMap<Vec<u8>, &str> = HashMap::new();
        assert_eq!(trie, map);

        for (key, value) in [(vec![1, 2, 3], "a"), (vec![1, 2], "b"), (vec![4], "c")] {
            trie.insert(&key, value);
            map.insert(key, value);
        }
        assert_eq!(trie, map);

        // Same length, one value apart
        map.insert(vec![4], "z");
        assert_ne!(trie, map);

        // Same length, one key apart
        map.remove(&vec![4]);
        map.insert(vec![1], "c");
        assert_ne!(trie, map);

        let viewed: StringViewTrie<u32> = [("tea", 1), ("team", 2)].into();
        let words: HashMap<String, u32> = [("tea".to_string(), 1), ("team".to_string(), 2)].into();
        assert_eq!(viewed, words);
    }

    #[test]
    fn test_hash_ignores_insertion_order() {
        use std::collections::hash_map::DefaultHasher;

        let hash_of = |trie: &StringTrie<u32>| {
            let mut hasher = DefaultHasher::new();
            trie.hash(&mut hasher);
            hasher.finish()
        };

        let first: StringTrie<u32> = [("b", 2), ("a", 1), ("ab", 3)].into();
        let second: StringTrie<u32> = [("ab", 3), ("a", 1), ("b", 2)].into();

        assert_eq!(hash_of(&first), hash_of(&second));
    }

    #[test]
    fn test_from_iter_last_write_wins() {
        let trie: StringTrie<u32> = vec![("k", 1), ("k", 2)].into_iter().collect();

        assert_eq!(trie.len(), 1);
        assert_eq!(trie["k"], 2);
    }

    #[test]
    fn test_debug_formats_as_map() {
        let trie: StringTrie<u32> = [("a", 1)].into();
        assert_eq!(format!("{:?}", trie), r#"{"a": 1}"#);
    }

    #[test]
    fn test_check_invariants_reports_corruption() {
        let mut trie: StringTrie<u32> = [("tea", 1), ("ten", 2)].into();
        trie.check_invariants().unwrap();

        // Strip the value from "tea": it becomes a dead leaf and the counter is stale
        if let Some(te) = trie.root.children.get_mut(&'t') {
            if let Some(a) = te.children.get_mut(&'a') {
                a.value = None;
            }
        }
        assert_eq!(trie.check_invariants(), Err(Error::DeadLeaf { depth: 2 }));

        let mut trie: StringTrie<u32> = [("x", 1)].into();
        trie.size = 5;
        assert_eq!(
            trie.check_invariants(),
            Err(Error::SizeMismatch { recorded: 5, actual: 1 })
        );
    }
}
