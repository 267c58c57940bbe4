use std::collections::HashSet;

use crate::key::KeyPart;
use crate::trie::{CompactTrie, OwnedKey};

/// Suggests every stored key that completes a prefix.
///
/// # Examples
///
/// ```
/// use compact_trie::utils::AutoComplete;
/// use compact_trie::StringTrie;
///
/// let trie: StringTrie<u32> = [("apple", 1), ("apply", 2), ("banana", 3)].into();
/// let completer = AutoComplete::new(&trie);
///
/// let suggestions = completer.suggest("app");
/// assert_eq!(suggestions.len(), 2);
/// assert!(suggestions.contains("apply"));
/// ```
pub struct AutoComplete<'a, P: KeyPart, V> {
    data: &'a CompactTrie<P, V>,
}

impl<'a, P: KeyPart, V> AutoComplete<'a, P, V> {
    /// Creates a completer over the keys of `data`.
    pub fn new(data: &'a CompactTrie<P, V>) -> Self {
        AutoComplete { data }
    }

    /// Returns the keys starting with `prefix`, the prefix itself included when stored.
    pub fn suggest<Q>(&self, prefix: &Q) -> HashSet<OwnedKey<P>>
    where
        Q: AsRef<P::Seq> + ?Sized,
    {
        self.data.prefix_iter(prefix).map(|(key, _)| key).collect()
    }
}
