//! A mutating walk over the entries of a trie.
//!
//! Iterators borrow the trie immutably, so removing or replacing entries while walking goes
//! through a `Cursor` instead. The cursor snapshots the keys on its first advance and then
//! visits them one by one, delegating every change to the trie itself.

use std::mem;

use once_cell::unsync::OnceCell;

use crate::key::KeyPart;
use crate::trie::{CompactTrie, OwnedKey};

/// A cursor over the entries of a trie that can remove or replace the current entry.
///
/// # Examples
///
/// ```
/// use compact_trie::StringTrie;
///
/// let mut trie: StringTrie<i32> = [("one", 1), ("two", 2), ("three", 3)].into();
/// let mut cursor = trie.cursor();
///
/// while let Some((key, value)) = cursor.next() {
///     if key.starts_with('t') {
///         *value *= 10;
///     } else {
///         cursor.remove_current();
///     }
/// }
///
/// assert_eq!(trie.len(), 2);
/// assert_eq!(trie.get("three"), Some(&30));
/// ```
pub struct Cursor<'a, P: KeyPart, V> {
    trie: &'a mut CompactTrie<P, V>,

    /// Keys present when the walk started
    snapshot: OnceCell<Vec<OwnedKey<P>>>,

    /// Index of the next snapshot key to visit
    position: usize,

    /// Index of the key most recently yielded, until it is removed
    current: Option<usize>,
}

impl<'a, P: KeyPart, V> Cursor<'a, P, V> {
    pub(crate) fn new(trie: &'a mut CompactTrie<P, V>) -> Self {
        Cursor {
            trie,
            snapshot: OnceCell::new(),
            position: 0,
            current: None,
        }
    }

    /// Advances to the next entry, returning its key and a mutable reference to its value.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&OwnedKey<P>, &mut V)> {
        let Cursor {
            trie,
            snapshot,
            position,
            current,
        } = self;

        let keys = snapshot.get_or_init(|| trie.keys().collect());
        *current = None;

        while *position < keys.len() {
            let index = *position;
            *position += 1;

            let key = &keys[index];
            if trie.contains_key(key) {
                *current = Some(index);
                return trie.get_mut(key).map(|value| (key, value));
            }
        }

        None
    }

    /// Returns the key of the current entry.
    pub fn key(&self) -> Option<&OwnedKey<P>> {
        let index = self.current?;
        self.snapshot.get().map(|keys| &keys[index])
    }

    /// Removes the current entry from the trie and returns its value.
    ///
    /// Returns `None` before the first advance or when the entry was already removed.
    pub fn remove_current(&mut self) -> Option<V> {
        let index = self.current.take()?;
        let key = &self.snapshot.get()?[index];
        self.trie.remove(key)
    }

    /// Replaces the value of the current entry, returning the previous value.
    pub fn replace_current(&mut self, value: V) -> Option<V> {
        let index = self.current?;
        let key = &self.snapshot.get()?[index];
        self.trie.get_mut(key).map(|slot| mem::replace(slot, value))
    }

    /// Returns the number of entries currently in the trie.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Returns `true` if the trie is now empty.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }
}
