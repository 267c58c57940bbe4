//! Defines traits and types for the keys a trie is searched by and the key parts its nodes store.
//!
//! A [`KeySeq`] is the borrowed, unsized form a caller hands in (`[E]` or `str`). A
//! [`KeyPart`] is what a node owns for its compressed edge label. The trie algorithm is
//! written once against these two traits; the three key part representations only differ in
//! how they split, merge and release memory.
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::config::CompactionPolicy;
use crate::util::{prefix_match, str_prefix_match};

/// A borrowed key sequence: indexable, sliceable and comparable by common prefix.
///
/// Lengths and offsets are measured in the units the sequence is sliced by: elements for
/// `[E]`, bytes for `str` (always on char boundaries).
pub trait KeySeq {
    /// The element children are dispatched on.
    type Elem: Clone + Eq + Hash;

    /// The owned form full keys are reconstructed into.
    type Owned: Clone + Default + Eq + Hash + Borrow<Self> + AsRef<Self>;

    /// Returns the first element, or `None` for an empty sequence.
    fn first_elem(&self) -> Option<Self::Elem>;

    /// Returns the length of the sequence.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of the prefix shared with `other`.
    fn common_prefix_len(&self, other: &Self) -> usize;

    /// Returns the sequence without its first `from` units.
    fn tail(&self, from: usize) -> &Self;

    /// Returns the first `to` units of the sequence.
    fn head(&self, to: usize) -> &Self;

    /// Appends this sequence to an owned key buffer.
    fn push_onto(&self, buf: &mut Self::Owned);

    /// Shortens an owned key buffer to `len` units.
    fn truncate_owned(buf: &mut Self::Owned, len: usize);

    /// Returns `true` if this sequence starts with `prefix`.
    fn starts_with_seq(&self, prefix: &Self) -> bool {
        self.common_prefix_len(prefix) == prefix.len()
    }
}

impl<E: Clone + Eq + Hash> KeySeq for [E] {
    type Elem = E;
    type Owned = Vec<E>;

    fn first_elem(&self) -> Option<E> {
        self.first().cloned()
    }

    fn len(&self) -> usize {
        <[E]>::len(self)
    }

    fn common_prefix_len(&self, other: &Self) -> usize {
        prefix_match(self, 0, other)
    }

    fn tail(&self, from: usize) -> &Self {
        &self[from..]
    }

    fn head(&self, to: usize) -> &Self {
        &self[..to]
    }

    fn push_onto(&self, buf: &mut Vec<E>) {
        buf.extend_from_slice(self);
    }

    fn truncate_owned(buf: &mut Vec<E>, len: usize) {
        buf.truncate(len);
    }
}

impl KeySeq for str {
    type Elem = char;
    type Owned = String;

    fn first_elem(&self) -> Option<char> {
        self.chars().next()
    }

    fn len(&self) -> usize {
        str::len(self)
    }

    fn common_prefix_len(&self, other: &Self) -> usize {
        str_prefix_match(self, other)
    }

    fn tail(&self, from: usize) -> &Self {
        &self[from..]
    }

    fn head(&self, to: usize) -> &Self {
        &self[..to]
    }

    fn push_onto(&self, buf: &mut String) {
        buf.push_str(self);
    }

    fn truncate_owned(buf: &mut String, len: usize) {
        buf.truncate(len);
    }
}

/// Storage for a node's compressed edge label.
///
/// Implementations exist for `Vec<E>` (generic tries), `String` (string tries) and
/// [`StrView`] (string-view tries).
pub trait KeyPart: Default {
    /// The borrowed sequence this key part stores.
    type Seq: KeySeq + ?Sized;

    /// Creates a key part holding a copy of `seq`.
    fn from_seq(seq: &Self::Seq) -> Self;

    /// Borrows the key part as a sequence.
    fn as_seq(&self) -> &Self::Seq;

    /// Shortens this key part to `at` units and returns the rest.
    fn split_off(&mut self, at: usize) -> Self;

    /// Appends `other` to the end of this key part.
    fn append(&mut self, other: Self);

    /// Returns how many units of memory this key part keeps alive.
    fn retained(&self) -> usize;

    /// Rebuilds this key part into a minimal allocation.
    fn compact(&mut self);

    /// Compacts this key part if `policy` asks for it, returning whether it did.
    fn compact_with(&mut self, policy: &CompactionPolicy) -> bool {
        let used = self.as_seq().len();
        if used > 0 && policy.should_compact(self.retained(), used) {
            log::trace!("compacting key part: {} units retained for {}", self.retained(), used);
            self.compact();
            true
        } else {
            false
        }
    }
}

impl<E: Clone + Eq + Hash> KeyPart for Vec<E> {
    type Seq = [E];

    fn from_seq(seq: &[E]) -> Self {
        seq.to_vec()
    }

    fn as_seq(&self) -> &[E] {
        self
    }

    fn split_off(&mut self, at: usize) -> Self {
        Vec::split_off(self, at)
    }

    fn append(&mut self, other: Self) {
        self.extend(other);
    }

    fn retained(&self) -> usize {
        self.capacity()
    }

    fn compact(&mut self) {
        self.shrink_to_fit();
    }
}

impl KeyPart for String {
    type Seq = str;

    fn from_seq(seq: &str) -> Self {
        seq.to_owned()
    }

    fn as_seq(&self) -> &str {
        self
    }

    fn split_off(&mut self, at: usize) -> Self {
        String::split_off(self, at)
    }

    fn append(&mut self, other: Self) {
        self.push_str(&other);
    }

    fn retained(&self) -> usize {
        self.capacity()
    }

    fn compact(&mut self) {
        self.shrink_to_fit();
    }
}

/// A string key part stored as a `[start, end)` window onto a shared source string.
///
/// Splitting a view only adjusts offsets, so inserting a key that diverges in the middle of an
/// edge costs no string allocation. The price is that a view can keep its whole source alive;
/// see [`CompactionPolicy`] for how that is bounded.
///
/// # Examples
///
/// ```
/// use compact_trie::StrView;
///
/// let view = StrView::new("application");
/// assert_eq!(view.as_str(), "application");
/// assert_eq!(view.source_len(), 11);
/// ```
#[derive(Clone)]
pub struct StrView {
    source: Arc<str>,
    start: usize,
    end: usize,
}

impl StrView {
    /// Creates a view covering the whole of `source`.
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        let source = source.into();
        let end = source.len();
        StrView { source, start: 0, end }
    }

    /// Returns the viewed text.
    pub fn as_str(&self) -> &str {
        &self.source[self.start..self.end]
    }

    /// Returns the length of the viewed text in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the view is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length in bytes of the source string kept alive by this view.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }

    /// Returns `true` if both views read from the same source allocation.
    pub fn shares_source_with(&self, other: &StrView) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
    }
}

impl Default for StrView {
    fn default() -> Self {
        StrView::new("")
    }
}

impl KeyPart for StrView {
    type Seq = str;

    fn from_seq(seq: &str) -> Self {
        StrView::new(seq)
    }

    fn as_seq(&self) -> &str {
        self.as_str()
    }

    fn split_off(&mut self, at: usize) -> Self {
        debug_assert!(self.as_str().is_char_boundary(at), "split inside a char");

        let mid = self.start + at;
        let tail = StrView {
            source: Arc::clone(&self.source),
            start: mid,
            end: self.end,
        };
        self.end = mid;
        tail
    }

    fn append(&mut self, other: Self) {
        let mut merged = String::with_capacity(self.len() + other.len());
        merged.push_str(self.as_str());
        merged.push_str(other.as_str());
        *self = StrView::new(merged);
    }

    fn retained(&self) -> usize {
        self.source_len()
    }

    fn compact(&mut self) {
        *self = StrView::new(self.as_str());
    }
}

impl From<&str> for StrView {
    fn from(s: &str) -> Self {
        StrView::new(s)
    }
}

impl From<String> for StrView {
    fn from(s: String) -> Self {
        StrView::new(s)
    }
}

impl PartialEq for StrView {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for StrView {}

impl Hash for StrView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Debug for StrView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrView")
            .field("view", &self.as_str())
            .field("source_len", &self.source_len())
            .finish()
    }
}

impl fmt::Display for StrView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
