//! Tuning knobs for how a trie trades retained memory against allocations.

/// Decides when a node's key part is rebuilt into a fresh, minimally sized allocation.
///
/// A split never copies: the two halves of a [`StrView`](crate::StrView) keep sharing the
/// original source string, and an owned `String` or `Vec` key part keeps its capacity. After
/// removals a short surviving key part can therefore pin a much larger allocation. The
/// policy is consulted for every node left on the path of a removal and for every merge;
/// [`CompactTrie::shrink_to_fit`](crate::CompactTrie::shrink_to_fit) compacts the whole tree
/// regardless of policy.
///
/// # Examples
///
/// ```
/// use compact_trie::{CompactionPolicy, StringViewTrie};
///
/// let trie = StringViewTrie::<u32>::with_compaction(CompactionPolicy::Never);
/// assert_eq!(trie.compaction_policy(), CompactionPolicy::Never);
///
/// assert!(CompactionPolicy::default().should_compact(10, 4));
/// assert!(!CompactionPolicy::default().should_compact(8, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompactionPolicy {
    /// Never rebuild; key parts may retain their whole original allocation.
    Never,
    /// Rebuild whenever any memory beyond the key part itself is retained.
    Always,
    /// Rebuild when the retained allocation exceeds the key part length times this factor.
    SourceRatio(usize),
}

impl CompactionPolicy {
    /// Retained-to-used ratio applied by [`CompactionPolicy::default`].
    pub const DEFAULT_RATIO: usize = 2;

    /// Returns `true` if a key part of `used` units backed by `retained` units should be rebuilt.
    pub fn should_compact(&self, retained: usize, used: usize) -> bool {
        match *self {
            CompactionPolicy::Never => false,
            CompactionPolicy::Always => retained > used,
            CompactionPolicy::SourceRatio(ratio) => retained > used.saturating_mul(ratio),
        }
    }
}

impl Default for CompactionPolicy {
    fn default() -> Self {
        CompactionPolicy::SourceRatio(Self::DEFAULT_RATIO)
    }
}
