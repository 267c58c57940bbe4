//! Small consumers built on the prefix and lookup queries of a trie.

mod autocomplete;
mod spell_check;

pub use autocomplete::AutoComplete;
pub use spell_check::SpellChecker;
