use std::collections::HashSet;

use crate::key::KeyPart;
use crate::trie::{CompactTrie, OwnedKey};

/// Suggests dictionary words within one edit of a misspelling.
///
/// An edit is deleting a character, swapping two adjacent characters, replacing a character
/// or inserting one; replacements and insertions draw from the checker's alphabet.
///
/// Works over any dictionary whose keys can be built from chars, so both string tries and
/// `GenericTrie<char, _>` qualify. Suggestions are returned as `String`s either way.
///
/// # Examples
///
/// ```
/// use compact_trie::utils::SpellChecker;
/// use compact_trie::StringTrie;
///
/// let dictionary: StringTrie<()> = [("apple", ()), ("apply", ()), ("angle", ())].into();
/// let checker = SpellChecker::new(&dictionary);
///
/// assert_eq!(checker.suggest("aple").into_iter().collect::<Vec<_>>(), vec!["apple"]);
/// assert!(checker.suggest("apply").contains("apply"));
/// ```
pub struct SpellChecker<'a, P: KeyPart, V> {
    dictionary: &'a CompactTrie<P, V>,
    alphabet: Vec<char>,
}

impl<'a, P, V> SpellChecker<'a, P, V>
where
    P: KeyPart,
    OwnedKey<P>: FromIterator<char>,
{
    /// Creates a checker drawing replacements and insertions from `a` to `z`.
    pub fn new(dictionary: &'a CompactTrie<P, V>) -> Self {
        Self::with_alphabet(dictionary, 'a'..='z')
    }

    /// Creates a checker drawing replacements and insertions from `alphabet`.
    pub fn with_alphabet<I>(dictionary: &'a CompactTrie<P, V>, alphabet: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        SpellChecker {
            dictionary,
            alphabet: alphabet.into_iter().collect(),
        }
    }

    /// Returns `{word}` when the word is in the dictionary, otherwise every dictionary word
    /// one edit away from it.
    pub fn suggest(&self, word: &str) -> HashSet<String> {
        if self.is_known(word) {
            return HashSet::from([word.to_string()]);
        }

        self.edits1(word)
            .into_iter()
            .filter(|candidate| self.is_known(candidate))
            .collect()
    }

    fn is_known(&self, word: &str) -> bool {
        let key: OwnedKey<P> = word.chars().collect();
        self.dictionary.contains_key(&key)
    }

    fn edits1(&self, word: &str) -> HashSet<String> {
        let chars: Vec<char> = word.chars().collect();
        let splice = |head: &[char], middle: &[char], tail: &[char]| -> String {
            head.iter().chain(middle).chain(tail).collect()
        };

        let mut edits = HashSet::new();

        for i in 0..chars.len() {
            edits.insert(splice(&chars[..i], &[], &chars[i + 1..]));
        }

        for i in 1..chars.len() {
            edits.insert(splice(&chars[..i - 1], &[chars[i], chars[i - 1]], &chars[i + 1..]));
        }

        for i in 0..chars.len() {
            for &c in &self.alphabet {
                edits.insert(splice(&chars[..i], &[c], &chars[i + 1..]));
            }
        }

        for i in 0..=chars.len() {
            for &c in &self.alphabet {
                edits.insert(splice(&chars[..i], &[c], &chars[i..]));
            }
        }

        log::trace!("{} candidate edits for {:?}", edits.len(), word);
        edits
    }
}
