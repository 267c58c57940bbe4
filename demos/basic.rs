//! Examples of using the compact trie
use compact_trie::utils::{AutoComplete, SpellChecker};
use compact_trie::{CompactionPolicy, GenericTrie, StringTrie, StringViewTrie};

fn main() {
    // Create a new trie with string keys
    let mut trie = StringTrie::new();

    // Insert some values
    trie.insert("hello", 1);
    trie.insert("help", 2);
    trie.insert("world", 3);

    // Check values
    assert_eq!(trie.get("hello"), Some(&1));
    assert_eq!(trie.get("hel"), None);
    assert!(trie.starts_with("hel"));
    println!("trie: {:?}", trie);

    // Edges in a string-view trie share the string they were first inserted from
    let mut views = StringViewTrie::with_compaction(CompactionPolicy::Never);
    views.extend([("application", 1), ("apply", 2), ("apple", 3)]);
    let compacted = views.shrink_to_fit();
    println!(
        "{} values in {} nodes, {} key parts compacted",
        views.len(),
        views.node_count(),
        compacted
    );

    // Any hashable element works as a key unit
    let mut codes: GenericTrie<u8, &str> = GenericTrie::new();
    codes.insert([0x1f, 0x8b], "gzip");
    codes.insert([0x50, 0x4b, 0x03, 0x04], "zip");
    assert_eq!(codes.get(&[0x1f, 0x8b]), Some(&"gzip"));

    let completer = AutoComplete::new(&trie);
    println!("completions of \"he\": {:?}", completer.suggest("he"));

    let checker = SpellChecker::new(&trie);
    println!("corrections of \"wrld\": {:?}", checker.suggest("wrld"));
}

#[test]
fn test_prefix_view() {
    let trie: StringTrie<i32> = [("hello", 1), ("help", 2), ("world", 3)].into();

    // Create a view of the "hel" prefix
    let view = trie.prefix_view("hel");

    // Check prefix view properties
    assert!(view.exists());
    assert_eq!(view.len(), 2);
    assert!(!view.is_empty());

    // Check key existence in the view
    assert!(view.contains_key("hello"));
    assert!(view.contains_key("help"));
    assert!(!view.contains_key("world"));

    // Get values from the view
    assert_eq!(view.get("hello"), Some(&1));
    assert_eq!(view.get("world"), None);
}
