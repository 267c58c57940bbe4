//! Using `url::Url` keys in a compact trie, whole and split into path segments
use compact_trie::{GenericTrie, StringViewTrie};
use url::Url;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pages = [
        ("https://example.com/", "Home page"),
        ("https://example.com/about", "About us"),
        ("https://example.com/blog", "Blog index"),
        ("https://example.com/blog/first-post", "First blog post"),
        ("https://example.com/blog/second-post", "Second blog post"),
    ];

    // `Url` is `AsRef<str>`, so it can be used as a key directly
    let mut url_trie = StringViewTrie::new();
    let mut segment_trie: GenericTrie<String, &str> = GenericTrie::new();

    for (address, title) in pages {
        let url = Url::parse(address)?;
        segment_trie.insert(segments(&url), title);
        url_trie.insert(url, title);
    }

    let blog = Url::parse("https://example.com/blog")?;
    println!("Looking up {} → {:?}", blog, url_trie.get(&blog));

    println!("\nEverything under {}:", blog);
    for (url, title) in url_trie.prefix_iter(&blog) {
        println!("  {} → {}", url, title);
    }

    // Segment keys do not match "/blog-archive" against "/blog"
    println!("\nPages below the blog segment:");
    for (path, title) in segment_trie.prefix_iter(&segments(&blog)) {
        println!("  /{} → {}", path.join("/"), title);
    }

    Ok(())
}

fn segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|parts| parts.filter(|p| !p.is_empty()).map(str::to_string).collect())
        .unwrap_or_default()
}
