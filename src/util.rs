/// Finds the length of the common prefix between a key and a node's key fragment.
///
/// Returns the number of elements that match starting from the given offset into `key`.
pub fn prefix_match<E: PartialEq>(key: &[E], start_idx: usize, node_key: &[E]) -> usize {
    let key = key.get(start_idx..).unwrap_or(&[]);

    key.iter()
        .zip(node_key)
        .take_while(|(a, b)| a == b)
        .count()
}

/// Finds the length, in bytes, of the common prefix of two strings.
///
/// The comparison runs over bytes and then backs off to the nearest char boundary, so
/// the returned length is always a valid split point in both strings.
pub fn str_prefix_match(key: &str, node_key: &str) -> usize {
    let mut matched = prefix_match(key.as_bytes(), 0, node_key.as_bytes());

    // Both strings share the first `matched` bytes, so a boundary in one is a boundary in the other.
    while !key.is_char_boundary(matched) {
        matched -= 1;
    }

    matched
}
