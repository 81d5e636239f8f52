/// Normalize a path string before resolution.
///
/// Backslashes are treated as slashes, runs of consecutive slashes collapse
/// to one, and any trailing slash is stripped. The normalized form of the
/// root itself is the empty string.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());

    for ch in path.chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' && normalized.ends_with('/') {
            continue;
        }
        normalized.push(ch);
    }

    if normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Iterate over the non-empty segments of a normalized path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Split a normalized path into its parent path and base name.
///
/// The parent of a top-level entry is the empty string, which resolves to
/// the root. The root itself splits into an empty parent and an empty name.
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}
