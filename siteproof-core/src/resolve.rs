//! Link path resolution against a source page.

/// Strip a fragment (`#...`) or query (`?...`) suffix, whichever starts
/// first. Route matching works on bare paths, so suffixes are removed before
/// resolution.
pub fn path_component(link: &str) -> &str {
    match link.find(|c| c == '#' || c == '?') {
        Some(idx) => &link[..idx],
        None => link,
    }
}

/// Resolve `to` against `from` with URL relative-reference semantics
/// restricted to the path component (RFC 3986 section 5).
///
/// A leading `/` makes `to` absolute from the site root. Otherwise the last
/// segment of `from` is dropped (the "filename"), `to`'s segments are
/// appended, and `.`/`..` segments are eliminated. Climbing past the root
/// clamps at `/`. A result whose final merged segment was `.`, `..` or empty
/// keeps a trailing slash.
///
/// ```
/// use siteproof_core::resolve::resolve_pathname;
///
/// assert_eq!(resolve_pathname("./x", "/docs/a/b"), "/docs/a/x");
/// assert_eq!(resolve_pathname("../c", "/docs/a/b"), "/docs/c");
/// assert_eq!(resolve_pathname("/c", "/docs/a/b"), "/c");
/// ```
pub fn resolve_pathname(to: &str, from: &str) -> String {
    let to_abs = to.starts_with('/');
    let from_abs = from.starts_with('/');
    let must_end_abs = to_abs || from_abs;

    let mut parts: Vec<&str> = if to_abs {
        to.split('/').collect()
    } else {
        let mut base: Vec<&str> = if from.is_empty() {
            Vec::new()
        } else {
            from.split('/').collect()
        };
        if !to.is_empty() {
            // Drop the filename segment of the base, then append the
            // reference's segments
            base.pop();
            base.extend(to.split('/'));
        }
        base
    };

    if parts.is_empty() {
        return "/".to_string();
    }

    let trailing = matches!(parts.last(), Some(&".") | Some(&"..") | Some(&""));

    // Eliminate dot segments back to front, counting `..` levels still owed
    let mut up = 0usize;
    let mut i = parts.len();
    while i > 0 {
        i -= 1;
        match parts[i] {
            "." => {
                parts.remove(i);
            }
            ".." => {
                parts.remove(i);
                up += 1;
            }
            _ => {
                if up > 0 {
                    parts.remove(i);
                    up -= 1;
                }
            }
        }
    }

    if !must_end_abs {
        for _ in 0..up {
            parts.insert(0, "..");
        }
    }

    // An absolute result must keep its leading empty segment, even when the
    // climb consumed it (clamping at the root)
    if must_end_abs && parts.first() != Some(&"") {
        parts.insert(0, "");
    }

    let mut resolved = parts.join("/");
    if trailing && !resolved.ends_with('/') {
        resolved.push('/');
    }

    if resolved.is_empty() {
        "/".to_string()
    } else {
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_component() {
        assert_eq!(path_component("/docs/intro"), "/docs/intro");
        assert_eq!(path_component("/docs/intro#setup"), "/docs/intro");
        assert_eq!(path_component("/docs/intro?version=2"), "/docs/intro");
        assert_eq!(path_component("/docs/intro?v=2#setup"), "/docs/intro");
        assert_eq!(path_component("/docs/intro#setup?v=2"), "/docs/intro");
        assert_eq!(path_component("#top"), "");
        assert_eq!(path_component(""), "");
    }

    #[test]
    fn test_absolute_reference_wins() {
        assert_eq!(resolve_pathname("/docs/guide", "/docs/intro"), "/docs/guide");
        assert_eq!(resolve_pathname("/", "/docs/intro"), "/");
    }

    #[test]
    fn test_sibling_reference() {
        assert_eq!(resolve_pathname("guide", "/docs/intro"), "/docs/guide");
        assert_eq!(resolve_pathname("./x", "/docs/a/b"), "/docs/a/x");
    }

    #[test]
    fn test_parent_reference() {
        // The last segment of the base is a filename: `..` climbs out of its
        // directory
        assert_eq!(resolve_pathname("../c", "/docs/a/b"), "/docs/c");
        // With a directory-style base (trailing slash) the same reference
        // lands one level deeper
        assert_eq!(resolve_pathname("../c", "/docs/a/b/"), "/docs/a/c");
    }

    #[test]
    fn test_bare_dotdot_keeps_trailing_slash() {
        assert_eq!(resolve_pathname("..", "/docs/a/b"), "/docs/");
        assert_eq!(resolve_pathname(".", "/docs/a/b"), "/docs/a/");
    }

    #[test]
    fn test_climb_clamps_at_root() {
        assert_eq!(resolve_pathname("../../../x", "/a/b"), "/x");
        assert_eq!(resolve_pathname("..", "/"), "/");
    }

    #[test]
    fn test_empty_reference_is_the_page_itself() {
        assert_eq!(resolve_pathname("", "/docs/a/b"), "/docs/a/b");
    }

    #[test]
    fn test_trailing_slash_preserved() {
        assert_eq!(resolve_pathname("c/", "/a/b"), "/a/c/");
        assert_eq!(resolve_pathname("/docs/", "/a"), "/docs/");
    }

    #[test]
    fn test_resolution_is_idempotent_on_absolute_paths() {
        let once = resolve_pathname("../guide", "/docs/a/b");
        let twice = resolve_pathname(&once, "/docs/a/b");
        assert_eq!(once, twice);
    }
}
