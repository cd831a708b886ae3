//! Matching of resolved link paths against leaf route patterns.

use crate::routes::{LeafRoute, CATCH_ALL};

/// Test whether `link` is accepted by the route path `pattern`.
///
/// Literal segments compare ASCII case-insensitively. A `:param` segment
/// accepts exactly one non-empty segment. A trailing `*` segment accepts any
/// remainder, including an empty one, and a pattern of `*` alone accepts
/// everything. One trailing slash is tolerated on either side.
pub fn matches(pattern: &str, link: &str) -> bool {
    if pattern == CATCH_ALL {
        return true;
    }

    let pattern = trim_trailing_slash(pattern);
    let link = trim_trailing_slash(link);

    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let link_segments: Vec<&str> = link.split('/').collect();

    let (required, wildcard_tail) = match pattern_segments.split_last() {
        Some((last, rest)) if *last == CATCH_ALL => (rest, true),
        _ => (pattern_segments.as_slice(), false),
    };

    if wildcard_tail {
        if link_segments.len() < required.len() {
            return false;
        }
    } else if link_segments.len() != required.len() {
        return false;
    }

    required
        .iter()
        .zip(link_segments.iter())
        .all(|(pattern, segment)| segment_matches(pattern, segment))
}

/// True when `link` matches at least one of the leaf routes.
pub fn matches_any(routes: &[&LeafRoute], link: &str) -> bool {
    routes.iter().any(|route| matches(&route.path, link))
}

fn segment_matches(pattern: &str, segment: &str) -> bool {
    if pattern.starts_with(':') && pattern.len() > 1 {
        return !segment.is_empty();
    }
    pattern.eq_ignore_ascii_case(segment)
}

fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
