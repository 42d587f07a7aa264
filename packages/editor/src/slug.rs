use std::collections::HashSet;

/// Fallback for titles with no usable characters
pub const DEFAULT_SLUG: &str = "page";

/// Lower-case, collapse every run of non `[a-z0-9]` characters into one
/// hyphen and trim hyphens from both ends
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

/// Keep `candidate` if unused, otherwise try `-2`, `-3`, ...
pub fn disambiguate(candidate: &str, used: &HashSet<&str>) -> String {
    if !used.contains(candidate) {
        return candidate.to_string();
    }

    (2..)
        .map(|n| format!("{}-{}", candidate, n))
        .find(|slug| !used.contains(slug.as_str()))
        .unwrap_or_else(|| candidate.to_string())
}
