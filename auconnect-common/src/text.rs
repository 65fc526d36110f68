use std::collections::BTreeSet;

/// Collects `#word` tokens from post text. A tag runs over alphanumerics
/// and underscores; a lone `#` is not a tag.
#[must_use]
pub fn extract_hashtags(text: &str) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }
        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                tag.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !tag.is_empty() {
            tags.insert(tag);
        }
    }

    tags
}
