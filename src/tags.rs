//! Tag normalization and the derived tag index.

use crate::models::Post;
use std::collections::HashSet;

/// Trims each tag, drops empties and repeats, keeps first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && seen.insert(tag.to_string()) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Splits free-text tag input on whitespace and appends the new tags to
/// `existing`.
pub fn parse_tag_input(existing: &[String], input: &str) -> Vec<String> {
    normalize_tags(existing.iter().map(String::as_str).chain(input.split_whitespace()))
}

/// Unique tags across `posts`, in first-seen order.
pub fn extract_tags(posts: &[Post]) -> Vec<String> {
    normalize_tags(posts.iter().flat_map(|post| post.tags.iter()))
}

/// Posts carrying exactly `tag` (case-sensitive). `None` keeps everything.
pub fn filter_by_tag(posts: &[Post], tag: Option<&str>) -> Vec<Post> {
    match tag {
        None => posts.to_vec(),
        Some(tag) => posts.iter().filter(|post| post.has_tag(tag)).cloned().collect(),
    }
}
