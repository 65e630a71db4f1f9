//! Free-text filtering over fetched posts.

use crate::models::{Comment, Post};
use std::collections::HashMap;

/// Comments keyed by the id of the post they belong to.
pub type CommentsByPost = HashMap<String, Vec<Comment>>;

/// Posts whose title, content, any tag, or (when `comments` is given) any
/// comment contains `query`, ignoring case. A blank query keeps everything.
///
/// Input order is preserved, so searching a result again returns it unchanged.
pub fn search(posts: &[Post], comments: Option<&CommentsByPost>, query: &str) -> Vec<Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.to_vec();
    }

    posts
        .iter()
        .filter(|post| matches(post, comments, &needle))
        .cloned()
        .collect()
}

fn matches(post: &Post, comments: Option<&CommentsByPost>, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);

    contains(post.title.as_str())
        || contains(post.content.as_str())
        || post.tags.iter().any(|tag| contains(tag.as_str()))
        || comments
            .and_then(|by_post| by_post.get(&post.id))
            .is_some_and(|list| list.iter().any(|c| contains(c.content.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(id: &str, title: &str, content: &str, tags: &[&str]) -> Post {
        Post {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            author_id: "u1".into(),
            author_email: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn comment(post_id: &str, content: &str) -> Comment {
        Comment {
            id: format!("c-{}", post_id),
            post_id: post_id.into(),
            content: content.into(),
            author_id: "u2".into(),
            author_email: None,
            created_at: None,
        }
    }

    fn sample() -> Vec<Post> {
        vec![
            post("1", "Tokio tips", "spawn tasks", &["async"]),
            post("2", "Borrowing", "lifetimes explained", &["Ownership"]),
            post("3", "Misc", "nothing here", &[]),
        ]
    }

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn blank_query_is_identity() {
        let posts = sample();
        assert_eq!(search(&posts, None, ""), posts);
        assert_eq!(search(&posts, None, "   "), posts);
    }

    #[test]
    fn matches_title_content_and_tags_ignoring_case() {
        let posts = sample();
        assert_eq!(ids(&search(&posts, None, "TOKIO")), vec!["1"]);
        assert_eq!(ids(&search(&posts, None, "lifetime")), vec!["2"]);
        assert_eq!(ids(&search(&posts, None, "ownership")), vec!["2"]);
        assert!(search(&posts, None, "absent").is_empty());
    }

    #[test]
    fn comments_count_only_when_supplied() {
        let posts = sample();
        let mut by_post = CommentsByPost::new();
        by_post.insert("3".into(), vec![comment("3", "Great Question")]);

        assert!(search(&posts, None, "great").is_empty());
        assert_eq!(ids(&search(&posts, Some(&by_post), "great")), vec!["3"]);
    }

    #[test]
    fn search_is_idempotent() {
        let posts = sample();
        let once = search(&posts, None, "s");
        assert_eq!(search(&once, None, "s"), once);
    }
}
