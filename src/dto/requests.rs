use crate::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, PaginationParams};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// GET /posts query string
#[derive(Debug, Default, Deserialize)]
pub struct PostListQuery {
    pub tag: Option<String>,
    pub q: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl PostListQuery {
    /// Blank `tag=` means no tag filter.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.trim().is_empty())
    }

    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
        }
    }
}
