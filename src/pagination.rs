use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_page() -> usize {
    DEFAULT_PAGE
}
fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of an already-fetched, already-filtered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
}

/// Slices `items` into 1-based pages. Page 0 reads as page 1.
pub fn paginate<T: Clone>(items: &[T], params: PaginationParams) -> Page<T> {
    let page = params.page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(params.limit);
    let end = start.saturating_add(params.limit).min(total);

    let data = if start < total {
        items[start..end].to_vec()
    } else {
        vec![]
    };

    Page {
        data,
        page,
        limit: params.limit,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: usize, limit: usize) -> PaginationParams {
        PaginationParams { page, limit }
    }

    #[test]
    fn slices_pages() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, params(1, 10)).data, (1..=10).collect::<Vec<_>>());
        assert_eq!(paginate(&items, params(3, 10)).data, vec![21, 22, 23, 24, 25]);
        assert_eq!(paginate(&items, params(3, 10)).total, 25);
    }

    #[test]
    fn past_the_end_is_empty() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, params(5, 10));
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn page_zero_is_first_page() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, params(0, 2));
        assert_eq!(page.page, 1);
        assert_eq!(page.data, vec![1, 2]);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let items = vec![1, 2, 3];
        assert!(paginate(&items, params(usize::MAX, usize::MAX)).data.is_empty());
    }

    #[test]
    fn defaults_from_empty_query() {
        let parsed: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.page, DEFAULT_PAGE);
        assert_eq!(parsed.limit, DEFAULT_LIMIT);
    }
}
