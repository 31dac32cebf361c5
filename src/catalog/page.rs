use serde::{Deserialize, Serialize};

use crate::models::de;

pub const MAX_PER_PAGE: usize = 100;

/// Page and size as they arrive on the query string.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageRequest {
    #[serde(default, deserialize_with = "de::query_opt")]
    pub page: Option<usize>,
    #[serde(default, deserialize_with = "de::query_opt")]
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slice `items` into one page. `page` is 1-based and clamped to the last
    /// page; `per_page` is clamped to `1..=MAX_PER_PAGE`.
    pub fn from_items(items: Vec<T>, request: PageRequest, default_per_page: usize) -> Self {
        let per_page = request
            .per_page
            .unwrap_or(default_per_page)
            .clamp(1, MAX_PER_PAGE);
        let total = items.len();
        let total_pages = total.div_ceil(per_page).max(1);
        let page = request.page.unwrap_or(1).clamp(1, total_pages);

        let items = items
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: Option<usize>, per_page: Option<usize>) -> PageRequest {
        PageRequest { page, per_page }
    }

    #[test]
    fn middle_page() {
        let page = Page::from_items((1..=25).collect(), request(Some(2), Some(10)), 9);
        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_past_the_end_is_clamped_to_the_last() {
        let page = Page::from_items((1..=25).collect(), request(Some(9), Some(10)), 9);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn defaults_and_bounds() {
        let page = Page::from_items((1..=20).collect::<Vec<i32>>(), request(Some(0), None), 9);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 9);
        assert_eq!(page.items.len(), 9);

        let page = Page::from_items((1..=5).collect::<Vec<i32>>(), request(None, Some(1000)), 9);
        assert_eq!(page.per_page, MAX_PER_PAGE);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_collection_has_one_empty_page() {
        let page = Page::from_items(Vec::<i32>::new(), request(Some(3), Some(0)), 9);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
