use serde::Deserialize;

/// Default number of posts per listing page.
pub const POSTS_PER_PAGE: u64 = 5;

/// A bounded, ordered slice of a larger ordered collection.
/// Page numbers are 1-indexed; out-of-range pages are empty, not errors.
#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
}

impl PageQuery {
    /// Clamp to a 1-indexed page number.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_basic() {
        let page = Page::<String>::new(vec![], 100, 1, 20);
        assert_eq!(page.total_pages, 5);
    }

    #[test]
    fn total_pages_with_remainder() {
        let page = Page::<String>::new(vec![], 12, 1, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn total_pages_zero_total() {
        let page = Page::<String>::new(vec![], 0, 1, 5);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn total_pages_zero_per_page() {
        let page = Page::<String>::new(vec![], 10, 1, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn neighbours_in_the_middle() {
        let page = Page::<String>::new(vec![], 12, 2, 5);
        assert!(page.has_prev());
        assert!(page.has_next());
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::<String>::new(vec![], 12, 3, 5);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn page_query_defaults_to_one() {
        let q = PageQuery { page: None };
        assert_eq!(q.page(), 1);
        let q = PageQuery { page: Some(0) };
        assert_eq!(q.page(), 1);
    }
}
