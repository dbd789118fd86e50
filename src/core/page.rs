//! Fixed-size pages over a result list.

use serde::Serialize;

/// One page of a larger list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    /// Items per page.
    pub per_page: usize,
    /// Items across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items, at least 1.
    pub fn total_pages(&self) -> usize {
        if self.per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.per_page).max(1)
    }

    /// Returns `true` if a later page has items.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Converts the items, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

/// Cuts page `page` (1-based) out of `items`.
///
/// Page 0 is treated as page 1. A page past the end is empty but still
/// reports the full `total`.
///
/// # Example
///
/// ```
/// use postpack::core::page::paginate;
///
/// let page = paginate((1..=7).collect::<Vec<_>>(), 2, 3);
/// assert_eq!(page.items, vec![4, 5, 6]);
/// assert_eq!(page.total, 7);
/// assert_eq!(page.total_pages(), 3);
/// ```
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(per_page);
    let items = items.into_iter().skip(start).take(per_page).collect();
    Page {
        items,
        page,
        per_page,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = paginate(vec!['a', 'b', 'c'], 1, 2);
        assert_eq!(page.items, vec!['a', 'b']);
        assert!(page.has_next());
    }

    #[test]
    fn test_last_partial_page() {
        let page = paginate(vec![1, 2, 3, 4, 5], 3, 2);
        assert_eq!(page.items, vec![5]);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_beyond_end() {
        let page = paginate(vec![1, 2, 3], 10, 50);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 10);
    }

    #[test]
    fn test_page_zero_is_first() {
        let page = paginate(vec![1, 2], 0, 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1]);
    }

    #[test]
    fn test_empty_list() {
        let page = paginate(Vec::<u8>::new(), 1, 50);
        assert_eq!(page.total_pages(), 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_huge_page_number_does_not_overflow() {
        let page = paginate(vec![1], usize::MAX, 50);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = paginate(vec![1, 2, 3], 2, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![30]);
        assert_eq!(page.total, 3);
    }
}
