//! Fixed-size pagination over the sorted result set.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Which slice of the ordered results to return. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub number: usize,
    pub size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(number: usize, size: usize) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }
}

/// One page of results plus the counts the directory UI renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

/// Slice `sorted` into the requested page. A page number past the end yields
/// an empty items list rather than an error, and an empty result set still
/// reports one (empty) page.
pub fn paginate<T: Clone>(sorted: &[T], request: PageRequest) -> Page<T> {
    let size = request.size.max(1);
    let number = request.number.max(1);

    let total_count = sorted.len();
    let total_pages = total_count.div_ceil(size).max(1);

    let start = (number - 1).saturating_mul(size);
    let items = if start >= total_count {
        Vec::new()
    } else {
        let end = (start + size).min(total_count);
        sorted[start..end].to_vec()
    };

    Page {
        items,
        page_number: number,
        page_size: size,
        total_count,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_reports_one_empty_page() {
        let page = paginate::<u32>(&[], PageRequest::new(1, 6));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let items: Vec<u32> = (0..13).collect();
        let page = paginate(&items, PageRequest::new(1, 6));
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 6);
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let items: Vec<u32> = (0..13).collect();
        let page = paginate(&items, PageRequest::new(3, 6));
        assert_eq!(page.items, vec![12]);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let items: Vec<u32> = (0..5).collect();
        let page = paginate(&items, PageRequest::new(9, 6));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn pages_partition_the_result_set() {
        let items: Vec<u32> = (0..20).collect();
        let size = 6;
        let total = paginate(&items, PageRequest::new(1, size)).total_pages;

        let mut seen = Vec::new();
        for number in 1..=total {
            let page = paginate(&items, PageRequest::new(number, size));
            seen.extend(page.items);
        }
        assert_eq!(seen, items);
    }
}
