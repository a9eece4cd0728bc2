//! Fixed-size page slicing.
//!
//! Pages are 1-based. An empty result set still reports one (empty) page so
//! pagination controls always have something to render.

/// Records to skip before `page`.
pub fn offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size)
}

/// `ceil(total / page_size)`, never less than 1.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(page_size)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Slice an already-ordered sequence down to one page.
///
/// Pages past the end return an empty vector rather than an error.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: u32) -> Vec<T> {
    paginate_from(items, offset(page, page_size), page_size)
}

/// Slice by raw offset and limit, as a store would apply skip/limit.
pub fn paginate_from<T: Clone>(items: &[T], offset: u64, limit: u32) -> Vec<T> {
    let start = usize::try_from(offset).unwrap_or(usize::MAX);
    if start >= items.len() {
        return Vec::new();
    }
    let end = start.saturating_add(limit as usize).min(items.len());
    items[start..end].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_one_page() {
        assert_eq!(total_pages(0, 10), 1);
        assert!(paginate::<u32>(&[], 1, 10).is_empty());
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(20, 10), 2);
    }

    #[test]
    fn remainder_adds_a_page() {
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn last_page_holds_remainder_and_next_is_empty() {
        let items: Vec<u32> = (0..23).collect();
        let last = total_pages(items.len() as u64, 10);
        assert_eq!(last, 3);
        assert_eq!(paginate(&items, last, 10), vec![20, 21, 22]);
        assert!(paginate(&items, last + 1, 10).is_empty());
    }

    #[test]
    fn full_last_page_when_exact() {
        let items: Vec<u32> = (0..30).collect();
        assert_eq!(paginate(&items, 3, 10).len(), 10);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(4, 10), 30);
        assert_eq!(offset(0, 10), 0);
    }

    #[test]
    fn far_page_does_not_overflow() {
        let items = vec![1, 2, 3];
        assert!(paginate(&items, u32::MAX, 10).is_empty());
    }
}
