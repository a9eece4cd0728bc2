//! Query normalization for listing and search requests.
//!
//! Normalization never fails: malformed page numbers fall back to page 1 and
//! blank search terms are treated as absent.

/// Fixed number of movies per page. Not client-configurable.
pub const PAGE_SIZE: u32 = 10;

/// Parse a raw page parameter into a 1-based page number.
///
/// Only the leading run of digits counts, so `3abc` is page 3 and `2.5` is
/// page 2. No digits, a minus sign, or zero yields `1`.
pub fn normalize_page(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 1;
    };
    let raw = raw.trim_start();
    let unsigned = raw.strip_prefix('+').unwrap_or(raw);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return 1;
    }

    // Overflowing digit runs are still positive.
    let page = digits.parse::<u64>().unwrap_or(u64::MAX);
    if page == 0 {
        return 1;
    }
    u32::try_from(page).unwrap_or(u32::MAX)
}

/// Trim a raw search term. Empty after trimming is the same as absent.
pub fn normalize_term(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Validated, request-scoped description of what to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub term: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl QueryDescriptor {
    pub fn from_raw(term: Option<&str>, page: Option<&str>) -> Self {
        Self {
            term: normalize_term(term),
            page: normalize_page(page),
            page_size: PAGE_SIZE,
        }
    }

    /// `true` when there is no search term and the plain listing path applies.
    pub fn is_listing(&self) -> bool {
        self.term.is_none()
    }

    /// Number of records to skip for this page.
    pub fn offset(&self) -> u64 {
        crate::pagination::offset(self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_page_defaults_to_one() {
        assert_eq!(normalize_page(Some("abc")), 1);
    }

    #[test]
    fn negative_page_defaults_to_one() {
        assert_eq!(normalize_page(Some("-5")), 1);
    }

    #[test]
    fn zero_and_missing_page_default_to_one() {
        assert_eq!(normalize_page(Some("0")), 1);
        assert_eq!(normalize_page(None), 1);
    }

    #[test]
    fn numeric_page_is_kept() {
        assert_eq!(normalize_page(Some("3")), 3);
        assert_eq!(normalize_page(Some(" 7 ")), 7);
    }

    #[test]
    fn leading_digits_are_used() {
        assert_eq!(normalize_page(Some("3abc")), 3);
        assert_eq!(normalize_page(Some("2.5")), 2);
        assert_eq!(normalize_page(Some("+4")), 4);
        assert_eq!(normalize_page(Some("abc3")), 1);
        assert_eq!(normalize_page(Some("")), 1);
    }

    #[test]
    fn huge_page_saturates() {
        assert_eq!(normalize_page(Some("99999999999")), u32::MAX);
    }

    #[test]
    fn term_is_trimmed() {
        assert_eq!(normalize_term(Some("  matrix ")), Some("matrix".to_string()));
    }

    #[test]
    fn blank_term_is_absent() {
        assert_eq!(normalize_term(Some("   ")), None);
        assert_eq!(normalize_term(None), None);
    }

    #[test]
    fn descriptor_selects_listing_path_without_term() {
        let q = QueryDescriptor::from_raw(Some(""), Some("2"));
        assert!(q.is_listing());
        assert_eq!(q.page, 2);
        assert_eq!(q.page_size, PAGE_SIZE);
        assert_eq!(q.offset(), 10);

        let q = QueryDescriptor::from_raw(Some("alien"), None);
        assert!(!q.is_listing());
        assert_eq!(q.offset(), 0);
    }
}
