//! Page-number pagination primitives shared by list endpoints.
//!
//! Purpose: keep the paging defaults, the page-size cap, and the offset
//! arithmetic in one place so the service layer and both inbound adapters can
//! never disagree about them.
//!
//! A raw request carries `page` and `page_size` as plain integers where `0`
//! means "not supplied". [`PageRequest::normalised`] resolves the zeros to the
//! documented defaults; [`validate_page_size`] enforces the cap and is called
//! from request validation before normalisation happens.

use serde::Serialize;

/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound accepted for `page_size`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Error raised when a caller requests a window larger than [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("page_size must be less than or equal to {max}")]
pub struct PageSizeError {
    /// The page size the caller asked for.
    pub requested: u32,
    /// The configured cap.
    pub max: u32,
}

/// Check a raw `page_size` against [`MAX_PAGE_SIZE`].
///
/// Zero is accepted; it means "use the default" and is resolved later by
/// [`PageRequest::normalised`].
pub const fn validate_page_size(page_size: u32) -> Result<(), PageSizeError> {
    if page_size > MAX_PAGE_SIZE {
        return Err(PageSizeError {
            requested: page_size,
            max: MAX_PAGE_SIZE,
        });
    }
    Ok(())
}

/// A resolved page window: `page` and `page_size` are both non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Resolve raw paging inputs, substituting defaults for zero values.
    #[must_use]
    pub const fn normalised(page: u32, page_size: u32) -> Self {
        let page = if page == 0 { DEFAULT_PAGE } else { page };
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self { page, page_size }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Row limit to apply to the page query.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }

    /// Row offset to apply to the page query.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of results together with the unwindowed total.
///
/// `total` counts every row matching the filter, independent of the requested
/// window, so callers can derive the page count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paged<T> {
    /// The rows inside the requested window.
    pub items: Vec<T>,
    /// The 1-based page number that was served.
    pub page: u32,
    /// The window size that was served.
    pub page_size: u32,
    /// Total matching rows across all pages.
    pub total: u64,
}

impl<T> Paged<T> {
    /// Assemble a page envelope from a resolved window and its results.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 1, 20)]
    #[case(0, 5, 1, 5)]
    #[case(3, 0, 3, 20)]
    #[case(2, 50, 2, 50)]
    fn normalised_substitutes_defaults_for_zero(
        #[case] page: u32,
        #[case] page_size: u32,
        #[case] expected_page: u32,
        #[case] expected_page_size: u32,
    ) {
        let request = PageRequest::normalised(page, page_size);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.page_size(), expected_page_size);
    }

    #[rstest]
    #[case(1, 20, 0)]
    #[case(2, 20, 20)]
    #[case(2, 5, 5)]
    #[case(4, 25, 75)]
    fn offset_is_window_start(#[case] page: u32, #[case] page_size: u32, #[case] expected: u32) {
        assert_eq!(PageRequest::normalised(page, page_size).offset(), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(100)]
    fn page_sizes_up_to_the_cap_are_accepted(#[case] page_size: u32) {
        assert!(validate_page_size(page_size).is_ok());
    }

    #[rstest]
    fn page_sizes_over_the_cap_are_rejected() {
        let err = match validate_page_size(101) {
            Err(err) => err,
            Ok(()) => panic!("expected page size 101 to be rejected"),
        };
        assert_eq!(err.requested, 101);
        assert_eq!(err.max, MAX_PAGE_SIZE);
        assert_eq!(
            err.to_string(),
            "page_size must be less than or equal to 100"
        );
    }

    #[rstest]
    fn paged_envelope_carries_window_and_total() {
        let request = PageRequest::normalised(2, 5);
        let paged = Paged::new(vec![1_u64, 2, 3], request, 13);
        assert_eq!(paged.page, 2);
        assert_eq!(paged.page_size, 5);
        assert_eq!(paged.total, 13);
        assert_eq!(paged.items.len(), 3);
    }
}
