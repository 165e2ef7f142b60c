//! Offset pagination primitives shared by list endpoints.
//!
//! [`PageRequest`] validates a one-based page number and a positive page size
//! and converts them into the skip/take pair a query layer needs.
//! [`Paged`] is the generic page of results returned to clients, carrying the
//! total match count alongside the items of the current page.
//!
//! # Examples
//! ```
//! use pagination::{PageRequest, Paged};
//!
//! let request = PageRequest::new(2, 3).expect("valid page request");
//! assert_eq!(request.offset(), 3);
//!
//! let page = Paged::new(vec!["d", "e", "f"], 7, request);
//! assert_eq!(page.current_page_data_count, 3);
//! assert_eq!(page.total_count, 7);
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when a client does not supply one.
pub const DEFAULT_PAGE_NUMBER: i32 = 1;
/// Page size used when a client does not supply one.
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Errors raised while validating a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page number was below one.
    #[error("Page number must be greater than or equal to 1.")]
    InvalidPageNumber {
        /// The rejected page number.
        value: i32,
    },
    /// The page size was zero or negative.
    #[error("Page size must be greater than 0.")]
    InvalidPageSize {
        /// The rejected page size.
        value: i32,
    },
}

/// Validated one-based page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Validate raw page coordinates.
    ///
    /// The page number is checked before the page size, so a request with
    /// both values out of range reports the page number.
    ///
    /// # Errors
    /// Returns [`PageRequestError::InvalidPageNumber`] when `number < 1` and
    /// [`PageRequestError::InvalidPageSize`] when `size <= 0`.
    pub fn new(number: i32, size: i32) -> Result<Self, PageRequestError> {
        let number = u32::try_from(number)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(PageRequestError::InvalidPageNumber { value: number })?;
        let size = u32::try_from(size)
            .ok()
            .filter(|value| *value >= 1)
            .ok_or(PageRequestError::InvalidPageSize { value: size })?;
        Ok(Self { number, size })
    }

    /// One-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items preceding this page: `(number - 1) * size`.
    ///
    /// Both factors fit in 31 bits, so the product always fits in `u64`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.size)
    }

    /// Number of items to take for this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER.unsigned_abs(),
            size: DEFAULT_PAGE_SIZE.unsigned_abs(),
        }
    }
}

/// One page of query results.
///
/// `page_number` and `page_size` echo the request even when the page lies
/// beyond the last match; they are never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    /// Number of items matching the query across all pages.
    pub total_count: u64,
    /// Number of items on this page.
    pub current_page_data_count: usize,
    /// Requested one-based page number.
    pub page_number: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Items on this page, in query order.
    pub data: Vec<T>,
}

impl<T> Paged<T> {
    /// Build a page from the fetched items and the total match count.
    #[must_use]
    pub fn new(data: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        Self {
            total_count,
            current_page_data_count: data.len(),
            page_number: request.number(),
            page_size: request.size(),
            data,
        }
    }

    /// Build the page returned when nothing matches the query.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Convert every item while keeping the page counters.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        let Self {
            total_count,
            current_page_data_count,
            page_number,
            page_size,
            data,
        } = self;
        Paged {
            total_count,
            current_page_data_count,
            page_number,
            page_size,
            data: data.into_iter().map(f).collect(),
        }
    }

    /// Whether the query matched nothing at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page validation and paged result construction.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10)]
    #[case(-3, 10)]
    #[case(0, 0)]
    #[case(i32::MIN, -1)]
    fn rejects_page_numbers_below_one(#[case] number: i32, #[case] size: i32) {
        let err = PageRequest::new(number, size).expect_err("page number is invalid");
        assert_eq!(err, PageRequestError::InvalidPageNumber { value: number });
        assert_eq!(
            err.to_string(),
            "Page number must be greater than or equal to 1."
        );
    }

    #[rstest]
    #[case(1, 0)]
    #[case(4, -10)]
    fn rejects_non_positive_page_sizes(#[case] number: i32, #[case] size: i32) {
        let err = PageRequest::new(number, size).expect_err("page size is invalid");
        assert_eq!(err, PageRequestError::InvalidPageSize { value: size });
        assert_eq!(err.to_string(), "Page size must be greater than 0.");
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(5, 3, 12)]
    #[case(i32::MAX, i32::MAX, 4_611_686_011_984_936_962)]
    fn offset_skips_previous_pages(#[case] number: i32, #[case] size: i32, #[case] offset: u64) {
        let request = PageRequest::new(number, size).expect("valid request");
        assert_eq!(request.offset(), offset);
        assert_eq!(request.limit(), u64::from(size.unsigned_abs()));
    }

    #[rstest]
    fn default_request_is_first_page_of_ten() {
        let request = PageRequest::default();
        assert_eq!(request.number(), 1);
        assert_eq!(request.size(), 10);
    }

    #[rstest]
    fn paged_counts_items_and_echoes_request() {
        let request = PageRequest::new(9, 5).expect("valid request");
        let page = Paged::new(vec![1, 2], 42, request);

        assert_eq!(page.current_page_data_count, 2);
        assert_eq!(page.total_count, 42);
        assert_eq!(page.page_number, 9);
        assert_eq!(page.page_size, 5);
    }

    #[rstest]
    fn empty_page_reports_no_matches() {
        let page: Paged<u8> = Paged::empty(PageRequest::default());
        assert!(page.is_empty());
        assert_eq!(page.current_page_data_count, 0);
        assert!(page.data.is_empty());
    }

    #[rstest]
    fn map_keeps_counters() {
        let request = PageRequest::new(1, 2).expect("valid request");
        let page = Paged::new(vec![1, 2], 3, request).map(|n| n * 10);
        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.current_page_data_count, 2);
    }

    #[rstest]
    fn serialises_with_camel_case_fields() {
        let page = Paged::new(vec!["a"], 1, PageRequest::default());
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(value["totalCount"], 1);
        assert_eq!(value["currentPageDataCount"], 1);
        assert_eq!(value["pageNumber"], 1);
        assert_eq!(value["pageSize"], 10);
        assert_eq!(value["data"][0], "a");
    }
}
