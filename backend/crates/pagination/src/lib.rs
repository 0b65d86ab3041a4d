//! Page-number pagination primitives shared by Foodgram endpoints.
//!
//! Requests carry a 1-based `page` and a `limit`. Repositories answer with a
//! [`PageSlice`] holding one page of items plus the total row count, and the
//! HTTP layer wraps that slice in a [`Page`] envelope whose `next` and
//! `previous` links preserve every other query parameter of the request URL.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Page size used when the caller does not supply `limit`.
pub const DEFAULT_LIMIT: u32 = 6;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

const PAGE_PARAM: &str = "page";

/// Errors raised while validating pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The page number was zero.
    #[error("page must be at least 1")]
    InvalidPage,
    /// The limit was zero or above [`MAX_LIMIT`].
    #[error("limit must be between 1 and {max}, got {limit}")]
    InvalidLimit {
        /// Limit supplied by the caller.
        limit: u32,
        /// Upper bound accepted by the server.
        max: u32,
    },
}

/// Validated page request.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 10).expect("valid request");
/// assert_eq!(request.offset(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate an explicit page number and limit.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when `page` is zero or `limit` falls outside
    /// `1..=MAX_LIMIT`.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::InvalidPage);
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(PaginationError::InvalidLimit {
                limit,
                max: MAX_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// Build a request from optional query parameters, applying defaults.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when a supplied value is out of range.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Result<Self, PaginationError> {
        Self::new(page.unwrap_or(1), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of rows to skip before the first item of this page.
    #[must_use]
    pub const fn offset(self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Whether rows exist beyond this page given the total row count.
    #[must_use]
    pub const fn has_next(self, total: u64) -> bool {
        (self.page as u64) * (self.limit as u64) < total
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of items together with the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<T> {
    /// Items on the requested page, in result order.
    pub items: Vec<T>,
    /// Number of rows matching the query across every page.
    pub total: u64,
}

impl<T> PageSlice<T> {
    /// Construct a slice from items and a total count.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    /// Slice with no items and a zero total.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    /// Transform every item while keeping the total.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageSlice<U> {
        PageSlice {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Paginated response envelope.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest, PageSlice};
/// use url::Url;
///
/// let url = Url::parse("http://localhost/api/v1/recipes?author=7").expect("url");
/// let request = PageRequest::new(1, 2).expect("request");
/// let page = Page::from_slice(PageSlice::new(vec![1, 2], 3), request, &url);
/// assert_eq!(page.count, 3);
/// assert_eq!(
///     page.next.as_deref(),
///     Some("http://localhost/api/v1/recipes?author=7&page=2")
/// );
/// assert!(page.previous.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Number of rows matching the query across every page.
    pub count: u64,
    /// Absolute link to the following page, if any.
    pub next: Option<String>,
    /// Absolute link to the preceding page, if any.
    pub previous: Option<String>,
    /// Items on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap a slice in an envelope with navigation links derived from
    /// `request_url`.
    #[must_use]
    pub fn from_slice(slice: PageSlice<T>, request: PageRequest, request_url: &Url) -> Self {
        let next = request
            .has_next(slice.total)
            .then(|| page_link(request_url, request.page() + 1));
        let previous = (request.page() > 1).then(|| page_link(request_url, request.page() - 1));
        Self {
            count: slice.total,
            next,
            previous,
            results: slice.items,
        }
    }
}

/// Rewrite `url` so it points at `page`, keeping other query parameters.
///
/// The first page is addressed without an explicit `page` parameter.
fn page_link(url: &Url, page: u32) -> String {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut link = url.clone();
    link.set_query(None);
    if !retained.is_empty() || page > 1 {
        let mut pairs = link.query_pairs_mut();
        for (key, value) in &retained {
            pairs.append_pair(key, value);
        }
        if page > 1 {
            pairs.append_pair(PAGE_PARAM, &page.to_string());
        }
    }
    link.to_string()
}

#[cfg(test)]
mod tests {
    //! Unit coverage for request validation and link construction.

    use super::*;
    use rstest::rstest;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("test url parses")
    }

    #[rstest]
    #[case(0, 6, PaginationError::InvalidPage)]
    #[case(1, 0, PaginationError::InvalidLimit { limit: 0, max: MAX_LIMIT })]
    #[case(1, 101, PaginationError::InvalidLimit { limit: 101, max: MAX_LIMIT })]
    fn rejects_out_of_range_values(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] expected: PaginationError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    fn defaults_apply_when_query_is_empty() {
        let request = PageRequest::from_query(None, None).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(1, 6, 0)]
    #[case(2, 6, 6)]
    #[case(4, 25, 75)]
    fn offset_skips_previous_pages(#[case] page: u32, #[case] limit: u32, #[case] offset: u64) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    fn middle_page_links_both_ways() {
        let request = PageRequest::new(2, 2).expect("valid request");
        let page = Page::from_slice(
            PageSlice::new(vec!["c", "d"], 5),
            request,
            &url("http://host/api/v1/recipes?tags=lunch&page=2&limit=2"),
        );
        assert_eq!(
            page.next.as_deref(),
            Some("http://host/api/v1/recipes?tags=lunch&limit=2&page=3")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://host/api/v1/recipes?tags=lunch&limit=2")
        );
    }

    #[rstest]
    fn last_page_has_no_next_link() {
        let request = PageRequest::new(3, 2).expect("valid request");
        let page = Page::from_slice(
            PageSlice::new(vec!["e"], 5),
            request,
            &url("http://host/api/v1/users?page=3&limit=2"),
        );
        assert!(page.next.is_none());
        assert_eq!(
            page.previous.as_deref(),
            Some("http://host/api/v1/users?limit=2&page=2")
        );
    }

    #[rstest]
    fn empty_slice_has_no_links() {
        let page: Page<u8> = Page::from_slice(
            PageSlice::empty(),
            PageRequest::default(),
            &url("http://host/api/v1/recipes"),
        );
        assert_eq!(page.count, 0);
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
        assert!(page.results.is_empty());
    }

    #[rstest]
    fn map_keeps_total() {
        let slice = PageSlice::new(vec![1, 2], 9).map(|value| value * 10);
        assert_eq!(slice, PageSlice::new(vec![10, 20], 9));
    }
}
