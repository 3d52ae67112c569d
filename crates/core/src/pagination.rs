//! Pagination state threaded through list queries.
//!
//! A page cursor is an opaque node-side iterator position. A cursor returned
//! by one endpoint family is meaningless to every other, so carriers are
//! tagged with a zero-sized [`PageFamily`] marker: handing a cursor to the
//! wrong family is a compile error rather than a silent empty page.

use std::marker::PhantomData;

/// Page size applied when a caller provides no carrier and the query handle
/// carries no override.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// The endpoint family a page cursor belongs to.
pub trait PageFamily {
    /// Family name used in diagnostics.
    const NAME: &'static str;
}

/// Default page shape carried by a query handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageDefaults {
    /// Page size.
    pub limit: u64,
    /// Ask the node to count the full result set.
    pub count_total: bool,
    /// Iterate in reverse order.
    pub reverse: bool,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            count_total: false,
            reverse: false,
        }
    }
}

/// A page request for the endpoint family `F`.
///
/// Passed verbatim to the remote procedure channel; the SDK never rewrites a
/// caller-supplied carrier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest<F: PageFamily> {
    /// Opaque continuation cursor. `None` starts from the beginning.
    ///
    /// Invariant: when present, this is exactly the value returned by a
    /// prior call in the same family.
    pub key: Option<Vec<u8>>,
    /// Page size.
    pub limit: u64,
    /// Ask the node to count the full result set.
    pub count_total: bool,
    /// Iterate in reverse order.
    pub reverse: bool,
    _family: PhantomData<F>,
}

impl<F: PageFamily> PageRequest<F> {
    /// A first-page request with the given page size.
    pub fn with_limit(limit: u64) -> Self {
        Self {
            key: None,
            limit,
            count_total: false,
            reverse: false,
            _family: PhantomData,
        }
    }

    /// A first-page request shaped by a handle's defaults.
    pub fn from_defaults(defaults: &PageDefaults) -> Self {
        Self {
            key: None,
            limit: defaults.limit,
            count_total: defaults.count_total,
            reverse: defaults.reverse,
            _family: PhantomData,
        }
    }

    /// Continue from an opaque cursor returned by a prior call of the same
    /// family.
    pub fn starting_after(mut self, key: Vec<u8>) -> Self {
        self.key = Some(key);
        self
    }

    /// Request a total count alongside the page.
    pub fn counting_total(mut self) -> Self {
        self.count_total = true;
        self
    }

    /// Iterate in reverse order.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Move this carrier into another endpoint family.
    ///
    /// Cursors are only meaningful within the family that produced them.
    /// This is an explicit escape hatch for the rare caller that knows two
    /// endpoints iterate the same keyspace; it shows up in review, unlike an
    /// untagged carrier drifting between endpoints.
    pub fn retag<G: PageFamily>(self) -> PageRequest<G> {
        PageRequest {
            key: self.key,
            limit: self.limit,
            count_total: self.count_total,
            reverse: self.reverse,
            _family: PhantomData,
        }
    }
}

impl<F: PageFamily> Default for PageRequest<F> {
    fn default() -> Self {
        Self::from_defaults(&PageDefaults::default())
    }
}

/// The pagination half of a list response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageResponse<F: PageFamily> {
    /// Cursor of the next page, absent on the last page.
    pub next_key: Option<Vec<u8>>,
    /// Total result count, when the request asked for one.
    pub total: Option<u64>,
    _family: PhantomData<F>,
}

impl<F: PageFamily> PageResponse<F> {
    /// A page response as returned by the node.
    pub fn new(next_key: Option<Vec<u8>>, total: Option<u64>) -> Self {
        Self {
            next_key,
            total,
            _family: PhantomData,
        }
    }

    /// The continuation request for the next page, shaped like `prior`.
    ///
    /// Returns `None` once the result set is exhausted.
    pub fn into_request(self, prior: &PageRequest<F>) -> Option<PageRequest<F>> {
        self.next_key.map(|key| PageRequest {
            key: Some(key),
            limit: prior.limit,
            count_total: prior.count_total,
            reverse: prior.reverse,
            _family: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum TestFamily {}

    impl PageFamily for TestFamily {
        const NAME: &'static str = "test";
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum OtherFamily {}

    impl PageFamily for OtherFamily {
        const NAME: &'static str = "other";
    }

    #[test]
    fn test_defaults_shape() {
        let page: PageRequest<TestFamily> = PageRequest::default();
        assert_eq!(page.key, None);
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
        assert!(!page.count_total);
        assert!(!page.reverse);
    }

    #[test]
    fn test_continuation_keeps_request_shape() {
        let prior =
            PageRequest::<TestFamily>::with_limit(25).counting_total();
        let response =
            PageResponse::<TestFamily>::new(Some(vec![1, 2, 3]), Some(80));
        let next = response.into_request(&prior).unwrap();
        assert_eq!(next.key.as_deref(), Some(&[1_u8, 2, 3][..]));
        assert_eq!(next.limit, 25);
        assert!(next.count_total);
    }

    #[test]
    fn test_last_page_has_no_continuation() {
        let prior = PageRequest::<TestFamily>::with_limit(25);
        let response = PageResponse::<TestFamily>::new(None, None);
        assert_eq!(response.into_request(&prior), None);
    }

    #[test]
    fn test_retag_preserves_cursor_state() {
        let page = PageRequest::<TestFamily>::with_limit(7)
            .starting_after(vec![9])
            .reversed();
        let retagged: PageRequest<OtherFamily> = page.retag();
        assert_eq!(retagged.key.as_deref(), Some(&[9_u8][..]));
        assert_eq!(retagged.limit, 7);
        assert!(retagged.reverse);
    }
}
