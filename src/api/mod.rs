//! API service modules for eBay endpoints.
//!
//! Services are grouped the way eBay groups its APIs: [`BuyApi`] holds the
//! Browse and Offer services. Each service method builds one request, sends
//! it under the caller's [`Context`](crate::Context) and decodes the result.

mod browse;
mod offer;

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::client::ClientInner;

pub use browse::{opts, BrowseService};
pub use offer::OfferService;

/// Unreserved characters stay as they are, as does `|`, which eBay uses in
/// RESTful item IDs (`v1|110012345678|0`).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'|');

/// Percent-encode an ID for use as a single path segment.
pub(crate) fn path_segment(id: &str) -> String {
    utf8_percent_encode(id, PATH_SEGMENT).to_string()
}

/// The Buy API group.
pub struct BuyApi {
    inner: Arc<ClientInner>,
}

impl BuyApi {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Item lookup and search.
    pub fn browse(&self) -> BrowseService {
        BrowseService::new(self.inner.clone())
    }

    /// Auction bidding.
    pub fn offer(&self) -> OfferService {
        OfferService::new(self.inner.clone())
    }
}
