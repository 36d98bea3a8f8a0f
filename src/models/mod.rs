//! Data models for the eBay Buy APIs.
//!
//! - [`primitives`] - identifiers, environments, OAuth endpoints and scopes
//! - [`browse`] - items, item groups and search results
//! - [`offer`] - auction bidding

pub mod primitives;
pub mod browse;
pub mod offer;

pub use primitives::*;
pub use browse::*;
pub use offer::*;
