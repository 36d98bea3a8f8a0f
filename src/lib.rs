//! # ebay-rs
//!
//! An async client for the eBay Buy REST APIs.
//!
//! Every call goes through the same pipeline: a request is built against
//! the client's base URL, per-request [`Opt`]s add query parameters and
//! headers, a transport sends it (attaching an OAuth2 bearer token when
//! configured), and non-2xx responses are decoded into eBay's structured
//! error list.
//!
//! ## Features
//!
//! - **Authentication**: client-credentials and authorization-code grants
//!   on top of the `oauth2` crate, with token reuse and refresh
//! - **Browse API**: item lookup by ID, legacy ID and group, and search
//! - **Offer API**: auction bidding state and proxy bids
//! - **Errors**: eBay error codes exposed for matching, with a dump of the
//!   failed request
//! - **Cancellation**: every call runs under a [`Context`] that can be
//!   canceled or given a deadline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ebay_rs::api::opts;
//! use ebay_rs::{Context, EbayClient, Environment};
//!
//! #[tokio::main]
//! async fn main() -> ebay_rs::Result<()> {
//!     let client = EbayClient::from_client_credentials(
//!         "client-id",
//!         "client-secret",
//!         Environment::Sandbox,
//!     )?;
//!     let ctx = Context::new();
//!
//!     let page = client
//!         .buy()
//!         .browse()
//!         .search(&ctx, &[opts::search("drone"), opts::limit(5)])
//!         .await?;
//!     println!("{} matches", page.total);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Handling eBay errors
//!
//! ```rust,no_run
//! use ebay_rs::{is_error, Context, EbayClient};
//!
//! # async fn example(client: EbayClient) -> ebay_rs::Result<()> {
//! // 11001: the item does not exist
//! let result = client
//!     .buy()
//!     .browse()
//!     .get_item_by_legacy_id(&Context::new(), "000000000000", &[])
//!     .await;
//!
//! match result {
//!     Err(ref err) if is_error(Some(err), &[11001]) => println!("no such item"),
//!     other => println!("{:?}", other?.title),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod opt;

// Re-export primary types at crate root for convenience
pub use error::{is_error, Error, ErrorData, ErrorEntry, ErrorParameter, Result};
pub use models::*;
pub use client::{check_response, ClientConfig, Context, EbayClient, HttpTransport, Request};
pub use opt::Opt;
pub use reqwest::Method;
pub use rust_decimal::Decimal;

/// Prelude module for convenient imports.
///
/// ```rust
/// use ebay_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::opts;
    pub use crate::auth::{OAuth2Transport, OAuthConfig, Token, TokenSource};
    pub use crate::client::{ClientConfig, Context, EbayClient};
    pub use crate::error::{is_error, Error, Result};
    pub use crate::models::{
        Amount, Environment, Item, ItemId, Items, MarketplaceId, PlaceProxyBid, ProxyBid, Search,
    };
    pub use crate::opt::Opt;
    pub use rust_decimal::Decimal;
}
